//! Compiler front end: source text → tokens → AST → resolved events →
//! instructions.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod note;
pub mod parser;
pub mod semantic;
pub mod state;
pub mod token;

pub use ast::*;
pub use error::{CompileError, LexError, ParseError, SemanticError, SemanticErrorKind};
pub use semantic::{EventKind, ResolvedEvent, MAX_REPEAT, MAX_UNROLLED_STATEMENTS};
pub use state::CompilerState;
pub use token::{Token, TokenKind};

use serde::Serialize;
use tracing::debug;

use crate::event::Instruction;
use lexer::Lexer;
use parser::Parser;
use semantic::Analyzer;

/// The compiler.
///
/// Each stage is exposed on its own so callers can stop early or inspect
/// intermediate results; [`compile`](Compiler::compile) runs them all.
pub struct Compiler;

impl Compiler {
    /// Lex source text into tokens.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
        let tokens = Lexer::new(source).tokenize()?;
        debug!(tokens = tokens.len(), "lexing finished");
        Ok(tokens)
    }

    /// Parse source text into statements.
    pub fn parse(source: &str) -> Result<Vec<Statement>, CompileError> {
        let tokens = Self::tokenize(source)?;
        Self::parse_tokens(tokens)
    }

    /// Parse an already lexed token stream.
    pub fn parse_tokens(tokens: Vec<Token>) -> Result<Vec<Statement>, CompileError> {
        let statements = Parser::new(tokens).parse()?;
        debug!(statements = statements.len(), "parsing finished");
        Ok(statements)
    }

    /// Validate statements and resolve them into events.
    pub fn analyze(statements: &[Statement]) -> Result<Vec<ResolvedEvent>, CompileError> {
        Ok(Analyzer::new().analyze(statements)?)
    }

    /// Run the whole front end on source text.
    pub fn compile(source: &str) -> Result<Vec<Instruction>, CompileError> {
        let statements = Self::parse(source)?;
        let events = Self::analyze(&statements)?;
        Ok(codegen::generate(&events))
    }

    /// Run the whole front end and keep every intermediate artifact.
    pub fn compile_traced(source: &str) -> Result<Compilation, CompileError> {
        let tokens = Self::tokenize(source)?;
        let statements = Self::parse_tokens(tokens.clone())?;
        let events = Self::analyze(&statements)?;
        let instructions = codegen::generate(&events);
        Ok(Compilation {
            tokens,
            statements,
            events,
            instructions,
        })
    }
}

/// Every stage's output from one compilation, for diagnostic display.
#[derive(Debug, Clone, Serialize)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub statements: Vec<Statement>,
    pub events: Vec<ResolvedEvent>,
    pub instructions: Vec<Instruction>,
}

impl Compilation {
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
