//! Error types for the tunec compiler.
//!
//! Every stage fails fast with a structured value. The `Display` impls are
//! what the binary prints; callers that want their own rendering can match
//! on the fields instead.

use std::fmt;

use crate::event::MAX_PROGRAM_SECONDS;

/// An unrecognized character in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub line: usize,
    pub col: usize,
    pub character: char,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}] lex error: unexpected character '{}'",
            self.line,
            self.col,
            self.character.escape_debug()
        )
    }
}

impl std::error::Error for LexError {}

/// A grammar violation: the parser wanted one thing and found another.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub line: usize,
    pub col: usize,
    pub expected: String,
    pub found: String,
}

impl ParseError {
    pub fn new(expected: impl Into<String>, found: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            expected: expected.into(),
            found: found.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}] parse error: expected {}, found {}",
            self.line, self.col, self.expected, self.found
        )
    }
}

impl std::error::Error for ParseError {}

/// What the semantic analyzer rejected, with the offending value.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticErrorKind {
    InvalidTempo(i64),
    InvalidVolume(i64),
    UnknownInstrument(String),
    /// Octave outside 0..=9; `note` is the literal as written.
    InvalidNote { note: String },
    InvalidDuration { numerator: i64, denominator: i64 },
    EmptyChord,
    InvalidRepeatCount(i64),
    EmptyRepeat,
    /// The program would run past the length limit; `seconds` is the
    /// running total at the offending event.
    ProgramTooLong { seconds: f64 },
    /// Repeat blocks unroll into more than `limit` statements.
    ProgramTooLarge { limit: usize },
}

/// A statement that is grammatical but not legal.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticError {
    pub line: usize,
    pub kind: SemanticErrorKind,
}

impl SemanticError {
    pub fn new(kind: SemanticErrorKind, line: usize) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for SemanticErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticErrorKind::InvalidTempo(bpm) => {
                write!(f, "invalid tempo {bpm}: must be a positive number of BPM")
            }
            SemanticErrorKind::InvalidVolume(level) => {
                write!(f, "invalid volume {level}: must be between 0 and 100")
            }
            SemanticErrorKind::UnknownInstrument(name) => write!(
                f,
                "unknown instrument '{name}': expected one of sine, square, triangle, sawtooth, piano"
            ),
            SemanticErrorKind::InvalidNote { note } => {
                write!(f, "invalid note '{note}': octave must be within 0..=9")
            }
            SemanticErrorKind::InvalidDuration {
                numerator,
                denominator,
            } => write!(
                f,
                "invalid duration {numerator}/{denominator}: numerator and denominator must be positive"
            ),
            SemanticErrorKind::EmptyChord => write!(f, "chord must contain at least one note"),
            SemanticErrorKind::InvalidRepeatCount(count) => {
                write!(f, "invalid repeat count {count}: must be between 1 and 100")
            }
            SemanticErrorKind::EmptyRepeat => write!(f, "repeat block cannot be empty"),
            SemanticErrorKind::ProgramTooLong { seconds } => write!(
                f,
                "program runs {seconds:.1}s, longer than the {MAX_PROGRAM_SECONDS}s limit"
            ),
            SemanticErrorKind::ProgramTooLarge { limit } => {
                write!(f, "repeat blocks expand to more than {limit} statements")
            }
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] semantic error: {}", self.line, self.kind)
    }
}

impl std::error::Error for SemanticError {}

/// Any error that stops a compilation.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    Lex(LexError),
    Parse(ParseError),
    Semantic(SemanticError),
}

impl CompileError {
    /// Source line the error points at.
    pub fn line(&self) -> usize {
        match self {
            CompileError::Lex(e) => e.line,
            CompileError::Parse(e) => e.line,
            CompileError::Semantic(e) => e.line,
        }
    }

    /// The semantic error kind, if this is a semantic error.
    pub fn semantic_kind(&self) -> Option<&SemanticErrorKind> {
        match self {
            CompileError::Semantic(e) => Some(&e.kind),
            _ => None,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(e) => e.fmt(f),
            CompileError::Parse(e) => e.fmt(f),
            CompileError::Semantic(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Lex(e) => Some(e),
            CompileError::Parse(e) => Some(e),
            CompileError::Semantic(e) => Some(e),
        }
    }
}

impl From<LexError> for CompileError {
    fn from(e: LexError) -> Self {
        CompileError::Lex(e)
    }
}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        CompileError::Parse(e)
    }
}

impl From<SemanticError> for CompileError {
    fn from(e: SemanticError) -> Self {
        CompileError::Semantic(e)
    }
}
