//! Parser for the tunec language.
//!
//! Recursive descent over the token stream, one statement per line. Blank
//! lines and comment-only lines collapse to consecutive newline tokens and
//! are skipped between statements, never inside one.

use super::ast::*;
use super::error::ParseError;
use super::note::parse_note_spec;
use super::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse the whole token stream. Empty input yields no statements.
    pub fn parse(&mut self) -> Result<Vec<Statement>, ParseError> {
        let statements = self.parse_block()?;
        if !self.is_at_end() {
            return Err(self.error("a statement"));
        }
        Ok(statements)
    }

    /// Parse statements until end of input or an unmatched `}`.
    fn parse_block(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();

        loop {
            self.skip_newlines();
            if self.is_at_end() || self.check(&TokenKind::RBrace) {
                break;
            }
            statements.push(self.parse_statement()?);
            self.expect_terminator()?;
        }

        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let line = self.peek().line;
        let kind = match &self.peek().kind {
            TokenKind::Tempo => {
                self.advance();
                self.expect(TokenKind::Colon)?;
                StatementKind::TempoDecl {
                    bpm: self.expect_integer()?,
                }
            }
            TokenKind::Volume => {
                self.advance();
                self.expect(TokenKind::Colon)?;
                StatementKind::VolumeDecl {
                    level: self.expect_integer()?,
                }
            }
            TokenKind::Instrument => {
                self.advance();
                self.expect(TokenKind::Colon)?;
                StatementKind::InstrumentDecl {
                    name: self.expect_ident()?,
                }
            }
            TokenKind::Play => {
                self.advance();
                let note = self.expect_note()?;
                self.expect(TokenKind::Colon)?;
                StatementKind::PlayNote {
                    note,
                    duration: self.parse_fraction()?,
                }
            }
            TokenKind::Chord => {
                self.advance();
                let notes = self.parse_chord_body()?;
                self.expect(TokenKind::Colon)?;
                StatementKind::PlayChord {
                    notes,
                    duration: self.parse_fraction()?,
                }
            }
            TokenKind::Rest => {
                self.advance();
                self.expect(TokenKind::Colon)?;
                StatementKind::Rest {
                    duration: self.parse_fraction()?,
                }
            }
            TokenKind::Repeat => self.parse_repeat()?,
            _ => return Err(self.error("a statement")),
        };

        Ok(Statement::new(kind, line))
    }

    /// `{ NOTE (, NOTE)* }`: at least one note.
    fn parse_chord_body(&mut self) -> Result<Vec<NoteSpec>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut notes = vec![self.expect_note()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            notes.push(self.expect_note()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(notes)
    }

    /// `Repeat COUNT {` NEWLINE statements `}`
    fn parse_repeat(&mut self) -> Result<StatementKind, ParseError> {
        self.expect(TokenKind::Repeat)?;
        let count = self.expect_integer()?;
        self.expect(TokenKind::LBrace)?;
        if !self.check(&TokenKind::Newline) {
            return Err(self.error("end of line after '{'"));
        }
        let body = self.parse_block()?;
        self.expect(TokenKind::RBrace)?;
        Ok(StatementKind::Repeat { count, body })
    }

    /// `INTEGER / INTEGER`
    fn parse_fraction(&mut self) -> Result<Fraction, ParseError> {
        let numerator = self.expect_fraction_part()?;
        self.expect(TokenKind::Slash)?;
        let denominator = self.expect_fraction_part()?;
        Ok(Fraction::new(numerator, denominator))
    }

    fn expect_fraction_part(&mut self) -> Result<i64, ParseError> {
        match self.peek().kind {
            TokenKind::Integer(v) => {
                self.advance();
                Ok(v)
            }
            _ => Err(self.error("a fraction like 1/4")),
        }
    }

    /// After a statement: a newline, end of input, or the `}` closing a block.
    fn expect_terminator(&mut self) -> Result<(), ParseError> {
        match self.peek().kind {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof | TokenKind::RBrace => Ok(()),
            _ => Err(self.error("end of line")),
        }
    }

    // --- Utility methods ---

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> &Token {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len() || self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn skip_newlines(&mut self) {
        while !self.is_at_end() && self.peek().kind == TokenKind::Newline {
            self.pos += 1;
        }
    }

    fn error(&self, expected: &str) -> ParseError {
        let t = self.peek();
        ParseError::new(expected, t.kind.describe(), t.line, t.col)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&Token, ParseError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.error(&kind.describe()))
        }
    }

    fn expect_integer(&mut self) -> Result<i64, ParseError> {
        match self.peek().kind {
            TokenKind::Integer(v) => {
                self.advance();
                Ok(v)
            }
            _ => Err(self.error("an integer")),
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        match &self.peek().kind {
            TokenKind::Ident(s) => {
                let name = s.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error("an instrument name")),
        }
    }

    fn expect_note(&mut self) -> Result<NoteSpec, ParseError> {
        let spec = match &self.peek().kind {
            TokenKind::Note(name) => parse_note_spec(name),
            _ => None,
        };
        match spec {
            Some(spec) => {
                self.advance();
                Ok(spec)
            }
            None => Err(self.error("a note like C4")),
        }
    }
}
