//! Token types for the tunec lexer.

use serde::Serialize;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token (empty for newline and end-of-input).
    pub text: String,
    pub line: usize,
    pub col: usize,
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenKind {
    // Keywords
    Tempo,
    Volume,
    Instrument,
    Play,
    Chord,
    Rest,
    Repeat,

    // Literals
    Note(String), // e.g. "C4", "Eb3", "F#5"
    Ident(String),
    Integer(i64),

    // Punctuation
    Colon,
    LBrace,
    RBrace,
    Comma,
    Slash,

    // Special
    Newline,
    Eof,
}

impl TokenKind {
    /// Short human-readable description used in parse diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Tempo => "'Tempo'".to_string(),
            TokenKind::Volume => "'Volume'".to_string(),
            TokenKind::Instrument => "'Instrument'".to_string(),
            TokenKind::Play => "'Play'".to_string(),
            TokenKind::Chord => "'Chord'".to_string(),
            TokenKind::Rest => "'Rest'".to_string(),
            TokenKind::Repeat => "'Repeat'".to_string(),
            TokenKind::Note(n) => format!("note '{n}'"),
            TokenKind::Ident(s) => format!("identifier '{s}'"),
            TokenKind::Integer(v) => format!("integer {v}"),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Slash => "'/'".to_string(),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}
