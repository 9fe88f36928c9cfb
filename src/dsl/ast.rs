//! Abstract Syntax Tree for the tunec language.
//!
//! One [`Statement`] per source line, in source order. The parser only
//! guarantees grammatical shape; values such as octaves, volumes and
//! durations are checked later by the semantic analyzer.

use serde::Serialize;

/// A statement together with the line it started on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub line: usize,
    pub kind: StatementKind,
}

impl Statement {
    pub fn new(kind: StatementKind, line: usize) -> Self {
        Self { line, kind }
    }
}

/// Every statement shape the language has.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StatementKind {
    TempoDecl { bpm: i64 },
    VolumeDecl { level: i64 },
    InstrumentDecl { name: String },
    PlayNote { note: NoteSpec, duration: Fraction },
    PlayChord { notes: Vec<NoteSpec>, duration: Fraction },
    Rest { duration: Fraction },
    Repeat { count: i64, body: Vec<Statement> },
}

/// A note name split into its parts, e.g. `Eb4`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteSpec {
    pub letter: Letter,
    pub accidental: Accidental,
    /// Saturates at `u32::MAX` for octaves written with too many digits.
    pub octave: u32,
    /// The literal as written in source.
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

/// A duration as a fraction of a whole note (`1/4` is a quarter note).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// The fraction as a floating-point number of whole notes.
    pub fn as_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
