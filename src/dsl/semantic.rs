//! Semantic analysis: validates statements, resolves notes to frequencies
//! and folds declarations into a [`CompilerState`].
//!
//! The output is a flat list of [`ResolvedEvent`]s: repeat blocks are
//! unrolled and every event carries a copy of the settings in effect where
//! it was played.

use serde::Serialize;
use tracing::debug;

use crate::event::MAX_PROGRAM_SECONDS;
use crate::instrument::Instrument;

use super::ast::{Fraction, NoteSpec, Statement, StatementKind};
use super::error::{SemanticError, SemanticErrorKind};
use super::state::CompilerState;

/// Largest accepted `Repeat` count.
pub const MAX_REPEAT: i64 = 100;

/// Most statements visited once repeats are unrolled.
pub const MAX_UNROLLED_STATEMENTS: usize = 100_000;

/// What a resolved event plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    Note,
    Chord,
    Rest,
}

/// A validated playable statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEvent {
    pub line: usize,
    pub kind: EventKind,
    /// Frequencies in Hz, in source order; empty for a rest.
    pub frequencies: Vec<f64>,
    pub duration: Fraction,
    /// Tempo, volume and instrument in effect for this event.
    pub settings: CompilerState,
}

/// Walks statements in order against one compiler state.
pub struct Analyzer {
    state: CompilerState,
    events: Vec<ResolvedEvent>,
    /// Running program length in seconds.
    seconds: f64,
    visited: usize,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            state: CompilerState::new(),
            events: Vec::new(),
            seconds: 0.0,
            visited: 0,
        }
    }

    /// Analyze a whole program, consuming the analyzer and its state.
    pub fn analyze(mut self, statements: &[Statement]) -> Result<Vec<ResolvedEvent>, SemanticError> {
        self.visit_all(statements)?;
        debug!(
            events = self.events.len(),
            seconds = self.seconds,
            tempo = self.state.tempo_bpm,
            volume = self.state.volume,
            instrument = self.state.instrument.name(),
            "semantic analysis finished"
        );
        Ok(self.events)
    }

    fn visit_all(&mut self, statements: &[Statement]) -> Result<(), SemanticError> {
        for stmt in statements {
            self.visit(stmt)?;
        }
        Ok(())
    }

    fn visit(&mut self, stmt: &Statement) -> Result<(), SemanticError> {
        let line = stmt.line;
        self.visited += 1;
        if self.visited > MAX_UNROLLED_STATEMENTS {
            return Err(err(
                SemanticErrorKind::ProgramTooLarge {
                    limit: MAX_UNROLLED_STATEMENTS,
                },
                line,
            ));
        }
        match &stmt.kind {
            StatementKind::TempoDecl { bpm } => {
                self.state.tempo_bpm = u32::try_from(*bpm)
                    .ok()
                    .filter(|&b| b > 0)
                    .ok_or_else(|| err(SemanticErrorKind::InvalidTempo(*bpm), line))?;
            }
            StatementKind::VolumeDecl { level } => {
                self.state.volume = u8::try_from(*level)
                    .ok()
                    .filter(|&v| v <= 100)
                    .ok_or_else(|| err(SemanticErrorKind::InvalidVolume(*level), line))?;
            }
            StatementKind::InstrumentDecl { name } => {
                self.state.instrument = name
                    .parse::<Instrument>()
                    .map_err(|_| err(SemanticErrorKind::UnknownInstrument(name.clone()), line))?;
            }
            StatementKind::PlayNote { note, duration } => {
                let freq = resolve_note(note, line)?;
                self.push(EventKind::Note, vec![freq], *duration, line)?;
            }
            StatementKind::PlayChord { notes, duration } => {
                if notes.is_empty() {
                    return Err(err(SemanticErrorKind::EmptyChord, line));
                }
                let freqs = notes
                    .iter()
                    .map(|n| resolve_note(n, line))
                    .collect::<Result<Vec<f64>, _>>()?;
                self.push(EventKind::Chord, freqs, *duration, line)?;
            }
            StatementKind::Rest { duration } => {
                self.push(EventKind::Rest, Vec::new(), *duration, line)?;
            }
            StatementKind::Repeat { count, body } => {
                if !(1..=MAX_REPEAT).contains(count) {
                    return Err(err(SemanticErrorKind::InvalidRepeatCount(*count), line));
                }
                if body.is_empty() {
                    return Err(err(SemanticErrorKind::EmptyRepeat, line));
                }
                for _ in 0..*count {
                    self.visit_all(body)?;
                }
            }
        }
        Ok(())
    }

    fn push(
        &mut self,
        kind: EventKind,
        frequencies: Vec<f64>,
        duration: Fraction,
        line: usize,
    ) -> Result<(), SemanticError> {
        validate_duration(duration, line)?;
        let seconds = self.seconds + duration.as_f64() * self.state.whole_note_seconds();
        if !(seconds <= MAX_PROGRAM_SECONDS) {
            return Err(err(SemanticErrorKind::ProgramTooLong { seconds }, line));
        }
        self.seconds = seconds;
        self.events.push(ResolvedEvent {
            line,
            kind,
            frequencies,
            duration,
            settings: self.state,
        });
        Ok(())
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn err(kind: SemanticErrorKind, line: usize) -> SemanticError {
    SemanticError::new(kind, line)
}

fn resolve_note(note: &NoteSpec, line: usize) -> Result<f64, SemanticError> {
    if !note.in_range() {
        return Err(err(
            SemanticErrorKind::InvalidNote {
                note: note.text.clone(),
            },
            line,
        ));
    }
    Ok(note.frequency())
}

fn validate_duration(duration: Fraction, line: usize) -> Result<(), SemanticError> {
    if duration.numerator <= 0 || duration.denominator <= 0 {
        return Err(err(
            SemanticErrorKind::InvalidDuration {
                numerator: duration.numerator,
                denominator: duration.denominator,
            },
            line,
        ));
    }
    Ok(())
}
