//! Instruments: the closed set of timbres a program can select.
//!
//! Each [`Instrument`] variant maps to one [`Timbre`] implementation that
//! turns an oscillator phase into a sample.

pub mod envelope;
pub mod oscillator;
pub mod piano;

pub use envelope::FadeEnvelope;
pub use oscillator::{Oscillator, Waveform};
pub use piano::Piano;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::config::PianoConfig;

/// Per-note values a timbre may depend on besides the phase.
#[derive(Debug, Clone, Copy)]
pub struct NoteContext {
    /// Fundamental frequency in Hz.
    pub frequency: f64,
    /// Note length in seconds.
    pub duration: f64,
    pub sample_rate: u32,
}

/// Waveform generation for one instrument.
///
/// `phase` is the fundamental's position in its cycle, in `[0.0, 1.0)`;
/// `elapsed` is seconds since the note started. Output lies in
/// `[-1.0, 1.0]`.
pub trait Timbre: Send + Sync {
    fn sample(&self, phase: f64, elapsed: f64, note: &NoteContext) -> f64;

    /// Human-readable name for this timbre.
    fn name(&self) -> &str;
}

/// The instruments the language supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Sine,
    Square,
    Triangle,
    Sawtooth,
    Piano,
}

impl Instrument {
    pub const ALL: [Instrument; 5] = [
        Instrument::Sine,
        Instrument::Square,
        Instrument::Triangle,
        Instrument::Sawtooth,
        Instrument::Piano,
    ];

    /// Name as written in source, e.g. `"sawtooth"`.
    pub fn name(self) -> &'static str {
        match self {
            Instrument::Sine => "sine",
            Instrument::Square => "square",
            Instrument::Triangle => "triangle",
            Instrument::Sawtooth => "sawtooth",
            Instrument::Piano => "piano",
        }
    }

    /// Build the timbre that renders this instrument.
    pub fn timbre(self, piano: &PianoConfig) -> Box<dyn Timbre> {
        match self {
            Instrument::Sine => Box::new(Oscillator::new(Waveform::Sine)),
            Instrument::Square => Box::new(Oscillator::new(Waveform::Square)),
            Instrument::Triangle => Box::new(Oscillator::new(Waveform::Triangle)),
            Instrument::Sawtooth => Box::new(Oscillator::new(Waveform::Saw)),
            Instrument::Piano => Box::new(Piano::new(piano.harmonics.clone(), piano.decay_db)),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a name is not one of the supported instruments.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownInstrument(pub String);

impl fmt::Display for UnknownInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown instrument '{}'", self.0)
    }
}

impl std::error::Error for UnknownInstrument {}

impl FromStr for Instrument {
    type Err = UnknownInstrument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .into_iter()
            .find(|i| i.name() == s)
            .ok_or_else(|| UnknownInstrument(s.to_string()))
    }
}
