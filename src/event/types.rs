//! Instruction data model: the unit handed from the code generator to the
//! synthesizer.
//!
//! An [`Instruction`] is a fully resolved, timed note, chord or rest with
//! absolute start time and duration in seconds.

use serde::Serialize;

use crate::instrument::Instrument;

/// A single timed unit of playback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instruction {
    /// When this instruction starts, in seconds from the beginning.
    pub start_time: f64,
    /// Length in seconds.
    pub duration: f64,
    /// Frequencies in Hz: one for a note, several for a chord, none for a rest.
    pub frequencies: Vec<f64>,
    /// Linear gain in the range 0.0–1.0.
    pub amplitude: f64,
    pub instrument: Instrument,
    /// Source line of the statement that produced this instruction.
    pub line: usize,
}

impl Instruction {
    /// Whether this instruction is silence.
    pub fn is_rest(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// End time in seconds.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Number of samples this instruction renders to at `sample_rate`.
    pub fn sample_count(&self, sample_rate: u32) -> usize {
        (self.duration * sample_rate as f64).round() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instr(duration: f64, frequencies: Vec<f64>) -> Instruction {
        Instruction {
            start_time: 1.0,
            duration,
            frequencies,
            amplitude: 1.0,
            instrument: Instrument::Sine,
            line: 1,
        }
    }

    #[test]
    fn rest_has_no_frequencies() {
        assert!(instr(0.5, vec![]).is_rest());
        assert!(!instr(0.5, vec![440.0]).is_rest());
    }

    #[test]
    fn end_time() {
        assert_eq!(instr(0.5, vec![]).end_time(), 1.5);
    }

    #[test]
    fn sample_count_rounds() {
        assert_eq!(instr(0.5, vec![]).sample_count(44100), 22050);
        assert_eq!(instr(1.0 / 3.0, vec![]).sample_count(44100), 14700);
        // 0.00001 s * 44100 = 0.441 samples
        assert_eq!(instr(0.00001, vec![]).sample_count(44100), 0);
        // 0.00002 s * 44100 = 0.882 samples
        assert_eq!(instr(0.00002, vec![]).sample_count(44100), 1);
    }
}
