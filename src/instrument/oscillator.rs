//! Oscillator primitives: the periodic waveforms behind the sine, square,
//! triangle and sawtooth instruments.

use std::f64::consts::PI;

use super::{NoteContext, Timbre};

/// Available waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
    Triangle,
}

/// Generate a single sample for the given waveform at the specified phase.
///
/// `phase` is in the range [0.0, 1.0), representing one full cycle.
/// Returns a value in [-1.0, 1.0].
pub fn oscillator(waveform: Waveform, phase: f64) -> f64 {
    match waveform {
        Waveform::Sine => (phase * 2.0 * PI).sin(),
        Waveform::Saw => 2.0 * phase - 1.0,
        Waveform::Square => {
            if phase < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => {
            if phase < 0.25 {
                4.0 * phase
            } else if phase < 0.75 {
                2.0 - 4.0 * phase
            } else {
                4.0 * phase - 4.0
            }
        }
    }
}

/// Advance a phase by one sample at `freq` and wrap it into [0.0, 1.0).
#[inline]
pub fn advance_phase(phase: f64, freq: f64, sample_rate: u32) -> f64 {
    (phase + freq / sample_rate as f64).fract()
}

/// A plain periodic waveform with no envelope of its own.
#[derive(Debug, Clone, Copy)]
pub struct Oscillator {
    waveform: Waveform,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self { waveform }
    }
}

impl Timbre for Oscillator {
    fn sample(&self, phase: f64, _elapsed: f64, _note: &NoteContext) -> f64 {
        oscillator(self.waveform, phase)
    }

    fn name(&self) -> &str {
        match self.waveform {
            Waveform::Sine => "sine",
            Waveform::Saw => "sawtooth",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
        }
    }
}
