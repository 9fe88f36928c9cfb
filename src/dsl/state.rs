//! Compiler state: the tempo, volume and instrument currently in effect.

use serde::Serialize;

use crate::instrument::Instrument;

pub const DEFAULT_TEMPO: u32 = 120;
pub const DEFAULT_VOLUME: u8 = 100;

/// Settings in effect at a point in the program.
///
/// One value is owned by each analyzer run and updated in place by
/// declarations. Events take a copy, so later declarations never reach
/// back into earlier events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompilerState {
    pub tempo_bpm: u32,
    pub volume: u8,
    pub instrument: Instrument,
}

impl CompilerState {
    pub fn new() -> Self {
        Self {
            tempo_bpm: DEFAULT_TEMPO,
            volume: DEFAULT_VOLUME,
            instrument: Instrument::Sine,
        }
    }

    /// Length of a whole note in seconds at the current tempo.
    pub fn whole_note_seconds(&self) -> f64 {
        240.0 / self.tempo_bpm as f64
    }

    /// Volume as a linear gain in `[0.0, 1.0]`.
    pub fn amplitude(&self) -> f64 {
        self.volume as f64 / 100.0
    }
}

impl Default for CompilerState {
    fn default() -> Self {
        Self::new()
    }
}
