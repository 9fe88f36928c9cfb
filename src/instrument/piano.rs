//! Piano approximation: a short harmonic series under an exponential decay.
//!
//! Harmonic `k` (1-based) runs at `k` times the fundamental with the given
//! weight. The weighted sum is normalized by the total absolute weight, and
//! harmonics at or above Nyquist are left out. The decay falls by
//! `decay_db` over the length of the note, so the note ends near silence.

use std::f64::consts::PI;

use super::{NoteContext, Timbre};

/// Fundamental plus three overtones at halving weights.
pub const DEFAULT_HARMONICS: [f64; 4] = [1.0, 0.5, 0.25, 0.125];

/// Attenuation reached at the end of each note (−60 dB).
pub const DEFAULT_DECAY_DB: f64 = 60.0;

#[derive(Debug, Clone)]
pub struct Piano {
    harmonics: Vec<f64>,
    norm: f64,
    decay_db: f64,
}

impl Piano {
    pub fn new(harmonics: Vec<f64>, decay_db: f64) -> Self {
        let total: f64 = harmonics.iter().map(|w| w.abs()).sum();
        Self {
            harmonics,
            norm: if total > 0.0 { 1.0 / total } else { 0.0 },
            decay_db,
        }
    }

    /// Decay gain at `elapsed` seconds into a note of `duration` seconds.
    pub fn decay(&self, elapsed: f64, duration: f64) -> f64 {
        if duration <= 0.0 {
            return 1.0;
        }
        let progress = (elapsed / duration).clamp(0.0, 1.0);
        10f64.powf(-self.decay_db * progress / 20.0)
    }
}

impl Default for Piano {
    fn default() -> Self {
        Self::new(DEFAULT_HARMONICS.to_vec(), DEFAULT_DECAY_DB)
    }
}

impl Timbre for Piano {
    fn sample(&self, phase: f64, elapsed: f64, note: &NoteContext) -> f64 {
        let nyquist = note.sample_rate as f64 / 2.0;
        let mut sum = 0.0;
        for (i, &weight) in self.harmonics.iter().enumerate() {
            let k = (i + 1) as f64;
            if note.frequency * k >= nyquist {
                break;
            }
            sum += weight * ((k * phase).fract() * 2.0 * PI).sin();
        }
        sum * self.norm * self.decay(elapsed, note.duration)
    }

    fn name(&self) -> &str {
        "piano"
    }
}
