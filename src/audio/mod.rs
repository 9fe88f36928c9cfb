//! Audio back end: renders instructions into a mono PCM buffer and writes
//! it out as WAV.

pub mod limiter;
pub mod synth;
pub mod wav;

pub use limiter::Limiter;
pub use synth::{RenderError, Synthesizer};
pub use wav::{write_wav, WavError};

/// A rendered mono sample buffer.
///
/// Samples lie in `[-1.0, 1.0]`. `bit_depth` is a suggestion for the
/// container writer; the buffer itself is always `f32`.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub bit_depth: u16,
}

impl PcmBuffer {
    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_and_peak() {
        let buf = PcmBuffer {
            samples: vec![0.0, -0.75, 0.5, 0.0],
            sample_rate: 4,
            bit_depth: 16,
        };
        assert_eq!(buf.duration_secs(), 1.0);
        assert_eq!(buf.peak(), 0.75);
        assert_eq!(buf.len(), 4);
        assert!(!buf.is_empty());
    }
}
