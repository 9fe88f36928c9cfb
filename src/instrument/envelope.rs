//! Fade envelope: linear fade-in and fade-out around each rendered note.

/// Symmetric linear fade over a fixed number of samples per side.
///
/// The fade length is capped at half the note so the two ramps never
/// overlap. The first and last samples of a faded note are exactly zero.
#[derive(Debug, Clone, Copy)]
pub struct FadeEnvelope {
    fade: usize,
    len: usize,
}

impl FadeEnvelope {
    /// Envelope for a note of `len` samples with `fade_samples` per side.
    pub fn new(fade_samples: usize, len: usize) -> Self {
        Self {
            fade: fade_samples.min(len / 2),
            len,
        }
    }

    /// Fade length in samples for `fade_ms` milliseconds at `sample_rate`.
    pub fn samples_for(fade_ms: f64, sample_rate: u32) -> usize {
        (fade_ms * sample_rate as f64 / 1000.0).round() as usize
    }

    /// Effective fade length per side after capping.
    pub fn fade_len(&self) -> usize {
        self.fade
    }

    /// Gain for sample `i` of the note.
    ///
    /// - `[0, fade)`: linear ramp from 0 up.
    /// - `[fade, len - fade)`: 1.0.
    /// - last `fade` samples: linear ramp down to 0 at `len - 1`.
    pub fn gain(&self, i: usize) -> f64 {
        if self.fade == 0 || i >= self.len {
            return if i < self.len { 1.0 } else { 0.0 };
        }
        let from_start = i as f64 / self.fade as f64;
        let from_end = (self.len - 1 - i) as f64 / self.fade as f64;
        from_start.min(from_end).min(1.0)
    }
}
