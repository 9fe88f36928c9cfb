//! Output limiter: hard clamp applied to the assembled buffer.

/// Hard limiter that clamps samples to `[-ceiling, ceiling]`.
#[derive(Debug, Clone)]
pub struct Limiter {
    ceiling: f32,
}

impl Limiter {
    /// Create a new limiter with the given ceiling (should be in `(0.0, 1.0]`).
    pub fn new(ceiling: f32) -> Self {
        debug_assert!(ceiling > 0.0 && ceiling <= 1.0);
        Self { ceiling }
    }

    /// Clamp a single sample to `[-ceiling, ceiling]`.
    #[inline]
    pub fn process(&self, sample: f32) -> f32 {
        sample.clamp(-self.ceiling, self.ceiling)
    }

    /// Clamp an entire buffer in-place, returning how many samples changed.
    pub fn process_block(&self, buffer: &mut [f32]) -> usize {
        let mut clipped = 0;
        for sample in buffer.iter_mut() {
            let limited = self.process(*sample);
            if limited != *sample {
                clipped += 1;
                *sample = limited;
            }
        }
        clipped
    }

    /// Returns the current ceiling value.
    pub fn ceiling(&self) -> f32 {
        self.ceiling
    }
}

impl Default for Limiter {
    fn default() -> Self {
        Self { ceiling: 1.0 }
    }
}
