//! Timeline: the instruction sequence laid out on absolute sample offsets.
//!
//! Instructions from the code generator are contiguous in time. The
//! timeline maps each one to its own `[start, end)` sample range so the
//! synthesizer can render them independently into disjoint parts of one
//! buffer.

use std::ops::Range;

use super::types::Instruction;

/// Longest program, in seconds, that the analyzer accepts and the
/// synthesizer renders.
pub const MAX_PROGRAM_SECONDS: f64 = 600.0;

/// Instructions plus their sample ranges at a fixed sample rate.
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    instructions: &'a [Instruction],
    ranges: Vec<Range<usize>>,
}

impl<'a> Timeline<'a> {
    /// Lay out `instructions` back to back at `sample_rate`.
    ///
    /// Each instruction gets `round(duration * sample_rate)` samples.
    /// Returns `None` if the total sample count overflows `usize`.
    pub fn new(instructions: &'a [Instruction], sample_rate: u32) -> Option<Self> {
        let mut offset = 0usize;
        let mut ranges = Vec::with_capacity(instructions.len());
        for instr in instructions {
            let start = offset;
            offset = offset.checked_add(instr.sample_count(sample_rate))?;
            ranges.push(start..offset);
        }
        Some(Self {
            instructions,
            ranges,
        })
    }

    /// Total length in samples.
    pub fn total_samples(&self) -> usize {
        self.ranges.last().map_or(0, |r| r.end)
    }

    /// Sample range of the instruction at `index`.
    pub fn range(&self, index: usize) -> Option<Range<usize>> {
        self.ranges.get(index).cloned()
    }

    /// Iterate over instructions with their sample ranges, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a Instruction, Range<usize>)> + '_ {
        self.instructions.iter().zip(self.ranges.iter().cloned())
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Sum of instruction durations in seconds.
pub fn total_duration(instructions: &[Instruction]) -> f64 {
    instructions.iter().map(|i| i.duration).sum()
}
