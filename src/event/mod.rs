//! Playback instructions and their layout in time.
//!
//! The code generator produces [`Instruction`]s with absolute start times in
//! seconds. A [`Timeline`] maps them onto sample offsets for rendering.

pub mod timeline;
pub mod types;

pub use timeline::{total_duration, Timeline, MAX_PROGRAM_SECONDS};
pub use types::Instruction;
