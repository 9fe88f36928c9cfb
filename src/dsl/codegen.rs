//! Code generation: turns resolved events into timed [`Instruction`]s.
//!
//! A whole note at tempo T lasts `240 / T` seconds. Events are laid out
//! back to back from time zero using the tempo each one was played at.
//! This stage cannot fail.

use tracing::debug;

use crate::event::Instruction;

use super::semantic::ResolvedEvent;

/// Generate one instruction per event, advancing a running cursor.
pub fn generate(events: &[ResolvedEvent]) -> Vec<Instruction> {
    let mut cursor = 0.0;
    let instructions: Vec<Instruction> = events
        .iter()
        .map(|event| {
            let seconds = event.duration.as_f64() * event.settings.whole_note_seconds();
            let instr = Instruction {
                start_time: cursor,
                duration: seconds,
                frequencies: event.frequencies.clone(),
                amplitude: event.settings.amplitude(),
                instrument: event.settings.instrument,
                line: event.line,
            };
            cursor += seconds;
            instr
        })
        .collect();

    debug!(
        instructions = instructions.len(),
        total_seconds = cursor,
        "code generation finished"
    );
    instructions
}
