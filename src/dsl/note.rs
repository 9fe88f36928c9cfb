//! Note names: splitting "C4", "Eb3", "F#5" into a [`NoteSpec`] and
//! resolving a spec to a semitone index and an equal-temperament frequency.

use super::ast::{Accidental, Letter, NoteSpec};

/// Lowest octave the compiler accepts.
pub const MIN_OCTAVE: u32 = 0;
/// Highest octave the compiler accepts.
pub const MAX_OCTAVE: u32 = 9;

/// Split a note literal into letter, accidental and octave.
///
/// Format: `<letter><optional accidental><octave>`
/// - Letter: C, D, E, F, G, A, B
/// - Accidental: # (sharp) or b (flat)
/// - Octave: one or more digits; the range is not checked here. Octaves
///   too large for a `u32` saturate so that the analyzer reports them,
///   quoting `text` rather than the saturated number.
pub fn parse_note_spec(name: &str) -> Option<NoteSpec> {
    let mut chars = name.chars();

    let letter = match chars.next()? {
        'C' => Letter::C,
        'D' => Letter::D,
        'E' => Letter::E,
        'F' => Letter::F,
        'G' => Letter::G,
        'A' => Letter::A,
        'B' => Letter::B,
        _ => return None,
    };

    let rest = chars.as_str();
    let (accidental, digits) = if let Some(d) = rest.strip_prefix('#') {
        (Accidental::Sharp, d)
    } else if let Some(d) = rest.strip_prefix('b') {
        (Accidental::Flat, d)
    } else {
        (Accidental::Natural, rest)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let octave = digits.parse::<u32>().unwrap_or(u32::MAX);

    Some(NoteSpec {
        letter,
        accidental,
        octave,
        text: name.to_string(),
    })
}

impl NoteSpec {
    /// Whether the octave lies in the supported range.
    pub fn in_range(&self) -> bool {
        (MIN_OCTAVE..=MAX_OCTAVE).contains(&self.octave)
    }

    /// MIDI-style semitone index: C-1 = 0, C4 = 60, A4 = 69.
    ///
    /// Only meaningful for notes where [`in_range`](Self::in_range) holds.
    pub fn semitone(&self) -> i32 {
        let base = match self.letter {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        };
        let accidental = match self.accidental {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        };
        12 * (self.octave as i32 + 1) + base + accidental
    }

    /// Frequency in Hz, twelve-tone equal temperament with A4 = 440 Hz.
    pub fn frequency(&self) -> f64 {
        semitone_to_freq(self.semitone())
    }
}

impl std::fmt::Display for NoteSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Convert a semitone index to frequency in Hz (index 69 = 440 Hz).
pub fn semitone_to_freq(n: i32) -> f64 {
    440.0 * 2.0f64.powf((n as f64 - 69.0) / 12.0)
}
