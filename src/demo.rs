//! Built-in example programs, selectable with `--example`.

/// Names accepted by [`example`], in display order.
pub const NAMES: [&str; 3] = ["simple", "advanced", "demo"];

const SIMPLE: &str = r#"// Twinkle Twinkle Little Star
Tempo: 100
Volume: 80
Instrument: piano

Play C4: 1/4
Play C4: 1/4
Play G4: 1/4
Play G4: 1/4
Play A4: 1/4
Play A4: 1/4
Play G4: 1/2

Play F4: 1/4
Play F4: 1/4
Play E4: 1/4
Play E4: 1/4
Play D4: 1/4
Play D4: 1/4
Play C4: 1/2
"#;

const ADVANCED: &str = r#"// Fur Elise, opening bars
Tempo: 80
Volume: 70
Instrument: piano

// Right hand
Repeat 2 {
    Play E5: 1/8
    Play D#5: 1/8
}
Play E5: 1/8
Play B4: 1/8
Play D5: 1/8
Play C5: 1/8
Play A4: 1/2

Rest: 1/8

// Left hand, simplified
Volume: 50
Chord {A2, E3, A3}: 1/2
Chord {E2, G#2, E3}: 1/2
Chord {A2, E3, A3}: 1/2

Volume: 70
Play E5: 1/8
Play D#5: 1/8
Play E5: 1/8
Play B4: 1/8
Play D5: 1/8
Play C5: 1/8
Play A4: 1/2
"#;

const DEMO: &str = r#"// Every language feature in one program
Tempo: 100
Volume: 75

// One note per instrument
Instrument: sine
Play A4: 1/4
Instrument: square
Play A4: 1/4
Instrument: triangle
Play A4: 1/4
Instrument: sawtooth
Play A4: 1/4
Instrument: piano
Play A4: 1/4

Rest: 1/4

// Chords of growing size
Chord {C4, E4}: 1/4
Chord {C4, E4, G4}: 1/4
Chord {C4, E4, G4, B4}: 1/4
Chord {C4, E4, G4, B4, D5}: 1/4

Rest: 1/4

// Tempo changes inside a repeat carry forward
Repeat 2 {
    Tempo: 120
    Play C4: 1/8
    Play D4: 1/8
    Play Eb4: 1/8
    Play F4: 1/8
}

Tempo: 80
Chord {C4, E4, G4, C5}: 1
"#;

/// Source text of a built-in example, or `None` for an unknown name.
pub fn example(name: &str) -> Option<&'static str> {
    match name {
        "simple" => Some(SIMPLE),
        "advanced" => Some(ADVANCED),
        "demo" => Some(DEMO),
        _ => None,
    }
}
