//! Synthesizer: renders an instruction sequence into one PCM buffer.
//!
//! Every instruction is rendered on its own into the slice of the output
//! that its [`Timeline`] range owns. Chords sum one voice per frequency and
//! divide by the voice count; every sounding instruction gets a linear fade
//! at both ends and is scaled by its amplitude. The assembled buffer goes
//! through a [`Limiter`] last.

use std::fmt;
use std::thread;

use tracing::{debug, trace};

use crate::config::RenderConfig;
use crate::event::{total_duration, Instruction, Timeline, MAX_PROGRAM_SECONDS};
use crate::instrument::oscillator::advance_phase;
use crate::instrument::{FadeEnvelope, NoteContext};

use super::limiter::Limiter;
use super::PcmBuffer;

/// Instructions the synthesizer refuses to render.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Total length is over [`MAX_PROGRAM_SECONDS`] or not finite.
    TooLong { seconds: f64 },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::TooLong { seconds } => write!(
                f,
                "cannot render {seconds:.1}s of audio (limit {MAX_PROGRAM_SECONDS}s)"
            ),
        }
    }
}

impl std::error::Error for RenderError {}

pub struct Synthesizer {
    config: RenderConfig,
    fade_samples: usize,
    limiter: Limiter,
}

impl Synthesizer {
    pub fn new(config: RenderConfig) -> Self {
        let fade_samples = FadeEnvelope::samples_for(config.fade_ms, config.sample_rate);
        let limiter = Limiter::new(config.ceiling);
        Self {
            config,
            fade_samples,
            limiter,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    /// Render all instructions, in order, into one buffer.
    pub fn render(&self, instructions: &[Instruction]) -> Result<PcmBuffer, RenderError> {
        let seconds = total_duration(instructions);
        if !(seconds <= MAX_PROGRAM_SECONDS) {
            return Err(RenderError::TooLong { seconds });
        }
        let timeline = Timeline::new(instructions, self.config.sample_rate)
            .ok_or(RenderError::TooLong { seconds })?;
        let mut samples = vec![0.0f32; timeline.total_samples()];

        // Hand each instruction the exclusive slice its range covers.
        let mut jobs: Vec<(&Instruction, &mut [f32])> = Vec::with_capacity(timeline.len());
        let mut rest: &mut [f32] = &mut samples;
        for (instr, range) in timeline.iter() {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            jobs.push((instr, head));
            rest = tail;
        }

        let workers = self.config.workers.max(1).min(jobs.len().max(1));
        if workers == 1 {
            for (instr, out) in jobs.iter_mut() {
                self.render_instruction(instr, out);
            }
        } else {
            let per_worker = jobs.len().div_ceil(workers);
            thread::scope(|s| {
                for group in jobs.chunks_mut(per_worker) {
                    s.spawn(move || {
                        for (instr, out) in group.iter_mut() {
                            self.render_instruction(instr, out);
                        }
                    });
                }
            });
        }

        let clipped = self.limiter.process_block(&mut samples);
        debug!(
            instructions = instructions.len(),
            samples = samples.len(),
            workers,
            clipped,
            fade_samples = self.fade_samples,
            "synthesis finished"
        );

        Ok(PcmBuffer {
            samples,
            sample_rate: self.config.sample_rate,
            bit_depth: self.config.bit_depth,
        })
    }

    /// Render one instruction into `out`, which is already zeroed.
    pub fn render_instruction(&self, instr: &Instruction, out: &mut [f32]) {
        if instr.is_rest() || out.is_empty() {
            return;
        }

        let sample_rate = self.config.sample_rate;
        let timbre = instr.instrument.timbre(&self.config.piano);
        let envelope = FadeEnvelope::new(self.fade_samples, out.len());
        trace!(
            line = instr.line,
            timbre = timbre.name(),
            voices = instr.frequencies.len(),
            samples = out.len(),
            fade = envelope.fade_len(),
            "rendering instruction"
        );
        let voices: Vec<NoteContext> = instr
            .frequencies
            .iter()
            .map(|&frequency| NoteContext {
                frequency,
                duration: instr.duration,
                sample_rate,
            })
            .collect();
        let scale = instr.amplitude / voices.len() as f64;
        let mut phases = vec![0.0f64; voices.len()];

        for (i, slot) in out.iter_mut().enumerate() {
            let elapsed = i as f64 / sample_rate as f64;
            let mut sum = 0.0;
            for (phase, voice) in phases.iter_mut().zip(&voices) {
                sum += timbre.sample(*phase, elapsed, voice);
                *phase = advance_phase(*phase, voice.frequency, sample_rate);
            }
            *slot = (sum * scale * envelope.gain(i)) as f32;
        }
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::Instrument;

    const SR: u32 = 44100;

    fn instr(frequencies: Vec<f64>, duration: f64, instrument: Instrument) -> Instruction {
        Instruction {
            start_time: 0.0,
            duration,
            frequencies,
            amplitude: 1.0,
            instrument,
            line: 1,
        }
    }

    fn render_one(i: Instruction) -> Vec<f32> {
        Synthesizer::default().render(&[i]).unwrap().samples
    }

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    #[test]
    fn sample_count_matches_duration() {
        let out = render_one(instr(vec![440.0], 0.5, Instrument::Sine));
        assert_eq!(out.len(), 22050);
    }

    #[test]
    fn rest_is_silent() {
        let out = render_one(instr(vec![], 0.25, Instrument::Sine));
        assert_eq!(out.len(), 11025);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn empty_program_renders_empty_buffer() {
        let buf = Synthesizer::default().render(&[]).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.sample_rate, SR);
        assert_eq!(buf.bit_depth, 16);
    }

    #[test]
    fn notes_start_and_end_at_zero() {
        for instrument in Instrument::ALL {
            let out = render_one(instr(vec![440.0], 0.2, instrument));
            assert_eq!(out[0], 0.0, "{instrument}");
            assert_eq!(out[out.len() - 1], 0.0, "{instrument}");
        }
    }

    #[test]
    fn every_instrument_is_audible_and_bounded() {
        for instrument in Instrument::ALL {
            let out = render_one(instr(vec![220.0], 0.5, instrument));
            let p = peak(&out);
            assert!(p > 0.1, "{instrument} peak {p}");
            assert!(p <= 1.0, "{instrument} peak {p}");
        }
    }

    #[test]
    fn amplitude_scales_output() {
        let full = render_one(instr(vec![440.0], 0.25, Instrument::Sine));
        let mut quiet = instr(vec![440.0], 0.25, Instrument::Sine);
        quiet.amplitude = 0.5;
        let half = render_one(quiet);
        for (a, b) in full.iter().zip(&half) {
            assert!((a * 0.5 - b).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_volume_is_silent() {
        let mut i = instr(vec![440.0], 0.1, Instrument::Square);
        i.amplitude = 0.0;
        assert!(render_one(i).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn chord_sums_then_normalizes() {
        let single = render_one(instr(vec![261.63], 0.5, Instrument::Sine));
        let chord = render_one(instr(
            vec![261.63, 329.63, 392.0],
            0.5,
            Instrument::Sine,
        ));
        assert_eq!(chord.len(), single.len());
        assert!(peak(&chord) <= peak(&single) + 1e-3);
    }

    #[test]
    fn chord_of_identical_notes_equals_single_note() {
        let single = render_one(instr(vec![330.0], 0.1, Instrument::Triangle));
        let doubled = render_one(instr(vec![330.0, 330.0], 0.1, Instrument::Triangle));
        for (a, b) in single.iter().zip(&doubled) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn piano_decays() {
        let out = render_one(instr(vec![220.0], 1.0, Instrument::Piano));
        let q = out.len() / 4;
        let rms = |s: &[f32]| (s.iter().map(|x| x * x).sum::<f32>() / s.len() as f32).sqrt();
        let first = rms(&out[..q]);
        let last = rms(&out[3 * q..]);
        assert!(first > last * 10.0, "first={first}, last={last}");
    }

    #[test]
    fn instructions_are_concatenated_in_order() {
        let program = vec![
            instr(vec![], 0.1, Instrument::Sine),
            Instruction {
                start_time: 0.1,
                ..instr(vec![440.0], 0.1, Instrument::Sine)
            },
        ];
        let out = Synthesizer::default().render(&program).unwrap().samples;
        assert_eq!(out.len(), 8820);
        assert!(out[..4410].iter().all(|&s| s == 0.0));
        assert!(out[4410..].iter().any(|&s| s.abs() > 0.5));
    }

    #[test]
    fn parallel_render_matches_sequential() {
        let program: Vec<Instruction> = (0..7)
            .map(|i| Instruction {
                start_time: i as f64 * 0.05,
                ..instr(
                    if i % 3 == 2 { vec![] } else { vec![200.0 + 50.0 * i as f64] },
                    0.05,
                    Instrument::ALL[i % Instrument::ALL.len()],
                )
            })
            .collect();
        let sequential = Synthesizer::default().render(&program).unwrap();
        let parallel = Synthesizer::new(RenderConfig {
            workers: 3,
            ..RenderConfig::default()
        })
        .render(&program)
        .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn limiter_ceiling_applies() {
        let synth = Synthesizer::new(RenderConfig {
            ceiling: 0.5,
            ..RenderConfig::default()
        });
        let out = synth
            .render(&[instr(vec![100.0], 0.2, Instrument::Square)])
            .unwrap();
        assert!(out.peak() <= 0.5);
        assert!(out.peak() >= 0.5 - 1e-6);
    }

    #[test]
    fn over_long_program_is_an_error() {
        let program = vec![
            instr(vec![], 9.2e18, Instrument::Sine),
            Instruction {
                start_time: 9.2e18,
                ..instr(vec![], 9.2e18, Instrument::Sine)
            },
        ];
        let err = Synthesizer::default().render(&program).unwrap_err();
        assert_eq!(err, RenderError::TooLong { seconds: 1.84e19 });
    }

    #[test]
    fn non_finite_duration_is_an_error() {
        let program = vec![instr(vec![440.0], f64::INFINITY, Instrument::Sine)];
        assert!(matches!(
            Synthesizer::default().render(&program),
            Err(RenderError::TooLong { .. })
        ));
    }

    #[test]
    fn custom_sample_rate() {
        let synth = Synthesizer::new(RenderConfig {
            sample_rate: 8000,
            ..RenderConfig::default()
        });
        assert_eq!(synth.sample_rate(), 8000);
        let out = synth
            .render(&[instr(vec![440.0], 0.5, Instrument::Sine)])
            .unwrap();
        assert_eq!(out.len(), 4000);
        assert_eq!(out.sample_rate, 8000);
    }
}
