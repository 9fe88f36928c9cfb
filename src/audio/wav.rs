//! WAV writer: serializes a [`PcmBuffer`] as a mono RIFF/WAVE file.
//!
//! 16- and 24-bit output is signed integer PCM; 32-bit output is IEEE float.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Seek, Write};
use std::path::Path;

use super::PcmBuffer;

/// Errors from writing a WAV file.
#[derive(Debug)]
pub enum WavError {
    /// Encoder failure reported by `hound`.
    Wav(hound::Error),
    Io(io::Error),
    /// Only 16, 24 and 32 bits are written.
    UnsupportedBitDepth(u16),
}

impl fmt::Display for WavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WavError::Wav(e) => write!(f, "WAV error: {e}"),
            WavError::Io(e) => write!(f, "I/O error: {e}"),
            WavError::UnsupportedBitDepth(bits) => {
                write!(f, "unsupported bit depth {bits} (expected 16, 24 or 32)")
            }
        }
    }
}

impl std::error::Error for WavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WavError::Wav(e) => Some(e),
            WavError::Io(e) => Some(e),
            WavError::UnsupportedBitDepth(_) => None,
        }
    }
}

impl From<hound::Error> for WavError {
    fn from(e: hound::Error) -> Self {
        WavError::Wav(e)
    }
}

impl From<io::Error> for WavError {
    fn from(e: io::Error) -> Self {
        WavError::Io(e)
    }
}

fn wav_spec(buffer: &PcmBuffer) -> Result<hound::WavSpec, WavError> {
    let sample_format = match buffer.bit_depth {
        16 | 24 => hound::SampleFormat::Int,
        32 => hound::SampleFormat::Float,
        other => return Err(WavError::UnsupportedBitDepth(other)),
    };
    Ok(hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate,
        bits_per_sample: buffer.bit_depth,
        sample_format,
    })
}

/// Write `buffer` to a file at `path`, replacing any existing file.
pub fn write_wav(path: &Path, buffer: &PcmBuffer) -> Result<(), WavError> {
    let file = BufWriter::new(File::create(path)?);
    write_wav_to(file, buffer)
}

/// Write `buffer` to any seekable sink.
pub fn write_wav_to<W: Write + Seek>(sink: W, buffer: &PcmBuffer) -> Result<(), WavError> {
    let spec = wav_spec(buffer)?;
    let mut writer = hound::WavWriter::new(sink, spec)?;

    match buffer.bit_depth {
        16 => {
            for &s in &buffer.samples {
                writer.write_sample(quantize(s, i16::MAX as f32) as i16)?;
            }
        }
        24 => {
            let full_scale = ((1 << 23) - 1) as f32;
            for &s in &buffer.samples {
                writer.write_sample(quantize(s, full_scale))?;
            }
        }
        _ => {
            for &s in &buffer.samples {
                writer.write_sample(s)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

#[inline]
fn quantize(sample: f32, full_scale: f32) -> i32 {
    (sample.clamp(-1.0, 1.0) * full_scale).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn buffer(bit_depth: u16) -> PcmBuffer {
        PcmBuffer {
            samples: vec![0.0, 0.5, -0.5, 1.0, -1.0],
            sample_rate: 22050,
            bit_depth,
        }
    }

    fn encode(buf: &PcmBuffer) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        write_wav_to(&mut cursor, buf).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn sixteen_bit_round_trip() {
        let bytes = encode(&buffer(16));
        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);
        let samples: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0, 16384, -16384, 32767, -32767]);
    }

    #[test]
    fn twenty_four_bit_full_scale() {
        let bytes = encode(&buffer(24));
        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().bits_per_sample, 24);
        let samples: Vec<i32> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(samples[3], 8_388_607);
        assert_eq!(samples[4], -8_388_607);
    }

    #[test]
    fn thirty_two_bit_is_float() {
        let bytes = encode(&buffer(32));
        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().sample_format, hound::SampleFormat::Float);
        let samples: Vec<f32> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0.0, 0.5, -0.5, 1.0, -1.0]);
    }

    #[test]
    fn rejects_other_bit_depths() {
        let mut cursor = Cursor::new(Vec::new());
        assert!(matches!(
            write_wav_to(&mut cursor, &buffer(8)),
            Err(WavError::UnsupportedBitDepth(8))
        ));
    }

    #[test]
    fn empty_buffer_writes_header_only() {
        let buf = PcmBuffer {
            samples: Vec::new(),
            sample_rate: 44100,
            bit_depth: 16,
        };
        let bytes = encode(&buf);
        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.len(), 0);
    }

    #[test]
    fn writes_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        write_wav(&path, &buffer(16)).unwrap();
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.len(), 5);
    }
}
