//! tunec: compiles a small music-description language to PCM audio.
//!
//! The pipeline is text → tokens → statements → resolved events →
//! instructions → samples. [`dsl::Compiler`] runs the front end and
//! [`audio::Synthesizer`] renders its output; [`render`] chains the two.

pub mod audio;
pub mod config;
pub mod demo;
pub mod dsl;
pub mod event;
pub mod instrument;

use std::fmt;

use audio::{PcmBuffer, RenderError, Synthesizer};
use config::RenderConfig;
use dsl::{CompileError, Compiler};

/// Failure from [`render`]: either stage can reject the program.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Compile(CompileError),
    Render(RenderError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Compile(e) => e.fmt(f),
            Error::Render(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Compile(e) => Some(e),
            Error::Render(e) => Some(e),
        }
    }
}

impl From<CompileError> for Error {
    fn from(e: CompileError) -> Self {
        Error::Compile(e)
    }
}

impl From<RenderError> for Error {
    fn from(e: RenderError) -> Self {
        Error::Render(e)
    }
}

/// Compile `source` and render it with `config`.
pub fn render(source: &str, config: &RenderConfig) -> Result<PcmBuffer, Error> {
    let instructions = Compiler::compile(source)?;
    Ok(Synthesizer::new(config.clone()).render(&instructions)?)
}
