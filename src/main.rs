//! tunec: compile a music program to a WAV file.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{info, Level};

use tunec::audio::{write_wav, Synthesizer};
use tunec::config::{load_config, load_default_config, RenderConfig};
use tunec::demo;
use tunec::dsl::Compiler;
use tunec::event::total_duration;

#[derive(Parser)]
#[command(name = "tunec")]
#[command(about = "Compile a music-description program to a WAV file")]
#[command(version)]
struct Cli {
    /// Program to compile
    #[arg(required_unless_present = "example", conflicts_with = "example")]
    input: Option<PathBuf>,

    /// Output WAV path (defaults to the input name with a .wav extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Compile a built-in example instead of a file
    #[arg(long, value_enum)]
    example: Option<Example>,

    /// Config file (defaults to ~/.tunec/config.yaml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    sample_rate: Option<u32>,

    /// 16, 24 or 32 (float)
    #[arg(long)]
    bit_depth: Option<u16>,

    /// Print tokens, statements, events and instructions to stdout
    #[arg(long, value_enum)]
    trace: Option<TraceFormat>,

    /// Log every compiler stage
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Example {
    Simple,
    Advanced,
    Demo,
}

impl Example {
    fn name(self) -> &'static str {
        match self {
            Example::Simple => "simple",
            Example::Advanced => "advanced",
            Example::Demo => "demo",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TraceFormat {
    Yaml,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(cli)?;
    let (source, output) = load_source(cli)?;

    info!("compiling");
    let instructions = match cli.trace {
        Some(format) => {
            let compilation = Compiler::compile_traced(&source)?;
            let text = match format {
                TraceFormat::Yaml => compilation.to_yaml()?,
                TraceFormat::Json => compilation.to_json()?,
            };
            println!("{text}");
            compilation.instructions
        }
        None => Compiler::compile(&source)?,
    };
    info!(
        instructions = instructions.len(),
        seconds = total_duration(&instructions),
        "compiled"
    );

    let buffer = Synthesizer::new(config).render(&instructions)?;
    info!(
        samples = buffer.len(),
        sample_rate = buffer.sample_rate,
        peak = buffer.peak(),
        "rendered"
    );

    write_wav(&output, &buffer)?;
    println!(
        "wrote {} ({:.2}s, {}-bit, {} Hz)",
        output.display(),
        buffer.duration_secs(),
        buffer.bit_depth,
        buffer.sample_rate
    );
    Ok(())
}

/// Config file first, then command-line overrides.
fn resolve_config(cli: &Cli) -> Result<RenderConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_default_config()?,
    };
    if let Some(rate) = cli.sample_rate {
        config.sample_rate = rate;
    }
    if let Some(bits) = cli.bit_depth {
        config.bit_depth = bits;
    }
    config.validate()?;
    Ok(config)
}

/// Source text and output path. Examples are also saved next to the WAV.
fn load_source(cli: &Cli) -> Result<(String, PathBuf), Box<dyn Error>> {
    if let Some(example) = cli.example {
        let name = example.name();
        let source = demo::example(name).ok_or_else(|| format!("unknown example '{name}'"))?;
        let program_path = PathBuf::from(format!("example_{name}.mus"));
        fs::write(&program_path, source)?;
        info!(path = %program_path.display(), "saved example program");
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("example_{name}.wav")));
        return Ok((source.to_string(), output));
    }

    let input = cli.input.as_deref().ok_or("no input file given")?;
    let source = fs::read_to_string(input)
        .map_err(|e| format!("cannot read {}: {e}", input.display()))?;
    let output = cli.output.clone().unwrap_or_else(|| default_output(input));
    Ok((source, output))
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("wav")
}
