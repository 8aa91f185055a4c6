mod error;
mod replay;
mod session;
mod synth;


use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use gesture::camera::Viewport;
use gesture::engine::EngineCore;
use gesture::interpreter::GestureConfig;
use gesture::shape::{Dimension, Dimensions, ShapeInfo, ShapeKind};
use tracing_subscriber::EnvFilter;

use crate::error::HarnessError;
use crate::replay::ReplayOptions;
use crate::synth::SynthOptions;

#[derive(Parser, Debug)]
#[command(name = "gesturelab", about = "Replay and synthesise hand-gesture sessions for the gesture engine")]
struct Cli {
    /// JSON file with a full or partial gesture config.
    #[arg(long, env = "GESTURELAB_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "GESTURELAB_PINCH_THRESHOLD")]
    pinch_threshold: Option<f64>,

    /// Recognise pinches without checking that the thumb is extended.
    #[arg(long, env = "GESTURELAB_NO_THUMB_GATE", default_value_t = false)]
    no_thumb_gate: bool,

    /// Overlay size the button is laid out on, as WIDTHxHEIGHT.
    #[arg(long, env = "GESTURELAB_VIEWPORT", default_value = "640x480", value_parser = parse_viewport)]
    viewport: Viewport,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a recorded session through the engine and print its actions.
    Replay(ReplayArgs),
    /// Write a synthetic hover-and-pinch session.
    Synth(SynthArgs),
    /// Print HUD info for every shape.
    Shapes(ShapesArgs),
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(default_value = "-", help = "Session file path, or - for stdin")]
    input: String,

    /// Include continuous orientation targets in the output.
    #[arg(long, default_value_t = false)]
    pointer: bool,

    /// Ignore frames until the session reports `camera_started`.
    #[arg(long, default_value_t = false)]
    wait_for_camera: bool,
}

#[derive(Args, Debug)]
struct SynthArgs {
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    #[arg(long, default_value_t = 1000.0)]
    hold_ms: f64,

    #[arg(long, default_value_t = 300.0)]
    lead_ms: f64,

    #[arg(long, default_value_t = 300.0)]
    tail_ms: f64,

    #[arg(long, default_value_t = 0.002)]
    jitter: f64,

    #[arg(long, default_value_t = 7)]
    seed: u64,

    #[arg(long, default_value = "-", help = "Output file path, or - for stdout")]
    output: String,
}

#[derive(Args, Debug)]
struct ShapesArgs {
    #[arg(long)]
    side: Option<f64>,

    #[arg(long)]
    radius: Option<f64>,

    #[arg(long)]
    height: Option<f64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "gesturelab failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), HarnessError> {
    let config = load_config(cli.config.as_deref(), cli.pinch_threshold, cli.no_thumb_gate)?;
    match cli.command {
        Command::Replay(args) => run_replay(args, config, cli.viewport),
        Command::Synth(args) => run_synth(args, &config, cli.viewport),
        Command::Shapes(args) => run_shapes(&args),
    }
}

fn run_replay(args: ReplayArgs, config: GestureConfig, viewport: Viewport) -> Result<(), HarnessError> {
    let input: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&args.input)?))
    };

    let mut core = EngineCore::with_config(config);
    core.set_overlay_size(viewport.width, viewport.height);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let options = ReplayOptions { pointer: args.pointer, wait_for_camera: args.wait_for_camera };
    let report = replay::replay(input, &mut out, &mut core, options)?;
    out.flush()?;

    if report.skipped_events > 0 {
        tracing::warn!(skipped = report.skipped_events, "some session events were rejected");
    }
    Ok(())
}

fn run_synth(args: SynthArgs, config: &GestureConfig, viewport: Viewport) -> Result<(), HarnessError> {
    let options = SynthOptions {
        fps: args.fps,
        lead_ms: args.lead_ms,
        hold_ms: args.hold_ms,
        tail_ms: args.tail_ms,
        jitter: args.jitter,
        seed: args.seed,
        overlay: viewport,
    };
    let records = synth::generate(&options, config)?;

    let mut out: Box<dyn Write> = if args.output == "-" {
        Box::new(BufWriter::new(io::stdout().lock()))
    } else {
        Box::new(BufWriter::new(File::create(&args.output)?))
    };
    for record in &records {
        writeln!(out, "{}", session::format_line(record)?)?;
    }
    out.flush()?;
    tracing::info!(records = records.len(), output = %args.output, "session written");
    Ok(())
}

fn run_shapes(args: &ShapesArgs) -> Result<(), HarnessError> {
    let dims = dimensions_from(args)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for shape in [ShapeKind::Cube, ShapeKind::Sphere, ShapeKind::Cylinder] {
        writeln!(out, "{}", render_shape(&ShapeInfo::new(shape, &dims)))?;
    }
    Ok(())
}

fn dimensions_from(args: &ShapesArgs) -> Result<Dimensions, HarnessError> {
    let mut dims = Dimensions::default();
    for (dim, value) in [(Dimension::Side, args.side), (Dimension::Radius, args.radius), (Dimension::Height, args.height)] {
        if let Some(value) = value {
            dims.set(dim, value)?;
        }
    }
    Ok(dims)
}

fn render_shape(info: &ShapeInfo) -> String {
    let mut text = format!("{}\n  {}\n", info.name, info.formula);
    for (symbol, meaning) in &info.terms {
        text.push_str(&format!("  {symbol}: {meaning}\n"));
    }
    text.push_str(&format!("  volume: {}", info.volume_text));
    text
}

/// Resolve the gesture config: defaults, then the JSON file, then flags.
fn load_config(
    path: Option<&std::path::Path>,
    pinch_threshold: Option<f64>,
    no_thumb_gate: bool,
) -> Result<GestureConfig, HarnessError> {
    let mut config = match path {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => GestureConfig::default(),
    };
    if let Some(threshold) = pinch_threshold {
        config.pinch_threshold = threshold;
    }
    if no_thumb_gate {
        config.require_thumb_extension = false;
    }
    tracing::debug!(?config, "gesture config");
    Ok(config)
}

fn parse_viewport(raw: &str) -> Result<Viewport, HarnessError> {
    let invalid = || HarnessError::InvalidViewport(raw.to_string());
    let (w, h) = raw.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: f64 = w.trim().parse().map_err(|_| invalid())?;
    let height: f64 = h.trim().parse().map_err(|_| invalid())?;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(invalid());
    }
    Ok(Viewport::new(width, height))
}
