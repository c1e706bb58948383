//! CLI tool to add build steps to an LDraw model.
//!
//! Usage:
//!   ldr-stepper model.ldr
//!   ldr-stepper model.ldr -o stepped.ldr --axis z --steps 20

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use ldr_stepper::{
    Axis, DEFAULT_PIECES, StepConfig, generate_steps, has_ldraw_extension,
};
use tracing_subscriber::EnvFilter;

/// Sort the pieces of an LDraw model along an axis and split them into steps.
#[derive(Parser)]
#[command(name = "ldr-stepper", version)]
struct Cli {
    /// LDraw model file (.ldr, .dat or .mpd)
    file: PathBuf,

    /// Output file; if unspecified, writes to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of pieces per step
    #[arg(short, long, default_value_t = DEFAULT_PIECES)]
    pieces: usize,

    /// Maximum number of steps. Overrides --pieces
    #[arg(short, long)]
    steps: Option<usize>,

    /// Axis on which to sort pieces
    #[arg(short, long, value_enum, default_value_t = Axis::Y)]
    axis: Axis,

    /// Overwrite the input file if --output points at it
    #[arg(long)]
    force: bool,

    /// Show paths, settings and record counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> StepConfig {
        let config = StepConfig::new()
            .with_axis(self.axis)
            .with_pieces(self.pieces)
            .with_steps(self.steps)
            .with_force(self.force);
        match &self.output {
            Some(path) => config.with_output(path),
            None => config,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn warn_on_extension(path: &Path) {
    if !has_ldraw_extension(path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        tracing::warn!("\"{name}\" may not be an LDR file");
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    warn_on_extension(&cli.file);

    let config = cli.config();

    if cli.verbose {
        eprintln!("Input:    {}", cli.file.display());
        eprintln!("Output:   {}", config.output);
        eprintln!("Axis:     {}", config.axis);
        match config.steps.filter(|&s| s > 0) {
            Some(steps) => eprintln!("Steps:    {steps}"),
            None => eprintln!("Pieces:   {}", config.pieces),
        }
    }

    match generate_steps(&cli.file, &config) {
        Ok(summary) => {
            if cli.verbose {
                eprintln!(
                    "Records:  {} in -> {} kept, {} steps",
                    summary.lines_read, summary.records_kept, summary.batches
                );
            }
            if summary.records_kept == 0 {
                tracing::warn!("no placement lines found; output is empty");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
