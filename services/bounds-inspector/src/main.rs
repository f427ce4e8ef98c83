//! Axis bounds inspector.
//!
//! Loads one or more axis description files, runs them through the axis
//! writer and prints the resulting dataset schema (axes, attributes and
//! generated `*_bnds` variables) as JSON.

mod input;
mod inspect;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "bounds-inspector")]
#[command(about = "Compute and inspect cell bounds for coordinate axes")]
struct Args {
    /// Axis description file (YAML or JSON); repeat for several axes
    #[arg(short, long = "axis", required = true)]
    axes: Vec<PathBuf>,

    /// Writer configuration file (YAML); defaults to AXIS_* environment variables
    #[arg(short, long, env = "AXIS_WRITER_CONFIG")]
    config: Option<PathBuf>,

    /// Fail on axes that cannot produce bounds instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Write the schema to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON on stdout
    #[arg(long)]
    pretty: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the schema, logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let writer = inspect::load_writer(args.config.as_deref())?;
    let schema = inspect::inspect(&writer, &args.axes, args.strict)?;
    inspect::emit(
        &schema,
        args.output.as_deref(),
        args.pretty,
        &mut std::io::stdout().lock(),
    )?;

    Ok(())
}
