use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{LevelFilter, debug};
use rs_markov_fmt::{DEFAULT_WIDTH, wrap};

/// Wraps the words read on stdin into lines of bounded width.
#[derive(Parser, Debug)]
#[command(name = "markov-fmt", version, about, long_about = None)]
struct Cli {
    /// Maximum number of characters per line
    #[arg(short, long, value_name = "CHARS", default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Increase logging verbosity (repeatable)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (repeatable)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    quiet: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    debug!("wrapping at {} characters", cli.width);
    wrap(io::stdin().lock(), BufWriter::new(io::stdout().lock()), cli.width)
        .context("unable to wrap stdin")?;
    Ok(())
}

/// Maps `-v` / `-q` counts to a level; `None` leaves the choice to `RUST_LOG`.
fn log_level(verbose: u8, quiet: u8) -> Option<LevelFilter> {
    match (verbose, quiet) {
        (0, 0) => None,
        (_, 1) => Some(LevelFilter::Error),
        (_, q) if q > 1 => Some(LevelFilter::Off),
        (1, _) => Some(LevelFilter::Info),
        (2, _) => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

fn init_logging(verbose: u8, quiet: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = log_level(verbose, quiet) {
        builder.filter_level(level);
    }
    builder.init();
}
