use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{LevelFilter, info};
use rs_markov_core::model::generation_config::{DEFAULT_MAX_TOKENS, DEFAULT_ORDER, GenerationConfig};
use rs_markov_core::model::state_model::StateModel;

/// Reads text on stdin and prints a random walk over its word-level Markov
/// chain, one word per line.
#[derive(Parser, Debug)]
#[command(name = "markov", version, about, long_about = None)]
struct Cli {
    /// Number of preceding words conditioning each choice
    #[arg(short = 'n', long, value_name = "N", default_value_t = DEFAULT_ORDER)]
    order: usize,

    /// Maximum number of words to generate
    #[arg(short = 'm', long, value_name = "COUNT", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: usize,

    /// Seed for reproducible output (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Increase logging verbosity (repeatable)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (repeatable)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    quiet: u8,
}

impl Cli {
    fn config(&self) -> GenerationConfig {
        GenerationConfig {
            order: self.order,
            max_tokens: self.max_tokens,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = cli.config();
    info!("order {}, at most {} words, seed {:?}", config.order, config.max_tokens, config.seed);

    // Build phase: the whole input is consumed before anything is printed
    let model = StateModel::from_reader(io::stdin().lock(), config.order)
        .context("unable to build the model from stdin")?;

    // Generate phase
    let mut out = BufWriter::new(io::stdout().lock());
    for word in model.generate(config.max_tokens, config.rng()) {
        let word = word.context("generation failed")?;
        out.write_all(&word).context("unable to write to stdout")?;
        out.write_all(b"\n").context("unable to write to stdout")?;
    }
    out.flush().context("unable to write to stdout")?;

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
