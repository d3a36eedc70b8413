use anyhow::Result;
use clap::Parser;
use conceptsc::Normalisation;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Normalises an implicational system's rule set and derives its
/// concept lattice.
#[derive(Parser)]
struct Cli {
    /// Path to the `.is` file to read.
    #[clap(short, long)]
    input: PathBuf,
    /// Path to write the (possibly normalised) system back out to.
    #[clap(short, long)]
    output: Option<PathBuf>,
    /// Normalise the rule set to its canonical (Duquenne-Guigues) basis.
    /// Ignored if `--canonical-direct-basis` is also given.
    #[clap(long)]
    canonical_basis: bool,
    /// Normalise the rule set to its canonical direct basis. Takes
    /// priority over `--canonical-basis` if both are given.
    #[clap(long)]
    canonical_direct_basis: bool,
    /// Keep only concepts whose extent is at least this fraction of
    /// the bottom concept's.
    #[clap(long)]
    iceberg: Option<f64>,
}

fn main() -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| "info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let normalise = match (cli.canonical_direct_basis, cli.canonical_basis) {
        (true, _) => Normalisation::CanonicalDirectBasis,
        (_, true) => Normalisation::CanonicalBasis,
        _ => Normalisation::None,
    };
    conceptsc::run(&cli.input, cli.output.as_deref(), normalise, cli.iceberg)
}
