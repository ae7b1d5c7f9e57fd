//! CIMA ETL command-line entry point.

use std::path::PathBuf;

use clap::Parser;
use cima_etl::persist::DEFAULT_OUTPUT_NAME;
use cima_etl::CimaEtl;
use tracing_subscriber::EnvFilter;

/// Join CIMA keypoint CSV files with metadata and derive joint angles
#[derive(Parser, Debug)]
#[command(name = "cima-etl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dataset root directory
    root: PathBuf,

    /// Dataset name under the root
    #[arg(short, long, default_value = "CIMA")]
    dataset: String,

    /// Process only the first 5 discovered files
    #[arg(long)]
    tiny: bool,

    /// Write the augmented dataset to <root>/<NAME>
    #[arg(long, value_name = "NAME", num_args = 0..=1, default_missing_value = DEFAULT_OUTPUT_NAME)]
    save: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut etl = CimaEtl::new(&cli.root);
    etl.load(&cli.dataset, cli.tiny)?;
    etl.create_angles()?;

    if let Some(name) = &cli.save {
        etl.save(name)?;
    }

    Ok(())
}
