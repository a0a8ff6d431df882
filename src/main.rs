use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use netpbm_diff::{config::BatchConfig, run, run_batch};

#[derive(Parser)]
#[command(name = "netpbm-diff")]
#[command(about = "Compare two ASCII Netpbm (P2/P3) images sample by sample", long_about = None)]
struct Cli {
    /// Generated image
    #[arg(required_unless_present = "batch")]
    first: Option<PathBuf>,

    /// Reference image
    #[arg(required_unless_present = "batch")]
    second: Option<PathBuf>,

    /// JSON manifest listing named generated/reference pairs
    #[arg(long, value_name = "MANIFEST", conflicts_with_all = ["first", "second"])]
    batch: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));
    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.batch {
        Some(manifest) => {
            let config = BatchConfig::read_config(&manifest)
                .with_context(|| format!("Failed to read manifest {}", manifest.display()))?;
            run_batch(&config, &mut out)?;
        }
        None => {
            let (Some(first), Some(second)) = (cli.first, cli.second) else {
                anyhow::bail!("Expected two image paths or --batch <MANIFEST>");
            };
            run(&first, &second, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
