use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::error;

use cbs_enricher::config::Config;
use cbs_enricher::logging;
use cbs_enricher::pipeline::{self, Variant};

#[derive(Parser)]
#[command(name = "cbs_enricher")]
#[command(about = "Enriches CBS municipality and neighborhood boundaries with statistics")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML file naming the table and geometry inputs
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich boundaries with income figures only
    Inkomen,
    /// Enrich boundaries with income and car-ownership figures
    Extra,
}

fn main() {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("Enrichment failed: {}", e);
        eprintln!("❌ {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config)?;
    let variant = match cli.command {
        Commands::Inkomen => Variant::Income,
        Commands::Extra => Variant::Extra,
    };

    println!("🔄 Running {} enrichment...", variant.name());
    let processed = pipeline::run(&config, variant)?;
    if processed.is_empty() {
        println!("✅ Enrichment done, nothing to do");
    } else {
        println!("✅ Enrichment done for {}", processed.join(", "));
    }
    Ok(())
}
