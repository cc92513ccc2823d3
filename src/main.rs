use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

use ledger_enricher::config::Config;
use ledger_enricher::logging;
use ledger_enricher::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "ledger_enricher")]
#[command(about = "Sales ledger cleaning and enrichment pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a config.toml (defaults are used when absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full enrichment pipeline and write the snapshot file
    Enrich {
        /// Input ledger file (semicolon-delimited, Latin-1)
        #[arg(long)]
        input: PathBuf,
        /// Output snapshot file (same delimiter and encoding)
        #[arg(long)]
        output: PathBuf,
    },
    /// Dry run: validate the input schema and report what a full run
    /// would repair, without writing output
    Validate {
        /// Input ledger file (semicolon-delimited, Latin-1)
        #[arg(long)]
        input: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Config::load_or_default().context("loading config.toml"),
    }
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let pipeline = Pipeline::new(config);

    match cli.command {
        Commands::Enrich { input, output } => {
            match pipeline.run(&input, &output) {
                Ok(summary) => {
                    println!("\n📊 Enrichment results:");
                    println!("   Raw rows: {}", summary.raw_rows);
                    println!("   Rows after dedup: {}", summary.deduplicated_rows);
                    println!("   Invalid-date rows: {}", summary.invalid_date_rows);
                    println!(
                        "   Recovered cells: {} revenue, {} weight",
                        summary.recovered_revenue_cells, summary.recovered_weight_cells
                    );
                    println!("   Customer names fixed: {}", summary.fixed_customer_names);
                    println!("   Output file: {}", summary.output_file);
                }
                Err(e) => {
                    error!("Pipeline failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::Validate { input } => {
            match pipeline.validate(&input) {
                Ok(summary) => {
                    println!("\n✅ Input is processable:");
                    println!("   Raw rows: {}", summary.raw_rows);
                    println!("   Rows with unmapped month: {}", summary.invalid_month_rows);
                    println!(
                        "   Cells needing repair: {} revenue, {} weight",
                        summary.recovered_revenue_cells, summary.recovered_weight_cells
                    );
                    println!("   Customer names with typo: {}", summary.fixed_customer_names);
                }
                Err(e) => {
                    error!("Validation failed: {}", e);
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}
