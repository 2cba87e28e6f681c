use clap::Parser;
use navscrape::utils::{logger, validation::Validate};
use navscrape::{CliConfig, FsArtifactStore, NavEngine, ScrapePipeline, TesseractRecognizer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting navscrape");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let store = FsArtifactStore::new(config.output_path.clone());
    let pipeline = ScrapePipeline::new(store, TesseractRecognizer::new(), config);
    let engine = NavEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            println!("Per-fund status:");
            for outcome in &summary.outcomes {
                match &outcome.detail {
                    Some(detail) => println!("  {:<10} {} ({})", outcome.symbol, outcome.status, detail),
                    None => println!("  {:<10} {}", outcome.symbol, outcome.status),
                }
            }
            println!(
                "{} funds processed, {} extracted, {} failed",
                summary.outcomes.len(),
                summary.extracted(),
                summary.failures()
            );

            if summary.has_failures() {
                println!("⚠️ Completed with partial failures");
                std::process::exit(2);
            }
            println!("✅ Completed");
        }
        Err(e) => {
            tracing::error!("Run aborted: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
