//! Single-image recognition tool: runs the normalize → OCR → extract tail of
//! the pipeline over one local or remote image. The structured result goes to
//! stdout; diagnostics stay on stderr.

use clap::Parser;
use navscrape::core::http::USER_AGENT;
use navscrape::core::{extract, preprocess};
use navscrape::domain::model::CandidateRecord;
use navscrape::domain::ports::Recognizer;
use navscrape::utils::logger;
use navscrape::{NavError, Result, TesseractRecognizer};
use std::path::Path;

#[derive(Debug, Parser)]
#[command(name = "recognize")]
#[command(about = "Extracts candidate NAV text from a disclosure image")]
struct RecognizeArgs {
    /// Image source: remote URL or local path.
    #[arg(long)]
    image: String,

    /// Persist the normalized image next to the working directory.
    #[arg(long)]
    debug: bool,

    /// Tesseract language set for recognition.
    #[arg(long, default_value = "nep+eng")]
    languages: String,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = RecognizeArgs::parse();
    logger::init_recognize_logger(args.verbose);

    match run(&args).await {
        Ok(record) => match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("❌ {}", NavError::from(e));
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(args: &RecognizeArgs) -> Result<CandidateRecord> {
    let raw = load_source(&args.image).await?;
    tracing::info!("Loaded {} bytes from {}", raw.len(), args.image);

    let normalized = preprocess::normalize(&raw)?;
    if args.debug {
        std::fs::write("debug_processed.png", &normalized)?;
        tracing::info!("Saved normalized image to debug_processed.png");
    }

    let lines = TesseractRecognizer::new()
        .recognize(&normalized, &args.languages)
        .await?;
    tracing::info!("Engine returned {} text blocks", lines.len());

    Ok(extract::extract(&source_label(&args.image), lines))
}

async fn load_source(source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let bytes = client
            .get(source)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    } else {
        Ok(std::fs::read(source)?)
    }
}

fn source_label(source: &str) -> String {
    Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}
