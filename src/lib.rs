pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::FsArtifactStore;
pub use config::CliConfig;
pub use core::engine::{NavEngine, RunSummary};
pub use core::pipeline::ScrapePipeline;
pub use core::recognize::TesseractRecognizer;
pub use utils::error::{NavError, Result};
