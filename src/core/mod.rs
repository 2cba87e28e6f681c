pub mod acquire;
pub mod directory;
pub mod engine;
pub mod extract;
pub mod http;
pub mod locator;
pub mod markup;
pub mod pipeline;
pub mod preprocess;
pub mod recognize;
pub mod resolver;
pub mod session;

pub use crate::domain::model::{CandidateRecord, Fund, FundOutcome, FundStatus, RecognizedLine};
pub use crate::domain::ports::{ArtifactKey, ArtifactStore, ConfigProvider, FundPipeline, Recognizer};
pub use crate::utils::error::Result;
