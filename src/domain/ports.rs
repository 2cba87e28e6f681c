use crate::domain::model::{Fund, FundOutcome, RecognizedLine};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Kinds of artifacts a run persists. The (symbol, kind) pair maps to a
/// storage location; the pipeline never touches paths directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    RawImage { ext: String },
    NormalizedImage,
    FundsSnapshot,
    CandidateRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactKey {
    pub symbol: String,
    pub kind: ArtifactKind,
}

impl ArtifactKey {
    pub fn raw_image(symbol: &str, ext: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            kind: ArtifactKind::RawImage {
                ext: ext.to_string(),
            },
        }
    }

    pub fn normalized_image(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            kind: ArtifactKind::NormalizedImage,
        }
    }

    pub fn funds_snapshot() -> Self {
        Self {
            symbol: String::new(),
            kind: ArtifactKind::FundsSnapshot,
        }
    }

    pub fn candidate_record(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            kind: ArtifactKind::CandidateRecord,
        }
    }

    pub fn relative_path(&self) -> String {
        match &self.kind {
            ArtifactKind::RawImage { ext } => format!("images/{}.{}", self.symbol, ext),
            ArtifactKind::NormalizedImage => format!("images/{}_normalized.png", self.symbol),
            ArtifactKind::FundsSnapshot => "data/funds.json".to_string(),
            ArtifactKind::CandidateRecord => format!("data/{}_ocr.json", self.symbol),
        }
    }
}

pub trait ArtifactStore: Send + Sync {
    /// Writes (overwriting) the artifact and returns its resolved location.
    fn write(
        &self,
        key: &ArtifactKey,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    fn read(&self, key: &ArtifactKey) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// OCR engine seam. The production implementation shells out to Tesseract;
/// tests substitute a stub so pipeline behavior is checked without an engine.
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, image: &[u8], languages: &str) -> Result<Vec<RecognizedLine>>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn page_length(&self) -> usize;
    fn fund_type(&self) -> u32;
    fn feed_length(&self) -> usize;
    fn pace_ms(&self) -> u64;
    fn languages(&self) -> &str;
}

#[async_trait]
pub trait FundPipeline: Send + Sync {
    /// Fetches the fund directory. A failure here aborts the run.
    async fn discover(&self) -> Result<Vec<Fund>>;

    /// Runs one fund's chain to a terminal state. Never propagates an error:
    /// per-fund failures are folded into the outcome so other funds proceed.
    async fn process(&self, fund: &Fund) -> FundOutcome;
}
