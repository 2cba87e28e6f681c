use serde::{Deserialize, Serialize};

/// One row of the open-end fund directory. NAV snapshot fields are carried
/// verbatim from the feed; they are display strings, not parsed numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fund {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub fund_size: String,
    #[serde(default)]
    pub daily_nav: String,
    #[serde(default)]
    pub daily_date: String,
    #[serde(default)]
    pub weekly_nav: String,
    #[serde(default)]
    pub weekly_date: String,
    #[serde(default)]
    pub monthly_nav: String,
    #[serde(default)]
    pub monthly_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub published: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisclosureImage {
    pub symbol: String,
    pub source_url: String,
    pub artifact_path: String,
}

/// A text block as reported by the OCR engine. `index` is the engine's
/// reading order, which does not necessarily match the document layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedLine {
    pub text: String,
    pub confidence: f32,
    pub index: usize,
}

/// Non-authoritative extraction result, destined for human audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub symbol: String,
    pub keyword_hits: Vec<String>,
    pub lines: Vec<RecognizedLine>,
}

/// Terminal states of the per-fund processing chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundStatus {
    NoAnnouncement,
    NoImage,
    DownloadFailed,
    Extracted,
    Failed,
}

impl FundStatus {
    /// True for states that count against the run's exit status. Absence
    /// outcomes are valid results, not failures.
    pub fn is_failure(&self) -> bool {
        matches!(self, FundStatus::DownloadFailed | FundStatus::Failed)
    }
}

impl std::fmt::Display for FundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FundStatus::NoAnnouncement => "NO_ANNOUNCEMENT",
            FundStatus::NoImage => "NO_IMAGE",
            FundStatus::DownloadFailed => "DOWNLOAD_FAILED",
            FundStatus::Extracted => "EXTRACTED",
            FundStatus::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FundOutcome {
    pub symbol: String,
    pub status: FundStatus,
    pub detail: Option<String>,
}

impl FundOutcome {
    pub fn new(symbol: &str, status: FundStatus) -> Self {
        Self {
            symbol: symbol.to_string(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(symbol: &str, status: FundStatus, detail: String) -> Self {
        Self {
            symbol: symbol.to_string(),
            status,
            detail: Some(detail),
        }
    }
}
