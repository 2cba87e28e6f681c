use crate::core::acquire::ImageAcquirer;
use crate::core::directory::FundDirectoryClient;
use crate::core::http::PacedClient;
use crate::core::locator::DocumentImageLocator;
use crate::core::resolver::{AnnouncementResolver, Resolution};
use crate::core::{extract, preprocess};
use crate::domain::model::{Fund, FundOutcome, FundStatus};
use crate::domain::ports::{ArtifactKey, ArtifactStore, ConfigProvider, FundPipeline, Recognizer};
use crate::utils::error::{NavError, Result};
use crate::utils::pace::RateLimiter;
use std::sync::Arc;

/// The acquisition-and-recognition pipeline. One instance drives the whole
/// run; per-fund work shares nothing but the artifact store (symbol-keyed
/// writes) and the pacing limiter.
pub struct ScrapePipeline<S: ArtifactStore, R: Recognizer, C: ConfigProvider> {
    store: S,
    recognizer: R,
    config: C,
    limiter: Arc<RateLimiter>,
}

impl<S: ArtifactStore, R: Recognizer, C: ConfigProvider> ScrapePipeline<S, R, C> {
    pub fn new(store: S, recognizer: R, config: C) -> Self {
        let limiter = Arc::new(RateLimiter::from_millis(config.pace_ms()));
        Self {
            store,
            recognizer,
            config,
            limiter,
        }
    }

    /// Runs one fund to a terminal state. Absence outcomes short-circuit with
    /// an `Ok`; real errors propagate to `process`, which folds them into a
    /// FAILED outcome.
    async fn run_chain(&self, fund: &Fund) -> Result<FundOutcome> {
        let symbol = fund.symbol.as_str();

        tracing::info!(symbol, "Resolving latest disclosure announcement");
        let resolver =
            AnnouncementResolver::new(self.limiter.clone(), self.config.base_url(), self.config.feed_length());
        let announcement = match resolver.resolve(fund).await? {
            Resolution::Found(announcement) => announcement,
            Resolution::NoAnnouncement => {
                tracing::info!(symbol, "No disclosure announcement in feed");
                return Ok(FundOutcome::new(symbol, FundStatus::NoAnnouncement));
            }
        };
        tracing::info!(
            symbol,
            published = %announcement.published,
            "Resolved announcement: {}",
            announcement.title
        );

        let client = PacedClient::new(self.limiter.clone())?;

        tracing::info!(symbol, "Locating disclosure image");
        let locator = DocumentImageLocator::new(client.clone());
        let Some(image_url) = locator.locate(&announcement.url).await? else {
            tracing::info!(symbol, "Announcement page carries no disclosure image");
            return Ok(FundOutcome::new(symbol, FundStatus::NoImage));
        };

        tracing::info!(symbol, "Downloading {}", image_url);
        let acquirer = ImageAcquirer::new(client);
        let (image, raw_bytes) = match acquirer.download(&self.store, &image_url, symbol).await {
            Ok(downloaded) => downloaded,
            Err(e @ NavError::Transport(_)) => {
                tracing::warn!(symbol, "Image download failed: {e}");
                return Ok(FundOutcome::with_detail(
                    symbol,
                    FundStatus::DownloadFailed,
                    e.to_string(),
                ));
            }
            Err(e) => return Err(e),
        };
        tracing::debug!(symbol, "Image stored at {}", image.artifact_path);

        tracing::info!(symbol, "Preprocessing image for recognition");
        let normalized = preprocess::normalize(&raw_bytes)?;

        tracing::info!(symbol, "Recognizing text ({})", self.config.languages());
        let lines = self
            .recognizer
            .recognize(&normalized, self.config.languages())
            .await?;

        let record = extract::extract(symbol, lines);
        tracing::info!(
            symbol,
            "Recognized {} lines, {} keyword hits",
            record.lines.len(),
            record.keyword_hits.len()
        );

        self.store
            .write(
                &ArtifactKey::candidate_record(symbol),
                &serde_json::to_vec_pretty(&record)?,
            )
            .await?;

        Ok(FundOutcome::new(symbol, FundStatus::Extracted))
    }
}

#[async_trait::async_trait]
impl<S: ArtifactStore, R: Recognizer, C: ConfigProvider> FundPipeline for ScrapePipeline<S, R, C> {
    async fn discover(&self) -> Result<Vec<Fund>> {
        let client = PacedClient::new(self.limiter.clone())?;
        let directory = FundDirectoryClient::new(
            client,
            self.config.base_url(),
            self.config.page_length(),
            self.config.fund_type(),
        );

        let funds = directory.fetch().await?;
        self.store
            .write(
                &ArtifactKey::funds_snapshot(),
                &serde_json::to_vec_pretty(&funds)?,
            )
            .await?;
        Ok(funds)
    }

    async fn process(&self, fund: &Fund) -> FundOutcome {
        match self.run_chain(fund).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(symbol = %fund.symbol, "Fund processing failed: {e}");
                FundOutcome::with_detail(&fund.symbol, FundStatus::Failed, e.to_string())
            }
        }
    }
}
