use crate::domain::model::{FundOutcome, FundStatus};
use crate::domain::ports::FundPipeline;
use crate::utils::error::Result;

/// Drives a full run: discover the directory, then run every fund's chain to
/// a terminal state. Only discovery failure aborts; per-fund outcomes are
/// collected whatever happens to their neighbors.
pub struct NavEngine<P: FundPipeline> {
    pipeline: P,
}

#[derive(Debug)]
pub struct RunSummary {
    pub outcomes: Vec<FundOutcome>,
}

impl RunSummary {
    pub fn extracted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == FundStatus::Extracted)
            .count()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_failure()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }
}

impl<P: FundPipeline> NavEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Fetching fund directory");
        let funds = self.pipeline.discover().await?;
        tracing::info!("Discovered {} funds", funds.len());

        let mut outcomes = Vec::with_capacity(funds.len());
        for fund in &funds {
            let outcome = self.pipeline.process(fund).await;
            tracing::info!(symbol = %outcome.symbol, status = %outcome.status, "Fund finished");
            outcomes.push(outcome);
        }

        Ok(RunSummary { outcomes })
    }
}
