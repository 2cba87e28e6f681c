use crate::core::http::PacedClient;
use crate::core::markup;
use crate::domain::model::Fund;
use crate::utils::error::{NavError, Result};

/// Retrieves the paginated open-end fund directory. No internal retries:
/// a directory failure aborts the run and is the caller's problem.
pub struct FundDirectoryClient {
    client: PacedClient,
    base_url: String,
    page_length: usize,
    fund_type: u32,
}

impl FundDirectoryClient {
    pub fn new(client: PacedClient, base_url: &str, page_length: usize, fund_type: u32) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            page_length,
            fund_type,
        }
    }

    pub async fn fetch(&self) -> Result<Vec<Fund>> {
        let url = format!("{}/mutual-fund-navs", self.base_url);
        let query = [
            ("draw", "1".to_string()),
            ("start", "0".to_string()),
            ("length", self.page_length.to_string()),
            ("type", self.fund_type.to_string()),
        ];

        tracing::debug!("Fetching fund directory from {}", url);
        let response = self
            .client
            .get_with_query(&url, &query)
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        parse_directory(&body)
    }
}

/// Maps the directory payload to funds. Symbol and name cells arrive wrapped
/// in HTML anchors.
pub fn parse_directory(body: &serde_json::Value) -> Result<Vec<Fund>> {
    let rows = body
        .get("data")
        .and_then(|v| v.as_array())
        .ok_or_else(|| NavError::Format {
            message: "directory response is missing top-level `data` array".to_string(),
        })?;

    let mut funds = Vec::with_capacity(rows.len());
    for row in rows {
        let raw_symbol = field(row, "symbol");
        let raw_name = field(row, "companyname");

        funds.push(Fund {
            symbol: markup::anchor_text(&raw_symbol).unwrap_or(raw_symbol),
            name: markup::anchor_text(&raw_name).unwrap_or(raw_name),
            fund_size: field(row, "fund_size"),
            daily_nav: field(row, "daily_nav_price"),
            daily_date: field(row, "daily_date"),
            weekly_nav: field(row, "weekly_nav_price"),
            weekly_date: field(row, "weekly_date"),
            monthly_nav: field(row, "monthly_nav_price"),
            monthly_date: field(row, "monthly_date"),
        });
    }

    Ok(funds)
}

fn field(row: &serde_json::Value, key: &str) -> String {
    row.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}
