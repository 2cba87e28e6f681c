use crate::core::http::PacedClient;
use crate::core::{markup, session};
use crate::domain::model::{Announcement, Fund};
use crate::utils::error::{NavError, Result};
use crate::utils::pace::RateLimiter;
use chrono::NaiveDate;
use std::sync::Arc;

/// Titles that mark a NAV disclosure announcement, matched case-insensitively.
const DISCLOSURE_KEYWORDS: &[&str] = &["nav", "net assets value"];

#[derive(Debug, Clone)]
pub enum Resolution {
    Found(Announcement),
    /// No disclosure-type announcement in the feed. A valid terminal outcome,
    /// not an error.
    NoAnnouncement,
}

/// Resolves a fund's latest disclosure announcement. Each call binds a fresh
/// cookie session and scrapes its own anti-forgery token, so a stale token
/// never leaks across funds.
pub struct AnnouncementResolver {
    limiter: Arc<RateLimiter>,
    base_url: String,
    feed_length: usize,
}

impl AnnouncementResolver {
    pub fn new(limiter: Arc<RateLimiter>, base_url: &str, feed_length: usize) -> Self {
        Self {
            limiter,
            base_url: base_url.to_string(),
            feed_length,
        }
    }

    pub async fn resolve(&self, fund: &Fund) -> Result<Resolution> {
        let client = PacedClient::fresh_session(self.limiter.clone())?;

        let profile_url = format!("{}/company/{}", self.base_url, fund.symbol.to_lowercase());
        let page = client
            .get(&profile_url)
            .await?
            .error_for_status()?
            .text()
            .await?;
        let fields = session::parse_session_fields(&page, &profile_url)?;

        let feed_url = format!("{}/company-announcements", self.base_url);
        let form = [
            ("draw", "1".to_string()),
            ("start", "0".to_string()),
            ("length", self.feed_length.to_string()),
            ("company", fields.company_id.clone()),
            (
                "symbol",
                fields.symbol.clone().unwrap_or_else(|| fund.symbol.clone()),
            ),
            ("sector", fields.sector.clone()),
        ];

        let body: serde_json::Value = client
            .post_form(&feed_url, &form, &fields.token, &profile_url)
            .await?
            .error_for_status()?
            .json()
            .await?;

        let announcements = parse_feed(&body)?;
        tracing::debug!(
            symbol = %fund.symbol,
            "Announcement feed returned {} entries",
            announcements.len()
        );

        match pick_latest_disclosure(announcements) {
            Some(ann) => Ok(Resolution::Found(ann)),
            None => Ok(Resolution::NoAnnouncement),
        }
    }
}

/// Maps feed rows to announcements. Title cells are anchor fragments carrying
/// both the display title and the detail URL; rows without a link are skipped.
pub fn parse_feed(body: &serde_json::Value) -> Result<Vec<Announcement>> {
    let rows = body
        .get("data")
        .and_then(|v| v.as_array())
        .ok_or_else(|| NavError::Format {
            message: "announcement response is missing top-level `data` array".to_string(),
        })?;

    let mut announcements = Vec::new();
    for row in rows {
        let title_cell = row.get("title").and_then(|v| v.as_str()).unwrap_or_default();
        let Some(url) = markup::anchor_href(title_cell) else {
            continue;
        };

        announcements.push(Announcement {
            published: row
                .get("published_date")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            title: markup::anchor_text(title_cell).unwrap_or_default(),
            url,
        });
    }

    Ok(announcements)
}

pub fn is_disclosure_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    DISCLOSURE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Picks the newest disclosure announcement. The feed is assumed
/// most-recent-first but that is not contractual, so matches are ordered by
/// parsed publish date; undated entries sort behind dated ones in feed order.
pub fn pick_latest_disclosure(announcements: Vec<Announcement>) -> Option<Announcement> {
    let mut matches: Vec<(usize, Announcement)> = announcements
        .into_iter()
        .filter(|a| is_disclosure_title(&a.title))
        .enumerate()
        .collect();

    matches.sort_by(|lhs, rhs| match (publish_date(&lhs.1), publish_date(&rhs.1)) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => lhs.0.cmp(&rhs.0),
    });

    matches.into_iter().next().map(|(_, a)| a)
}

fn publish_date(a: &Announcement) -> Option<NaiveDate> {
    // Feed dates are "YYYY-MM-DD", sometimes with a trailing time component.
    let head = a.published.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
