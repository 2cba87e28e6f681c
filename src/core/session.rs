//! Credential scraping for the announcement feed.
//!
//! The feed only answers form posts that carry the anti-forgery token and
//! company identifiers embedded in the fund's profile page. Parsing is a pure
//! function over the page text so it can be exercised against fixture HTML
//! without an HTTP client.

use crate::utils::error::{NavError, Result};
use scraper::{Html, Selector};

/// Session-scoped fields scraped from a fund profile page.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionFields {
    pub token: String,
    pub company_id: String,
    /// The page's own symbol element; absent on some layouts, in which case
    /// the caller falls back to the directory symbol.
    pub symbol: Option<String>,
    pub sector: String,
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

pub fn parse_session_fields(html: &str, context: &str) -> Result<SessionFields> {
    let doc = Html::parse_document(html);

    let token = doc
        .select(&selector(r#"meta[name="_token"]"#))
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| NavError::Scrape {
            field: "_token meta".to_string(),
            context: context.to_string(),
        })?;

    let company_id = element_text(&doc, "#companyid")
        .filter(|s| !s.is_empty())
        .ok_or_else(|| NavError::Scrape {
            field: "#companyid".to_string(),
            context: context.to_string(),
        })?;

    Ok(SessionFields {
        token,
        company_id,
        symbol: element_text(&doc, "#symbol").filter(|s| !s.is_empty()),
        sector: element_text(&doc, "#sector").unwrap_or_default(),
    })
}

fn element_text(doc: &Html, css: &str) -> Option<String> {
    doc.select(&selector(css))
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}
