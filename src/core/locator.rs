use crate::core::http::PacedClient;
use crate::utils::error::Result;
use scraper::{Html, Selector};
use url::Url;

const ACCEPTED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// Finds the disclosure image embedded in an announcement detail page.
pub struct DocumentImageLocator {
    client: PacedClient,
}

impl DocumentImageLocator {
    pub fn new(client: PacedClient) -> Self {
        Self { client }
    }

    /// Returns the absolute image URL, or `None` when the page carries no
    /// candidate (skip, not fatal).
    pub async fn locate(&self, announcement_url: &str) -> Result<Option<String>> {
        let page = self
            .client
            .get(announcement_url)
            .await?
            .error_for_status()?
            .text()
            .await?;

        let Some(src) = find_disclosure_image(&page) else {
            return Ok(None);
        };

        // Some pages use site-relative asset paths.
        match Url::parse(announcement_url).and_then(|base| base.join(&src)) {
            Ok(absolute) => Ok(Some(absolute.to_string())),
            Err(_) => Ok(Some(src)),
        }
    }
}

/// Scans `<img>` elements for the first announcement-attached asset with an
/// accepted raster extension.
pub fn find_disclosure_image(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let img = Selector::parse("img").expect("static selector");

    doc.select(&img)
        .filter_map(|el| el.value().attr("src"))
        .find(|src| {
            let lower = src.to_lowercase();
            lower.contains("announcement") && ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
        })
        .map(|s| s.to_string())
}
