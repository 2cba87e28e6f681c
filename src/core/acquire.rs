use crate::core::http::PacedClient;
use crate::domain::model::DisclosureImage;
use crate::domain::ports::{ArtifactKey, ArtifactStore};
use crate::utils::error::Result;

/// Downloads a disclosure image and persists it keyed by fund symbol.
/// Re-downloading the same URL overwrites in place, so the store holds at
/// most one live artifact per fund.
pub struct ImageAcquirer {
    client: PacedClient,
}

impl ImageAcquirer {
    pub fn new(client: PacedClient) -> Self {
        Self { client }
    }

    pub async fn download<S: ArtifactStore>(
        &self,
        store: &S,
        url: &str,
        symbol: &str,
    ) -> Result<(DisclosureImage, Vec<u8>)> {
        let response = self.client.get(url).await?.error_for_status()?;
        let bytes = response.bytes().await?.to_vec();

        let key = ArtifactKey::raw_image(symbol, extension_of(url));
        let artifact_path = store.write(&key, &bytes).await?;
        tracing::debug!(symbol, "Saved disclosure image ({} bytes)", bytes.len());

        let image = DisclosureImage {
            symbol: symbol.to_string(),
            source_url: url.to_string(),
            artifact_path,
        };
        Ok((image, bytes))
    }
}

fn extension_of(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit('.').next() {
        Some(ext) if matches!(ext, "jpg" | "jpeg" | "png") => ext,
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_taken_from_the_url_path() {
        assert_eq!(extension_of("https://x.com/a/nav.png"), "png");
        assert_eq!(extension_of("https://x.com/a/nav.jpeg?v=2"), "jpeg");
        assert_eq!(extension_of("https://x.com/a/nav"), "jpg");
        assert_eq!(extension_of("https://x.com/a/nav.webp"), "jpg");
    }
}
