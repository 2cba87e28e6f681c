use async_trait::async_trait;
use httpmock::prelude::*;
use navscrape::core::acquire::ImageAcquirer;
use navscrape::core::http::PacedClient;
use navscrape::domain::model::{CandidateRecord, Fund, FundStatus, RecognizedLine};
use navscrape::domain::ports::Recognizer;
use navscrape::utils::pace::RateLimiter;
use navscrape::{CliConfig, FsArtifactStore, NavEngine, Result, ScrapePipeline};
use std::sync::Arc;
use tempfile::TempDir;

struct StubRecognizer {
    lines: Vec<RecognizedLine>,
}

#[async_trait]
impl Recognizer for StubRecognizer {
    async fn recognize(&self, _image: &[u8], _languages: &str) -> Result<Vec<RecognizedLine>> {
        Ok(self.lines.clone())
    }
}

fn test_config(server: &MockServer, output_path: &str) -> CliConfig {
    CliConfig {
        base_url: server.url(""),
        output_path: output_path.to_string(),
        page_length: 50,
        fund_type: 2,
        feed_length: 10,
        pace_ms: 0,
        languages: "nep+eng".to_string(),
        verbose: false,
    }
}

fn line(index: usize, text: &str) -> RecognizedLine {
    RecognizedLine {
        text: text.to_string(),
        confidence: 0.85,
        index,
    }
}

/// A real (tiny) encoded image, so preprocessing exercises an actual decode.
fn scan_bytes() -> Vec<u8> {
    use image::{DynamicImage, ImageFormat, RgbImage};
    let img = RgbImage::from_fn(24, 24, |x, _| {
        if x < 12 {
            image::Rgb([20, 20, 20])
        } else {
            image::Rgb([230, 230, 230])
        }
    });
    let mut buf = std::io::Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

fn directory_row(server: &MockServer, symbol: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "symbol": format!("<a href=\"{}\">{}</a>", server.url(format!("/company/{}", symbol.to_lowercase())), symbol),
        "companyname": format!("<a href=\"{}\">{}</a>", server.url(format!("/company/{}", symbol.to_lowercase())), name),
        "fund_size": "1,000,000,000",
        "daily_nav_price": "10.52",
        "daily_date": "2026-08-28"
    })
}

fn profile_page(company_id: &str, symbol: &str) -> String {
    format!(
        r#"<html><head><meta name="_token" content="tok-{company_id}"></head>
        <body><div id="companyid">{company_id}</div>
        <div id="symbol">{symbol}</div><div id="sector">Mutual Fund</div></body></html>"#
    )
}

fn feed_row(server: &MockServer, date: &str, title: &str, path: &str) -> serde_json::Value {
    serde_json::json!({
        "published_date": date,
        "title": format!("<a href=\"{}\">{}</a>", server.url(path), title)
    })
}

#[tokio::test]
async fn end_to_end_run_with_one_broken_fund() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let server = MockServer::start();

    // Directory lists ALPHA (healthy) and BETA (profile drifted: no token).
    server.mock(|when, then| {
        when.method(GET).path("/mutual-fund-navs");
        then.status(200).json_body(serde_json::json!({
            "data": [
                directory_row(&server, "ALPHA", "Alpha Growth Fund"),
                directory_row(&server, "BETA", "Beta Balanced Fund"),
            ]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/company/alpha");
        then.status(200).body(profile_page("301", "ALPHA"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/company/beta");
        then.status(200)
            .body("<html><body><div id=\"companyid\">302</div></body></html>");
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/company-announcements")
            .body_contains("company=301");
        then.status(200).json_body(serde_json::json!({
            "data": [
                feed_row(&server, "2026-08-20", "AGM Notice", "/ann/agm"),
                feed_row(&server, "2026-08-16", "Monthly NAV Report of Alpha Growth Fund", "/ann/alpha-nav"),
            ]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/ann/alpha-nav");
        then.status(200).body(format!(
            "<html><body><img src=\"{}\"></body></html>",
            server.url("/img/announcement/2026/alpha.jpg")
        ));
    });
    let image_bytes = scan_bytes();
    server.mock(|when, then| {
        when.method(GET).path("/img/announcement/2026/alpha.jpg");
        then.status(200).body(image_bytes.clone());
    });

    let recognizer = StubRecognizer {
        lines: vec![
            line(0, "Alpha Growth Fund"),
            line(1, "NAV 10.52"),
            line(2, "as of Shrawan end"),
        ],
    };
    let pipeline = ScrapePipeline::new(
        FsArtifactStore::new(&output_path),
        recognizer,
        test_config(&server, &output_path),
    );
    let summary = NavEngine::new(pipeline).run().await.unwrap();

    // ALPHA completed, BETA failed, and BETA's breakage did not touch ALPHA.
    assert_eq!(summary.outcomes.len(), 2);
    assert_eq!(summary.outcomes[0].symbol, "ALPHA");
    assert_eq!(summary.outcomes[0].status, FundStatus::Extracted);
    assert_eq!(summary.outcomes[1].symbol, "BETA");
    assert_eq!(summary.outcomes[1].status, FundStatus::Failed);
    assert!(summary.outcomes[1].detail.as_ref().unwrap().contains("_token"));
    assert!(summary.has_failures());
    assert_eq!(summary.extracted(), 1);

    // Partial results are persisted: directory snapshot, ALPHA's raw image
    // byte-for-byte, and ALPHA's candidate record.
    let snapshot = std::fs::read(temp_dir.path().join("data/funds.json")).unwrap();
    let funds: Vec<Fund> = serde_json::from_slice(&snapshot).unwrap();
    assert_eq!(funds.len(), 2);
    assert_eq!(funds[0].symbol, "ALPHA");

    let stored_image = std::fs::read(temp_dir.path().join("images/ALPHA.jpg")).unwrap();
    assert_eq!(stored_image, image_bytes);

    let record_bytes = std::fs::read(temp_dir.path().join("data/ALPHA_ocr.json")).unwrap();
    let record: CandidateRecord = serde_json::from_slice(&record_bytes).unwrap();
    assert_eq!(record.symbol, "ALPHA");
    assert_eq!(record.keyword_hits, vec!["NAV"]);
    assert_eq!(record.lines.len(), 3);

    assert!(!temp_dir.path().join("data/BETA_ocr.json").exists());
}

#[tokio::test]
async fn transport_failure_for_one_fund_leaves_neighbors_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/mutual-fund-navs");
        then.status(200).json_body(serde_json::json!({
            "data": [
                directory_row(&server, "FIRST", "First Fund"),
                directory_row(&server, "MID", "Middle Fund"),
                directory_row(&server, "LAST", "Last Fund"),
            ]
        }));
    });
    for (symbol, company_id) in [("first", "401"), ("last", "403")] {
        server.mock(move |when, then| {
            when.method(GET).path(format!("/company/{symbol}"));
            then.status(200)
                .body(profile_page(company_id, &symbol.to_uppercase()));
        });
    }
    // The middle fund's host path is down.
    server.mock(|when, then| {
        when.method(GET).path("/company/mid");
        then.status(500);
    });
    // Feeds carry no disclosure titles, so the healthy funds terminate in the
    // valid absence state.
    server.mock(|when, then| {
        when.method(POST).path("/company-announcements");
        then.status(200).json_body(serde_json::json!({
            "data": [feed_row(&server, "2026-08-01", "Dividend Notice", "/ann/div")]
        }));
    });

    let pipeline = ScrapePipeline::new(
        FsArtifactStore::new(&output_path),
        StubRecognizer { lines: vec![] },
        test_config(&server, &output_path),
    );
    let summary = NavEngine::new(pipeline).run().await.unwrap();

    assert_eq!(summary.outcomes.len(), 3);
    assert_eq!(summary.outcomes[0].status, FundStatus::NoAnnouncement);
    assert_eq!(summary.outcomes[1].status, FundStatus::Failed);
    assert_eq!(summary.outcomes[2].status, FundStatus::NoAnnouncement);
    assert!(summary.has_failures());
}

#[tokio::test]
async fn repeated_download_is_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let image_bytes = scan_bytes();
    server.mock(|when, then| {
        when.method(GET).path("/img/announcement/2026/gamma.png");
        then.status(200).body(image_bytes.clone());
    });

    let limiter = Arc::new(RateLimiter::from_millis(0));
    let acquirer = ImageAcquirer::new(PacedClient::new(limiter).unwrap());
    let store = FsArtifactStore::new(temp_dir.path());
    let url = server.url("/img/announcement/2026/gamma.png");

    let (first, _) = acquirer.download(&store, &url, "GAMMA").await.unwrap();
    let first_bytes = std::fs::read(temp_dir.path().join("images/GAMMA.png")).unwrap();

    let (second, _) = acquirer.download(&store, &url, "GAMMA").await.unwrap();
    let second_bytes = std::fs::read(temp_dir.path().join("images/GAMMA.png")).unwrap();

    assert_eq!(first.artifact_path, second.artifact_path);
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first_bytes, image_bytes);
}
