use crate::domain::ports::ConfigProvider;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "navscrape")]
#[command(about = "Scrapes open-end fund NAV disclosure images and extracts candidate text via OCR")]
pub struct CliConfig {
    #[arg(long, default_value = "https://www.sharesansar.com")]
    pub base_url: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Directory page size (number of funds requested).
    #[arg(long, default_value = "50")]
    pub page_length: usize,

    /// Fund-type filter for the directory query; 2 selects open-end funds.
    #[arg(long, default_value = "2")]
    pub fund_type: u32,

    /// Announcement feed page size per fund.
    #[arg(long, default_value = "10")]
    pub feed_length: usize,

    /// Minimum interval between outbound requests, in milliseconds.
    #[arg(long, default_value = "500")]
    pub pace_ms: u64,

    /// Tesseract language set for recognition.
    #[arg(long, default_value = "nep+eng")]
    pub languages: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn page_length(&self) -> usize {
        self.page_length
    }

    fn fund_type(&self) -> u32 {
        self.fund_type
    }

    fn feed_length(&self) -> usize {
        self.feed_length
    }

    fn pace_ms(&self) -> u64 {
        self.pace_ms
    }

    fn languages(&self) -> &str {
        &self.languages
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("page_length", self.page_length, 1)?;
        validate_positive_number("feed_length", self.feed_length, 1)?;
        validate_non_empty_string("languages", &self.languages)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            base_url: "https://www.sharesansar.com".to_string(),
            output_path: "./output".to_string(),
            page_length: 50,
            fund_type: 2,
            feed_length: 10,
            pace_ms: 500,
            languages: "nep+eng".to_string(),
            verbose: false,
        }
    }

    #[test]
    fn default_shape_validates() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn bad_base_url_fails_validation() {
        let mut config = base_config();
        config.base_url = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_page_length_fails_validation() {
        let mut config = base_config();
        config.page_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_language_set_fails_validation() {
        let mut config = base_config();
        config.languages = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
