use crate::domain::model::RecognizedLine;
use crate::domain::ports::Recognizer;
use crate::utils::error::{NavError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs Tesseract as a child process over stdin/stdout, in sparse-text page
/// segmentation (`--psm 11`): find as much text as possible in no particular
/// order, which suits photographed tables far better than block modes.
/// Running as a subprocess keeps the (multi-second) recognition off the
/// network pacing path.
pub struct TesseractRecognizer {
    binary: String,
}

impl TesseractRecognizer {
    pub fn new() -> Self {
        Self {
            binary: "tesseract".to_string(),
        }
    }

    /// Engine binary override, used by tests to simulate a missing runtime.
    pub fn with_binary(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Recognizer for TesseractRecognizer {
    async fn recognize(&self, image: &[u8], languages: &str) -> Result<Vec<RecognizedLine>> {
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "--oem", "3", "--psm", "11", "-l", languages, "tsv"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NavError::EngineUnavailable {
                        message: format!(
                            "'{}' not found; install tesseract with data for '{}'",
                            self.binary, languages
                        ),
                    }
                } else {
                    NavError::IoError(e)
                }
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| NavError::Recognition {
            message: "failed to open engine stdin".to_string(),
        })?;
        stdin.write_all(image).await?;
        drop(stdin);

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(NavError::Recognition {
                message: format!(
                    "engine exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(parse_tsv(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Groups Tesseract TSV word rows (level 5) into lines, averaging word
/// confidences into a per-line confidence in [0, 1]. Line order follows the
/// engine's reading order, not the document layout.
pub fn parse_tsv(tsv: &str) -> Vec<RecognizedLine> {
    let mut lines: Vec<RecognizedLine> = Vec::new();
    let mut current_key: Option<(String, String, String, String)> = None;
    let mut words: Vec<String> = Vec::new();
    let mut confidences: Vec<f32> = Vec::new();

    fn flush(words: &mut Vec<String>, confidences: &mut Vec<f32>, lines: &mut Vec<RecognizedLine>) {
        if words.is_empty() {
            return;
        }
        let confidence = confidences.iter().sum::<f32>() / confidences.len() as f32;
        let index = lines.len();
        lines.push(RecognizedLine {
            text: words.join(" "),
            confidence: (confidence / 100.0).clamp(0.0, 1.0),
            index,
        });
        words.clear();
        confidences.clear();
    }

    for row in tsv.lines().skip(1) {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < 12 || cols[0] != "5" {
            continue;
        }

        let key = (
            cols[1].to_string(),
            cols[2].to_string(),
            cols[3].to_string(),
            cols[4].to_string(),
        );
        if current_key.as_ref() != Some(&key) {
            flush(&mut words, &mut confidences, &mut lines);
            current_key = Some(key);
        }

        let text = cols[11].trim();
        if text.is_empty() {
            continue;
        }
        words.push(text.to_string());
        confidences.push(cols[10].parse::<f32>().unwrap_or(0.0));
    }
    flush(&mut words, &mut confidences, &mut lines);

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn word(block: u32, line: u32, word: u32, conf: &str, text: &str) -> String {
        format!("5\t1\t{block}\t1\t{line}\t{word}\t0\t0\t10\t10\t{conf}\t{text}")
    }

    #[test]
    fn groups_words_into_ordered_lines() {
        let tsv = [
            HEADER.to_string(),
            "2\t1\t1\t0\t0\t0\t0\t0\t0\t0\t-1\t".to_string(),
            word(1, 1, 1, "91.0", "NAV"),
            word(1, 1, 2, "85.0", "10.52"),
            word(2, 1, 1, "64.0", "मूल्य"),
        ]
        .join("\n");

        let lines = parse_tsv(&tsv);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "NAV 10.52");
        assert!((lines[0].confidence - 0.88).abs() < 1e-4);
        assert_eq!(lines[0].index, 0);
        assert_eq!(lines[1].text, "मूल्य");
        assert_eq!(lines[1].index, 1);
    }

    #[test]
    fn non_word_rows_and_blank_words_are_ignored() {
        let tsv = [HEADER.to_string(), word(1, 1, 1, "-1", "  ")].join("\n");
        assert!(parse_tsv(&tsv).is_empty());
    }

    #[test]
    fn empty_output_yields_no_lines() {
        assert!(parse_tsv("").is_empty());
        assert!(parse_tsv(HEADER).is_empty());
    }

    #[tokio::test]
    async fn missing_engine_is_engine_unavailable() {
        let recognizer = TesseractRecognizer::with_binary("navscrape-no-such-engine");
        let err = recognizer.recognize(b"png-bytes", "nep+eng").await.unwrap_err();
        assert!(matches!(err, NavError::EngineUnavailable { .. }));
    }
}
