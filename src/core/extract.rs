use crate::domain::model::{CandidateRecord, RecognizedLine};

/// Domain markers looked for in recognized text. Hits are a triage signal
/// for the downstream human audit, not a parse of the table.
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "NAV",
    "खुद मूल्य",
    "मूल्य",
    "इकाई",
    "सम्पत्ति",
    "म्युचुअल",
];

/// Builds the candidate record from recognized lines: trims text, drops empty
/// lines (keeping the rest in reading order), and tags the record with every
/// domain keyword present anywhere in the joined text. Numeric field
/// extraction is deliberately not attempted here; layouts vary by publisher
/// and are resolved by the audit step.
pub fn extract(symbol: &str, lines: Vec<RecognizedLine>) -> CandidateRecord {
    let lines: Vec<RecognizedLine> = lines
        .into_iter()
        .filter_map(|line| {
            let text = line.text.trim().to_string();
            if text.is_empty() {
                None
            } else {
                Some(RecognizedLine { text, ..line })
            }
        })
        .collect();

    let joined = lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let keyword_hits = DOMAIN_KEYWORDS
        .iter()
        .filter(|kw| joined.contains(*kw))
        .map(|kw| kw.to_string())
        .collect();

    CandidateRecord {
        symbol: symbol.to_string(),
        keyword_hits,
        lines,
    }
}
