//! Helpers for feed cells that arrive as HTML anchor fragments rather than
//! plain values.

use regex::Regex;
use std::sync::OnceLock;

fn anchor_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r">([^<]+)</a>").expect("static regex"))
}

fn anchor_href_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"href="([^"]+)""#).expect("static regex"))
}

/// Inner text of the first anchor in the fragment.
pub fn anchor_text(fragment: &str) -> Option<String> {
    anchor_text_re()
        .captures(fragment)
        .map(|c| c[1].trim().to_string())
}

/// `href` of the first anchor in the fragment.
pub fn anchor_href(fragment: &str) -> Option<String> {
    anchor_href_re().captures(fragment).map(|c| c[1].to_string())
}
