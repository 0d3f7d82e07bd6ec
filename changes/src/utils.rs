use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

pub static NON_ALPHANUMERIC_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9]+").expect("Failed to compile non-alphanumeric regex")
});

pub static CAPS_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-A-Z0-9]+$").expect("Failed to compile caps anchor regex"));

/// Suffix added to all-caps type and enum anchors
pub const CAPS_SUFFIX: &str = ":CAPS";

/// Collapse every run of non-alphanumerics to one hyphen and trim the ends
pub fn to_id(text: &str) -> String {
    NON_ALPHANUMERIC_RUN
        .replace_all(text, "-")
        .trim_matches('-')
        .to_string()
}

/// Link target for a function name
pub fn function_anchor(name: &str) -> String {
    name.replace('_', "-")
}

/// Link target for a type or enum name.
///
/// All-caps names get [`CAPS_SUFFIX`] so `RAPTOR_FOO` never shares an anchor
/// with a type spelled the same way.
pub fn symbol_anchor(name: &str) -> String {
    let mut anchor = name.replace('_', "-");
    if CAPS_ANCHOR.is_match(&anchor) {
        anchor.push_str(CAPS_SUFFIX);
    }
    anchor
}

/// Escape text for use in XML content and attribute values
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}
