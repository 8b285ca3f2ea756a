//! Pattern lookup primitives used by every field rule
//!
//! Lookups are first-match over the whole text, line breaks included.
//! A miss is `None`, never an error; transforms go through `Option::map`
//! so they only ever see a value that was actually found.

use regex::Regex;

/// Capture group 1 of the first match, trimmed
pub fn find(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)?
        .get(1)
        .map(|m| m.as_str().trim().to_string())
}

/// Groups 1 and 2 of the first match, untouched
pub fn find_pair<'t>(pattern: &Regex, text: &'t str) -> Option<(&'t str, &'t str)> {
    let caps = pattern.captures(text)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Flatten line breaks into spaces and trim
pub fn clean(value: &str) -> String {
    value.replace(['\r', '\n'], " ").trim().to_string()
}

/// Clean a raw capture. An empty capture is treated as not found.
pub fn clean_capture(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(clean(value))
    }
}
