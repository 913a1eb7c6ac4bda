//! Markup helpers shared by fields and renderers.

use std::collections::BTreeMap;

/// Escape HTML special characters to prevent XSS.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render an attribute bag as ` key="value"` pairs, escaping values.
///
/// Keys listed in `skip` are left out so callers can emit them explicitly.
pub fn attributes_to_string(attributes: &BTreeMap<String, String>, skip: &[&str]) -> String {
    attributes
        .iter()
        .filter(|(k, _)| !skip.contains(&k.as_str()))
        .map(|(k, v)| format!(" {}=\"{}\"", html_escape(k), html_escape(v)))
        .collect()
}
