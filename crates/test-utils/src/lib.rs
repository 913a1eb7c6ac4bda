//! Trovato test utilities.
//!
//! Helpers for form integration testing: handler call recording, request
//! fixtures, template directories, and assertions over rendered markup.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use regex::Regex;

/// Records values captured by a form handler, one entry per invocation.
///
/// Clones share the same log, so one clone can move into the handler while
/// the test keeps the other.
#[derive(Debug)]
pub struct CallRecorder<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for CallRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<T> Default for CallRecorder<T> {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Clone> CallRecorder<T> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one invocation.
    pub fn record(&self, value: T) {
        self.calls.lock().push(value);
    }

    /// Number of recorded invocations.
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Snapshot of all recorded values.
    pub fn calls(&self) -> Vec<T> {
        self.calls.lock().clone()
    }

    /// The most recent recorded value.
    pub fn last(&self) -> Option<T> {
        self.calls.lock().last().cloned()
    }
}

/// Encode key/value pairs as an `application/x-www-form-urlencoded` string.
pub fn urlencoded(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Write a template file under `dir`, creating parent directories.
pub fn write_template(dir: &Path, name: &str, contents: &str) -> std::io::Result<()> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

/// Field names found in rendered markup, in document order.
pub fn rendered_field_names(html: &str) -> Vec<String> {
    let Ok(re) = Regex::new(r#"<(?:input|textarea|select)\b[^>]*?\sname="([^"]*)""#) else {
        return Vec::new();
    };
    re.captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Assertion helpers for rendered markup.
pub mod assert {
    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{}'\nActual: {}",
            needle,
            haystack
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{}'\nActual: {}",
            needle,
            haystack
        );
    }

    /// Assert that the markup is wrapped in a single `<form>` element.
    pub fn is_form(html: &str) {
        let html = html.trim();
        assert!(
            html.starts_with("<form") && html.ends_with("</form>"),
            "Expected a <form> element\nActual: {}",
            html
        );
        assert_eq!(
            html.matches("<form").count(),
            1,
            "Expected exactly one <form> element\nActual: {}",
            html
        );
    }
}
