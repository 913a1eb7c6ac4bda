//! Request data access.
//!
//! Forms never read ambient request state. The caller hands them a
//! [`RequestData`] that exposes query-string and body parameters, which keeps
//! processing deterministic and testable.

use std::collections::HashMap;

use axum::http::{HeaderMap, Uri, header};

use crate::method::Method;

/// Read access to the parameters of the current request.
pub trait RequestData {
    /// A query-string parameter.
    fn query(&self, name: &str) -> Option<&str>;

    /// A body parameter.
    fn body(&self, name: &str) -> Option<&str>;

    /// A parameter from the source matching `method`.
    fn param(&self, method: Method, name: &str) -> Option<&str> {
        match method {
            Method::Get => self.query(name),
            Method::Post => self.body(name),
        }
    }

    /// Whether `name` is present in either the query string or the body.
    fn has_any(&self, name: &str) -> bool {
        self.query(name).is_some() || self.body(name).is_some()
    }
}

/// Owned request parameters.
///
/// When a key repeats, the last occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    query: HashMap<String, String>,
    body: HashMap<String, String>,
}

impl RequestParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string (with or without a leading `?`).
    pub fn from_query_string(query: &str) -> Self {
        Self {
            query: parse_urlencoded(query.trim_start_matches('?').as_bytes()),
            body: HashMap::new(),
        }
    }

    /// Replace the body parameters with a parsed urlencoded body.
    pub fn with_body_urlencoded(mut self, body: &[u8]) -> Self {
        self.body = parse_urlencoded(body);
        self
    }

    /// Build parameters from HTTP request parts.
    ///
    /// The body is only parsed when the request declares
    /// `application/x-www-form-urlencoded`; other bodies are ignored.
    pub fn from_http(uri: &Uri, headers: &HeaderMap, body: &[u8]) -> Self {
        let params = Self::from_query_string(uri.query().unwrap_or_default());

        let is_urlencoded = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| {
                ct.split(';')
                    .next()
                    .is_some_and(|mime| {
                        mime.trim()
                            .eq_ignore_ascii_case("application/x-www-form-urlencoded")
                    })
            });

        if is_urlencoded {
            params.with_body_urlencoded(body)
        } else {
            params
        }
    }

    /// Set a query-string parameter.
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Set a body parameter.
    pub fn body_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.insert(name.into(), value.into());
        self
    }
}

impl RequestData for RequestParams {
    fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    fn body(&self, name: &str) -> Option<&str> {
        self.body.get(name).map(String::as_str)
    }
}

fn parse_urlencoded(input: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(input).into_owned().collect()
}
