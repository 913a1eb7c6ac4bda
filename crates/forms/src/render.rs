//! Form rendering backends.

use std::collections::BTreeMap;

use crate::error::FormResult;
use crate::html::attributes_to_string;

/// Wraps rendered field markup in a `<form>` element.
pub trait FormRenderer: Send + Sync {
    /// Render the form element with the given tag attributes around `content`.
    fn render_form(&self, attributes: &BTreeMap<String, String>, content: &str)
    -> FormResult<String>;
}

/// Builds form markup directly, with no template engine involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectRenderer;

impl DirectRenderer {
    /// Assemble `<form ...>content</form>`.
    pub fn markup(attributes: &BTreeMap<String, String>, content: &str) -> String {
        format!("<form{}>{content}</form>", attributes_to_string(attributes, &[]))
    }
}

impl FormRenderer for DirectRenderer {
    fn render_form(
        &self,
        attributes: &BTreeMap<String, String>,
        content: &str,
    ) -> FormResult<String> {
        Ok(Self::markup(attributes, content))
    }
}
