//! Field definition and markup.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::html::{attributes_to_string, html_escape};

/// A single named input with a current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name; unique within its container and used as the request key.
    pub name: String,

    /// Current value. `None` until set or submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Input type (e.g., "text", "hidden", "textarea").
    #[serde(rename = "type")]
    pub field_type: String,

    /// Additional HTML attributes emitted when rendering.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Field {
    /// Create a field with the given name and input type.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            field_type: field_type.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Create a single-line text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, "text")
    }

    /// Create an email field.
    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, "email")
    }

    /// Create a hidden field carrying a fixed value.
    pub fn hidden(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, "hidden").value(value)
    }

    /// Create a multi-line text field.
    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(name, "textarea")
    }

    /// Create a submit button.
    pub fn submit(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, "submit").value(label)
    }

    /// Set the value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Add an HTML attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Current value, or the empty string when unset.
    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    /// Render the field to markup.
    ///
    /// `name`, `type` and `value` always come from the field itself; matching
    /// keys in the attribute bag are ignored.
    pub fn render(&self) -> String {
        let name = html_escape(&self.name);
        let attrs = attributes_to_string(&self.attributes, &["name", "type", "value"]);

        if self.field_type == "textarea" {
            return format!(
                "<textarea name=\"{name}\"{attrs}>{}</textarea>",
                html_escape(self.value_str())
            );
        }

        let value = match &self.value {
            Some(v) => format!(" value=\"{}\"", html_escape(v)),
            None => String::new(),
        };

        format!(
            "<input type=\"{}\" name=\"{name}\"{value}{attrs}>",
            html_escape(&self.field_type)
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_field_builder() {
        let field = Field::email("email")
            .value("a@b.com")
            .attribute("placeholder", "you@example.com");

        assert_eq!(field.name, "email");
        assert_eq!(field.field_type, "email");
        assert_eq!(field.value.as_deref(), Some("a@b.com"));
        assert_eq!(field.attributes.get("placeholder").unwrap(), "you@example.com");
    }

    #[test]
    fn test_render_input() {
        let field = Field::text("subject").attribute("class", "form-text");
        assert_eq!(
            field.render(),
            "<input type=\"text\" name=\"subject\" class=\"form-text\">"
        );
    }

    #[test]
    fn test_render_hidden_with_value() {
        let field = Field::hidden("form", "contact");
        assert_eq!(
            field.render(),
            "<input type=\"hidden\" name=\"form\" value=\"contact\">"
        );
    }

    #[test]
    fn test_render_textarea_escapes_value() {
        let field = Field::textarea("message").value("<b>hi</b>");
        assert_eq!(
            field.render(),
            "<textarea name=\"message\">&lt;b&gt;hi&lt;/b&gt;</textarea>"
        );
    }

    #[test]
    fn test_render_ignores_shadowing_attributes() {
        let field = Field::text("name").attribute("name", "other").attribute("type", "password");
        let html = field.render();
        assert!(html.contains("name=\"name\""));
        assert!(!html.contains("other"));
        assert!(!html.contains("password"));
    }

    #[test]
    fn test_value_str_defaults_to_empty() {
        assert_eq!(Field::text("a").value_str(), "");
    }

    #[test]
    fn test_field_serialization() {
        let field = Field::text("name").value("John");
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"type\":\"text\""));

        let parsed: Field = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, field);
    }
}
