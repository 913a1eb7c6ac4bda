//! Building forms from declarative definitions.
//!
//! Plugins can describe a form in JSON or YAML and turn it into a [`Form`]
//! with [`FormFactory::create`]:
//!
//! ```yaml
//! attributes:
//!   method: post
//!   action: /contact
//! fields:
//!   email:
//!     type: email
//!   message:
//!     type: textarea
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FormError, FormResult};
use crate::field::Field;
use crate::form::{Form, FormCallback};

/// Declarative description of a form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormDefinition {
    /// `<form>` attributes; `method` selects the submission method.
    #[serde(default, alias = "atts")]
    pub attributes: BTreeMap<String, String>,

    /// Fields keyed by name, in display order.
    #[serde(default)]
    pub fields: IndexMap<String, FieldDefinition>,
}

/// Declarative description of a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Input type (default: "text").
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,

    /// Initial value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Additional HTML attributes.
    #[serde(default, alias = "atts", skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

fn default_field_type() -> String {
    "text".to_string()
}

impl FieldDefinition {
    /// Build the field this definition describes.
    pub fn to_field(&self, name: &str) -> Field {
        let mut field = Field::new(name, self.field_type.clone());
        field.value = self.value.clone();
        field.attributes = self.attributes.clone();
        field
    }
}

impl FormDefinition {
    /// Parse a definition from JSON.
    pub fn from_json(input: &str) -> FormResult<Self> {
        serde_json::from_str(input).map_err(|e| FormError::Definition(e.to_string()))
    }

    /// Parse a definition from YAML.
    pub fn from_yaml(input: &str) -> FormResult<Self> {
        serde_yml::from_str(input).map_err(|e| FormError::Definition(e.to_string()))
    }
}

/// Creates forms from definitions.
pub struct FormFactory;

impl FormFactory {
    /// Build a form named `name` from `definition`, handled by `handler`.
    ///
    /// Fails on an invalid method or on a field named `form`.
    pub fn create<F>(name: &str, definition: &FormDefinition, handler: F) -> FormResult<Form>
    where
        F: Fn(&Form) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let callback: FormCallback = Arc::new(handler);
        let mut form = Form::from_attributes(name, definition.attributes.clone(), callback)?;

        for (field_name, field_def) in &definition.fields {
            form.add_field(field_def.to_field(field_name))?;
        }

        debug!(form = %name, fields = definition.fields.len(), "created form from definition");
        Ok(form)
    }
}
