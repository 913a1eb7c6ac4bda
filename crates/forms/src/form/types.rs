//! Form definition, submission binding, and markup.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{FormError, FormResult};
use crate::field::{Field, FieldContainer};
use crate::method::Method;
use crate::render::{DirectRenderer, FormRenderer};
use crate::request::RequestData;

/// Name of the hidden field that carries the form name on submission.
pub const IDENTITY_FIELD: &str = "form";

/// Submission handler. Receives the form after values have been bound.
pub type FormCallback = Arc<dyn Fn(&Form) -> anyhow::Result<()> + Send + Sync>;

/// A named set of fields with a submission method and handler.
#[derive(Clone)]
pub struct Form {
    name: String,
    method: Method,
    attributes: BTreeMap<String, String>,
    fields: FieldContainer,
    handler: FormCallback,
}

impl Form {
    /// Create a GET form with the given name and handler.
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Form) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::with_callback(name.into(), Method::Get, BTreeMap::new(), Arc::new(handler))
    }

    /// Create a form with a method given as a string.
    ///
    /// The method is matched case-insensitively against GET and POST.
    pub fn try_new<F>(name: impl Into<String>, method: &str, handler: F) -> FormResult<Self>
    where
        F: Fn(&Form) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let method = method.parse()?;
        Ok(Self::with_callback(
            name.into(),
            method,
            BTreeMap::new(),
            Arc::new(handler),
        ))
    }

    /// Create a form from an attribute bag.
    ///
    /// The `method` attribute (default GET) selects the submission method;
    /// the remaining attributes are rendered onto the `<form>` tag.
    pub fn from_attributes(
        name: impl Into<String>,
        attributes: BTreeMap<String, String>,
        handler: FormCallback,
    ) -> FormResult<Self> {
        let mut attributes = attributes;
        let method = match attributes.remove("method") {
            Some(m) => m.parse()?,
            None => Method::Get,
        };
        Ok(Self::with_callback(name.into(), method, attributes, handler))
    }

    fn with_callback(
        name: String,
        method: Method,
        attributes: BTreeMap<String, String>,
        handler: FormCallback,
    ) -> Self {
        let mut form = Self {
            name,
            method,
            attributes,
            fields: FieldContainer::new(),
            handler,
        };
        form.inject_identity_field();
        form
    }

    fn inject_identity_field(&mut self) {
        self.fields
            .add_field(Field::hidden(IDENTITY_FIELD, self.name.clone()));
    }

    /// Set the submission method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add an HTML attribute for the `<form>` tag.
    ///
    /// A `method` attribute is ignored here; use [`Form::with_method`] or
    /// [`Form::set_method`] instead.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        if key.eq_ignore_ascii_case("method") {
            warn!(form = %self.name, "ignoring method attribute; set the method explicitly");
            return self;
        }
        self.attributes.insert(key, value.into());
        self
    }

    /// Add a field.
    ///
    /// A field named `form` is skipped with a warning because that name
    /// belongs to the identity field.
    pub fn field(mut self, field: Field) -> Self {
        if let Err(e) = self.add_field(field) {
            warn!(form = %self.name, error = %e, "field not added");
        }
        self
    }

    /// Add a field, replacing any field with the same name.
    pub fn add_field(&mut self, field: Field) -> FormResult<()> {
        if field.name == IDENTITY_FIELD {
            return Err(FormError::ReservedFieldName(field.name));
        }
        self.fields.add_field(field);
        Ok(())
    }

    /// Form name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submission method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Set the submission method from a string, validating it.
    pub fn set_method(&mut self, method: &str) -> FormResult<()> {
        self.method = method.parse()?;
        Ok(())
    }

    /// Rendering attributes, excluding the method.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// The form's fields, including the identity field.
    pub fn fields(&self) -> &FieldContainer {
        &self.fields
    }

    /// Replace the field container.
    ///
    /// The identity field is re-injected, overriding any `form` field in
    /// `fields`.
    pub fn set_fields(&mut self, fields: FieldContainer) {
        self.fields = fields;
        self.inject_identity_field();
    }

    /// The submission handler.
    pub fn handler(&self) -> &FormCallback {
        &self.handler
    }

    /// Current value of a field, if the field exists and has one.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields.get_field(name).and_then(|f| f.value.as_deref())
    }

    /// Check whether the request was submitted by this form.
    pub fn should_handle(&self, request: &dyn RequestData) -> bool {
        request.param(self.method, IDENTITY_FIELD) == Some(self.name.as_str())
    }

    /// Bind submitted values into the fields, then call the handler.
    ///
    /// Fields without a matching parameter keep their current value. The
    /// handler runs even when nothing was bound.
    pub fn process(&mut self, request: &dyn RequestData) -> FormResult<()> {
        let bound = self.bind_values(request);
        debug!(form = %self.name, bound, "processing form");

        let handler = Arc::clone(&self.handler);
        (handler)(self).map_err(|source| FormError::Handler {
            form: self.name.clone(),
            source,
        })
    }

    fn bind_values(&mut self, request: &dyn RequestData) -> usize {
        let method = self.method;
        let mut bound = 0;
        for field in self.fields.iter_mut() {
            if field.name == IDENTITY_FIELD {
                continue;
            }
            if let Some(value) = request.param(method, &field.name) {
                field.value = Some(value.to_string());
                bound += 1;
            }
        }
        bound
    }

    /// Attributes for the `<form>` tag, with the method included.
    pub fn render_attributes(&self) -> BTreeMap<String, String> {
        let mut attributes = self.attributes.clone();
        attributes.insert("method".to_string(), self.method.as_str().to_string());
        attributes
    }

    /// Render the form by building markup directly.
    pub fn render(&self) -> String {
        DirectRenderer::markup(&self.render_attributes(), &self.fields.render())
    }

    /// Render the form through a renderer backend.
    pub fn render_with(&self, renderer: &dyn FormRenderer) -> FormResult<String> {
        renderer.render_form(&self.render_attributes(), &self.fields.render())
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("attributes", &self.attributes)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
