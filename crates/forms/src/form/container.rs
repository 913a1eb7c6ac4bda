//! Insertion-ordered form registry.

use indexmap::IndexMap;

use super::types::Form;

/// Forms keyed by name, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FormContainer {
    forms: IndexMap<String, Form>,
}

impl FormContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a form. A form with the same name is silently replaced.
    pub fn add_form(&mut self, form: Form) {
        self.forms.insert(form.name().to_string(), form);
    }

    /// Check if a form exists.
    pub fn has_form(&self, name: &str) -> bool {
        self.forms.contains_key(name)
    }

    /// Get a form by name.
    pub fn get_form(&self, name: &str) -> Option<&Form> {
        self.forms.get(name)
    }

    /// Get a mutable reference to a form.
    pub fn get_form_mut(&mut self, name: &str) -> Option<&mut Form> {
        self.forms.get_mut(name)
    }

    /// Remove a form by name, preserving the order of the rest.
    pub fn remove_form(&mut self, name: &str) -> Option<Form> {
        self.forms.shift_remove(name)
    }

    /// Iterate forms in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Form> {
        self.forms.values()
    }

    /// Iterate forms mutably in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Form> {
        self.forms.values_mut()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl<'a> IntoIterator for &'a FormContainer {
    type Item = &'a Form;
    type IntoIter = indexmap::map::Values<'a, String, Form>;

    fn into_iter(self) -> Self::IntoIter {
        self.forms.values()
    }
}
