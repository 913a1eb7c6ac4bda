//! Insertion-ordered field collection.

use std::fmt;

use indexmap::IndexMap;

use super::types::Field;

/// Fields keyed by name, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldContainer {
    fields: IndexMap<String, Field>,
}

impl FieldContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any field with the same name.
    ///
    /// A replaced field keeps its original position.
    pub fn add_field(&mut self, field: Field) {
        self.fields.insert(field.name.clone(), field);
    }

    /// Check if a field exists.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Get a mutable reference to a field.
    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.get_mut(name)
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Iterate fields mutably in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.fields.values_mut()
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render every field, concatenated in insertion order.
    pub fn render(&self) -> String {
        self.iter().map(Field::render).collect()
    }
}

impl<'a> IntoIterator for &'a FieldContainer {
    type Item = &'a Field;
    type IntoIter = indexmap::map::Values<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}

impl FromIterator<Field> for FieldContainer {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut container = Self::new();
        for field in iter {
            container.add_field(field);
        }
        container
    }
}

impl fmt::Display for FieldContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
