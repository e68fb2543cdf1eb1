//! Field descriptors
//!
//! Callers describe the fields a rule may reference (typically destination
//! table columns) as a case-insensitive name → type map. A small set of
//! current-time names resolves without a descriptor.

use std::collections::HashMap;

use crate::ast::ValueType;
use crate::catalog;

/// Case-insensitive field name → type map.
#[derive(Debug, Clone, Default)]
pub struct FieldDescriptors {
    // keys are stored lowercased
    fields: HashMap<String, ValueType>,
}

impl FieldDescriptors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor, replacing any previous type for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value_type: ValueType) {
        let name = name.into();
        self.fields.insert(name.to_lowercase(), value_type);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.insert(name, value_type);
        self
    }

    /// Look up a field, falling back to the built-in current-time names.
    /// Caller-supplied descriptors win on collision.
    pub fn lookup(&self, name: &str) -> Option<ValueType> {
        let key = name.to_lowercase();
        self.fields.get(&key).copied().or_else(|| {
            catalog::CURRENT_TIME_FIELDS
                .contains(&key.as_str())
                .then_some(ValueType::Date)
        })
    }

    /// All matchable names with their types: descriptors plus the built-in
    /// current-time names not shadowed by one.
    pub(crate) fn candidates(&self) -> impl Iterator<Item = (&str, ValueType)> {
        self.fields
            .iter()
            .map(|(name, ty)| (name.as_str(), *ty))
            .chain(
                catalog::CURRENT_TIME_FIELDS
                    .iter()
                    .filter(|name| !self.fields.contains_key(**name))
                    .map(|name| (*name, ValueType::Date)),
            )
    }
}

impl<N: Into<String>> FromIterator<(N, ValueType)> for FieldDescriptors {
    fn from_iter<T: IntoIterator<Item = (N, ValueType)>>(iter: T) -> Self {
        let mut out = Self::new();
        for (name, ty) in iter {
            out.insert(name, ty);
        }
        out
    }
}
