//! Validation result value object

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field-keyed validation messages produced by a validate method
///
/// An empty result is valid. Messages for the same field keep their insertion
/// order; fields are ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationResult {
    /// Create an empty (valid) result
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add<K: Into<String>, M: Into<String>>(&mut self, field: K, message: M) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Whether no messages were recorded
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages grouped by field
    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Messages recorded for one field
    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map_or(&[], Vec::as_slice)
    }

    /// Consume the result, returning the field map
    pub fn into_errors(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed:")?;
        for (field, messages) in &self.errors {
            write!(f, "\n-- {}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}
