//! Project record assembly.
//!
//! A record is built in layers, each overwriting keys of the one before:
//! template defaults, then fields computed from the URL and remote
//! metadata, then caller overrides.

use serde_json::Value;

use crate::parser::SourceKind;
use crate::store::{JsonObject, merge_shallow};

/// Project record under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectRecord {
    fields: JsonObject,
}

impl ProjectRecord {
    /// Starts a record from template defaults.
    #[must_use]
    pub fn from_template(template: JsonObject) -> Self {
        Self { fields: template }
    }

    /// Sets a single field.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Sets `source`.
    pub fn set_source(&mut self, kind: SourceKind) {
        self.set("source", kind.as_str());
    }

    /// Sets `link`.
    pub fn set_link(&mut self, url: &str) {
        self.set("link", url);
    }

    /// Sets `authorIds`, preserving order.
    pub fn set_author_ids(&mut self, author_ids: Vec<String>) {
        self.set(
            "authorIds",
            Value::Array(author_ids.into_iter().map(Value::String).collect()),
        );
    }

    /// Applies caller overrides as the final layer.
    pub fn apply_overrides(&mut self, overrides: &JsonObject) {
        merge_shallow(&mut self.fields, overrides);
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Borrows the assembled fields.
    #[must_use]
    pub fn as_object(&self) -> &JsonObject {
        &self.fields
    }
}

/// Parses a `KEY=VALUE` override.
///
/// The value is read as JSON when it parses (`true`, `3`, `["a"]`,
/// `"quoted"`), otherwise taken as a plain string.
///
/// # Errors
///
/// Returns a message when the `=` is missing or the key is empty.
pub fn parse_override(raw: &str) -> Result<(String, Value), String> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(format!("expected KEY=VALUE, got '{raw}'"));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("override key cannot be empty in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
