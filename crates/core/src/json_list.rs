//! JSON-encoded string list fields.
//!
//! The CMS stores `tech_stack`, `features`, `deliverables` and
//! `gallery_images` as JSON text (`["Rust","Axum"]`). Forms edit them as
//! ordered lists. [`StringList`] is the form-side value; [`encode`] and
//! [`decode`] convert at the wire boundary.

use serde_json::Value;

use crate::error::CoreError;

/// Serialize a list to the JSON text stored by the CMS.
pub fn encode(items: &[String]) -> String {
    Value::from(items.to_vec()).to_string()
}

/// Parse a JSON list field as returned by the CMS.
///
/// A missing or blank field is an empty list. Non-string elements are kept
/// as their JSON text so nothing the CMS returns is silently dropped.
pub fn decode(field: &'static str, raw: Option<&str>) -> Result<Vec<String>, CoreError> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(Vec::new()),
    };

    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("{field} is not valid JSON: {e}")))?;

    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect()),
        Value::Null => Ok(Vec::new()),
        other => Err(CoreError::Validation(format!(
            "{field} must be a JSON array, got {other}"
        ))),
    }
}

/// An ordered, duplicate-free list of trimmed entries edited in a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringList(Vec<String>);

impl StringList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the list from a record's JSON field. Entries are trimmed and
    /// duplicates dropped, as with [`StringList::add`].
    pub fn from_json(field: &'static str, raw: Option<&str>) -> Result<Self, CoreError> {
        Ok(decode(field, raw)?.into_iter().collect())
    }

    /// Append an entry. Blank input and entries already present are ignored.
    ///
    /// Returns `true` when the list changed.
    pub fn add(&mut self, input: &str) -> bool {
        let entry = input.trim();
        if entry.is_empty() || self.0.iter().any(|existing| existing == entry) {
            return false;
        }
        self.0.push(entry.to_string());
        true
    }

    /// Remove an exact entry. Returns `true` when the list changed.
    pub fn remove(&mut self, entry: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != entry);
        self.0.len() != before
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> String {
        encode(&self.0)
    }
}

impl<S: Into<String>> FromIterator<S> for StringList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.add(&item.into());
        }
        list
    }
}

impl From<StringList> for Vec<String> {
    fn from(list: StringList) -> Self {
        list.0
    }
}
