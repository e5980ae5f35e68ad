//! Flat Key-Value Records
//!
//! Every text file the game reads or writes is a sequence of `KEY: value`
//! lines. Game data files hold several records separated by blank lines;
//! save files hold exactly one. List values are comma-joined.

use serde::Serialize;

/// Separator between a key and its value.
pub const FIELD_SEPARATOR: &str = ": ";

/// A single field value as read from a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            FieldValue::Scalar(_) => None,
        }
    }
}

/// An ordered mapping of lowercase field names to values.
///
/// Inserting an existing key replaces its value in place, so a record keeps
/// the order in which fields were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: FieldValue) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    pub fn insert_scalar(&mut self, key: &str, value: impl ToString) {
        self.insert(key, FieldValue::Scalar(value.to_string()));
    }

    pub fn insert_list(&mut self, key: &str, items: Vec<String>) {
        self.insert(key, FieldValue::List(items));
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Scalar value for `key`, if present and scalar
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_scalar)
    }

    /// List value for `key`, if present and a list
    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(FieldValue::as_list)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Split a `KEY: value` line. Returns `None` when the separator is missing.
pub fn split_field(line: &str) -> Option<(&str, &str)> {
    line.split_once(FIELD_SEPARATOR)
        .map(|(key, value)| (key.trim(), value.trim()))
}

/// Like `split_field`, but a bare `KEY:` (trailing space stripped by an
/// editor) is read as an empty value.
pub fn split_block_line(line: &str) -> Option<(&str, &str)> {
    split_field(line).or_else(|| {
        let key = line.trim().strip_suffix(':')?;
        Some((key.trim(), ""))
    })
}

/// Split file content into blank-line separated blocks of non-empty lines.
/// Leading indentation is dropped; trailing whitespace is kept so an empty
/// `KEY: ` value still carries its separator.
pub fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in content.lines() {
        let line = line.trim_start();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Parse a comma-joined list. Empty entries are dropped, so an empty value
/// is an empty list.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
}

/// Whether `value` survives being written as one entry of a comma-joined
/// list and read back: non-empty, no commas or line breaks, no padding.
pub fn is_list_entry(value: &str) -> bool {
    !value.is_empty()
        && value.trim() == value
        && !value.contains([',', '\n', '\r'])
}

/// Uppercase snake-case file key for a lowercase field name.
pub fn file_key(field: &str) -> String {
    field.to_ascii_uppercase()
}

/// Lowercase field name for an uppercase file key.
pub fn field_name(key: &str) -> String {
    key.to_ascii_lowercase()
}
