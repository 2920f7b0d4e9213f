//! crates/logex/src/fields.rs
//! Structured key/value pairs attached to an entry.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

/// Field key used by [`Entry::with_error`](crate::Entry::with_error).
pub const ERROR_KEY: &str = "error";

/// Ordered set of structured fields.
///
/// Keys are kept sorted so the rendered suffix is stable from one call to the
/// next. Values are stored in their rendered form.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Fields(BTreeMap<String, String>);

impl Fields {
    /// Creates an empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Returns the rendered value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Reports whether no fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders the fields as ` key=value` pairs.
    ///
    /// Returns an empty string when there are no fields.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            push_pair(&mut out, key, value);
        }
        out
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        fields.extend(iter);
        fields
    }
}

impl<K, V> Extend<(K, V)> for Fields
where
    K: Into<String>,
    V: fmt::Display,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Appends ` key=value` to `out`, quoting either side when it would otherwise
/// be ambiguous.
pub(crate) fn push_pair(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    push_token(out, key);
    out.push('=');
    push_token(out, value);
}

fn push_token(out: &mut String, token: &str) {
    if needs_quoting(token) {
        let _ = write!(out, "{token:?}");
    } else {
        out.push_str(token);
    }
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '=' || c.is_control())
}
