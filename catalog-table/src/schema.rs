//! Ordered column set with exact-name lookup and glob extraction.
//!
//! A [`Schema`] owns an ordered list of [`Field`]s with unique names. Columns
//! are addressed by [`Key`], a cheap index handle obtained from
//! [`Schema::find`] or [`Schema::add`]. Per-filter column families like
//! `flux.psf_g`, `flux.psf_r` are enumerated with [`Schema::extract`] and a
//! wildcard pattern; extraction order is always schema order, never an
//! incidental hash order.

use std::collections::HashMap;

use crate::error::{Result, TableError};
use crate::field::Field;

/// Handle to one column of a [`Schema`].
///
/// Valid only for the schema that issued it (or an exact clone of it, such as
/// the output catalog built from a mapper's output schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub(crate) usize);

impl Key {
    /// Position of the column in schema order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// An ordered collection of uniquely named columns.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
    by_name: HashMap<String, usize>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    ///
    /// # Errors
    /// Returns [`TableError::DuplicateField`] if a column with the same name
    /// already exists.
    pub fn add(&mut self, field: Field) -> Result<Key> {
        if self.by_name.contains_key(field.name()) {
            return Err(TableError::DuplicateField(field.name().to_owned()));
        }
        let index = self.fields.len();
        self.by_name.insert(field.name().to_owned(), index);
        self.fields.push(field);
        Ok(Key(index))
    }

    /// Look up a column by exact name.
    ///
    /// # Errors
    /// Returns [`TableError::MissingField`] if the name is absent. Callers
    /// treat this as fatal: it signals an incompatible catalog/configuration
    /// pair, not a transient condition.
    pub fn find(&self, name: &str) -> Result<Key> {
        self.by_name
            .get(name)
            .map(|&i| Key(i))
            .ok_or_else(|| TableError::MissingField(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn field(&self, key: Key) -> &Field {
        &self.fields[key.0]
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate columns in schema order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// All columns whose name matches a wildcard pattern, in schema order.
    ///
    /// Patterns support `*` (any run of characters, including empty) and `?`
    /// (exactly one character). A pattern with no wildcards is an exact-name
    /// match.
    pub fn extract(&self, pattern: &str) -> Vec<Key> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| glob_match(pattern, f.name()))
            .map(|(i, _)| Key(i))
            .collect()
    }
}

/// Match `name` against a glob pattern with `*` and `?` wildcards.
///
/// Iterative with single-star backtracking; column names are ASCII so the
/// match runs over bytes.
pub(crate) fn glob_match(pattern: &str, name: &str) -> bool {
    let p = pattern.as_bytes();
    let n = name.as_bytes();
    let (mut pi, mut ni) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;

    while ni < n.len() {
        if pi < p.len() && (p[pi] == b'?' || p[pi] == n[ni]) {
            pi += 1;
            ni += 1;
        } else if pi < p.len() && p[pi] == b'*' {
            star = Some((pi, ni));
            pi += 1;
        } else if let Some((sp, sn)) = star {
            // Grow the last star's span by one and retry.
            pi = sp + 1;
            ni = sn + 1;
            star = Some((sp, sn + 1));
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == b'*' {
        pi += 1;
    }
    pi == p.len()
}
