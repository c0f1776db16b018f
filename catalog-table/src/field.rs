//! Column definitions and cell values.
//!
//! A [`Field`] names and types one catalog column. Fields are immutable once
//! defined; synthetic-column templates are cloned with a new name via
//! [`Field::copy_renamed`] rather than mutated in place.

use std::fmt;

/// Value type of a catalog column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 32-bit floating point measurement.
    Float,
    /// 64-bit signed integer (identifiers, counts, classifications).
    Int,
    /// Boolean quality flag.
    Flag,
}

impl FieldKind {
    /// The zero value a freshly allocated cell of this kind holds.
    pub fn default_value(self) -> Value {
        match self {
            FieldKind::Float => Value::Float(0.0),
            FieldKind::Int => Value::Int(0),
            FieldKind::Flag => Value::Flag(false),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Float => "float",
            FieldKind::Int => "int",
            FieldKind::Flag => "flag",
        };
        f.write_str(name)
    }
}

/// One cell of a catalog row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Float(f32),
    Int(i64),
    Flag(bool),
}

impl Value {
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Float(_) => FieldKind::Float,
            Value::Int(_) => FieldKind::Int,
            Value::Flag(_) => FieldKind::Flag,
        }
    }
}

/// A named, typed column with a human-readable description.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    kind: FieldKind,
    doc: String,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            doc: doc.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Clone this field under a new name, keeping kind and description.
    pub fn copy_renamed(&self, name: impl Into<String>) -> Field {
        Field {
            name: name.into(),
            kind: self.kind,
            doc: self.doc.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values_per_kind() {
        assert_eq!(FieldKind::Float.default_value(), Value::Float(0.0));
        assert_eq!(FieldKind::Int.default_value(), Value::Int(0));
        assert_eq!(FieldKind::Flag.default_value(), Value::Flag(false));
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::Float(1.5).kind(), FieldKind::Float);
        assert_eq!(Value::Int(-3).kind(), FieldKind::Int);
        assert_eq!(Value::Flag(true).kind(), FieldKind::Flag);
    }

    #[test]
    fn test_copy_renamed_keeps_kind_and_doc() {
        let f = Field::new("flux.psf", FieldKind::Float, "PSF flux.");
        let renamed = f.copy_renamed("flux.psf_g");
        assert_eq!(renamed.name(), "flux.psf_g");
        assert_eq!(renamed.kind(), FieldKind::Float);
        assert_eq!(renamed.doc(), "PSF flux.");
        // Original untouched.
        assert_eq!(f.name(), "flux.psf");
    }
}
