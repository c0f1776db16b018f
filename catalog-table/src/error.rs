use crate::field::FieldKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("no field named {0:?} in schema")]
    MissingField(String),

    #[error("field {0:?} already present in schema")]
    DuplicateField(String),

    #[error("field {name:?} holds {actual}, not {expected}")]
    KindMismatch {
        name: String,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("row index {row} out of bounds for catalog with {rows} rows")]
    RowOutOfBounds { row: usize, rows: usize },
}

pub type Result<T> = std::result::Result<T, TableError>;
