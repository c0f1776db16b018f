use catalog_table::TableError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignError {
    #[error("a second catalog and a filter suffix cannot be combined")]
    ConflictingFilter,

    #[error("cannot add a filter suffix to a catalog that already carries suffixes")]
    AlreadySuffixed,

    #[error("multi-band match needs at least one catalog")]
    EmptyInput,

    #[error(transparent)]
    Table(#[from] TableError),
}

pub type Result<T> = std::result::Result<T, AlignError>;
