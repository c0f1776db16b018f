//! In-memory table model for astronomical source catalogs.
//!
//! A [`SourceCatalog`] is an ordered set of typed, named columns (the
//! [`Schema`]) plus zero or more rows ([`SourceRecord`]). Each row carries a
//! unique 64-bit identifier and a sky position intrinsically; everything else
//! a detection pipeline measures (fluxes, centroids, quality flags) lives in
//! schema columns.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`field`] | [`Field`], [`FieldKind`], [`Value`] — column definitions and cell values |
//! | [`schema`] | [`Schema`], [`Key`] — ordered column set with name lookup and glob extraction |
//! | [`catalog`] | [`SourceCatalog`], [`SourceRecord`], [`SkyCoord`] — rows and typed access |
//! | [`mapper`] | [`SchemaMapper`] — write-once copy plan between two schemas |
//! | [`band`] | [`Band`] — photometric band tags, suffix parsing, filter-name translation |
//! | [`error`] | [`TableError`] and the crate [`Result`] alias |
//!
//! Catalogs are read fully into memory and mutated only through typed,
//! kind-checked setters. Nothing here touches storage: catalogs are produced
//! and consumed by the surrounding pipeline.

pub mod band;
pub mod catalog;
pub mod error;
pub mod field;
pub mod mapper;
pub mod schema;

pub use band::{filter_suffix, Band};
pub use catalog::{SkyCoord, SourceCatalog, SourceRecord};
pub use error::{Result, TableError};
pub use field::{Field, FieldKind, Value};
pub use mapper::SchemaMapper;
pub use schema::{Key, Schema};
