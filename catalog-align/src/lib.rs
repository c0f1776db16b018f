//! Schema reconciliation and one-to-one positional matching for astronomical
//! source catalogs.
//!
//! An image-processing pipeline emits one catalog per exposure and filter;
//! this crate aligns their column schemas and merges them by sky position
//! into multi-band tables and star/galaxy truth tables.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`reconcile`] | [`build_mapper`](reconcile::build_mapper) — field selection, suffix renaming, merged-schema planning |
//! | [`matcher`] | [`strict_match`](matcher::strict_match) — closest-wins one-to-one reduction, [`SpatialMatcher`](matcher::SpatialMatcher) seam |
//! | [`multiband`] | [`match_multiband`](multiband::match_multiband) — suffix-and-fold orchestration across filters |
//! | [`truth`] | [`build_truth_table`](truth::build_truth_table) — stellar flag and auto magnitude overlay |
//! | [`quality`] | [`good_sources`](quality::good_sources) — row-quality keep-mask |
//! | [`policy`] | [`FieldPolicy`](policy::FieldPolicy) — immutable field-selection configuration |
//!
//! # Quick Start
//!
//! ```
//! use catalog_align::matcher::GreatCircleMatcher;
//! use catalog_align::multiband::match_multiband;
//! use catalog_align::policy::FieldPolicy;
//! use catalog_table::{Field, FieldKind, Schema, SkyCoord, SourceCatalog};
//!
//! # fn main() -> catalog_align::Result<()> {
//! let policy = FieldPolicy {
//!     suffixable_fields: vec![],
//!     suffixable_patterns: vec!["flux.psf*".into(), "multId*".into()],
//!     ..FieldPolicy::default()
//! };
//!
//! let mut schema = Schema::new();
//! schema.add(Field::new("flux.psf", FieldKind::Float, "PSF flux."))?;
//! let mut g = SourceCatalog::new(schema.clone());
//! g.add_new(1, SkyCoord::new(150.0, 2.2));
//! let mut r = SourceCatalog::new(schema);
//! r.add_new(2, SkyCoord::new(150.0, 2.2));
//!
//! let merged = match_multiband(
//!     &[(&g, "HSC-G"), (&r, "HSC-R")],
//!     1.0,
//!     &GreatCircleMatcher,
//!     &policy,
//! )?;
//! assert_eq!(merged.len(), 1);
//! assert!(merged.schema().contains("flux.psf_g"));
//! assert!(merged.schema().contains("flux.psf_r"));
//! # Ok(())
//! # }
//! ```
//!
//! All operations are deterministic pure functions over in-memory catalogs:
//! no shared state survives a call, failures always signal invalid input, and
//! rows without a positional partner are counted, never raised.

pub mod error;
pub mod matcher;
pub mod multiband;
pub mod policy;
pub mod quality;
pub mod reconcile;
pub mod truth;

pub use error::{AlignError, Result};
pub use matcher::{
    strict_match, GreatCircleMatcher, MatchCandidate, MatchStats, SpatialMatcher, StrictMatch,
};
pub use multiband::{apply_filter_suffix, match_multiband, multi_ids};
pub use policy::FieldPolicy;
pub use quality::{good_sources, QualityPolicy};
pub use reconcile::{build_mapper, discover_bands, discover_suffixes, MapperOptions};
pub use truth::{build_truth_table, TruthPolicy, TruthTable};
