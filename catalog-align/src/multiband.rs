//! Multi-band orchestration: suffix raw catalogs and fold them into one
//! merged table.
//!
//! Each raw single-band catalog is first rebuilt with its filter's suffix
//! appended to every suffixable column, then [`match_multiband`] folds
//! [`strict_match`](crate::matcher::strict_match) left-to-right: the running
//! merged catalog plays the first-catalog role (already multi-band, so the
//! reconciler maps it per discovered suffix) and each next suffixed catalog
//! plays the second.

use catalog_table::{filter_suffix, Band, SourceCatalog, Value};

use crate::error::{AlignError, Result};
use crate::matcher::{strict_match, SpatialMatcher};
use crate::policy::FieldPolicy;
use crate::reconcile::{build_mapper, discover_bands, MapperOptions};

/// Rebuild a raw single-band catalog with `filter`'s suffix on every
/// suffixable column.
///
/// The synthetic `multId<suffix>` column is seeded with each record's own id,
/// so the merged table keeps track of which per-band row every measurement
/// came from.
pub fn apply_filter_suffix(
    cat: &SourceCatalog,
    filter: &str,
    policy: &FieldPolicy,
) -> Result<SourceCatalog> {
    let opts = MapperOptions {
        filter: Some(filter.to_owned()),
        ..Default::default()
    };
    let scm = build_mapper(cat, None, &opts, policy)?;
    let mult_name = format!("{}{}", policy.multi_id.name(), filter_suffix(filter));
    let mult_key = scm.output_schema().find(&mult_name)?;

    let mut out = SourceCatalog::with_capacity(scm.output_schema().clone(), cat.len());
    for i in 0..cat.len() {
        let row = out.add_new(cat.id(i), cat.coord(i));
        scm.copy(cat, i, &mut out, row)?;
        out.set_value(row, mult_key, Value::Int(cat.id(i)))?;
    }
    Ok(out)
}

/// Match a list of `(catalog, filter)` pairs into one multi-band table.
///
/// Every input is suffixed for its filter, then folded through the
/// one-to-one matcher. The output row count is bounded by the smallest
/// input; a source must match in every band to survive the fold.
pub fn match_multiband(
    inputs: &[(&SourceCatalog, &str)],
    radius_arcsec: f64,
    matcher: &dyn SpatialMatcher,
    policy: &FieldPolicy,
) -> Result<SourceCatalog> {
    let (first, rest) = inputs.split_first().ok_or(AlignError::EmptyInput)?;
    let mut merged = apply_filter_suffix(first.0, first.1, policy)?;
    for (cat, filter) in rest {
        let suffixed = apply_filter_suffix(cat, filter, policy)?;
        merged = strict_match(&merged, &suffixed, radius_arcsec, true, matcher, policy)?.catalog;
    }
    Ok(merged)
}

/// Per-band values of the dot-marker multi-id family (`multId.<band>`),
/// in band order.
pub fn multi_ids(cat: &SourceCatalog, policy: &FieldPolicy) -> Result<Vec<(Band, Vec<i64>)>> {
    let mut out = Vec::new();
    for band in discover_bands(cat) {
        let name = format!("{}{}", policy.multi_id.name(), band.marker());
        let key = cat.schema().find(&name)?;
        let mut ids = Vec::with_capacity(cat.len());
        for row in 0..cat.len() {
            ids.push(cat.int(row, key)?);
        }
        out.push((band, ids));
    }
    Ok(out)
}
