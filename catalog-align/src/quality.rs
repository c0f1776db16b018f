//! Row-quality predicate.
//!
//! A row is bad when any configured flag column is set, or when the deblender
//! split it into children (nonzero child count means it is a composite
//! duplicate, not a leaf source).

use catalog_table::SourceCatalog;

use crate::error::Result;

/// Which columns disqualify a row. `Default` is the production set.
#[derive(Debug, Clone)]
pub struct QualityPolicy {
    /// Flag columns that mark a row bad when set.
    pub bad_flags: Vec<String>,
    /// Integer column counting deblended children; nonzero excludes the row.
    pub children_field: String,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            bad_flags: vec![
                "flags.pixel.edge".to_owned(),
                "flags.pixel.bad".to_owned(),
                "flags.pixel.saturated.center".to_owned(),
            ],
            children_field: "deblend.nchild".to_owned(),
        }
    }
}

/// Boolean keep-mask over the catalog's rows: true for rows to keep.
///
/// Pure function over the catalog; missing columns propagate as fatal
/// lookup failures.
pub fn good_sources(cat: &SourceCatalog, policy: &QualityPolicy) -> Result<Vec<bool>> {
    let flag_keys = policy
        .bad_flags
        .iter()
        .map(|name| cat.schema().find(name))
        .collect::<catalog_table::Result<Vec<_>>>()?;
    let children_key = cat.schema().find(&policy.children_field)?;

    let mut mask = Vec::with_capacity(cat.len());
    for row in 0..cat.len() {
        let mut bad = false;
        for &key in &flag_keys {
            bad |= cat.flag(row, key)?;
        }
        let good = !bad && cat.int(row, children_key)? == 0;
        mask.push(good);
    }
    Ok(mask)
}
