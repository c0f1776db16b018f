//! Truth-table construction against a reference catalog.
//!
//! Matches a detection catalog into a reference catalog of known
//! classifications and overlays two synthetic columns: a boolean stellar
//! flag derived from the reference class column, and the reference's auto
//! magnitude copied verbatim. Only the closest detection per reference row
//! survives; secondary matches are dropped, which loses potentially valid
//! pairs — intentional, inherited behavior.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use catalog_table::{SourceCatalog, Value};

use crate::error::Result;
use crate::matcher::{MatchStats, SpatialMatcher};
use crate::policy::FieldPolicy;
use crate::reconcile::{build_mapper, MapperOptions};

/// Where the reference catalog keeps its classification and magnitude.
///
/// `Default` is the reference-catalog convention: class column `mu.class`
/// with value 2 meaning "star", magnitude column `mag.auto`.
#[derive(Debug, Clone)]
pub struct TruthPolicy {
    pub class_field: String,
    pub star_class: i64,
    pub mag_field: String,
}

impl Default for TruthPolicy {
    fn default() -> Self {
        Self {
            class_field: "mu.class".to_owned(),
            star_class: 2,
            mag_field: "mag.auto".to_owned(),
        }
    }
}

/// Result of [`build_truth_table`].
#[derive(Debug, Clone)]
pub struct TruthTable {
    pub catalog: SourceCatalog,
    pub stats: MatchStats,
}

/// Build the star/galaxy truth table for `cat` against `reference`.
///
/// Runs the same closest-wins reduction as the one-to-one matcher, keyed by
/// reference-row id, then emits `cat`'s columns through the reconciler with
/// the stellar flag and auto magnitude appended and filled per kept pair.
/// Unmatched rows are counted, never raised.
pub fn build_truth_table(
    cat: &SourceCatalog,
    reference: &SourceCatalog,
    radius_arcsec: f64,
    include_mismatches: bool,
    matcher: &dyn SpatialMatcher,
    policy: &FieldPolicy,
    truth: &TruthPolicy,
) -> Result<TruthTable> {
    let class_key = reference.schema().find(&truth.class_field)?;
    let mag_key = reference.schema().find(&truth.mag_field)?;

    let candidates = matcher.candidates(cat, reference, radius_arcsec, include_mismatches);

    // Per reference id: (is_star, mag_auto, distance, detection row).
    let mut kept: Vec<(bool, f32, f64, usize)> = Vec::new();
    let mut slot_by_id: HashMap<i64, usize> = HashMap::new();
    let mut unmatched_ids = Vec::new();
    for c in &candidates {
        match c.second {
            None => unmatched_ids.push(cat.id(c.first)),
            Some(j) => {
                let is_star = reference.int(j, class_key)? == truth.star_class;
                let mag_auto = reference.float(j, mag_key)?;
                match slot_by_id.entry(reference.id(j)) {
                    Entry::Vacant(e) => {
                        e.insert(kept.len());
                        kept.push((is_star, mag_auto, c.distance_arcsec, c.first));
                    }
                    Entry::Occupied(e) => {
                        let slot = &mut kept[*e.get()];
                        if c.distance_arcsec < slot.2 {
                            *slot = (is_star, mag_auto, c.distance_arcsec, c.first);
                        }
                    }
                }
            }
        }
    }

    let stats = MatchStats {
        total_candidates: candidates.len(),
        matched: kept.len(),
        not_closest: candidates.len() - unmatched_ids.len() - kept.len(),
        unmatched_ids,
    };
    if include_mismatches {
        log::info!(
            "{} of {} rows had no match in the reference catalog",
            stats.unmatched_ids.len(),
            cat.len()
        );
        log::info!(
            "{} rows with a reference match were not the closest match",
            stats.not_closest
        );
        log::info!("kept {} reference matches", stats.matched);
    }

    let opts = MapperOptions {
        with_stellar: true,
        ..Default::default()
    };
    let scm = build_mapper(cat, None, &opts, policy)?;
    let stellar_key = scm.output_schema().find(policy.stellar.name())?;
    let mag_auto_key = scm.output_schema().find(policy.mag_auto.name())?;

    let mut catalog = SourceCatalog::with_capacity(scm.output_schema().clone(), kept.len());
    for &(is_star, mag_auto, _distance, i) in &kept {
        let row = catalog.add_new(cat.id(i), cat.coord(i));
        scm.copy(cat, i, &mut catalog, row)?;
        catalog.set_value(row, stellar_key, Value::Flag(is_star))?;
        catalog.set_value(row, mag_auto_key, Value::Float(mag_auto))?;
    }

    Ok(TruthTable { catalog, stats })
}
