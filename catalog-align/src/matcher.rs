//! One-to-one positional matching between two catalogs.
//!
//! The spatial cross-match engine is a collaborator behind the
//! [`SpatialMatcher`] seam: it returns every candidate pair within a radius,
//! many-to-many, with angular separations. [`strict_match`] reduces that list
//! to a strict one-to-one map — per second-catalog row, only the closest
//! first-catalog row survives — and emits a merged catalog through the schema
//! reconciler, with the second catalog's per-band values copied explicitly
//! into the reserved output-only columns.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use catalog_table::{Key, SourceCatalog};

use crate::error::Result;
use crate::policy::FieldPolicy;
use crate::reconcile::{build_mapper, discover_suffixes, MapperOptions};

/// A candidate pair from the spatial cross-match collaborator.
///
/// `first` and `second` are row indices into the two catalogs; `second` is
/// `None` for a first-catalog row with no partner within the radius, in which
/// case the distance is infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate {
    pub first: usize,
    pub second: Option<usize>,
    pub distance_arcsec: f64,
}

/// Spatial cross-match primitive.
///
/// Implementations must return every pair within the radius (the list may be
/// many-to-many in both directions) and, when `include_mismatches` is set,
/// every first-catalog row at least once.
pub trait SpatialMatcher {
    fn candidates(
        &self,
        a: &SourceCatalog,
        b: &SourceCatalog,
        radius_arcsec: f64,
        include_mismatches: bool,
    ) -> Vec<MatchCandidate>;
}

/// Brute-force great-circle cross-match.
///
/// O(n·m) over all row pairs using the Vincenty separation. Fine for the
/// catalog sizes this crate works with; a spatially indexed engine can plug
/// in through [`SpatialMatcher`] without touching the reduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatCircleMatcher;

impl SpatialMatcher for GreatCircleMatcher {
    fn candidates(
        &self,
        a: &SourceCatalog,
        b: &SourceCatalog,
        radius_arcsec: f64,
        include_mismatches: bool,
    ) -> Vec<MatchCandidate> {
        let mut out = Vec::new();
        for i in 0..a.len() {
            let coord = a.coord(i);
            let mut found = false;
            for j in 0..b.len() {
                let distance_arcsec = coord.separation_arcsec(&b.coord(j));
                if distance_arcsec <= radius_arcsec {
                    found = true;
                    out.push(MatchCandidate {
                        first: i,
                        second: Some(j),
                        distance_arcsec,
                    });
                }
            }
            if !found && include_mismatches {
                out.push(MatchCandidate {
                    first: i,
                    second: None,
                    distance_arcsec: f64::INFINITY,
                });
            }
        }
        out
    }
}

/// Counts from one [`strict_match`] reduction.
#[derive(Debug, Clone, Default)]
pub struct MatchStats {
    /// Candidate pairs delivered by the cross-match collaborator.
    pub total_candidates: usize,
    /// Surviving one-to-one matches.
    pub matched: usize,
    /// First-catalog rows that had a candidate but lost to a closer row.
    pub not_closest: usize,
    /// Ids of first-catalog rows with no candidate at all.
    pub unmatched_ids: Vec<i64>,
}

/// Result of [`strict_match`]: the merged catalog plus reduction counts.
#[derive(Debug, Clone)]
pub struct StrictMatch {
    pub catalog: SourceCatalog,
    pub stats: MatchStats,
}

/// Pairs kept by the closest-wins reduction, in first-encounter order of the
/// second catalog's row ids.
pub(crate) struct Reduction {
    pub kept: Vec<(usize, usize, f64)>,
    pub stats: MatchStats,
}

/// Reduce a many-to-many candidate list to one first-catalog row per
/// second-catalog id, keeping the smallest separation.
///
/// Comparison is strictly-less, so on an exactly tied distance the earliest
/// processed candidate wins. The tie-break is unspecified behavior callers
/// must not rely on; it is documented here rather than preserved by contract.
pub(crate) fn reduce_closest(
    a: &SourceCatalog,
    b: &SourceCatalog,
    candidates: &[MatchCandidate],
) -> Reduction {
    let mut kept: Vec<(usize, usize, f64)> = Vec::new();
    let mut slot_by_id: HashMap<i64, usize> = HashMap::new();
    let mut unmatched_ids = Vec::new();

    for c in candidates {
        match c.second {
            None => unmatched_ids.push(a.id(c.first)),
            Some(j) => match slot_by_id.entry(b.id(j)) {
                Entry::Vacant(e) => {
                    e.insert(kept.len());
                    kept.push((c.first, j, c.distance_arcsec));
                }
                Entry::Occupied(e) => {
                    let slot = &mut kept[*e.get()];
                    if c.distance_arcsec < slot.2 {
                        *slot = (c.first, j, c.distance_arcsec);
                    }
                }
            },
        }
    }

    let stats = MatchStats {
        total_candidates: candidates.len(),
        matched: kept.len(),
        not_closest: candidates.len() - unmatched_ids.len() - kept.len(),
        unmatched_ids,
    };
    Reduction { kept, stats }
}

/// Match two catalogs one-to-one by sky position and merge them.
///
/// Fetches all candidates within `radius_arcsec`, keeps the closest
/// first-catalog row per second-catalog id, then builds the merged catalog:
/// the first catalog's columns flow through the reconciler's copy plan, and
/// the second catalog's suffixed columns are copied explicitly into the
/// columns reserved for them.
///
/// Rows with no partner are never an error; with `include_mismatches` their
/// ids come back in [`MatchStats::unmatched_ids`] and the counts are logged.
pub fn strict_match(
    a: &SourceCatalog,
    b: &SourceCatalog,
    radius_arcsec: f64,
    include_mismatches: bool,
    matcher: &dyn SpatialMatcher,
    policy: &FieldPolicy,
) -> Result<StrictMatch> {
    let candidates = matcher.candidates(a, b, radius_arcsec, include_mismatches);
    let Reduction { kept, stats } = reduce_closest(a, b, &candidates);

    if include_mismatches {
        log::info!(
            "{} of {} rows in the first catalog had no match in the second catalog",
            stats.unmatched_ids.len(),
            a.len()
        );
        log::info!(
            "{} rows with a match in the second catalog were not the closest match",
            stats.not_closest
        );
    }

    let scm = build_mapper(a, Some(b), &MapperOptions::default(), policy)?;

    // Key pairs for the explicit copies of b's per-band columns. Both key
    // sets are resolved before any row is written.
    let mut b_keys: Vec<Key> = Vec::new();
    let mut out_keys: Vec<Key> = Vec::new();
    for band in discover_suffixes(b) {
        for key in b.schema().extract(&format!("*{}", band.suffix())) {
            let name = b.schema().field(key).name();
            out_keys.push(scm.output_schema().find(name)?);
            b_keys.push(key);
        }
    }

    let mut catalog = SourceCatalog::with_capacity(scm.output_schema().clone(), kept.len());
    for &(i, j, _distance) in &kept {
        let row = catalog.add_new(a.id(i), a.coord(i));
        scm.copy(a, i, &mut catalog, row)?;
        for (bk, ok) in b_keys.iter().zip(&out_keys) {
            catalog.set_value(row, *ok, b.value(j, *bk))?;
        }
    }

    Ok(StrictMatch { catalog, stats })
}
