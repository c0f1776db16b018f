//! End-to-end alignment over catalogs carrying the full production schema:
//! suffix two single-band catalogs, fold them into a multi-band table, build
//! a truth table against a reference catalog, and filter by row quality.

use catalog_align::matcher::GreatCircleMatcher;
use catalog_align::multiband::match_multiband;
use catalog_align::policy::FieldPolicy;
use catalog_align::quality::{good_sources, QualityPolicy};
use catalog_align::reconcile::discover_suffixes;
use catalog_align::truth::{build_truth_table, TruthPolicy};
use catalog_table::{Band, Field, FieldKind, Schema, SkyCoord, SourceCatalog, Value};

/// Every column the default field policy selects, plus typical extras the
/// reconciler must leave behind.
fn pipeline_schema() -> Schema {
    let mut schema = Schema::new();
    let columns: &[(&str, FieldKind)] = &[
        ("parent", FieldKind::Int),
        ("deblend.nchild", FieldKind::Int),
        ("classification.extendedness", FieldKind::Float),
        ("flags.pixel.bad", FieldKind::Flag),
        ("flags.pixel.edge", FieldKind::Flag),
        ("flags.pixel.interpolated.any", FieldKind::Flag),
        ("flags.pixel.interpolated.center", FieldKind::Flag),
        ("flags.pixel.saturated.any", FieldKind::Flag),
        ("flags.pixel.saturated.center", FieldKind::Flag),
        ("flux.psf", FieldKind::Float),
        ("flux.psf.err", FieldKind::Float),
        ("centroid.x", FieldKind::Float),
        ("centroid.y", FieldKind::Float),
        // Not selected by any field or pattern; must not survive mapping.
        ("shape.sdss.xx", FieldKind::Float),
    ];
    for (name, kind) in columns {
        schema.add(Field::new(*name, *kind, "")).unwrap();
    }
    schema
}

fn detection_catalog(rows: &[(i64, f64, f64, f32)]) -> SourceCatalog {
    let schema = pipeline_schema();
    let flux = schema.find("flux.psf").unwrap();
    let mut cat = SourceCatalog::new(schema);
    for &(id, ra, dec, psf) in rows {
        let row = cat.add_new(id, SkyCoord::new(ra, dec));
        cat.set_value(row, flux, Value::Float(psf)).unwrap();
    }
    cat
}

fn grid_rows(count: usize, id_base: i64, flux_base: f32) -> Vec<(i64, f64, f64, f32)> {
    let step = 10.0 / 3600.0; // 10 arcsec spacing, well beyond the 1 arcsec radius
    (0..count)
        .map(|k| {
            (
                id_base + k as i64,
                30.0 + k as f64 * step,
                -4.0,
                flux_base + k as f32,
            )
        })
        .collect()
}

#[test]
fn test_multiband_merge_full_schema() {
    let g = detection_catalog(&grid_rows(10, 1, 0.0));
    let r = detection_catalog(&grid_rows(8, 101, 100.0));
    let policy = FieldPolicy::default();

    let merged = match_multiband(
        &[(&g, "HSC-G"), (&r, "HSC-R")],
        1.0,
        &GreatCircleMatcher,
        &policy,
    )
    .unwrap();

    assert_eq!(merged.len(), 8);
    assert_eq!(discover_suffixes(&merged), vec![Band::G, Band::R]);

    // Every suffixable column shows up in both bands.
    for base in &policy.suffixable_fields {
        for suffix in ["_g", "_r"] {
            let name = format!("{base}{suffix}");
            assert!(merged.schema().contains(&name), "missing {name}");
        }
    }
    for name in [
        "flux.psf_g",
        "flux.psf_r",
        "flux.psf.err_g",
        "flux.psf.err_r",
        "centroid.x_g",
        "centroid.y_r",
        "multId_g",
        "multId_r",
    ] {
        assert!(merged.schema().contains(name), "missing {name}");
    }
    // Unselected columns are gone in every band.
    assert!(!merged.schema().contains("shape.sdss.xx"));
    assert!(!merged.schema().contains("shape.sdss.xx_g"));

    // Multi-id columns track each band's original row ids.
    let mult_g = merged.schema().find("multId_g").unwrap();
    let mult_r = merged.schema().find("multId_r").unwrap();
    let flux_g = merged.schema().find("flux.psf_g").unwrap();
    let flux_r = merged.schema().find("flux.psf_r").unwrap();
    for row in 0..merged.len() {
        let k = merged.int(row, mult_g).unwrap() - 1;
        assert_eq!(merged.int(row, mult_r).unwrap(), 101 + k);
        assert_eq!(merged.float(row, flux_g).unwrap(), k as f32);
        assert_eq!(merged.float(row, flux_r).unwrap(), 100.0 + k as f32);
    }

    // No two merged rows share a second-catalog id.
    let mut seen: Vec<i64> = (0..merged.len())
        .map(|row| merged.int(row, mult_r).unwrap())
        .collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), merged.len());
}

#[test]
fn test_truth_table_after_multiband_merge() {
    let g = detection_catalog(&grid_rows(6, 1, 0.0));
    let r = detection_catalog(&grid_rows(6, 101, 100.0));
    let policy = FieldPolicy::default();
    let merged = match_multiband(
        &[(&g, "HSC-G"), (&r, "HSC-R")],
        1.0,
        &GreatCircleMatcher,
        &policy,
    )
    .unwrap();

    // Reference catalog covering half the merged grid: alternating classes.
    let mut ref_schema = Schema::new();
    let class = ref_schema
        .add(Field::new("mu.class", FieldKind::Int, ""))
        .unwrap();
    let mag = ref_schema
        .add(Field::new("mag.auto", FieldKind::Float, ""))
        .unwrap();
    let mut reference = SourceCatalog::new(ref_schema);
    for k in 0..3i64 {
        let row = reference.add_new(
            900 + k,
            SkyCoord::new(30.0 + k as f64 * 10.0 / 3600.0, -4.0),
        );
        let cls = if k % 2 == 0 { 2 } else { 1 };
        reference.set_value(row, class, Value::Int(cls)).unwrap();
        reference
            .set_value(row, mag, Value::Float(20.0 + k as f32))
            .unwrap();
    }

    let truth = build_truth_table(
        &merged,
        &reference,
        1.0,
        true,
        &GreatCircleMatcher,
        &policy,
        &TruthPolicy::default(),
    )
    .unwrap();

    assert_eq!(truth.catalog.len(), 3);
    assert_eq!(truth.stats.unmatched_ids.len(), 3);

    // Multi-band columns survive into the truth table alongside the overlay.
    assert!(truth.catalog.schema().contains("flux.psf_g"));
    assert!(truth.catalog.schema().contains("flux.psf_r"));
    let stellar = truth.catalog.schema().find("stellar").unwrap();
    let mag_auto = truth.catalog.schema().find("mag.auto").unwrap();
    for row in 0..truth.catalog.len() {
        let is_star = truth.catalog.flag(row, stellar).unwrap();
        let m = truth.catalog.float(row, mag_auto).unwrap();
        let k = (m - 20.0) as i64;
        assert_eq!(is_star, k % 2 == 0);
    }
}

#[test]
fn test_quality_mask_on_pipeline_catalog() {
    let mut cat = detection_catalog(&grid_rows(4, 1, 0.0));
    let edge = cat.schema().find("flags.pixel.edge").unwrap();
    let nchild = cat.schema().find("deblend.nchild").unwrap();
    cat.set_value(1, edge, Value::Flag(true)).unwrap();
    cat.set_value(2, nchild, Value::Int(2)).unwrap();

    let mask = good_sources(&cat, &QualityPolicy::default()).unwrap();
    assert_eq!(mask, vec![true, false, false, true]);
}
