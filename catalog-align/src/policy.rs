//! Field-selection configuration for the schema reconciler.
//!
//! [`FieldPolicy`] is an immutable value object: which column names and
//! wildcard patterns receive per-filter suffixes, and the templates for the
//! synthetic columns the reconciler can append. Templates are cloned and
//! renamed on demand, never mutated. The `Default` impl is the production
//! pipeline configuration.

use catalog_table::{Field, FieldKind};

#[derive(Debug, Clone)]
pub struct FieldPolicy {
    /// Exact column names that receive a per-filter suffix.
    pub suffixable_fields: Vec<String>,
    /// Wildcard patterns whose matches receive a per-filter suffix.
    pub suffixable_patterns: Vec<String>,

    /// Template for the zero-magnitude flux column.
    pub zero_mag: Field,
    /// Template for the zero-magnitude flux error column.
    pub zero_mag_err: Field,
    /// Template for the boolean star/galaxy classification column.
    pub stellar: Field,
    /// Template for the reference-catalog auto magnitude column.
    pub mag_auto: Field,
    /// Template for the seeing (PSF FWHM) column.
    pub seeing: Field,
    /// Template for the exposure-time column.
    pub exptime: Field,
    /// Template for the multi-id column that tracks matched ids across
    /// catalogs and bands.
    pub multi_id: Field,
}

impl Default for FieldPolicy {
    fn default() -> Self {
        let fields = [
            "parent",
            "deblend.nchild",
            "classification.extendedness",
            "flags.pixel.bad",
            "flags.pixel.edge",
            "flags.pixel.interpolated.any",
            "flags.pixel.interpolated.center",
            "flags.pixel.saturated.any",
            "flags.pixel.saturated.center",
        ];
        let patterns = [
            "flux.zeromag*",
            "flux.psf*",
            "cmodel*",
            "centroid*",
            "seeing*",
            "exptime*",
            "multId*",
        ];
        Self {
            suffixable_fields: fields.iter().map(|s| (*s).to_owned()).collect(),
            suffixable_patterns: patterns.iter().map(|s| (*s).to_owned()).collect(),
            zero_mag: Field::new(
                "flux.zeromag",
                FieldKind::Float,
                "The flux corresponding to zero magnitude.",
            ),
            zero_mag_err: Field::new(
                "flux.zeromag.err",
                FieldKind::Float,
                "The flux error corresponding to zero magnitude.",
            ),
            stellar: Field::new(
                "stellar",
                FieldKind::Flag,
                "True when the object is known to be a star, false when known not to be.",
            ),
            mag_auto: Field::new(
                "mag.auto",
                FieldKind::Float,
                "Auto magnitude from the reference catalog.",
            ),
            seeing: Field::new("seeing", FieldKind::Float, "The PSF FWHM."),
            exptime: Field::new("exptime", FieldKind::Float, "Exposure time."),
            multi_id: Field::new(
                "multId",
                FieldKind::Int,
                "Tracks the ids of this source's matches in other catalogs and bands.",
            ),
        }
    }
}
