//! Schema reconciliation across heterogeneous catalogs.
//!
//! [`build_mapper`] computes the output column schema and per-row copy plan
//! that lets catalogs measured in different filters be merged into one table.
//! Identity and coordinates are intrinsic to every record and always carried;
//! the configured suffixable columns and patterns are mapped straight
//! through, renamed with a derived filter suffix, or fanned out per
//! discovered suffix, depending on what the input catalog already carries.

use catalog_table::{filter_suffix, Band, Field, SchemaMapper, SourceCatalog};

use crate::error::{AlignError, Result};
use crate::policy::FieldPolicy;

/// Options for one reconciliation call. Everything defaults off.
#[derive(Debug, Clone, Default)]
pub struct MapperOptions {
    /// Human-readable filter identifier (e.g. `HSC-G`) whose derived suffix
    /// is appended to every suffixable column. Incompatible with a second
    /// catalog and with inputs that already carry suffixes.
    pub filter: Option<String>,
    /// Append the zero-magnitude flux column and its error column.
    pub with_zero_mag_flux: bool,
    /// Append the boolean stellar flag and the auxiliary magnitude column.
    pub with_stellar: bool,
    /// Append the seeing column.
    pub with_seeing: bool,
    /// Append the exposure-time column.
    pub with_exptime: bool,
}

/// Distinct trailing `_<band>` suffixes over all column names, in band order.
///
/// Empty means the catalog is single-band raw; nonempty means it has already
/// been merged across filters.
pub fn discover_suffixes(cat: &SourceCatalog) -> Vec<Band> {
    let mut bands: Vec<Band> = cat
        .schema()
        .iter()
        .filter_map(|f| Band::from_suffix_of(f.name()))
        .collect();
    bands.sort();
    bands.dedup();
    bands
}

/// Distinct trailing `.<band>` markers (multi-id column family), in band order.
pub fn discover_bands(cat: &SourceCatalog) -> Vec<Band> {
    let mut bands: Vec<Band> = cat
        .schema()
        .iter()
        .filter_map(|f| Band::from_marker_of(f.name()))
        .collect();
    bands.sort();
    bands.dedup();
    bands
}

/// Build the copy plan reconciling `cat` (and optionally `cat2`) into one
/// output schema.
///
/// With a filter option, every suffixable column of `cat` is mapped to a
/// renamed target carrying the derived suffix, and a fresh `multId<suffix>`
/// output column is reserved. Without one, columns map straight through on a
/// raw catalog, or per discovered suffix on an already-merged catalog. When
/// `cat2` is given, its per-band column definitions are added as output-only
/// columns — space in the merged schema that the matcher fills explicitly,
/// with no automatic copy.
///
/// # Errors
/// [`AlignError::ConflictingFilter`] when `cat2` and a filter are both given,
/// [`AlignError::AlreadySuffixed`] when a filter is requested for a catalog
/// that already carries suffixes, and any missing-column lookup propagates as
/// a fatal [`catalog_table::TableError::MissingField`].
pub fn build_mapper(
    cat: &SourceCatalog,
    cat2: Option<&SourceCatalog>,
    opts: &MapperOptions,
    policy: &FieldPolicy,
) -> Result<SchemaMapper> {
    if cat2.is_some() && opts.filter.is_some() {
        return Err(AlignError::ConflictingFilter);
    }
    let suffixes = discover_suffixes(cat);
    if opts.filter.is_some() && !suffixes.is_empty() {
        return Err(AlignError::AlreadySuffixed);
    }

    let suffix = opts.filter.as_deref().map(filter_suffix);
    let schema = cat.schema();
    let mut scm = SchemaMapper::new(schema);

    if let Some(s) = &suffix {
        let name = format!("{}{}", policy.multi_id.name(), s);
        scm.add_output(policy.multi_id.copy_renamed(name))?;
    }

    for f in &policy.suffixable_fields {
        match &suffix {
            Some(s) => {
                let key = schema.find(f)?;
                let renamed = schema.field(key).copy_renamed(format!("{f}{s}"));
                scm.map_renamed(f, renamed)?;
            }
            None if suffixes.is_empty() => {
                scm.map(f)?;
            }
            None => {
                for band in &suffixes {
                    scm.map(&format!("{}{}", f, band.suffix()))?;
                }
            }
        }
    }
    for p in &policy.suffixable_patterns {
        // On a merged catalog, extraction enumerates the per-suffix names.
        for key in schema.extract(p) {
            let name = schema.field(key).name().to_owned();
            match &suffix {
                Some(s) => {
                    let renamed = schema.field(key).copy_renamed(format!("{name}{s}"));
                    scm.map_renamed(&name, renamed)?;
                }
                None => {
                    scm.map(&name)?;
                }
            }
        }
    }

    if let Some(cat2) = cat2 {
        reserve_second_catalog(&mut scm, cat2, policy)?;
    }

    if opts.with_zero_mag_flux {
        add_fanned(&mut scm, &policy.zero_mag, &suffix, &suffixes)?;
        add_fanned(&mut scm, &policy.zero_mag_err, &suffix, &suffixes)?;
    }
    if opts.with_seeing {
        add_fanned(&mut scm, &policy.seeing, &suffix, &suffixes)?;
    }
    if opts.with_exptime {
        add_fanned(&mut scm, &policy.exptime, &suffix, &suffixes)?;
    }
    if opts.with_stellar {
        scm.add_output(policy.stellar.clone())?;
        scm.add_output(policy.mag_auto.clone())?;
    }

    Ok(scm)
}

/// Reserve output-only columns for the second catalog's per-band fields.
fn reserve_second_catalog(
    scm: &mut SchemaMapper,
    cat2: &SourceCatalog,
    policy: &FieldPolicy,
) -> Result<()> {
    let schema2 = cat2.schema();
    let suffixes2 = discover_suffixes(cat2);
    for f in &policy.suffixable_fields {
        for band in &suffixes2 {
            let key = schema2.find(&format!("{}{}", f, band.suffix()))?;
            scm.add_output(schema2.field(key).clone())?;
        }
    }
    for p in &policy.suffixable_patterns {
        for key in schema2.extract(p) {
            scm.add_output(schema2.field(key).clone())?;
        }
    }
    Ok(())
}

/// Append a synthetic output column following the suffix fan-out rule:
/// single rename with a derived suffix, bare on a raw catalog, or one copy
/// per discovered suffix on a merged catalog.
fn add_fanned(
    scm: &mut SchemaMapper,
    template: &Field,
    suffix: &Option<String>,
    suffixes: &[Band],
) -> Result<()> {
    match suffix {
        Some(s) => {
            scm.add_output(template.copy_renamed(format!("{}{}", template.name(), s)))?;
        }
        None if suffixes.is_empty() => {
            scm.add_output(template.clone())?;
        }
        None => {
            for band in suffixes {
                let name = format!("{}{}", template.name(), band.suffix());
                scm.add_output(template.copy_renamed(name))?;
            }
        }
    }
    Ok(())
}
