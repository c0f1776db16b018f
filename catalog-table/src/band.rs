//! Photometric band tags and filter-name translation.
//!
//! Per-filter measurements are disambiguated by appending a two-character
//! suffix (`_g` .. `_y`) to the base column name. The multi-id column family
//! uses a dot marker (`.g` .. `.y`) instead. Bands carry a fixed total order
//! `g < r < i < z < y`, used whenever suffixes are sorted for deterministic
//! output column ordering.

/// A photometric band of the survey filter set.
///
/// The derived ordering is the canonical band order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    G,
    R,
    I,
    Z,
    Y,
}

impl Band {
    /// All bands in canonical order.
    pub const ALL: [Band; 5] = [Band::G, Band::R, Band::I, Band::Z, Band::Y];

    pub fn letter(self) -> char {
        match self {
            Band::G => 'g',
            Band::R => 'r',
            Band::I => 'i',
            Band::Z => 'z',
            Band::Y => 'y',
        }
    }

    /// The underscore suffix appended to per-filter column names, e.g. `_g`.
    pub fn suffix(self) -> &'static str {
        match self {
            Band::G => "_g",
            Band::R => "_r",
            Band::I => "_i",
            Band::Z => "_z",
            Band::Y => "_y",
        }
    }

    /// The dot marker used by the multi-id column family, e.g. `.g`.
    pub fn marker(self) -> &'static str {
        match self {
            Band::G => ".g",
            Band::R => ".r",
            Band::I => ".i",
            Band::Z => ".z",
            Band::Y => ".y",
        }
    }

    pub fn from_letter(c: char) -> Option<Band> {
        match c {
            'g' => Some(Band::G),
            'r' => Some(Band::R),
            'i' => Some(Band::I),
            'z' => Some(Band::Z),
            'y' => Some(Band::Y),
            _ => None,
        }
    }

    /// Band of a trailing `_<band>` suffix, if the name carries one.
    pub fn from_suffix_of(name: &str) -> Option<Band> {
        Self::from_trailing(name, b'_')
    }

    /// Band of a trailing `.<band>` marker, if the name carries one.
    pub fn from_marker_of(name: &str) -> Option<Band> {
        Self::from_trailing(name, b'.')
    }

    fn from_trailing(name: &str, sep: u8) -> Option<Band> {
        let bytes = name.as_bytes();
        if bytes.len() < 2 || bytes[bytes.len() - 2] != sep {
            return None;
        }
        Band::from_letter(bytes[bytes.len() - 1] as char)
    }
}

/// Translate a human-readable filter identifier to its band suffix.
///
/// Fixed five-entry table (`HSC-G` → `_g`, …, `HSC-Y` → `_y`). Unrecognized
/// identifiers pass through unchanged and are treated as already being a
/// suffix.
pub fn filter_suffix(filter: &str) -> String {
    match filter {
        "HSC-G" => "_g".to_owned(),
        "HSC-R" => "_r".to_owned(),
        "HSC-I" => "_i".to_owned(),
        "HSC-Z" => "_z".to_owned(),
        "HSC-Y" => "_y".to_owned(),
        other => other.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_order() {
        let mut bands = vec![Band::Y, Band::G, Band::Z, Band::R, Band::I];
        bands.sort();
        assert_eq!(bands, Band::ALL.to_vec());
    }

    #[test]
    fn test_from_suffix_of() {
        assert_eq!(Band::from_suffix_of("flux.psf_g"), Some(Band::G));
        assert_eq!(Band::from_suffix_of("multId_y"), Some(Band::Y));
        assert_eq!(Band::from_suffix_of("_z"), Some(Band::Z));
        assert_eq!(Band::from_suffix_of("flux.psf"), None);
        assert_eq!(Band::from_suffix_of("multId.g"), None);
        assert_eq!(Band::from_suffix_of("g"), None);
    }

    #[test]
    fn test_from_marker_of() {
        assert_eq!(Band::from_marker_of("multId.g"), Some(Band::G));
        assert_eq!(Band::from_marker_of("multId_g"), None);
        assert_eq!(Band::from_marker_of("flux.psf"), None);
    }

    #[test]
    fn test_filter_suffix_table() {
        assert_eq!(filter_suffix("HSC-G"), "_g");
        assert_eq!(filter_suffix("HSC-R"), "_r");
        assert_eq!(filter_suffix("HSC-I"), "_i");
        assert_eq!(filter_suffix("HSC-Z"), "_z");
        assert_eq!(filter_suffix("HSC-Y"), "_y");
    }

    #[test]
    fn test_filter_suffix_passthrough() {
        assert_eq!(filter_suffix("_g"), "_g");
        assert_eq!(filter_suffix("SDSS-U"), "SDSS-U");
    }
}
