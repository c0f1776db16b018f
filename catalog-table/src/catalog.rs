//! Catalog rows and typed cell access.
//!
//! A [`SourceCatalog`] pairs a [`Schema`] with an ordered row list. Every row
//! ([`SourceRecord`]) carries a unique 64-bit identifier and a sky position
//! intrinsically; measured quantities live in schema columns and are read and
//! written through kind-checked accessors.

use crate::error::{Result, TableError};
use crate::field::{FieldKind, Value};
use crate::schema::{Key, Schema};

/// A sky position in the ICRS frame, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyCoord {
    pub ra_deg: f64,
    pub dec_deg: f64,
}

impl SkyCoord {
    pub fn new(ra_deg: f64, dec_deg: f64) -> Self {
        Self { ra_deg, dec_deg }
    }

    /// Angular separation to another position, in arcseconds.
    ///
    /// Uses the Vincenty formula, which stays accurate for both very small
    /// and antipodal separations.
    pub fn separation_arcsec(&self, other: &SkyCoord) -> f64 {
        const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
        const RAD_TO_ARCSEC: f64 = 3600.0 * 180.0 / std::f64::consts::PI;

        let (sin_d1, cos_d1) = libm::sincos(self.dec_deg * DEG_TO_RAD);
        let (sin_d2, cos_d2) = libm::sincos(other.dec_deg * DEG_TO_RAD);
        let delta_ra = (other.ra_deg - self.ra_deg) * DEG_TO_RAD;
        let (sin_dr, cos_dr) = libm::sincos(delta_ra);

        let num = libm::sqrt(
            (cos_d2 * sin_dr).powi(2) + (cos_d1 * sin_d2 - sin_d1 * cos_d2 * cos_dr).powi(2),
        );
        let den = sin_d1 * sin_d2 + cos_d1 * cos_d2 * cos_dr;

        libm::atan2(num, den) * RAD_TO_ARCSEC
    }
}

/// One detected source: identity, position, and one cell per schema column.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    id: i64,
    coord: SkyCoord,
    values: Vec<Value>,
}

impl SourceRecord {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn coord(&self) -> SkyCoord {
        self.coord
    }
}

/// An in-memory table of detected sources.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    schema: Schema,
    records: Vec<SourceRecord>,
}

impl SourceCatalog {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            records: Vec::new(),
        }
    }

    pub fn with_capacity(schema: Schema, rows: usize) -> Self {
        Self {
            schema,
            records: Vec::with_capacity(rows),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a row with every cell at its kind's zero default.
    ///
    /// Returns the new row index.
    pub fn add_new(&mut self, id: i64, coord: SkyCoord) -> usize {
        let values = self
            .schema
            .iter()
            .map(|f| f.kind().default_value())
            .collect();
        self.records.push(SourceRecord { id, coord, values });
        self.records.len() - 1
    }

    pub fn id(&self, row: usize) -> i64 {
        self.records[row].id
    }

    pub fn coord(&self, row: usize) -> SkyCoord {
        self.records[row].coord
    }

    pub fn record(&self, row: usize) -> Result<&SourceRecord> {
        self.records.get(row).ok_or(TableError::RowOutOfBounds {
            row,
            rows: self.records.len(),
        })
    }

    /// Raw cell value, untyped.
    pub fn value(&self, row: usize, key: Key) -> Value {
        self.records[row].values[key.index()]
    }

    /// Write a cell, checking the value kind against the column kind.
    pub fn set_value(&mut self, row: usize, key: Key, value: Value) -> Result<()> {
        let field = self.schema.field(key);
        if field.kind() != value.kind() {
            return Err(TableError::KindMismatch {
                name: field.name().to_owned(),
                expected: field.kind(),
                actual: value.kind(),
            });
        }
        let rows = self.records.len();
        let record = self
            .records
            .get_mut(row)
            .ok_or(TableError::RowOutOfBounds { row, rows })?;
        record.values[key.index()] = value;
        Ok(())
    }

    pub fn float(&self, row: usize, key: Key) -> Result<f32> {
        match self.value(row, key) {
            Value::Float(v) => Ok(v),
            other => Err(self.kind_mismatch(key, FieldKind::Float, other)),
        }
    }

    pub fn int(&self, row: usize, key: Key) -> Result<i64> {
        match self.value(row, key) {
            Value::Int(v) => Ok(v),
            other => Err(self.kind_mismatch(key, FieldKind::Int, other)),
        }
    }

    pub fn flag(&self, row: usize, key: Key) -> Result<bool> {
        match self.value(row, key) {
            Value::Flag(v) => Ok(v),
            other => Err(self.kind_mismatch(key, FieldKind::Flag, other)),
        }
    }

    fn kind_mismatch(&self, key: Key, expected: FieldKind, actual: Value) -> TableError {
        TableError::KindMismatch {
            name: self.schema.field(key).name().to_owned(),
            expected,
            actual: actual.kind(),
        }
    }
}
