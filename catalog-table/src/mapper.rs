//! Write-once copy plan between two schemas.
//!
//! A [`SchemaMapper`] is built incrementally against an input schema: copy
//! directives wire input columns to output columns (optionally renamed), and
//! output-only columns reserve space with no source (their values are filled
//! explicitly by the caller). Once built, [`SchemaMapper::copy`] applies all
//! directives from one row to another. The plan is consumed within a single
//! reconciliation or match call; nothing persists across calls.

use crate::catalog::SourceCatalog;
use crate::error::{Result, TableError};
use crate::field::Field;
use crate::schema::{Key, Schema};

#[derive(Debug, Clone)]
pub struct SchemaMapper {
    input: Schema,
    output: Schema,
    directives: Vec<(Key, Key)>,
}

impl SchemaMapper {
    pub fn new(input: &Schema) -> Self {
        Self {
            input: input.clone(),
            output: Schema::new(),
            directives: Vec::new(),
        }
    }

    pub fn input_schema(&self) -> &Schema {
        &self.input
    }

    /// The finalized output schema. Build an output catalog from a clone of
    /// this schema so that output keys stay valid.
    pub fn output_schema(&self) -> &Schema {
        &self.output
    }

    pub fn directive_count(&self) -> usize {
        self.directives.len()
    }

    /// Wire an input column straight through under the same name.
    ///
    /// # Errors
    /// Fails if `name` is absent from the input schema or already present in
    /// the output schema.
    pub fn map(&mut self, name: &str) -> Result<Key> {
        let src = self.input.find(name)?;
        let field = self.input.field(src).clone();
        self.push_directive(src, field)
    }

    /// Wire an input column to a renamed output column.
    ///
    /// The renamed field keeps the source column's kind, so copies never
    /// change a cell's type.
    pub fn map_renamed(&mut self, name: &str, field: Field) -> Result<Key> {
        let src = self.input.find(name)?;
        let src_kind = self.input.field(src).kind();
        if field.kind() != src_kind {
            return Err(TableError::KindMismatch {
                name: field.name().to_owned(),
                expected: src_kind,
                actual: field.kind(),
            });
        }
        self.push_directive(src, field)
    }

    /// Reserve an output-only column with no source mapping.
    pub fn add_output(&mut self, field: Field) -> Result<Key> {
        self.output.add(field)
    }

    fn push_directive(&mut self, src: Key, field: Field) -> Result<Key> {
        let dst = self.output.add(field)?;
        self.directives.push((src, dst));
        Ok(dst)
    }

    /// Apply every copy directive from `src` row to `dst` row.
    ///
    /// `src` must use this mapper's input schema and `dst` its output schema;
    /// output-only columns are left untouched.
    pub fn copy(
        &self,
        src: &SourceCatalog,
        src_row: usize,
        dst: &mut SourceCatalog,
        dst_row: usize,
    ) -> Result<()> {
        for &(from, to) in &self.directives {
            dst.set_value(dst_row, to, src.value(src_row, from))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SkyCoord;
    use crate::field::{FieldKind, Value};

    fn input_schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .add(Field::new("flux.psf", FieldKind::Float, "PSF flux."))
            .unwrap();
        schema
            .add(Field::new("parent", FieldKind::Int, "Parent id."))
            .unwrap();
        schema
    }

    #[test]
    fn test_map_straight_through() {
        let schema = input_schema();
        let mut scm = SchemaMapper::new(&schema);
        scm.map("flux.psf").unwrap();
        assert_eq!(scm.output_schema().len(), 1);
        assert!(scm.output_schema().contains("flux.psf"));
        assert_eq!(scm.directive_count(), 1);
    }

    #[test]
    fn test_map_missing_source_fails_at_construction() {
        let schema = input_schema();
        let mut scm = SchemaMapper::new(&schema);
        assert_eq!(
            scm.map("seeing"),
            Err(TableError::MissingField("seeing".to_owned()))
        );
        // Failed directive leaves no trace in the output schema.
        assert_eq!(scm.output_schema().len(), 0);
    }

    #[test]
    fn test_map_renamed_rejects_kind_change() {
        let schema = input_schema();
        let mut scm = SchemaMapper::new(&schema);
        let wrong = Field::new("flux.psf_g", FieldKind::Int, "");
        assert!(matches!(
            scm.map_renamed("flux.psf", wrong),
            Err(TableError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_duplicate_target_rejected() {
        let schema = input_schema();
        let mut scm = SchemaMapper::new(&schema);
        scm.map("flux.psf").unwrap();
        assert_eq!(
            scm.add_output(Field::new("flux.psf", FieldKind::Float, "")),
            Err(TableError::DuplicateField("flux.psf".to_owned()))
        );
    }

    #[test]
    fn test_copy_applies_directives_only() {
        let schema = input_schema();
        let mut src = SourceCatalog::new(schema.clone());
        let row = src.add_new(7, SkyCoord::new(10.0, -3.0));
        let flux = schema.find("flux.psf").unwrap();
        src.set_value(row, flux, Value::Float(9.25)).unwrap();

        let mut scm = SchemaMapper::new(&schema);
        let renamed = schema.field(flux).copy_renamed("flux.psf_g");
        let dst_flux = scm.map_renamed("flux.psf", renamed).unwrap();
        let reserved = scm
            .add_output(Field::new("seeing_g", FieldKind::Float, "Seeing."))
            .unwrap();

        let mut dst = SourceCatalog::new(scm.output_schema().clone());
        let dst_row = dst.add_new(src.id(row), src.coord(row));
        scm.copy(&src, row, &mut dst, dst_row).unwrap();

        assert_eq!(dst.float(dst_row, dst_flux).unwrap(), 9.25);
        // Output-only column keeps its default until the caller fills it.
        assert_eq!(dst.float(dst_row, reserved).unwrap(), 0.0);
        assert_eq!(dst.id(dst_row), 7);
    }
}
