use super::{Field, FieldKind};
use crate::error::{CoreError, Result};
use crate::fields::FieldSource;

/// Placeholder shown instead of secret values
pub const MASK: &str = "****";

/// Turns records into cell values
///
/// Masking is decided here rather than in the registries, so one registry
/// entry serves both masked and revealed output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projector {
    reveal: bool,
}

impl Projector {
    pub fn new(reveal: bool) -> Self {
        Self { reveal }
    }

    /// Value of a single field, wrapped with the field and record on failure
    pub fn value<R: FieldSource>(&self, record: &R, field: &Field) -> Result<String> {
        let raw = match field.kind {
            FieldKind::Tag => record.tag(&field.name),
            FieldKind::Attribute => record.field(&field.name),
        };

        let value = raw.map_err(|e| CoreError::FieldValue {
            field: field.name.clone(),
            record: record.identity().to_string(),
            source: Box::new(e),
        })?;

        if field.kind == FieldKind::Attribute && !self.reveal && record.is_secret(&field.name) {
            return Ok(MASK.to_string());
        }
        Ok(value)
    }

    /// One value per visible field, in descriptor order
    pub fn row<R: FieldSource>(&self, record: &R, fields: &[Field]) -> Result<Vec<String>> {
        fields
            .iter()
            .filter(|f| f.visible)
            .map(|f| self.value(record, f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DbInstance, Parameter, ParameterType, Tag};

    fn secret() -> Parameter {
        Parameter::new("/app/db-pass", ParameterType::SecureString, "hunter2")
    }

    #[test]
    fn test_secret_masked_unless_revealed() {
        let field = Field::new("Value");
        assert_eq!(Projector::new(false).value(&secret(), &field).unwrap(), MASK);
        assert_eq!(
            Projector::new(true).value(&secret(), &field).unwrap(),
            "hunter2"
        );
    }

    #[test]
    fn test_row_has_one_cell_per_visible_field() {
        let fields = vec![
            Field::new("Name"),
            Field::new("Type").hidden(),
            Field::new("Value"),
        ];
        let row = Projector::default().row(&secret(), &fields).unwrap();
        assert_eq!(row, vec!["/app/db-pass".to_string(), MASK.to_string()]);
    }

    #[test]
    fn test_row_failure_names_field_and_record() {
        let fields = vec![Field::new("Name"), Field::new("Colour")];
        let err = Projector::default().row(&secret(), &fields).unwrap_err();
        match err {
            CoreError::FieldValue { field, record, .. } => {
                assert_eq!(field, "Colour");
                assert_eq!(record, "/app/db-pass");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_tag_columns() {
        let db = DbInstance {
            identifier: "db-1".to_string(),
            tags: vec![Tag::new("team", "payments")],
            ..Default::default()
        };
        let fields = vec![Field::new("Identifier"), Field::tag("team"), Field::tag("env")];
        let row = Projector::default().row(&db, &fields).unwrap();
        assert_eq!(row, vec!["db-1", "payments", ""]);
    }
}
