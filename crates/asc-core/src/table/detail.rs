use super::{Field, FieldKind, Projector, TAGS_CATEGORY};
use crate::error::Result;
use crate::fields::FieldSource;

/// A titled group of name/value pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub entries: Vec<(String, String)>,
}

/// One record, fields grouped by category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTable {
    pub sections: Vec<Section>,
}

impl DetailTable {
    /// Group visible fields by category in first-seen order
    ///
    /// Tag descriptors are ignored: when the record carries tags, a final
    /// "Tags" section holds one entry per tag.
    pub fn build<R: FieldSource>(
        record: &R,
        fields: &[Field],
        projector: &Projector,
    ) -> Result<Self> {
        let mut sections: Vec<Section> = Vec::new();

        for field in fields
            .iter()
            .filter(|f| f.visible && f.kind == FieldKind::Attribute)
        {
            let value = projector.value(record, field)?;
            let entry = (field.name.clone(), value);
            match sections.iter_mut().find(|s| s.title == field.category) {
                Some(section) => section.entries.push(entry),
                None => sections.push(Section {
                    title: field.category.clone(),
                    entries: vec![entry],
                }),
            }
        }

        if let Some(tags) = record.tags().filter(|t| !t.is_empty()) {
            sections.push(Section {
                title: TAGS_CATEGORY.to_string(),
                entries: tags
                    .iter()
                    .map(|t| (t.key.clone(), t.value.clone()))
                    .collect(),
            });
        }

        Ok(Self { sections })
    }

    /// Value shown for `name`, searching every section
    pub fn get(&self, name: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.entries.iter())
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DbInstance, Parameter, ParameterType, Tag};
    use crate::table::{MASK, fields_in};

    #[test]
    fn test_sections_follow_first_seen_category_order() {
        let db = DbInstance {
            identifier: "db-1".to_string(),
            port: Some(5432),
            ..Default::default()
        };
        let mut fields = fields_in("Summary", &["Identifier"]);
        fields.extend(fields_in("Network", &["Port"]));
        fields.push(Field::new("Engine").category("Summary"));
        fields.push(Field::new("ARN").category("Network").hidden());

        let table = DetailTable::build(&db, &fields, &Projector::default()).unwrap();
        let titles: Vec<&str> = table.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Summary", "Network"]);
        assert_eq!(table.sections[0].entries.len(), 2);
        assert_eq!(table.sections[0].entries[1].0, "Engine");
        assert_eq!(table.get("Port"), Some("5432"));
        assert_eq!(table.get("ARN"), None);
    }

    #[test]
    fn test_tags_section_is_last() {
        let db = DbInstance {
            identifier: "db-1".to_string(),
            tags: vec![Tag::new("env", "prod"), Tag::new("team", "core")],
            ..Default::default()
        };
        let mut fields = vec![Field::tag("env")];
        fields.extend(fields_in("Summary", &["Identifier"]));

        let table = DetailTable::build(&db, &fields, &Projector::default()).unwrap();
        let last = table.sections.last().unwrap();
        assert_eq!(last.title, TAGS_CATEGORY);
        assert_eq!(last.entries.len(), 2);
        assert_eq!(table.sections.len(), 2);
    }

    #[test]
    fn test_tagless_kinds_get_no_tags_section() {
        let p = Parameter::new("/a", ParameterType::SecureString, "s3cret");
        let fields = fields_in("Parameter", &["Name", "Value"]);
        let table = DetailTable::build(&p, &fields, &Projector::default()).unwrap();
        assert_eq!(table.sections.len(), 1);
        assert_eq!(table.get("Value"), Some(MASK));
    }
}
