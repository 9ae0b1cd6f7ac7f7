//! Table models
//!
//! Records are projected through field descriptors into either a
//! [`ListTable`] (one row per record, sorted) or a [`DetailTable`] (one
//! record, fields grouped into sections). Neither model knows how it will be
//! drawn; see [`crate::render`].

mod detail;
mod list;
mod project;

pub use detail::{DetailTable, Section};
pub use list::{ListTable, SortSpec};
pub use project::{MASK, Projector};

/// Category name of the section synthesised from a record's tags
pub const TAGS_CATEGORY: &str = "Tags";

/// Where a field's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Looked up in the record kind's field registry
    Attribute,
    /// Looked up among the record's tags by key
    Tag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Descriptor of one displayable, sortable column or detail entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub category: String,
    pub kind: FieldKind,
    pub visible: bool,
    pub direction: SortDirection,
    /// Sort key used when the caller activates none
    pub default_sort: bool,
    /// Suppress repeated consecutive values in list views
    pub merge: bool,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: String::new(),
            kind: FieldKind::Attribute,
            visible: true,
            direction: SortDirection::Asc,
            default_sort: false,
            merge: false,
        }
    }

    /// Column holding the value of the tag `key`
    pub fn tag(key: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Tag,
            category: TAGS_CATEGORY.to_string(),
            ..Self::new(key)
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn hidden(self) -> Self {
        self.visible(false)
    }

    pub fn descending(mut self) -> Self {
        self.direction = SortDirection::Desc;
        self
    }

    pub fn default_sort(mut self) -> Self {
        self.default_sort = true;
        self
    }

    pub fn merge(mut self) -> Self {
        self.merge = true;
        self
    }
}

/// Attach a category to a run of field names
///
/// ```rust
/// use asc_core::table::{fields_in, Field};
///
/// let fields = fields_in("Network", &["Endpoint", "Port"]);
/// assert_eq!(fields[1], Field::new("Port").category("Network"));
/// ```
pub fn fields_in(category: &str, names: &[&str]) -> Vec<Field> {
    names
        .iter()
        .map(|name| Field::new(*name).category(category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let field = Field::new("Name");
        assert!(field.visible);
        assert_eq!(field.kind, FieldKind::Attribute);
        assert_eq!(field.direction, SortDirection::Asc);
        assert!(!field.merge);

        let field = Field::new("Version").descending().default_sort().hidden();
        assert_eq!(field.direction, SortDirection::Desc);
        assert!(field.default_sort);
        assert!(!field.visible);
    }

    #[test]
    fn test_tag_field_uses_tags_category() {
        let field = Field::tag("env");
        assert_eq!(field.kind, FieldKind::Tag);
        assert_eq!(field.category, TAGS_CATEGORY);
        assert_eq!(field.name, "env");
    }
}
