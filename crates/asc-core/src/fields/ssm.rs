use super::{Extractor, FieldSource, ResourceKind};
use crate::format;
use crate::model::{Parameter, ParameterMetadata, ParameterVersion};

const PARAMETER_FIELDS: &[(&str, Extractor<Parameter>)] = &[
    ("Name", |p| p.name.clone()),
    ("Type", |p| p.kind.to_string()),
    ("Value", |p| p.value.clone()),
    ("Version", |p| p.version.to_string()),
    ("Last Modified Date", |p| format::timestamp(p.last_modified.as_ref())),
    ("ARN", |p| p.arn.clone().unwrap_or_default()),
    ("Data Type", |p| p.data_type.clone().unwrap_or_default()),
];

impl FieldSource for Parameter {
    const KIND: ResourceKind = ResourceKind::Parameter;

    fn fields() -> &'static [(&'static str, Extractor<Self>)] {
        PARAMETER_FIELDS
    }

    fn identity(&self) -> &str {
        &self.name
    }

    fn is_secret(&self, field: &str) -> bool {
        field == "Value" && self.kind.is_secret()
    }
}

const METADATA_FIELDS: &[(&str, Extractor<ParameterMetadata>)] = &[
    ("Name", |p| p.name.clone()),
    ("Type", |p| p.kind.to_string()),
    ("Last Modified Date", |p| format::timestamp(p.last_modified.as_ref())),
    ("Last Modified User", |p| p.last_modified_user.clone().unwrap_or_default()),
    ("Version", |p| p.version.to_string()),
    ("Tier", |p| p.tier.clone().unwrap_or_default()),
    ("Description", |p| p.description.clone().unwrap_or_default()),
];

impl FieldSource for ParameterMetadata {
    const KIND: ResourceKind = ResourceKind::ParameterMetadata;

    fn fields() -> &'static [(&'static str, Extractor<Self>)] {
        METADATA_FIELDS
    }

    fn identity(&self) -> &str {
        &self.name
    }
}

const VERSION_FIELDS: &[(&str, Extractor<ParameterVersion>)] = &[
    ("Version", |v| v.version.to_string()),
    ("Value", |v| v.value.clone()),
    ("Type", |v| v.kind.to_string()),
    ("Last Modified Date", |v| format::timestamp(v.last_modified.as_ref())),
    ("Last Modified User", |v| v.last_modified_user.clone().unwrap_or_default()),
    ("Labels", |v| v.labels.join(", ")),
    ("Description", |v| v.description.clone().unwrap_or_default()),
];

impl FieldSource for ParameterVersion {
    const KIND: ResourceKind = ResourceKind::ParameterVersion;

    fn fields() -> &'static [(&'static str, Extractor<Self>)] {
        VERSION_FIELDS
    }

    fn identity(&self) -> &str {
        &self.name
    }

    fn is_secret(&self, field: &str) -> bool {
        field == "Value" && self.kind.is_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParameterType;

    #[test]
    fn test_secure_string_value_is_secret() {
        let secret = Parameter::new("/app/db-pass", ParameterType::SecureString, "hunter2");
        assert!(secret.is_secret("Value"));
        assert!(!secret.is_secret("Name"));
        // the registry itself never masks
        assert_eq!(secret.field("Value").unwrap(), "hunter2");

        let plain = Parameter::new("/app/db-host", ParameterType::String, "db.internal");
        assert!(!plain.is_secret("Value"));
    }

    #[test]
    fn test_history_labels_joined() {
        let v = ParameterVersion {
            name: "/app/x".to_string(),
            version: 3,
            value: "v3".to_string(),
            kind: ParameterType::String,
            last_modified: None,
            last_modified_user: None,
            labels: vec!["prod".to_string(), "stable".to_string()],
            description: None,
        };
        assert_eq!(v.field("Labels").unwrap(), "prod, stable");
        assert_eq!(v.field("Version").unwrap(), "3");
        assert_eq!(v.field("Last Modified Date").unwrap(), "");
    }
}
