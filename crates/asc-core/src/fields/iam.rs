use chrono::Utc;

use super::{Extractor, FieldSource, ResourceKind};
use crate::format;
use crate::model::{Role, Tag};

fn last_activity(role: &Role) -> String {
    role.last_used
        .as_ref()
        .and_then(|u| u.date.as_ref())
        .map(|date| format::relative_time(date, &Utc::now()))
        .unwrap_or_default()
}

const ROLE_FIELDS: &[(&str, Extractor<Role>)] = &[
    ("Name", |r| r.name.clone()),
    ("Arn", |r| r.arn.clone()),
    ("Role ID", |r| r.role_id.clone()),
    ("Path", |r| r.path.clone()),
    ("Description", |r| r.description.clone().unwrap_or_default()),
    ("Creation Time", |r| format::timestamp(r.created.as_ref())),
    ("Max Session Duration", |r| {
        r.max_session_duration
            .map(|d| d.to_string())
            .unwrap_or_default()
    }),
    ("Permissions Boundary", |r| {
        r.permissions_boundary_arn.clone().unwrap_or_default()
    }),
    ("Role Last Used", |r| {
        format::timestamp(r.last_used.as_ref().and_then(|u| u.date.as_ref()))
    }),
    ("Last Activity", last_activity),
    ("Assume Role Policy Document", |r| {
        r.assume_role_policy_document
            .as_deref()
            .map(format::policy_document)
            .unwrap_or_default()
    }),
    ("Inline Policies", |r| r.inline_policies.join("\n")),
    ("Managed Policies", |r| r.managed_policies.join("\n")),
];

impl FieldSource for Role {
    const KIND: ResourceKind = ResourceKind::Role;

    fn fields() -> &'static [(&'static str, Extractor<Self>)] {
        ROLE_FIELDS
    }

    fn identity(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> Option<&[Tag]> {
        Some(&self.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoleLastUsed;
    use chrono::Duration;

    #[test]
    fn test_last_activity_is_relative() {
        let role = Role {
            name: "deploy".to_string(),
            last_used: Some(RoleLastUsed {
                date: Some(Utc::now() - Duration::hours(5)),
                region: Some("eu-west-1".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(role.field("Last Activity").unwrap(), "5 hours ago");
        assert_eq!(Role::default().field("Last Activity").unwrap(), "");
    }

    #[test]
    fn test_policies_are_newline_joined() {
        let role = Role {
            managed_policies: vec!["ReadOnlyAccess".to_string(), "AmazonS3FullAccess".to_string()],
            ..Default::default()
        };
        assert_eq!(
            role.field("Managed Policies").unwrap(),
            "ReadOnlyAccess\nAmazonS3FullAccess"
        );
    }
}
