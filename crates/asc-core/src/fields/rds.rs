use super::{Extractor, FieldSource, ResourceKind};
use crate::format::{self, PLACEHOLDER, enabled_or, join_or, or_placeholder};
use crate::model::{DbCluster, DbInstance, Tag};

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn pending(modifications: &Option<Vec<String>>) -> String {
    match modifications {
        Some(list) if !list.is_empty() => {
            format!("{} pending: [{}]", list.len(), list.join(" "))
        }
        _ => "None".to_string(),
    }
}

fn monitoring_interval(interval: Option<i32>) -> String {
    match interval {
        Some(n) if n > 0 => n.to_string(),
        _ => "Disabled".to_string(),
    }
}

const INSTANCE_FIELDS: &[(&str, Extractor<DbInstance>)] = &[
    ("Identifier", |i| i.identifier.clone()),
    ("Cluster Identifier", |i| {
        or_placeholder(i.cluster_identifier.as_deref(), PLACEHOLDER)
    }),
    ("Status", |i| format::status(i.status.as_deref().unwrap_or_default())),
    ("Engine", |i| text(&i.engine)),
    ("Engine Version", |i| text(&i.engine_version)),
    ("Size", |i| text(&i.class)),
    ("Class", |i| text(&i.class)),
    ("Role", |i| i.role.map(|r| r.to_string()).unwrap_or_default()),
    ("Endpoint", |i| text(&i.endpoint_address)),
    ("Port", |i| {
        i.port
            .map(|p| p.to_string())
            .unwrap_or_else(|| "Not configured".to_string())
    }),
    ("Maintenance Window", |i| text(&i.maintenance_window)),
    ("ARN", |i| text(&i.arn)),
    ("Availability Zone", |i| text(&i.availability_zone)),
    ("Encryption", |i| enabled_or(i.storage_encrypted, "")),
    ("Publicly Accessible", |i| enabled_or(i.publicly_accessible, "")),
    ("Performance Insights", |i| enabled_or(i.performance_insights, "")),
    ("Auto Minor Version Upgrade", |i| {
        enabled_or(i.auto_minor_version_upgrade, "")
    }),
    ("Monitoring Interval", |i| monitoring_interval(i.monitoring_interval)),
    ("Monitoring Role", |i| {
        or_placeholder(i.monitoring_role_arn.as_deref(), "Not configured")
    }),
    ("Pending Modifications", |i| pending(&i.pending_modifications)),
    ("Security Group(s)", |i| join_or(&i.security_groups, ", ", "-")),
    ("Subnet Group", |i| or_placeholder(i.subnet_group.as_deref(), "-")),
    ("Subnets", |i| join_or(&i.subnets, ", ", "Not configured")),
    ("VPC ID", |i| text(&i.vpc_id)),
    ("Network Type", |i| {
        or_placeholder(i.network_type.as_deref(), "Not configured")
    }),
    ("Storage Type", |i| text(&i.storage_type)),
    ("Allocated Storage", |i| {
        i.allocated_storage
            .map(|s| format!("{s} GiB"))
            .unwrap_or_default()
    }),
    ("Created Time", |i| format::timestamp(i.created.as_ref())),
    ("AWS KMS Key", |i| text(&i.kms_key_id)),
    ("DB Name", |i| text(&i.db_name)),
    ("Parameter Group", |i| join_or(&i.parameter_groups, ", ", "-")),
    ("Option Group", |i| join_or(&i.option_groups, ", ", "-")),
    ("Failover Priority", |i| {
        i.promotion_tier
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string())
    }),
    ("Certificate Authority", |i| text(&i.ca_identifier)),
    ("Certificate Expiry Date", |i| {
        format::timestamp(i.ca_valid_till.as_ref())
    }),
    ("Resource ID", |i| text(&i.resource_id)),
];

impl FieldSource for DbInstance {
    const KIND: ResourceKind = ResourceKind::DbInstance;

    fn fields() -> &'static [(&'static str, Extractor<Self>)] {
        INSTANCE_FIELDS
    }

    fn identity(&self) -> &str {
        &self.identifier
    }

    fn tags(&self) -> Option<&[Tag]> {
        Some(&self.tags)
    }
}

const CLUSTER_FIELDS: &[(&str, Extractor<DbCluster>)] = &[
    ("Cluster Identifier", |c| c.identifier.clone()),
    ("Status", |c| format::status(c.status.as_deref().unwrap_or_default())),
    ("Engine", |c| text(&c.engine)),
    ("Engine Version", |c| text(&c.engine_version)),
    ("Endpoint", |c| text(&c.endpoint)),
    ("Reader Endpoint", |c| {
        or_placeholder(c.reader_endpoint.as_deref(), "Not configured")
    }),
    ("Custom Endpoints", |c| join_or(&c.custom_endpoints, ", ", "None")),
    ("Port", |c| c.port.map(|p| p.to_string()).unwrap_or_default()),
    ("Availability Zones", |c| c.availability_zones.join(", ")),
    ("Subnet Group", |c| or_placeholder(c.subnet_group.as_deref(), "-")),
    ("Security Groups", |c| join_or(&c.security_groups, ", ", "-")),
    ("Publicly Accessible", |c| enabled_or(c.publicly_accessible, "")),
    ("Resource ID", |c| text(&c.resource_id)),
    ("DB Cluster ARN", |c| text(&c.arn)),
    ("Network Type", |c| text(&c.network_type)),
    ("DB Cluster Instance Class", |c| text(&c.instance_class)),
    ("Parameter Group", |c| text(&c.parameter_group)),
    ("Deletion Protection", |c| enabled_or(c.deletion_protection, "")),
    ("IAM Database Authentication", |c| enabled_or(c.iam_auth, "")),
    ("Master Username", |c| text(&c.master_username)),
    ("Multi AZ", |c| enabled_or(c.multi_az, "")),
    ("Encryption", |c| enabled_or(c.storage_encrypted, "")),
    ("KMS Key ID", |c| text(&c.kms_key_id)),
    ("Performance Insights", |c| enabled_or(c.performance_insights, "")),
    ("Monitoring Interval", |c| monitoring_interval(c.monitoring_interval)),
    ("Monitoring Role", |c| {
        or_placeholder(c.monitoring_role_arn.as_deref(), "Not configured")
    }),
    ("Auto Minor Version Upgrade", |c| {
        enabled_or(c.auto_minor_version_upgrade, "")
    }),
    ("Preferred Maintenance Window", |c| text(&c.maintenance_window)),
    ("Pending Modifications", |c| pending(&c.pending_modifications)),
    ("Backup Retention Period", |c| {
        c.backup_retention_period
            .map(|d| format!("{d} days"))
            .unwrap_or_default()
    }),
    ("Preferred Backup Window", |c| text(&c.backup_window)),
    ("Copy Tags To Snapshot", |c| enabled_or(c.copy_tags_to_snapshot, "")),
    ("Earliest Restorable Time", |c| {
        format::timestamp(c.earliest_restorable.as_ref())
    }),
    ("Latest Restorable Time", |c| {
        format::timestamp(c.latest_restorable.as_ref())
    }),
    ("Allocated Storage", |c| {
        c.allocated_storage
            .map(|s| format!("{s} GiB"))
            .unwrap_or_default()
    }),
    ("Created Time", |c| format::timestamp(c.created.as_ref())),
];

impl FieldSource for DbCluster {
    const KIND: ResourceKind = ResourceKind::DbCluster;

    fn fields() -> &'static [(&'static str, Extractor<Self>)] {
        CLUSTER_FIELDS
    }

    fn identity(&self) -> &str {
        &self.identifier
    }

    fn tags(&self) -> Option<&[Tag]> {
        Some(&self.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::strip_ansi;
    use crate::model::InstanceRole;

    #[test]
    fn test_instance_placeholders() {
        let db = DbInstance {
            identifier: "solo".to_string(),
            ..Default::default()
        };
        assert_eq!(db.field("Cluster Identifier").unwrap(), "-");
        assert_eq!(db.field("Port").unwrap(), "Not configured");
        assert_eq!(db.field("Monitoring Interval").unwrap(), "Disabled");
        assert_eq!(db.field("Monitoring Role").unwrap(), "Not configured");
        assert_eq!(db.field("Security Group(s)").unwrap(), "-");
        assert_eq!(db.field("Failover Priority").unwrap(), "-");
        assert_eq!(db.field("Pending Modifications").unwrap(), "None");
    }

    #[test]
    fn test_instance_values() {
        let db = DbInstance {
            identifier: "db-1".to_string(),
            status: Some("available".to_string()),
            storage_encrypted: Some(true),
            publicly_accessible: Some(false),
            monitoring_interval: Some(60),
            security_groups: vec!["sg-1".to_string(), "sg-2".to_string()],
            pending_modifications: Some(vec![
                "Instance Class: db.r6g.large".to_string(),
                "Port: 5433".to_string(),
            ]),
            role: Some(InstanceRole::Writer),
            ..Default::default()
        };
        assert_eq!(strip_ansi(&db.field("Status").unwrap()), "available");
        assert_eq!(db.field("Encryption").unwrap(), "Enabled");
        assert_eq!(db.field("Publicly Accessible").unwrap(), "Disabled");
        assert_eq!(db.field("Monitoring Interval").unwrap(), "60");
        assert_eq!(db.field("Security Group(s)").unwrap(), "sg-1, sg-2");
        assert_eq!(db.field("Role").unwrap(), "Writer");
        assert_eq!(
            db.field("Pending Modifications").unwrap(),
            "2 pending: [Instance Class: db.r6g.large Port: 5433]"
        );
    }

    #[test]
    fn test_cluster_units() {
        let cluster = DbCluster {
            identifier: "c1".to_string(),
            backup_retention_period: Some(7),
            allocated_storage: Some(100),
            ..Default::default()
        };
        assert_eq!(cluster.field("Backup Retention Period").unwrap(), "7 days");
        assert_eq!(cluster.field("Allocated Storage").unwrap(), "100 GiB");
        assert_eq!(cluster.field("Reader Endpoint").unwrap(), "Not configured");
        assert_eq!(cluster.field("Custom Endpoints").unwrap(), "None");
    }
}
