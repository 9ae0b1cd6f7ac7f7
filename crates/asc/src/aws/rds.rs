//! Database instances and clusters through the RDS API

use aws_sdk_rds::Client;
use aws_sdk_rds::types;
use tracing::debug;

use asc_core::model::{ClusterMember, DbCluster, DbInstance, Tag};

use super::{owned, service_error, timestamp};
use crate::error::Result;

/// Arguments of an instance modification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifyInstance {
    pub identifier: String,
    pub apply_immediately: bool,
    pub instance_class: Option<String>,
    pub maintenance_window: Option<String>,
}

pub struct RdsService {
    client: Client,
}

fn tags(list: &[types::Tag]) -> Vec<Tag> {
    list.iter()
        .map(|t| Tag::new(t.key().unwrap_or_default(), t.value().unwrap_or_default()))
        .collect()
}

fn instance_pending(pending: &types::PendingModifiedValues) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(v) = pending.allocated_storage() {
        changes.push(format!("Allocated Storage: {v}"));
    }
    if let Some(v) = pending.storage_type() {
        changes.push(format!("Storage Type: {v}"));
    }
    if let Some(v) = pending.storage_throughput() {
        changes.push(format!("Storage Throughput: {v}"));
    }
    if let Some(v) = pending.db_instance_class() {
        changes.push(format!("Instance Class: {v}"));
    }
    if let Some(v) = pending.db_instance_identifier() {
        changes.push(format!("Instance ID: {v}"));
    }
    if let Some(v) = pending.engine_version() {
        changes.push(format!("Engine Version: {v}"));
    }
    if let Some(v) = pending.ca_certificate_identifier() {
        changes.push(format!("CA Certificate: {v}"));
    }
    if let Some(v) = pending.iam_database_authentication_enabled() {
        changes.push(format!("IAM Auth: {v}"));
    }
    if pending.master_user_password().is_some() {
        changes.push("Master Password: [CHANGED]".to_string());
    }
    if let Some(v) = pending.iops() {
        changes.push(format!("IOPS: {v}"));
    }
    if let Some(v) = pending.multi_az() {
        changes.push(format!("Multi-AZ: {v}"));
    }
    if let Some(v) = pending.port() {
        changes.push(format!("Port: {v}"));
    }
    if let Some(v) = pending.db_subnet_group_name() {
        changes.push(format!("Subnet Group: {v}"));
    }
    if let Some(v) = pending.backup_retention_period() {
        changes.push(format!("Backup Retention: {v} days"));
    }
    if let Some(v) = pending.license_model() {
        changes.push(format!("License Model: {v}"));
    }
    changes
}

fn cluster_pending(pending: &types::ClusterPendingModifiedValues) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(v) = pending.engine_version() {
        changes.push(format!("Engine Version: {v}"));
    }
    if pending.master_user_password().is_some() {
        changes.push("Master User Password: ***".to_string());
    }
    changes
}

fn instance(i: &types::DbInstance) -> DbInstance {
    let subnet_group = i.db_subnet_group();
    DbInstance {
        identifier: i.db_instance_identifier().unwrap_or_default().to_string(),
        cluster_identifier: owned(i.db_cluster_identifier()),
        status: owned(i.db_instance_status()),
        engine: owned(i.engine()),
        engine_version: owned(i.engine_version()),
        class: owned(i.db_instance_class()),
        endpoint_address: i.endpoint().and_then(|e| owned(e.address())),
        port: i.endpoint().and_then(|e| e.port()),
        maintenance_window: owned(i.preferred_maintenance_window()),
        arn: owned(i.db_instance_arn()),
        availability_zone: owned(i.availability_zone()),
        storage_encrypted: i.storage_encrypted(),
        publicly_accessible: i.publicly_accessible(),
        performance_insights: i.performance_insights_enabled(),
        auto_minor_version_upgrade: i.auto_minor_version_upgrade(),
        monitoring_interval: i.monitoring_interval(),
        monitoring_role_arn: owned(i.monitoring_role_arn()),
        pending_modifications: i.pending_modified_values().map(instance_pending),
        security_groups: i
            .vpc_security_groups()
            .iter()
            .filter_map(|g| owned(g.vpc_security_group_id()))
            .collect(),
        subnet_group: subnet_group.and_then(|g| owned(g.db_subnet_group_name())),
        subnets: subnet_group
            .map(|g| {
                g.subnets()
                    .iter()
                    .filter_map(|s| owned(s.subnet_identifier()))
                    .collect()
            })
            .unwrap_or_default(),
        vpc_id: subnet_group.and_then(|g| owned(g.vpc_id())),
        network_type: owned(i.network_type()),
        storage_type: owned(i.storage_type()),
        allocated_storage: i.allocated_storage(),
        created: timestamp(i.instance_create_time()),
        kms_key_id: owned(i.kms_key_id()),
        db_name: owned(i.db_name()),
        parameter_groups: i
            .db_parameter_groups()
            .iter()
            .filter_map(|g| owned(g.db_parameter_group_name()))
            .collect(),
        option_groups: i
            .option_group_memberships()
            .iter()
            .filter_map(|g| owned(g.option_group_name()))
            .collect(),
        promotion_tier: i.promotion_tier(),
        ca_identifier: owned(i.ca_certificate_identifier()),
        ca_valid_till: i
            .certificate_details()
            .and_then(|c| timestamp(c.valid_till())),
        resource_id: owned(i.dbi_resource_id()),
        read_replica_source: owned(i.read_replica_source_db_instance_identifier()),
        read_replica_ids: i.read_replica_db_instance_identifiers().to_vec(),
        tags: tags(i.tag_list()),
        role: None,
    }
}

fn cluster(c: &types::DbCluster) -> DbCluster {
    DbCluster {
        identifier: c.db_cluster_identifier().unwrap_or_default().to_string(),
        status: owned(c.status()),
        engine: owned(c.engine()),
        engine_version: owned(c.engine_version()),
        endpoint: owned(c.endpoint()),
        reader_endpoint: owned(c.reader_endpoint()),
        custom_endpoints: c.custom_endpoints().to_vec(),
        port: c.port(),
        availability_zones: c.availability_zones().to_vec(),
        subnet_group: owned(c.db_subnet_group()),
        security_groups: c
            .vpc_security_groups()
            .iter()
            .filter_map(|g| owned(g.vpc_security_group_id()))
            .collect(),
        publicly_accessible: c.publicly_accessible(),
        resource_id: owned(c.db_cluster_resource_id()),
        arn: owned(c.db_cluster_arn()),
        network_type: owned(c.network_type()),
        instance_class: owned(c.db_cluster_instance_class()),
        parameter_group: owned(c.db_cluster_parameter_group()),
        deletion_protection: c.deletion_protection(),
        iam_auth: c.iam_database_authentication_enabled(),
        master_username: owned(c.master_username()),
        multi_az: c.multi_az(),
        storage_encrypted: c.storage_encrypted(),
        kms_key_id: owned(c.kms_key_id()),
        performance_insights: c.performance_insights_enabled(),
        monitoring_interval: c.monitoring_interval(),
        monitoring_role_arn: owned(c.monitoring_role_arn()),
        auto_minor_version_upgrade: c.auto_minor_version_upgrade(),
        maintenance_window: owned(c.preferred_maintenance_window()),
        pending_modifications: c.pending_modified_values().map(cluster_pending),
        backup_retention_period: c.backup_retention_period(),
        backup_window: owned(c.preferred_backup_window()),
        copy_tags_to_snapshot: c.copy_tags_to_snapshot(),
        earliest_restorable: timestamp(c.earliest_restorable_time()),
        latest_restorable: timestamp(c.latest_restorable_time()),
        allocated_storage: c.allocated_storage(),
        created: timestamp(c.cluster_create_time()),
        members: c
            .db_cluster_members()
            .iter()
            .map(|m| ClusterMember {
                instance_identifier: m.db_instance_identifier().unwrap_or_default().to_string(),
                is_writer: m.is_cluster_writer().unwrap_or(false),
            })
            .collect(),
        tags: tags(c.tag_list()),
    }
}

impl RdsService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every instance, or just `identifier` when given
    pub async fn instances(&self, identifier: Option<&str>) -> Result<Vec<DbInstance>> {
        let mut items = Vec::new();
        let mut marker = None;
        loop {
            debug!(?identifier, ?marker, "DescribeDBInstances");
            let output = self
                .client
                .describe_db_instances()
                .set_db_instance_identifier(identifier.map(str::to_string))
                .set_marker(marker)
                .send()
                .await
                .map_err(|e| service_error("describe database instances", e))?;
            items.extend(output.db_instances().iter().map(instance));
            marker = owned(output.marker());
            if marker.is_none() {
                break;
            }
        }
        Ok(items)
    }

    /// Every cluster, or just `identifier` when given
    pub async fn clusters(&self, identifier: Option<&str>) -> Result<Vec<DbCluster>> {
        let mut items = Vec::new();
        let mut marker = None;
        loop {
            debug!(?identifier, ?marker, "DescribeDBClusters");
            let output = self
                .client
                .describe_db_clusters()
                .set_db_cluster_identifier(identifier.map(str::to_string))
                .set_marker(marker)
                .send()
                .await
                .map_err(|e| service_error("describe database clusters", e))?;
            items.extend(output.db_clusters().iter().map(cluster));
            marker = owned(output.marker());
            if marker.is_none() {
                break;
            }
        }
        Ok(items)
    }

    pub async fn modify_instance(&self, input: &ModifyInstance) -> Result<()> {
        debug!(?input, "ModifyDBInstance");
        self.client
            .modify_db_instance()
            .db_instance_identifier(&input.identifier)
            .apply_immediately(input.apply_immediately)
            .set_db_instance_class(input.instance_class.clone())
            .set_preferred_maintenance_window(input.maintenance_window.clone())
            .send()
            .await
            .map_err(|e| service_error("modify database instance", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_conversion() {
        let sdk = types::DbInstance::builder()
            .db_instance_identifier("db-1")
            .db_cluster_identifier("cluster-a")
            .db_instance_class("db.r6g.large")
            .endpoint(
                types::Endpoint::builder()
                    .address("db-1.example.internal")
                    .port(5432)
                    .build(),
            )
            .tag_list(types::Tag::builder().key("env").value("prod").build())
            .build();

        let db = instance(&sdk);
        assert_eq!(db.identifier, "db-1");
        assert_eq!(db.cluster_identifier.as_deref(), Some("cluster-a"));
        assert_eq!(db.port, Some(5432));
        assert_eq!(db.tags, vec![Tag::new("env", "prod")]);
        assert!(db.pending_modifications.is_none());
        assert!(db.role.is_none());
    }

    #[test]
    fn test_pending_changes_listed() {
        let pending = types::PendingModifiedValues::builder()
            .db_instance_class("db.t4g.small")
            .master_user_password("secret")
            .build();
        assert_eq!(
            instance_pending(&pending),
            vec![
                "Instance Class: db.t4g.small".to_string(),
                "Master Password: [CHANGED]".to_string()
            ]
        );
    }

    #[test]
    fn test_cluster_members() {
        let sdk = types::DbCluster::builder()
            .db_cluster_identifier("cluster-a")
            .db_cluster_members(
                types::DbClusterMember::builder()
                    .db_instance_identifier("db-1")
                    .is_cluster_writer(true)
                    .build(),
            )
            .build();

        let c = cluster(&sdk);
        assert_eq!(c.members.len(), 1);
        assert!(c.members[0].is_writer);
    }
}
