use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Tag;

/// Database instance snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DbInstance {
    pub identifier: String,
    pub cluster_identifier: Option<String>,
    pub status: Option<String>,
    pub engine: Option<String>,
    pub engine_version: Option<String>,
    pub class: Option<String>,
    pub endpoint_address: Option<String>,
    pub port: Option<i32>,
    pub maintenance_window: Option<String>,
    pub arn: Option<String>,
    pub availability_zone: Option<String>,
    pub storage_encrypted: Option<bool>,
    pub publicly_accessible: Option<bool>,
    pub performance_insights: Option<bool>,
    pub auto_minor_version_upgrade: Option<bool>,
    pub monitoring_interval: Option<i32>,
    pub monitoring_role_arn: Option<String>,
    /// `None` when the service reported no pending-modifications block at all
    pub pending_modifications: Option<Vec<String>>,
    pub security_groups: Vec<String>,
    pub subnet_group: Option<String>,
    pub subnets: Vec<String>,
    pub vpc_id: Option<String>,
    pub network_type: Option<String>,
    pub storage_type: Option<String>,
    pub allocated_storage: Option<i32>,
    pub created: Option<DateTime<Utc>>,
    pub kms_key_id: Option<String>,
    pub db_name: Option<String>,
    pub parameter_groups: Vec<String>,
    pub option_groups: Vec<String>,
    pub promotion_tier: Option<i32>,
    pub ca_identifier: Option<String>,
    pub ca_valid_till: Option<DateTime<Utc>>,
    pub resource_id: Option<String>,
    pub read_replica_source: Option<String>,
    pub read_replica_ids: Vec<String>,
    pub tags: Vec<Tag>,
    /// Filled in by [`assign_roles`]; needs the cluster list to compute
    pub role: Option<InstanceRole>,
}

/// Database cluster snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DbCluster {
    pub identifier: String,
    pub status: Option<String>,
    pub engine: Option<String>,
    pub engine_version: Option<String>,
    pub endpoint: Option<String>,
    pub reader_endpoint: Option<String>,
    pub custom_endpoints: Vec<String>,
    pub port: Option<i32>,
    pub availability_zones: Vec<String>,
    pub subnet_group: Option<String>,
    pub security_groups: Vec<String>,
    pub publicly_accessible: Option<bool>,
    pub resource_id: Option<String>,
    pub arn: Option<String>,
    pub network_type: Option<String>,
    pub instance_class: Option<String>,
    pub parameter_group: Option<String>,
    pub deletion_protection: Option<bool>,
    pub iam_auth: Option<bool>,
    pub master_username: Option<String>,
    pub multi_az: Option<bool>,
    pub storage_encrypted: Option<bool>,
    pub kms_key_id: Option<String>,
    pub performance_insights: Option<bool>,
    pub monitoring_interval: Option<i32>,
    pub monitoring_role_arn: Option<String>,
    pub auto_minor_version_upgrade: Option<bool>,
    pub maintenance_window: Option<String>,
    pub pending_modifications: Option<Vec<String>>,
    pub backup_retention_period: Option<i32>,
    pub backup_window: Option<String>,
    pub copy_tags_to_snapshot: Option<bool>,
    pub earliest_restorable: Option<DateTime<Utc>>,
    pub latest_restorable: Option<DateTime<Utc>>,
    pub allocated_storage: Option<i32>,
    pub created: Option<DateTime<Utc>>,
    pub members: Vec<ClusterMember>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterMember {
    pub instance_identifier: String,
    pub is_writer: bool,
}

/// Position of an instance within its replication topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InstanceRole {
    Writer,
    Reader,
    Primary,
    Replica,
    /// Standalone instance: no cluster, no replicas
    None,
    Unknown,
}

impl fmt::Display for InstanceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstanceRole::Writer => "Writer",
            InstanceRole::Reader => "Reader",
            InstanceRole::Primary => "Primary",
            InstanceRole::Replica => "Replica",
            InstanceRole::None => "None",
            InstanceRole::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Work out an instance's role from its replication settings and the clusters
/// it may belong to
pub fn instance_role(instance: &DbInstance, clusters: &[DbCluster]) -> InstanceRole {
    if instance.read_replica_source.is_some() {
        return InstanceRole::Replica;
    }
    if !instance.read_replica_ids.is_empty() {
        return InstanceRole::Primary;
    }
    if instance.cluster_identifier.is_none() {
        return InstanceRole::None;
    }

    clusters
        .iter()
        .flat_map(|c| c.members.iter())
        .find(|m| m.instance_identifier == instance.identifier)
        .map(|m| {
            if m.is_writer {
                InstanceRole::Writer
            } else {
                InstanceRole::Reader
            }
        })
        .unwrap_or(InstanceRole::Unknown)
}

/// Set `role` on every instance
pub fn assign_roles(instances: &mut [DbInstance], clusters: &[DbCluster]) {
    for instance in instances.iter_mut() {
        instance.role = Some(instance_role(instance, clusters));
    }
}
