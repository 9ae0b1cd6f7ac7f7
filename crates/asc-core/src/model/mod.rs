//! Owned snapshots of the remote resources asc displays
//!
//! These are decoupled from the AWS SDK types: the CLI's adapters convert SDK
//! output into these records so that everything downstream (field
//! registries, tables, path operations) can be exercised without a network.

pub mod elasticache;
pub mod iam;
pub mod rds;
pub mod ssm;

use serde::Serialize;

pub use elasticache::CacheCluster;
pub use iam::{Role, RoleLastUsed};
pub use rds::{ClusterMember, DbCluster, DbInstance, InstanceRole};
pub use ssm::{Parameter, ParameterMetadata, ParameterType, ParameterVersion};

/// Key/value resource tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
