use serde::Serialize;

use super::Tag;

/// Cache cluster snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheCluster {
    pub identifier: String,
    pub status: Option<String>,
    pub engine: Option<String>,
    pub engine_version: Option<String>,
    pub node_type: Option<String>,
    /// Address of the first cache node, when nodes were requested
    pub endpoint: Option<String>,
    pub tags: Vec<Tag>,
}
