//! Cache clusters through the ElastiCache API

use aws_sdk_elasticache::Client;
use aws_sdk_elasticache::types;
use tracing::debug;

use asc_core::model::{CacheCluster, Tag};

use super::{owned, service_error};
use crate::error::Result;

pub struct ElastiCacheService {
    client: Client,
}

fn cache_cluster(c: &types::CacheCluster) -> CacheCluster {
    CacheCluster {
        identifier: c.cache_cluster_id().unwrap_or_default().to_string(),
        status: owned(c.cache_cluster_status()),
        engine: owned(c.engine()),
        engine_version: owned(c.engine_version()),
        node_type: owned(c.cache_node_type()),
        endpoint: c
            .cache_nodes()
            .first()
            .and_then(|n| n.endpoint())
            .and_then(|e| owned(e.address())),
        tags: Vec::new(),
    }
}

impl ElastiCacheService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every cache cluster; tags cost one extra call per cluster
    pub async fn clusters(&self, with_tags: bool) -> Result<Vec<CacheCluster>> {
        let mut items = Vec::new();
        let mut marker = None;
        loop {
            debug!(?marker, "DescribeCacheClusters");
            let output = self
                .client
                .describe_cache_clusters()
                .show_cache_node_info(true)
                .set_marker(marker)
                .send()
                .await
                .map_err(|e| service_error("describe cache clusters", e))?;

            for sdk in output.cache_clusters() {
                let mut cluster = cache_cluster(sdk);
                if with_tags && let Some(arn) = sdk.arn() {
                    cluster.tags = self.tags(arn).await?;
                }
                items.push(cluster);
            }

            marker = owned(output.marker());
            if marker.is_none() {
                break;
            }
        }
        Ok(items)
    }

    async fn tags(&self, arn: &str) -> Result<Vec<Tag>> {
        debug!(arn, "ListTagsForResource");
        let output = self
            .client
            .list_tags_for_resource()
            .resource_name(arn)
            .send()
            .await
            .map_err(|e| service_error("list cache cluster tags", e))?;
        Ok(output
            .tag_list()
            .iter()
            .map(|t| Tag::new(t.key().unwrap_or_default(), t.value().unwrap_or_default()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_node_is_the_endpoint() {
        let node = |addr: &str| {
            types::CacheNode::builder()
                .endpoint(types::Endpoint::builder().address(addr).port(6379).build())
                .build()
        };
        let sdk = types::CacheCluster::builder()
            .cache_cluster_id("sessions-001")
            .engine("redis")
            .engine_version("7.1")
            .cache_node_type("cache.t4g.micro")
            .cache_nodes(node("a.cache.internal"))
            .cache_nodes(node("b.cache.internal"))
            .build();

        let c = cache_cluster(&sdk);
        assert_eq!(c.identifier, "sessions-001");
        assert_eq!(c.endpoint.as_deref(), Some("a.cache.internal"));
        assert_eq!(c.node_type.as_deref(), Some("cache.t4g.micro"));
    }
}
