use super::{Extractor, FieldSource, ResourceKind};
use crate::format;
use crate::model::{CacheCluster, Tag};

fn engine_version(cluster: &CacheCluster) -> String {
    match (cluster.engine.as_deref(), cluster.engine_version.as_deref()) {
        (None, None) => String::new(),
        (engine, version) => format!(
            "{} ({})",
            version.unwrap_or_default(),
            engine.unwrap_or_default()
        ),
    }
}

const CACHE_FIELDS: &[(&str, Extractor<CacheCluster>)] = &[
    ("Cache Name", |c| c.identifier.clone()),
    ("Status", |c| format::status(c.status.as_deref().unwrap_or_default())),
    ("Engine Version", engine_version),
    ("Configuration", |c| c.node_type.clone().unwrap_or_default()),
    ("Endpoint", |c| c.endpoint.clone().unwrap_or_default()),
];

impl FieldSource for CacheCluster {
    const KIND: ResourceKind = ResourceKind::CacheCluster;

    fn fields() -> &'static [(&'static str, Extractor<Self>)] {
        CACHE_FIELDS
    }

    fn identity(&self) -> &str {
        &self.identifier
    }

    fn tags(&self) -> Option<&[Tag]> {
        Some(&self.tags)
    }
}
