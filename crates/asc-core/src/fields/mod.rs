//! Field registries
//!
//! Every record kind exposes an ordered list of `(name, extractor)` pairs.
//! Lookup by name scans that list, so iteration order is always the
//! registration order and an unregistered name is an error rather than an
//! empty cell.

mod elasticache;
mod iam;
mod rds;
mod ssm;

use std::fmt;

use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::model::Tag;

/// The record kinds that have a field registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResourceKind {
    Parameter,
    ParameterMetadata,
    ParameterVersion,
    DbInstance,
    DbCluster,
    CacheCluster,
    Role,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Parameter => "parameter",
            ResourceKind::ParameterMetadata => "parameter metadata",
            ResourceKind::ParameterVersion => "parameter version",
            ResourceKind::DbInstance => "database instance",
            ResourceKind::DbCluster => "database cluster",
            ResourceKind::CacheCluster => "cache cluster",
            ResourceKind::Role => "role",
        };
        f.write_str(name)
    }
}

/// Pure extraction of one field's display text
pub type Extractor<R> = fn(&R) -> String;

/// A record kind with a field registry
pub trait FieldSource: Sized + 'static {
    const KIND: ResourceKind;

    /// Registered fields in declaration order
    fn fields() -> &'static [(&'static str, Extractor<Self>)];

    /// Name used to identify this record in errors
    fn identity(&self) -> &str;

    /// Tags carried by the record; `None` when the kind has no tag support
    fn tags(&self) -> Option<&[Tag]> {
        None
    }

    /// Whether the named field holds a value that must be masked by default
    fn is_secret(&self, _field: &str) -> bool {
        false
    }

    fn field(&self, name: &str) -> Result<String> {
        Self::fields()
            .iter()
            .find(|(registered, _)| *registered == name)
            .map(|(_, extract)| extract(self))
            .ok_or_else(|| CoreError::UnknownField {
                kind: Self::KIND,
                field: name.to_string(),
            })
    }

    /// Value of a tag, or "" when the record does not carry it
    fn tag(&self, key: &str) -> Result<String> {
        let tags = self.tags().ok_or(CoreError::UnsupportedKind {
            kind: Self::KIND,
            capability: "tags",
        })?;
        Ok(tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.clone())
            .unwrap_or_default())
    }

    fn field_names() -> Vec<&'static str> {
        Self::fields().iter().map(|(name, _)| *name).collect()
    }

    fn has_field(name: &str) -> bool {
        Self::fields().iter().any(|(registered, _)| *registered == name)
    }
}
