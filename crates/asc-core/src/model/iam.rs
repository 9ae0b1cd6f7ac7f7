use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Tag;

/// IAM role snapshot
///
/// `ListRoles` returns a subset of what `GetRole` does: last-used details and
/// policies are only present on roles fetched individually.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Role {
    pub name: String,
    pub arn: String,
    pub role_id: String,
    pub path: String,
    pub description: Option<String>,
    pub created: Option<DateTime<Utc>>,
    /// URL-encoded JSON, as returned by the service
    pub assume_role_policy_document: Option<String>,
    pub max_session_duration: Option<i32>,
    pub permissions_boundary_arn: Option<String>,
    pub last_used: Option<RoleLastUsed>,
    pub inline_policies: Vec<String>,
    pub managed_policies: Vec<String>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoleLastUsed {
    pub date: Option<DateTime<Utc>>,
    pub region: Option<String>,
}
