//! Roles through the IAM API

use aws_sdk_iam::Client;
use aws_sdk_iam::types;
use tracing::debug;

use asc_core::model::{Role, RoleLastUsed, Tag};

use super::{owned, service_error, timestamp};
use crate::error::Result;

pub struct IamService {
    client: Client,
}

fn role(r: &types::Role) -> Role {
    Role {
        name: r.role_name().to_string(),
        arn: r.arn().to_string(),
        role_id: r.role_id().to_string(),
        path: r.path().to_string(),
        description: owned(r.description()),
        created: timestamp(Some(r.create_date())),
        assume_role_policy_document: owned(r.assume_role_policy_document()),
        max_session_duration: r.max_session_duration(),
        permissions_boundary_arn: r
            .permissions_boundary()
            .and_then(|b| owned(b.permissions_boundary_arn())),
        last_used: r.role_last_used().map(|u| RoleLastUsed {
            date: timestamp(u.last_used_date()),
            region: owned(u.region()),
        }),
        inline_policies: Vec::new(),
        managed_policies: Vec::new(),
        tags: r.tags().iter().map(|t| Tag::new(t.key(), t.value())).collect(),
    }
}

impl IamService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// One page of roles, at most `max_items`
    pub async fn roles(&self, path_prefix: Option<&str>, max_items: i32) -> Result<Vec<Role>> {
        debug!(?path_prefix, max_items, "ListRoles");
        let output = self
            .client
            .list_roles()
            .set_path_prefix(path_prefix.filter(|p| !p.is_empty()).map(str::to_string))
            .max_items(max_items)
            .send()
            .await
            .map_err(|e| service_error("list roles", e))?;
        Ok(output.roles().iter().map(role).collect())
    }

    /// A single role with its inline and attached policy names
    pub async fn role(&self, name: &str) -> Result<Role> {
        debug!(name, "GetRole");
        let output = self
            .client
            .get_role()
            .role_name(name)
            .send()
            .await
            .map_err(|e| service_error("get role", e))?;
        let mut found = output.role().map(role).ok_or_else(|| crate::error::AscError::NotFound {
            message: format!("role not found: {name}"),
        })?;

        debug!(name, "ListRolePolicies");
        let inline = self
            .client
            .list_role_policies()
            .role_name(name)
            .send()
            .await
            .map_err(|e| service_error("list role policies", e))?;
        found.inline_policies = inline.policy_names().to_vec();

        debug!(name, "ListAttachedRolePolicies");
        let attached = self
            .client
            .list_attached_role_policies()
            .role_name(name)
            .send()
            .await
            .map_err(|e| service_error("list attached role policies", e))?;
        found.managed_policies = attached
            .attached_policies()
            .iter()
            .filter_map(|p| owned(p.policy_name()))
            .collect();

        Ok(found)
    }
}
