//! Parameter Store operations
//!
//! [`ParameterStore`] is the remote boundary: one method per API call, one
//! page at a time. [`ParameterService`] builds the user-level operations
//! (pagination, recursive copy/move/delete, batch chunking, label
//! resolution) on top of any implementation of it.

mod paths;
mod service;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Parameter, ParameterMetadata, ParameterType, ParameterVersion};

pub use paths::{is_path, param_basename, parse_param_version, strip_selector, transform_path};
pub use service::{BatchDelete, ParameterService, validate_destination};

/// Most names the remote batch delete accepts per call
pub const DELETE_BATCH_CAP: usize = 10;

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }
}

/// Arguments of a create-or-update call
#[derive(Debug, Clone, PartialEq)]
pub struct PutParameter {
    pub name: String,
    pub value: String,
    pub kind: ParameterType,
    pub description: Option<String>,
    pub overwrite: bool,
}

impl PutParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>, kind: ParameterType) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
            description: None,
            overwrite: false,
        }
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.is_empty());
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// The remote parameter store
///
/// Implementations map a missing parameter to
/// [`CoreError::NotFound`](crate::CoreError::NotFound) and wrap every other
/// failure with the name of the call.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// `name` may carry a `:version` or `:label` selector
    async fn get_parameter(&self, name: &str, decrypt: bool) -> Result<Parameter>;

    async fn get_parameters_by_path(
        &self,
        path: &str,
        recursive: bool,
        decrypt: bool,
        next_token: Option<String>,
    ) -> Result<Page<Parameter>>;

    /// Metadata of every parameter under `path`; "" or "/" means all
    async fn describe_parameters(
        &self,
        path: &str,
        next_token: Option<String>,
    ) -> Result<Page<ParameterMetadata>>;

    /// Returns the version that was written
    async fn put_parameter(&self, input: &PutParameter) -> Result<i64>;

    async fn delete_parameter(&self, name: &str) -> Result<()>;

    /// At most [`DELETE_BATCH_CAP`] names; returns the names that were invalid
    async fn delete_parameters(&self, names: &[String]) -> Result<Vec<String>>;

    async fn get_parameter_history(
        &self,
        name: &str,
        decrypt: bool,
        next_token: Option<String>,
    ) -> Result<Page<ParameterVersion>>;

    /// Label `version`, or the latest version when `None`; returns invalid labels
    async fn label_parameter_version(
        &self,
        name: &str,
        version: Option<i64>,
        labels: &[String],
    ) -> Result<Vec<String>>;

    /// Returns the labels that were not attached to `version`
    async fn unlabel_parameter_version(
        &self,
        name: &str,
        version: i64,
        labels: &[String],
    ) -> Result<Vec<String>>;
}
