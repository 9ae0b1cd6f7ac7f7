//! Parameter Store through the SSM API

use async_trait::async_trait;
use aws_sdk_ssm::Client;
use aws_sdk_ssm::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_ssm::types;
use tracing::debug;

use asc_core::model::{Parameter, ParameterMetadata, ParameterType, ParameterVersion};
use asc_core::ssm::{Page, ParameterStore, PutParameter, strip_selector};
use asc_core::{CoreError, Result};

use super::{describe, is_not_found_code, owned, timestamp};

/// [`ParameterStore`] backed by an SSM client
pub struct SsmStore {
    client: Client,
}

impl SsmStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn remote_error<E>(operation: &str, name: &str, err: SdkError<E>) -> CoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    if is_not_found_code(err.code()) {
        CoreError::NotFound {
            name: name.to_string(),
        }
    } else {
        CoreError::remote(operation, describe(&err))
    }
}

fn kind(value: Option<&types::ParameterType>) -> ParameterType {
    match value {
        Some(types::ParameterType::SecureString) => ParameterType::SecureString,
        Some(types::ParameterType::StringList) => ParameterType::StringList,
        _ => ParameterType::String,
    }
}

fn sdk_kind(kind: ParameterType) -> types::ParameterType {
    match kind {
        ParameterType::String => types::ParameterType::String,
        ParameterType::StringList => types::ParameterType::StringList,
        ParameterType::SecureString => types::ParameterType::SecureString,
    }
}

fn parameter(p: &types::Parameter) -> Parameter {
    Parameter {
        name: p.name().unwrap_or_default().to_string(),
        kind: kind(p.r#type()),
        value: p.value().unwrap_or_default().to_string(),
        version: p.version(),
        last_modified: timestamp(p.last_modified_date()),
        arn: owned(p.arn()),
        data_type: owned(p.data_type()),
    }
}

fn metadata(p: &types::ParameterMetadata) -> ParameterMetadata {
    ParameterMetadata {
        name: p.name().unwrap_or_default().to_string(),
        kind: kind(p.r#type()),
        last_modified: timestamp(p.last_modified_date()),
        last_modified_user: owned(p.last_modified_user()),
        version: p.version(),
        tier: p.tier().map(|t| t.as_str().to_string()),
        description: owned(p.description()),
    }
}

fn history_entry(p: &types::ParameterHistory) -> ParameterVersion {
    ParameterVersion {
        name: p.name().unwrap_or_default().to_string(),
        version: p.version(),
        value: p.value().unwrap_or_default().to_string(),
        kind: kind(p.r#type()),
        last_modified: timestamp(p.last_modified_date()),
        last_modified_user: owned(p.last_modified_user()),
        labels: p.labels().to_vec(),
        description: owned(p.description()),
    }
}

/// The describe filter for `path`; none when listing everything
fn path_filter(path: &str) -> Result<Option<types::ParameterStringFilter>> {
    if path.is_empty() || path == "/" {
        return Ok(None);
    }
    let filter = types::ParameterStringFilter::builder()
        .key("Path")
        .option("Recursive")
        .values(path.trim_end_matches('/'))
        .build()
        .map_err(|e| CoreError::remote("describe parameters", e))?;
    Ok(Some(filter))
}

#[async_trait]
impl ParameterStore for SsmStore {
    async fn get_parameter(&self, name: &str, decrypt: bool) -> Result<Parameter> {
        debug!(name, decrypt, "GetParameter");
        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(decrypt)
            .send()
            .await
            .map_err(|e| remote_error("get parameter", strip_selector(name), e))?;

        output
            .parameter()
            .map(parameter)
            .ok_or_else(|| CoreError::NotFound {
                name: name.to_string(),
            })
    }

    async fn get_parameters_by_path(
        &self,
        path: &str,
        recursive: bool,
        decrypt: bool,
        next_token: Option<String>,
    ) -> Result<Page<Parameter>> {
        debug!(path, recursive, decrypt, "GetParametersByPath");
        let output = self
            .client
            .get_parameters_by_path()
            .path(path)
            .recursive(recursive)
            .with_decryption(decrypt)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| remote_error("get parameters by path", path, e))?;

        Ok(Page {
            items: output.parameters().iter().map(parameter).collect(),
            next_token: owned(output.next_token()),
        })
    }

    async fn describe_parameters(
        &self,
        path: &str,
        next_token: Option<String>,
    ) -> Result<Page<ParameterMetadata>> {
        debug!(path, "DescribeParameters");
        let output = self
            .client
            .describe_parameters()
            .set_parameter_filters(path_filter(path)?.map(|f| vec![f]))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| remote_error("describe parameters", path, e))?;

        Ok(Page {
            items: output.parameters().iter().map(metadata).collect(),
            next_token: owned(output.next_token()),
        })
    }

    async fn put_parameter(&self, input: &PutParameter) -> Result<i64> {
        debug!(name = %input.name, overwrite = input.overwrite, "PutParameter");
        let output = self
            .client
            .put_parameter()
            .name(&input.name)
            .value(&input.value)
            .r#type(sdk_kind(input.kind))
            .set_description(input.description.clone())
            .overwrite(input.overwrite)
            .send()
            .await
            .map_err(|e| CoreError::remote("put parameter", describe(&e)))?;
        Ok(output.version())
    }

    async fn delete_parameter(&self, name: &str) -> Result<()> {
        debug!(name, "DeleteParameter");
        self.client
            .delete_parameter()
            .name(name)
            .send()
            .await
            .map_err(|e| remote_error("delete parameter", name, e))?;
        Ok(())
    }

    async fn delete_parameters(&self, names: &[String]) -> Result<Vec<String>> {
        debug!(count = names.len(), "DeleteParameters");
        let output = self
            .client
            .delete_parameters()
            .set_names(Some(names.to_vec()))
            .send()
            .await
            .map_err(|e| CoreError::remote("delete parameters", describe(&e)))?;
        Ok(output.invalid_parameters().to_vec())
    }

    async fn get_parameter_history(
        &self,
        name: &str,
        decrypt: bool,
        next_token: Option<String>,
    ) -> Result<Page<ParameterVersion>> {
        debug!(name, decrypt, "GetParameterHistory");
        let output = self
            .client
            .get_parameter_history()
            .name(name)
            .with_decryption(decrypt)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| remote_error("get parameter history", name, e))?;

        Ok(Page {
            items: output.parameters().iter().map(history_entry).collect(),
            next_token: owned(output.next_token()),
        })
    }

    async fn label_parameter_version(
        &self,
        name: &str,
        version: Option<i64>,
        labels: &[String],
    ) -> Result<Vec<String>> {
        debug!(name, ?version, ?labels, "LabelParameterVersion");
        let output = self
            .client
            .label_parameter_version()
            .name(name)
            .set_parameter_version(version)
            .set_labels(Some(labels.to_vec()))
            .send()
            .await
            .map_err(|e| remote_error("label parameter version", name, e))?;
        Ok(output.invalid_labels().to_vec())
    }

    async fn unlabel_parameter_version(
        &self,
        name: &str,
        version: i64,
        labels: &[String],
    ) -> Result<Vec<String>> {
        debug!(name, version, ?labels, "UnlabelParameterVersion");
        let output = self
            .client
            .unlabel_parameter_version()
            .name(name)
            .parameter_version(version)
            .set_labels(Some(labels.to_vec()))
            .send()
            .await
            .map_err(|e| remote_error("unlabel parameter version", name, e))?;
        Ok(output.invalid_labels().to_vec())
    }
}
