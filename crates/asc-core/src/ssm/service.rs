use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::{DELETE_BATCH_CAP, ParameterStore, PutParameter, transform_path};
use crate::error::{CoreError, Result};
use crate::model::{Parameter, ParameterMetadata, ParameterVersion};
use crate::progress::{ProgressCallback, ProgressEvent, emit};

/// Outcome of a chunked batch delete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDelete {
    pub deleted: usize,
    /// Names the store rejected, across all chunks
    pub invalid: Vec<String>,
}

/// User-level Parameter Store operations over a [`ParameterStore`]
pub struct ParameterService<S> {
    store: S,
    progress: Option<ProgressCallback>,
}

fn normalized(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Reject an empty destination or one equal to the source, ignoring a trailing `/`
pub fn validate_destination(source: &str, dest: &str) -> Result<()> {
    if dest.is_empty() {
        return Err(CoreError::Validation(
            "destination name cannot be empty".to_string(),
        ));
    }
    if normalized(source) == normalized(dest) {
        return Err(CoreError::Validation(
            "source and destination cannot be the same".to_string(),
        ));
    }
    Ok(())
}

fn reached(limit: Option<usize>, len: usize) -> bool {
    limit.is_some_and(|max| len >= max)
}

impl<S: ParameterStore> ParameterService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            progress: None,
        }
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    fn emit(&self, event: ProgressEvent) {
        emit(self.progress.as_ref(), event);
    }

    pub async fn get(&self, name: &str, decrypt: bool) -> Result<Parameter> {
        self.store.get_parameter(name, decrypt).await
    }

    /// Whether the parameter exists; only a not-found answer counts as absent
    pub async fn exists(&self, name: &str) -> Result<bool> {
        match self.store.get_parameter(name, false).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn put(&self, input: &PutParameter) -> Result<i64> {
        debug!(name = %input.name, kind = %input.kind, overwrite = input.overwrite, "put parameter");
        self.store.put_parameter(input).await
    }

    /// Every parameter under `path`, following continuation tokens
    ///
    /// Stops early once `limit` items have been gathered.
    pub async fn list_by_path(
        &self,
        path: &str,
        recursive: bool,
        decrypt: bool,
        limit: Option<usize>,
    ) -> Result<Vec<Parameter>> {
        let mut items = Vec::new();
        let mut token = None;
        loop {
            let page = self
                .store
                .get_parameters_by_path(path, recursive, decrypt, token)
                .await?;
            items.extend(page.items);
            token = page.next_token;
            if token.is_none() || reached(limit, items.len()) {
                break;
            }
        }
        if let Some(max) = limit {
            items.truncate(max);
        }
        debug!(path, count = items.len(), "listed parameters by path");
        Ok(items)
    }

    /// Metadata of everything under `path`
    pub async fn describe(&self, path: &str, limit: Option<usize>) -> Result<Vec<ParameterMetadata>> {
        let mut items = Vec::new();
        let mut token = None;
        loop {
            let page = self.store.describe_parameters(path, token).await?;
            items.extend(page.items);
            token = page.next_token;
            if token.is_none() || reached(limit, items.len()) {
                break;
            }
        }
        if let Some(max) = limit {
            items.truncate(max);
        }
        Ok(items)
    }

    pub async fn history(
        &self,
        name: &str,
        decrypt: bool,
        limit: Option<usize>,
    ) -> Result<Vec<ParameterVersion>> {
        let mut items = Vec::new();
        let mut token = None;
        loop {
            let page = self
                .store
                .get_parameter_history(name, decrypt, token)
                .await?;
            items.extend(page.items);
            token = page.next_token;
            if token.is_none() || reached(limit, items.len()) {
                break;
            }
        }
        Ok(items)
    }

    /// Copy one parameter, value decrypted so secrets copy faithfully
    pub async fn copy(&self, source: &str, dest: &str, overwrite: bool) -> Result<()> {
        validate_destination(source, dest)?;

        let param = self
            .store
            .get_parameter(source, true)
            .await
            .map_err(|e| e.context("get source parameter"))?;

        let input = PutParameter::new(dest, param.value, param.kind).overwrite(overwrite);
        self.put(&input)
            .await
            .map_err(|e| e.context("put destination parameter"))?;

        info!(source, dest, "copied parameter");
        Ok(())
    }

    async fn enumerate_for_copy(&self, source_path: &str) -> Result<Vec<Parameter>> {
        let params = self
            .list_by_path(source_path, true, true, None)
            .await
            .map_err(|e| e.context("get parameters by path"))?;
        self.emit(ProgressEvent::Enumerated {
            path: source_path.to_string(),
            count: params.len(),
        });
        Ok(params)
    }

    /// Copy everything under `source_path` to the same relative names under
    /// `dest_path`; the first failed write stops the copy
    pub async fn copy_recursive(
        &self,
        source_path: &str,
        dest_path: &str,
        overwrite: bool,
    ) -> Result<usize> {
        validate_destination(source_path, dest_path)?;

        let params = self.enumerate_for_copy(source_path).await?;
        let mut copied = 0;
        for param in params {
            let destination = transform_path(source_path, dest_path, &param.name);
            let input = PutParameter::new(&destination, param.value, param.kind).overwrite(overwrite);
            if let Err(e) = self.put(&input).await {
                return Err(CoreError::CopyFailed {
                    source_name: param.name,
                    destination,
                    copied,
                    source: Box::new(e),
                });
            }
            self.emit(ProgressEvent::Copied {
                source: param.name,
                destination,
            });
            copied += 1;
        }
        Ok(copied)
    }

    /// Copy with overwrite, then delete the source
    pub async fn move_parameter(&self, source: &str, dest: &str) -> Result<()> {
        self.copy(source, dest, true)
            .await
            .map_err(|e| e.context("copy parameter"))?;

        if let Err(e) = self.store.delete_parameter(source).await {
            warn!(source, dest, error = %e, "copy succeeded but source delete failed");
            return Err(CoreError::SourceNotDeleted {
                source_name: source.to_string(),
                destination: dest.to_string(),
                source: Box::new(e),
            });
        }
        Ok(())
    }

    /// Move everything under `source_path`
    ///
    /// Every destination is written before any source is deleted. A failed
    /// copy leaves all sources in place.
    pub async fn move_recursive(&self, source_path: &str, dest_path: &str) -> Result<usize> {
        validate_destination(source_path, dest_path)?;

        let params = self.enumerate_for_copy(source_path).await?;
        if params.is_empty() {
            return Ok(0);
        }

        let mut sources = Vec::with_capacity(params.len());
        for (copied, param) in params.into_iter().enumerate() {
            let destination = transform_path(source_path, dest_path, &param.name);
            let input = PutParameter::new(&destination, param.value, param.kind).overwrite(true);
            if let Err(e) = self.put(&input).await {
                return Err(CoreError::MoveAborted {
                    copied,
                    failed: format!("{} to {}", param.name, destination),
                    source: Box::new(e),
                });
            }
            self.emit(ProgressEvent::Copied {
                source: param.name.clone(),
                destination,
            });
            sources.push(param.name);
        }

        let moved = sources.len();
        let outcome = self
            .delete_batch(&sources)
            .await
            .map_err(|e| CoreError::SourcesNotDeleted {
                copied: moved,
                source: Box::new(e),
            })?;
        if !outcome.invalid.is_empty() {
            warn!(invalid = ?outcome.invalid, "some source parameters were not deleted");
        }
        Ok(moved)
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        self.store
            .delete_parameter(name)
            .await
            .map_err(|e| e.context("delete parameter"))
    }

    /// Delete `names` in chunks of [`DELETE_BATCH_CAP`]
    ///
    /// A failing chunk stops the remaining ones; chunks already deleted stay
    /// deleted.
    pub async fn delete_batch(&self, names: &[String]) -> Result<BatchDelete> {
        let mut outcome = BatchDelete::default();
        for chunk in names.chunks(DELETE_BATCH_CAP) {
            let invalid = self.store.delete_parameters(chunk).await.map_err(|e| {
                CoreError::BatchDeleteAborted {
                    deleted: outcome.deleted,
                    source: Box::new(e),
                }
            })?;
            let deleted = chunk.len().saturating_sub(invalid.len());
            outcome.deleted += deleted;
            outcome.invalid.extend(invalid);
            self.emit(ProgressEvent::Deleted { count: deleted });
        }
        debug!(deleted = outcome.deleted, invalid = outcome.invalid.len(), "batch delete finished");
        Ok(outcome)
    }

    /// Names of every parameter under each path, values not fetched
    pub async fn names_under(&self, paths: &[String]) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for path in paths {
            let params = self
                .list_by_path(path, true, false, None)
                .await
                .map_err(|e| e.context(format!("list parameters under {path}")))?;
            self.emit(ProgressEvent::Enumerated {
                path: path.clone(),
                count: params.len(),
            });
            names.extend(params.into_iter().map(|p| p.name));
        }
        Ok(names)
    }

    pub async fn delete_recursive(&self, paths: &[String]) -> Result<BatchDelete> {
        let names = self.names_under(paths).await?;
        self.delete_batch(&names).await
    }

    /// Attach labels; returns the labels the store rejected
    pub async fn label(&self, name: &str, version: Option<i64>, labels: &[String]) -> Result<Vec<String>> {
        self.store
            .label_parameter_version(name, version, labels)
            .await
            .map_err(|e| e.context("label parameter version"))
    }

    /// Detach labels from whichever versions carry them
    ///
    /// Returns labels that no version carries plus any the store rejected.
    pub async fn unlabel(&self, name: &str, labels: &[String]) -> Result<Vec<String>> {
        let history = self
            .history(name, false, None)
            .await
            .map_err(|e| e.context("get parameter history"))?;

        let mut by_version: BTreeMap<i64, Vec<String>> = BTreeMap::new();
        let mut invalid = Vec::new();
        for label in labels {
            match history.iter().find(|v| v.labels.contains(label)) {
                Some(v) => by_version.entry(v.version).or_default().push(label.clone()),
                None => invalid.push(label.clone()),
            }
        }

        for (version, group) in by_version {
            let rejected = self
                .store
                .unlabel_parameter_version(name, version, &group)
                .await
                .map_err(|e| e.context("unlabel parameter version"))?;
            invalid.extend(rejected);
        }
        Ok(invalid)
    }

    /// Write the value of `name:selector` back as the latest version
    pub async fn revert(&self, name: &str, selector: &str) -> Result<()> {
        if selector.is_empty() {
            return Err(CoreError::Validation(
                "version or label cannot be empty".to_string(),
            ));
        }
        self.copy(&format!("{name}:{selector}"), name, true)
            .await
            .map_err(|e| e.context("revert parameter"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_validation() {
        assert!(validate_destination("/a", "").unwrap_err().is_validation());
        assert!(validate_destination("/a/", "/a").unwrap_err().is_validation());
        assert!(validate_destination("/a", "/b").is_ok());
    }

    #[test]
    fn test_limit_reached() {
        assert!(!reached(None, 1000));
        assert!(reached(Some(5), 5));
        assert!(!reached(Some(5), 4));
    }
}
