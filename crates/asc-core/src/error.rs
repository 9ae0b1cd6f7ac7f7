//! Unified error handling for asc-core
//!
//! Every fallible operation in the library returns [`CoreError`]. The CLI is
//! the single place that turns these into user-facing diagnostics and exit
//! codes.
//!
//! # Example
//!
//! ```rust
//! use asc_core::CoreError;
//!
//! let err = CoreError::NotFound { name: "/app/db-host".to_string() };
//! assert!(err.is_not_found());
//! assert!(!err.is_partial());
//! ```

use thiserror::Error;

use crate::config::ConfigError;
use crate::fields::ResourceKind;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// A field name that is not registered for the record's kind
    #[error("unknown field '{field}' for {kind}")]
    UnknownField { kind: ResourceKind, field: String },

    /// The record kind has no support for the requested capability
    #[error("{kind} records do not support {capability}")]
    UnsupportedKind {
        kind: ResourceKind,
        capability: &'static str,
    },

    /// Extracting one field of one record failed
    #[error("get field value '{field}' for {record}: {source}")]
    FieldValue {
        field: String,
        record: String,
        #[source]
        source: Box<CoreError>,
    },

    /// Input rejected before any remote call was made
    #[error("{0}")]
    Validation(String),

    /// Remote resource does not exist
    #[error("parameter not found: {name}")]
    NotFound { name: String },

    /// Remote call failed; `operation` names what was being attempted
    #[error("{operation}: {message}")]
    Remote { operation: String, message: String },

    /// Another error with the step that produced it
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<CoreError>,
    },

    /// Recursive copy stopped at `source_name`; `copied` items were written first
    #[error("copy {source_name} to {destination}: {source}")]
    CopyFailed {
        source_name: String,
        destination: String,
        copied: usize,
        #[source]
        source: Box<CoreError>,
    },

    /// Recursive move aborted during the copy phase; no source was deleted
    #[error("{}", move_aborted_message(.copied, .failed, .source))]
    MoveAborted {
        copied: usize,
        failed: String,
        #[source]
        source: Box<CoreError>,
    },

    /// Move wrote the destination but could not remove the source
    #[error(
        "copied {source_name} to {destination} but the source is still present: delete source parameter: {source}"
    )]
    SourceNotDeleted {
        source_name: String,
        destination: String,
        #[source]
        source: Box<CoreError>,
    },

    /// Recursive move copied everything but the batch delete of sources failed
    #[error("delete source parameters (copies at destination exist): {source}")]
    SourcesNotDeleted {
        copied: usize,
        #[source]
        source: Box<CoreError>,
    },

    /// A bounded-batch delete failed part-way; earlier chunks were deleted
    #[error("delete parameters: {deleted} deleted before failure: {source}")]
    BatchDeleteAborted {
        deleted: usize,
        #[source]
        source: Box<CoreError>,
    },

    /// Writing rendered output failed
    #[error("render output: {0}")]
    Render(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

fn move_aborted_message(copied: &usize, failed: &str, source: &CoreError) -> String {
    if *copied > 0 {
        format!(
            "copy {failed}: {source} ({copied} parameter(s) already copied; destinations may need cleanup)"
        )
    } else {
        format!("copy {failed}: {source}")
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Wrap a transport/API failure with the operation that was attempted
    pub fn remote(operation: impl Into<String>, message: impl std::fmt::Display) -> Self {
        CoreError::Remote {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Prefix the error with the step that was being attempted
    pub fn context(self, context: impl Into<String>) -> Self {
        CoreError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns true if this is a "not found" error, looking through wrappers
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            CoreError::NotFound { .. } => true,
            CoreError::FieldValue { source, .. }
            | CoreError::CopyFailed { source, .. }
            | CoreError::Context { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Returns true if the input was rejected before any remote call
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            CoreError::Validation(_) => true,
            CoreError::Context { source, .. } => source.is_validation(),
            _ => false,
        }
    }

    /// Returns true if remote state was partially changed before the failure
    #[must_use]
    pub fn is_partial(&self) -> bool {
        match self {
            CoreError::CopyFailed { copied, .. } | CoreError::MoveAborted { copied, .. } => {
                *copied > 0
            }
            CoreError::BatchDeleteAborted { deleted, .. } => *deleted > 0,
            CoreError::SourceNotDeleted { .. } | CoreError::SourcesNotDeleted { .. } => true,
            _ => false,
        }
    }

    /// Number of items successfully written before the failure, where tracked
    #[must_use]
    pub fn completed_count(&self) -> Option<usize> {
        match self {
            CoreError::CopyFailed { copied, .. }
            | CoreError::MoveAborted { copied, .. }
            | CoreError::SourcesNotDeleted { copied, .. } => Some(*copied),
            CoreError::BatchDeleteAborted { deleted, .. } => Some(*deleted),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_looks_through_copy_failure() {
        let err = CoreError::CopyFailed {
            source_name: "/a/b".to_string(),
            destination: "/c/b".to_string(),
            copied: 0,
            source: Box::new(CoreError::NotFound {
                name: "/a/b".to_string(),
            }),
        };
        assert!(err.is_not_found());
        assert!(!err.is_partial());
    }

    #[test]
    fn test_move_aborted_mentions_cleanup_only_after_progress() {
        let cause = || Box::new(CoreError::remote("put parameter", "throttled"));

        let none_copied = CoreError::MoveAborted {
            copied: 0,
            failed: "/a/x to /b/x".to_string(),
            source: cause(),
        };
        assert!(!none_copied.to_string().contains("cleanup"));

        let some_copied = CoreError::MoveAborted {
            copied: 2,
            failed: "/a/x to /b/x".to_string(),
            source: cause(),
        };
        let msg = some_copied.to_string();
        assert!(msg.contains("2 parameter(s) already copied"));
        assert!(msg.contains("destinations may need cleanup"));
        assert!(some_copied.is_partial());
        assert_eq!(some_copied.completed_count(), Some(2));
    }

    #[test]
    fn test_context_keeps_classification() {
        let err = CoreError::NotFound {
            name: "/a".to_string(),
        }
        .context("get source parameter");
        assert_eq!(err.to_string(), "get source parameter: parameter not found: /a");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remote_error_display() {
        let err = CoreError::remote("get parameter", "AccessDenied");
        assert_eq!(err.to_string(), "get parameter: AccessDenied");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_field_value_error_names_field_and_record() {
        let err = CoreError::FieldValue {
            field: "Colour".to_string(),
            record: "db-1".to_string(),
            source: Box::new(CoreError::UnknownField {
                kind: ResourceKind::DbInstance,
                field: "Colour".to_string(),
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("'Colour'"));
        assert!(msg.contains("db-1"));
        assert!(msg.contains("unknown field"));
    }
}
