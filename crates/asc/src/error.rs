//! Error types for asc
//!
//! [`AscError`] is what every command returns; `main` turns it into a
//! cargo-style diagnostic and a non-zero exit.

use asc_core::{ConfigError, CoreError};
use colored::Colorize;
use thiserror::Error;

/// Cargo-style diagnostic formatter for CLI errors.
///
/// Produces structured output like:
/// ```text
/// error: parameter not found: /app/prod/db-host
///
///   tip: check the name and its path:
///       asc ssm ls /app/prod/
/// ```
pub struct CliDiagnostic {
    message: String,
    detail: Option<String>,
    tips: Vec<(String, Vec<String>)>,
}

impl CliDiagnostic {
    /// Start a new error diagnostic with the given message.
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            detail: None,
            tips: Vec::new(),
        }
    }

    /// Add a detail line below the error message.
    pub fn detail(mut self, text: &str) -> Self {
        self.detail = Some(text.to_string());
        self
    }

    /// Add a tip with optional example commands.
    pub fn tip(mut self, description: &str, commands: &[&str]) -> Self {
        self.tips.push((
            description.to_string(),
            commands.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Print the diagnostic to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        if let Some(detail) = &self.detail {
            eprintln!("  {}", detail);
        }

        for (description, commands) in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", description);
            for cmd in commands {
                eprintln!("      {}", cmd);
            }
        }
    }
}

/// Main error type for the asc application
#[derive(Error, Debug)]
pub enum AscError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{message}")]
    Aws { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("File error for '{path}': {message}")]
    FileError { path: String, message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },

    /// A core failure that left some work done; the detail says how much
    #[error("{message}")]
    Partial { message: String, detail: String },
}

/// Result type for asc operations
pub type Result<T> = std::result::Result<T, AscError>;

impl AscError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AscError::InvalidInput {
            message: message.into(),
        }
    }

    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            AscError::Config(_) => vec![
                "Check the configuration file syntax (TOML)".to_string(),
                "Point at another file: asc --config-file <path> ...".to_string(),
            ],
            AscError::Aws { message }
                if message.contains("credentials") || message.contains("Credentials") =>
            {
                vec![
                    "Pick a profile: asc --profile <name> ...".to_string(),
                    "Check your AWS credentials: aws sts get-caller-identity".to_string(),
                ]
            }
            AscError::Aws { message } if message.contains("region") => vec![
                "Pass a region: asc --region <region> ...".to_string(),
                "Or set `region` in the asc configuration file".to_string(),
            ],
            AscError::NotFound { .. } => vec![
                "Check the name spelling and path".to_string(),
                "List what exists: asc ssm ls <path>".to_string(),
            ],
            AscError::InvalidInput { .. } => {
                vec!["Check the command syntax: asc <command> --help".to_string()]
            }
            AscError::FileError { path, .. } => vec![
                format!("Check that file exists: {}", path),
                "Verify file permissions are correct".to_string(),
            ],
            _ => vec![],
        }
    }

    /// Print a cargo-style diagnostic to stderr using colored formatting.
    pub fn print_diagnostic(&self) {
        let mut diag = CliDiagnostic::error(&format!("{}", self));

        if let AscError::Partial { detail, .. } = self {
            diag = diag.detail(detail);
        }

        for suggestion in self.suggestions() {
            diag = diag.tip(&suggestion, &[]);
        }

        diag.print();
    }
}

impl From<CoreError> for AscError {
    fn from(err: CoreError) -> Self {
        if err.is_validation() {
            return AscError::InvalidInput {
                message: err.to_string(),
            };
        }
        if err.is_partial() {
            let detail = match err.completed_count() {
                Some(n) => format!("{n} item(s) completed before the failure"),
                None => "some changes were applied before the failure".to_string(),
            };
            return AscError::Partial {
                message: err.to_string(),
                detail,
            };
        }
        if err.is_not_found() {
            return AscError::NotFound {
                message: err.to_string(),
            };
        }
        match err {
            CoreError::Config(e) => AscError::Config(e.to_string()),
            CoreError::Render(e) => AscError::OutputError {
                message: e.to_string(),
            },
            CoreError::Remote { .. }
            | CoreError::Context { .. }
            | CoreError::CopyFailed { .. }
            | CoreError::MoveAborted { .. }
            | CoreError::BatchDeleteAborted { .. } => AscError::Aws {
                message: err.to_string(),
            },
            other => AscError::OutputError {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for AscError {
    fn from(err: ConfigError) -> Self {
        AscError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AscError {
    fn from(err: serde_json::Error) -> Self {
        AscError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<serde_yaml::Error> for AscError {
    fn from(err: serde_yaml::Error) -> Self {
        AscError::OutputError {
            message: format!("YAML error: {}", err),
        }
    }
}

impl From<std::io::Error> for AscError {
    fn from(err: std::io::Error) -> Self {
        AscError::OutputError {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<anyhow::Error> for AscError {
    fn from(err: anyhow::Error) -> Self {
        AscError::InvalidInput {
            message: format!("{err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_invalid_input() {
        let err: AscError = CoreError::Validation("destination name cannot be empty".into()).into();
        assert!(matches!(err, AscError::InvalidInput { .. }));
        assert_eq!(err.to_string(), "destination name cannot be empty");
    }

    #[test]
    fn test_wrapped_not_found_keeps_message() {
        let err = CoreError::NotFound {
            name: "/app/x".into(),
        }
        .context("get source parameter");
        let err: AscError = err.into();
        assert!(matches!(err, AscError::NotFound { .. }));
        assert_eq!(
            err.to_string(),
            "get source parameter: parameter not found: /app/x"
        );
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn test_partial_failure_carries_count() {
        let err = CoreError::CopyFailed {
            source_name: "/a/3".into(),
            destination: "/b/3".into(),
            copied: 2,
            source: Box::new(CoreError::remote("put parameter", "throttled")),
        };
        match AscError::from(err) {
            AscError::Partial { detail, .. } => assert!(detail.starts_with("2 item(s)")),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
