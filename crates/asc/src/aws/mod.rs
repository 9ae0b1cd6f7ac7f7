//! AWS SDK adapters
//!
//! Each submodule talks to one service and converts SDK shapes into the
//! owned records of [`asc_core::model`]. Nothing outside this module touches
//! an SDK type.

pub mod elasticache;
pub mod iam;
pub mod rds;
pub mod ssm;

// The smithy error types are shared by every service crate
use aws_sdk_ssm::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ssm::primitives::DateTime as SdkDateTime;
use chrono::{DateTime, Utc};

use crate::error::AscError;

/// `code: message` when the service answered, the full error chain otherwise
pub(crate) fn describe<E>(err: &SdkError<E>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        _ => DisplayErrorContext(err).to_string(),
    }
}

/// Whether the service reported that the addressed resource does not exist
pub(crate) fn is_not_found_code(code: Option<&str>) -> bool {
    code.is_some_and(|c| {
        c.ends_with("NotFound") || c.ends_with("NotFoundFault") || c == "NoSuchEntity"
    })
}

/// Convert a failed call on a non-parameter service
pub(crate) fn service_error<E>(operation: &str, err: SdkError<E>) -> AscError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let message = format!("{operation}: {}", describe(&err));
    if is_not_found_code(err.code()) {
        AscError::NotFound { message }
    } else {
        AscError::Aws { message }
    }
}

pub(crate) fn timestamp(value: Option<&SdkDateTime>) -> Option<DateTime<Utc>> {
    value.and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()))
}

pub(crate) fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_codes() {
        assert!(is_not_found_code(Some("ParameterNotFound")));
        assert!(is_not_found_code(Some("DBInstanceNotFound")));
        assert!(is_not_found_code(Some("DBClusterNotFoundFault")));
        assert!(is_not_found_code(Some("NoSuchEntity")));
        assert!(!is_not_found_code(Some("ThrottlingException")));
        assert!(!is_not_found_code(None));
    }

    #[test]
    fn test_timestamp_conversion() {
        let t = SdkDateTime::from_secs(1_700_000_000);
        assert_eq!(
            timestamp(Some(&t)).map(|d| d.timestamp()),
            Some(1_700_000_000)
        );
        assert!(timestamp(None).is_none());
    }
}
