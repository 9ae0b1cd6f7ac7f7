use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Parameter Store value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, Default)]
pub enum ParameterType {
    #[default]
    #[value(name = "String")]
    String,
    #[value(name = "StringList")]
    StringList,
    #[value(name = "SecureString")]
    SecureString,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "String",
            ParameterType::StringList => "StringList",
            ParameterType::SecureString => "SecureString",
        }
    }

    /// Values of this type must not be shown unless explicitly revealed
    pub fn is_secret(&self) -> bool {
        matches!(self, ParameterType::SecureString)
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "String" => Ok(ParameterType::String),
            "StringList" => Ok(ParameterType::StringList),
            "SecureString" => Ok(ParameterType::SecureString),
            other => Err(CoreError::Validation(format!(
                "invalid type {other:?}: must be String, StringList, or SecureString"
            ))),
        }
    }
}

/// A parameter as returned by a get/get-by-path call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    pub value: String,
    pub version: i64,
    pub last_modified: Option<DateTime<Utc>>,
    pub arn: Option<String>,
    pub data_type: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParameterType, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            version: 1,
            last_modified: None,
            arn: None,
            data_type: None,
        }
    }
}

/// Parameter metadata from a describe call; carries no value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    pub last_modified: Option<DateTime<Utc>>,
    pub last_modified_user: Option<String>,
    pub version: i64,
    pub tier: Option<String>,
    pub description: Option<String>,
}

/// One entry of a parameter's version history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterVersion {
    pub name: String,
    pub version: i64,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    pub last_modified: Option<DateTime<Utc>>,
    pub last_modified_user: Option<String>,
    pub labels: Vec<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_type_parse() {
        assert_eq!(
            "SecureString".parse::<ParameterType>().unwrap(),
            ParameterType::SecureString
        );
        assert_eq!(
            "StringList".parse::<ParameterType>().unwrap(),
            ParameterType::StringList
        );

        let err = "string".parse::<ParameterType>().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "invalid type \"string\": must be String, StringList, or SecureString"
        );
    }

    #[test]
    fn test_only_secure_string_is_secret() {
        assert!(ParameterType::SecureString.is_secret());
        assert!(!ParameterType::String.is_secret());
        assert!(!ParameterType::StringList.is_secret());
    }
}
