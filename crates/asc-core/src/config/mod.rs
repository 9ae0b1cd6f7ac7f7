//! Configuration for the asc CLI
//!
// Allow nested config module - this is intentional for the config subsystem
#![allow(clippy::module_inception)]
//!
//! A single TOML file holds the defaults that would otherwise have to be
//! passed on every invocation: the AWS profile and region, and how tables are
//! drawn. Values support `${VAR}` and `${VAR:-default}` expansion.

pub mod config;
pub mod error;

pub use config::{Config, TableConfig};
pub use error::{ConfigError, Result};
