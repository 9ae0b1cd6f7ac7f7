//! # asc-core
//!
//! The parts of `asc` that do not talk to AWS directly:
//!
//! - **Records** ([`model`]) - owned snapshots of parameters, database
//!   instances and clusters, cache clusters and IAM roles
//! - **Field registries** ([`fields`]) - an ordered `(name, extractor)` list
//!   per record kind
//! - **Table models** ([`table`]) - projection, sorting, merging and
//!   sectioning of records
//! - **Rendering** ([`render`]) - drawing table models with `tabled`
//! - **Parameter operations** ([`ssm`]) - pagination, recursive copy, move and
//!   delete over any [`ssm::ParameterStore`]
//! - **Configuration** ([`config`]) - the TOML defaults file
//!
//! ```text
//! records ─► Projector ─► ListTable / DetailTable ─► render ─► stdout
//! ```

pub mod config;
pub mod error;
pub mod fields;
pub mod format;
pub mod model;
pub mod progress;
pub mod render;
pub mod ssm;
pub mod table;

pub use config::{Config, ConfigError};
pub use error::{CoreError, Result};
pub use fields::{FieldSource, ResourceKind};
pub use progress::{ProgressCallback, ProgressEvent};
pub use render::{Layout, Overflow, RenderOptions, TableStyle};
