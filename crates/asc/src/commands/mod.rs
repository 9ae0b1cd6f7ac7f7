//! Command implementations, one module per service

pub mod elasticache;
pub mod iam;
pub mod rds;
pub mod ssm;
pub mod utils;
