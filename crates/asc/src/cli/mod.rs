//! CLI structure and command definitions

use clap::{Parser, Subcommand};

pub mod elasticache;
pub mod iam;
pub mod rds;
pub mod ssm;

pub use elasticache::*;
pub use iam::*;
pub use rds::*;
pub use ssm::*;

use crate::output::OutputFormat;

/// Browse and manage AWS resources as readable tables
#[derive(Parser, Debug)]
#[command(name = "asc")]
#[command(version, about = "Browse and manage AWS resources as readable tables")]
#[command(long_about = "
Browse and manage AWS resources as readable tables

EXAMPLES:
    # List parameters under a path
    asc ssm ls /app/prod/

    # Copy a whole tree of parameters
    asc ssm cp -r /app/prod/ /app/staging/

    # Databases sorted by engine, then status
    asc rds ls -E -s

    # JSON for scripting
    asc rds ls --output json

For more help on a specific command, run:
    asc <command> --help
")]
pub struct Cli {
    /// AWS profile to use for this command
    #[arg(long, short, global = true, env = "ASC_PROFILE")]
    pub profile: Option<String>,

    /// AWS region to operate in
    #[arg(long, global = true, env = "ASC_REGION")]
    pub region: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "ASC_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Enable verbose logging (repeat for more)
    #[arg(long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Systems Manager Parameter Store
    #[command(subcommand)]
    #[command(after_help = "EXAMPLES:
    asc ssm ls /myapp/
    asc ssm show /myapp/prod/db-password --decrypt
    asc ssm set /myapp/prod/db-host db.internal
    asc ssm cp -r /myapp/prod/ /myapp/staging/
    asc ssm rm -r /myapp/old/
")]
    Ssm(SsmCommands),

    /// RDS instances and clusters
    #[command(subcommand)]
    Rds(RdsCommands),

    /// ElastiCache clusters
    #[command(subcommand)]
    Elasticache(ElastiCacheCommands),

    /// IAM roles
    #[command(subcommand)]
    Iam(IamCommands),

    /// Generate shell completions
    #[command(visible_alias = "comp")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Shell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Friendly Interactive Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell", alias = "power-shell")]
    PowerShell,
    /// Elvish
    Elvish,
}
