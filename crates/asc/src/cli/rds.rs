//! RDS command definitions

use asc_core::render::Layout;
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum RdsCommands {
    /// List database instances
    #[command(visible_alias = "list")]
    #[command(after_help = "EXAMPLES:
    asc rds ls                    # Instances grouped by cluster
    asc rds ls -E -s              # By engine, then status
    asc rds ls -e -t team         # Show endpoints and the 'team' tag
")]
    Ls {
        /// Output in list format
        #[arg(short, long)]
        list: bool,

        /// Show the endpoint column
        #[arg(short, long)]
        endpoint: bool,

        /// Show the engine version column
        #[arg(short = 'v', long)]
        engine_version: bool,

        /// Show the maintenance window column
        #[arg(short = 'P', long)]
        maintenance_window: bool,

        /// Sort by identifier
        #[arg(short = 'n', long)]
        sort_name: bool,

        /// Sort by cluster identifier
        #[arg(short = 'c', long)]
        sort_cluster: bool,

        /// Sort by instance class
        #[arg(short = 'T', long)]
        sort_type: bool,

        /// Sort by engine
        #[arg(short = 'E', long)]
        sort_engine: bool,

        /// Sort by status
        #[arg(short = 's', long)]
        sort_status: bool,

        /// Sort by role
        #[arg(short = 'R', long)]
        sort_role: bool,

        /// Reverse the sort order
        #[arg(short = 'r', long)]
        reverse_sort: bool,

        /// Add a column with the value of this tag (repeatable)
        #[arg(short = 't', long = "tag", value_name = "KEY")]
        tags: Vec<String>,
    },

    /// Show detailed information about an instance or cluster
    #[command(visible_alias = "describe")]
    Show(RdsShowArgs),

    /// Modify a database instance
    #[command(after_help = "EXAMPLES:
    asc rds modify db-1 -T db.r6g.large
    asc rds modify db-1 -m sun:03:00-sun:04:00 --apply-immediately
")]
    Modify {
        /// Instance identifier
        instance: String,

        /// Apply the change now instead of in the next maintenance window
        #[arg(long)]
        apply_immediately: bool,

        /// New instance class
        #[arg(short = 'T', long = "type", value_name = "CLASS")]
        class: Option<String>,

        /// New preferred maintenance window (ddd:hh24:mi-ddd:hh24:mi)
        #[arg(short, long)]
        maintenance_window: Option<String>,
    },

    /// Cancel modifications waiting for the maintenance window
    #[command(visible_alias = "cancel-pending")]
    CancelPendingModifications {
        /// Instance identifier
        instance: String,
    },
}

#[derive(Args, Debug)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct RdsShowArgs {
    #[command(subcommand)]
    pub target: Option<RdsShowTarget>,

    /// Instance identifier
    #[arg(required = true)]
    pub instance: Option<String>,

    /// Detail layout
    #[arg(long, value_enum, default_value = "grid")]
    pub layout: Layout,
}

#[derive(Subcommand, Debug)]
pub enum RdsShowTarget {
    /// Show detailed information about a cluster
    Cluster {
        /// Cluster identifier
        identifier: String,

        /// Detail layout
        #[arg(long, value_enum, default_value = "grid")]
        layout: Layout,
    },
}
