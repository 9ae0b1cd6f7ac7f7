use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum IamCommands {
    /// IAM roles
    #[command(subcommand)]
    Role(RoleCommands),
}

#[derive(Subcommand, Debug)]
pub enum RoleCommands {
    /// List roles
    #[command(visible_alias = "list")]
    Ls {
        /// Output in list format
        #[arg(short, long)]
        list: bool,

        /// Sort by role name
        #[arg(short = 'n', long)]
        sort_name: bool,

        /// Sort by ARN
        #[arg(short = 'a', long)]
        sort_arn: bool,

        /// Sort by path
        #[arg(short = 'P', long)]
        sort_path: bool,

        /// Reverse the sort order
        #[arg(short = 'r', long)]
        reverse: bool,

        /// Maximum number of roles to fetch
        #[arg(long, default_value_t = 100)]
        max_items: i32,

        /// Only roles whose path starts with this prefix
        #[arg(long)]
        path_prefix: Option<String>,
    },

    /// Show a role with its policies
    #[command(visible_alias = "describe")]
    Show {
        /// Role name
        name: String,
    },
}
