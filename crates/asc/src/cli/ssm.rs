//! Parameter Store command definitions

use asc_core::render::Layout;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum SsmCommands {
    /// List SSM parameters
    #[command(visible_alias = "list")]
    #[command(after_help = "EXAMPLES:
    asc ssm ls                    # List all parameters
    asc ssm ls /myapp/            # List parameters under path
    asc ssm ls -d -n /myapp/      # Newest first, then by name
")]
    Ls {
        /// Path to list under; everything when omitted
        path: Option<String>,

        /// Output parameters in list format
        #[arg(short, long)]
        list: bool,

        /// Sort by parameter name
        #[arg(short = 'n', long)]
        sort_name: bool,

        /// Sort by last modified date (most recent first)
        #[arg(short = 'd', long)]
        sort_date: bool,

        /// Reverse the sort order
        #[arg(short = 'r', long)]
        reverse_sort: bool,
    },

    /// Show detailed information about an SSM parameter
    #[command(visible_alias = "describe", visible_alias = "get")]
    Show {
        /// Parameter name
        name: String,

        /// Decrypt and show SecureString values
        #[arg(short, long)]
        decrypt: bool,

        /// Print only the parameter value (implies --decrypt)
        #[arg(short = 'v', long)]
        value_only: bool,

        /// Detail layout
        #[arg(long, value_enum, default_value = "horizontal")]
        layout: Layout,
    },

    /// Create or update a parameter
    #[command(after_help = "EXAMPLES:
    asc ssm set /myapp/prod/db-host db.internal
    asc ssm set /myapp/prod/db-pass -t SecureString hunter2
    cat cert.pem | asc ssm set /myapp/prod/cert --stdin
")]
    Set {
        /// Parameter name
        name: String,

        /// Parameter value
        value: Option<String>,

        /// Parameter type: String, StringList, or SecureString
        #[arg(short = 't', long = "type", default_value = "String")]
        kind: String,

        /// Parameter description
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite an existing parameter without confirmation
        #[arg(short, long)]
        overwrite: bool,

        /// Read the value from stdin
        #[arg(long, conflicts_with = "value")]
        stdin: bool,
    },

    /// Copy a parameter, or a path with -r
    #[command(visible_alias = "copy")]
    Cp {
        /// Source parameter (name:version selects a version) or path
        source: String,

        /// Destination parameter or path; a trailing / keeps the source name
        destination: String,

        /// Copy all parameters under the source path
        #[arg(short, long)]
        recursive: bool,

        /// Overwrite existing parameters at destination
        #[arg(short, long)]
        overwrite: bool,
    },

    /// Move a parameter, or a path with -r
    #[command(visible_alias = "move", visible_alias = "rename")]
    Mv {
        /// Source parameter or path
        source: String,

        /// Destination parameter or path
        destination: String,

        /// Move all parameters under the source path
        #[arg(short, long)]
        recursive: bool,
    },

    /// Delete parameters
    #[command(visible_alias = "remove", visible_alias = "delete")]
    Rm {
        /// Parameter names, or paths with -r
        #[arg(required = true)]
        names: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,

        /// Delete all parameters under the given paths
        #[arg(short, long)]
        recursive: bool,
    },

    /// Attach labels to a parameter version (latest when no :version)
    Label {
        /// Parameter name, optionally name:version
        name: String,

        /// Labels to attach
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// Remove labels from whichever versions carry them
    Unlabel {
        /// Parameter name
        name: String,

        /// Labels to remove
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// Make an earlier version (or labelled version) the current value
    Revert {
        /// Parameter name
        name: String,

        /// Version number or label
        version: String,
    },

    /// Show the version history of a parameter
    History {
        /// Parameter name
        name: String,

        /// Decrypt and show SecureString values
        #[arg(short, long)]
        decrypt: bool,

        /// Limit number of versions to show (0 = all)
        #[arg(short = 'n', long, default_value_t = 0)]
        limit: usize,

        /// Output in list format
        #[arg(short, long)]
        list: bool,
    },

    /// Edit a parameter value in your editor
    Edit {
        /// Parameter name
        name: String,
    },

    /// Print a parameter's decrypted value
    #[command(hide = true)]
    Cat {
        /// Parameter name
        name: String,
    },
}
