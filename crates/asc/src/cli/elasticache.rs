use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ElastiCacheCommands {
    /// List cache clusters
    #[command(visible_alias = "list")]
    Ls {
        /// Output in list format
        #[arg(short, long)]
        list: bool,

        /// Show the endpoint column
        #[arg(short, long)]
        endpoint: bool,

        /// Sort by cluster name
        #[arg(short = 'n', long)]
        sort_name: bool,

        /// Sort by node type
        #[arg(short = 'T', long)]
        sort_type: bool,

        /// Sort by status
        #[arg(short = 's', long)]
        sort_status: bool,

        /// Sort by engine version
        #[arg(short = 'E', long)]
        sort_engine: bool,

        /// Reverse the sort order
        #[arg(short = 'r', long)]
        reverse_sort: bool,

        /// Add a column with the value of this tag (repeatable)
        #[arg(short = 't', long = "tag", value_name = "KEY")]
        tags: Vec<String>,
    },
}
