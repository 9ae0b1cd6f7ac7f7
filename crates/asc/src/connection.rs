//! Per-invocation settings and AWS client construction

use aws_config::{BehaviorVersion, Region, SdkConfig};
use clap::ArgMatches;
use clap::parser::ValueSource;
use tracing::{debug, info};

use asc_core::render::{Layout, RenderOptions, TableStyle};
use asc_core::Config;

use crate::aws::elasticache::ElastiCacheService;
use crate::aws::iam::IamService;
use crate::aws::rds::RdsService;
use crate::aws::ssm::SsmStore;
use crate::output::{OutputFormat, fit_to_terminal};

/// Everything a command needs besides its own arguments
pub struct ConnectionManager {
    pub config: Config,
    pub profile: Option<String>,
    pub region: Option<String>,
    pub output: OutputFormat,
    /// Matches of the subcommand that is running
    matches: ArgMatches,
}

/// The innermost subcommand's matches
pub fn leaf_matches(matches: &ArgMatches) -> &ArgMatches {
    let mut current = matches;
    while let Some((_, sub)) = current.subcommand() {
        current = sub;
    }
    current
}

/// Field names for the sort flags given on the command line, in the order
/// they were typed
///
/// `flags` pairs an argument id with the field it sorts by.
pub fn activated_sort_keys(matches: &ArgMatches, flags: &[(&str, &str)]) -> Vec<String> {
    let mut active: Vec<(usize, &str)> = flags
        .iter()
        .filter(|(id, _)| matches.value_source(id) == Some(ValueSource::CommandLine))
        .filter_map(|(id, field)| matches.index_of(id).map(|idx| (idx, *field)))
        .collect();
    active.sort_by_key(|(idx, _)| *idx);
    active.into_iter().map(|(_, field)| field.to_string()).collect()
}

impl ConnectionManager {
    pub fn new(
        config: Config,
        profile: Option<&str>,
        region: Option<&str>,
        output: OutputFormat,
        matches: &ArgMatches,
    ) -> Self {
        let profile = config.resolve_profile(profile);
        let region = config.resolve_region(region);
        debug!(?profile, ?region, "resolved connection settings");
        Self {
            config,
            profile,
            region,
            output,
            matches: leaf_matches(matches).clone(),
        }
    }

    pub fn sort_keys(&self, flags: &[(&str, &str)]) -> Vec<String> {
        activated_sort_keys(&self.matches, flags)
    }

    /// Title, configured defaults and terminal cap for a table
    ///
    /// `style` is the command's own choice; `None` defers to the
    /// configuration file.
    pub fn render_options(&self, title: impl Into<String>, style: Option<TableStyle>) -> RenderOptions {
        let table = &self.config.table;
        let opts = RenderOptions::titled(title)
            .style(style.or(table.style).unwrap_or_default())
            .max_column_width(table.max_column_width)
            .overflow(table.overflow.unwrap_or_default());
        fit_to_terminal(opts)
    }

    /// Options for a detail view; `table.columns` overrides the command's
    /// own column count
    pub fn detail_options(
        &self,
        title: impl Into<String>,
        layout: Layout,
        columns: usize,
    ) -> RenderOptions {
        self.render_options(title, None)
            .layout(layout)
            .columns(self.config.table.columns.unwrap_or(columns))
    }

    /// Shared SDK configuration: explicit profile/region first, then the
    /// default provider chain
    pub async fn sdk_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        info!(profile = ?self.profile, region = ?self.region, "loading AWS configuration");
        loader.load().await
    }

    pub async fn ssm(&self) -> SsmStore {
        SsmStore::new(aws_sdk_ssm::Client::new(&self.sdk_config().await))
    }

    pub async fn rds(&self) -> RdsService {
        RdsService::new(aws_sdk_rds::Client::new(&self.sdk_config().await))
    }

    pub async fn elasticache(&self) -> ElastiCacheService {
        ElastiCacheService::new(aws_sdk_elasticache::Client::new(&self.sdk_config().await))
    }

    pub async fn iam(&self) -> IamService {
        IamService::new(aws_sdk_iam::Client::new(&self.sdk_config().await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asc_core::render::Overflow;
    use clap::{Arg, ArgAction, Command};

    fn ls() -> Command {
        Command::new("asc").subcommand(
            Command::new("ls")
                .arg(Arg::new("sort_name").short('n').action(ArgAction::SetTrue))
                .arg(Arg::new("sort_date").short('d').action(ArgAction::SetTrue))
                .arg(Arg::new("reverse").short('r').action(ArgAction::SetTrue)),
        )
    }

    const FLAGS: &[(&str, &str)] = &[("sort_name", "Name"), ("sort_date", "Last Modified Date")];

    #[test]
    fn test_sort_keys_follow_command_line_order() {
        let matches = ls().get_matches_from(["asc", "ls", "-d", "-r", "-n"]);
        let keys = activated_sort_keys(leaf_matches(&matches), FLAGS);
        assert_eq!(keys, vec!["Last Modified Date", "Name"]);

        let matches = ls().get_matches_from(["asc", "ls", "-n", "-d"]);
        let keys = activated_sort_keys(leaf_matches(&matches), FLAGS);
        assert_eq!(keys, vec!["Name", "Last Modified Date"]);
    }

    #[test]
    fn test_no_sort_flags() {
        let matches = ls().get_matches_from(["asc", "ls", "-r"]);
        assert!(activated_sort_keys(leaf_matches(&matches), FLAGS).is_empty());
    }

    #[test]
    fn test_render_options_use_config_defaults() {
        let mut config = Config::default();
        config.table.style = Some(TableStyle::Plain);
        config.table.max_column_width = Some(40);
        let matches = ls().get_matches_from(["asc", "ls"]);
        let conn = ConnectionManager::new(config, None, None, OutputFormat::Table, &matches);

        let opts = conn.render_options("Parameters", None);
        assert_eq!(opts.style, TableStyle::Plain);
        assert!(opts.max_column_width.is_some_and(|w| w <= 40));

        let opts = conn.render_options("Databases", Some(TableStyle::Separated));
        assert_eq!(opts.style, TableStyle::Separated);
        assert_eq!(opts.overflow, Overflow::Wrap);
    }

    #[test]
    fn test_configured_columns_and_overflow_win_over_command_defaults() {
        let matches = ls().get_matches_from(["asc", "ls"]);
        let conn = ConnectionManager::new(
            Config::default(),
            None,
            None,
            OutputFormat::Table,
            &matches,
        );
        let opts = conn.detail_options("Instance summary for db-1", Layout::Grid, 3);
        assert_eq!(opts.columns, 3);
        assert_eq!(opts.layout, Layout::Grid);

        let mut config = Config::default();
        config.table.columns = Some(5);
        config.table.overflow = Some(Overflow::Truncate);
        let conn = ConnectionManager::new(config, None, None, OutputFormat::Table, &matches);
        let opts = conn.detail_options("Instance summary for db-1", Layout::Grid, 3);
        assert_eq!(opts.columns, 5);
        assert_eq!(opts.overflow, Overflow::Truncate);
        assert_eq!(
            conn.render_options("Parameters", None).overflow,
            Overflow::Truncate
        );
    }
}
