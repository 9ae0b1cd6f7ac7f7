use clap::{ArgMatches, CommandFactory, FromArgMatches};
use clap_complete::{generate, shells};
use tracing::{debug, error, info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use asc_core::Config;

mod aws;
mod cli;
mod commands;
mod connection;
mod error;
mod output;

use cli::{Cli, Commands};
use connection::ConnectionManager;
use error::AscError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.verbose);

    if let Err(e) = run(&cli, &matches).await {
        e.print_diagnostic();
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, matches: &ArgMatches) -> Result<(), AscError> {
    let config = match &cli.config_file {
        Some(config_file) => {
            let path = std::path::PathBuf::from(config_file);
            debug!("Loading config from explicit path: {:?}", path);
            Config::load_from_path(&path)?
        }
        None => {
            debug!("Loading config from default location");
            Config::load()?
        }
    };

    let conn_mgr = ConnectionManager::new(
        config,
        cli.profile.as_deref(),
        cli.region.as_deref(),
        cli.output,
        matches,
    );

    execute_command(cli, &conn_mgr).await
}

fn init_tracing(verbose: u8) {
    // RUST_LOG wins over the verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "asc=warn,asc_core=warn",
            1 => "asc=info,asc_core=info",
            2 => "asc=debug,asc_core=debug",
            _ => "asc=trace,asc_core=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(cli: &Cli, conn_mgr: &ConnectionManager) -> Result<(), AscError> {
    trace!("Executing command: {:?}", cli.command);
    info!("Command: {}", format_command(&cli.command));

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Completions { shell } => {
            debug!("Generating completions for {:?}", shell);
            generate_completions(*shell);
            Ok(())
        }
        Commands::Ssm(cmd) => commands::ssm::handle_ssm_command(cmd, conn_mgr).await,
        Commands::Rds(cmd) => commands::rds::handle_rds_command(cmd, conn_mgr).await,
        Commands::Elasticache(cmd) => {
            commands::elasticache::handle_elasticache_command(cmd, conn_mgr).await
        }
        Commands::Iam(cmd) => commands::iam::handle_iam_command(cmd, conn_mgr).await,
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(e) => error!("Command failed after {:?}: {}", duration, e),
    }

    result
}

/// Generate shell completions
fn generate_completions(shell: cli::Shell) {
    let mut cmd = cli::Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        cli::Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, name, &mut std::io::stdout())
        }
        cli::Shell::Elvish => generate(shells::Elvish, &mut cmd, name, &mut std::io::stdout()),
    }
}

/// Format command for human-readable logging (without parameter values)
fn format_command(command: &Commands) -> String {
    match command {
        Commands::Completions { shell } => format!("completions {:?}", shell),
        Commands::Ssm(cmd) => {
            use cli::SsmCommands::*;
            match cmd {
                Ls { path, .. } => format!("ssm ls {}", path.as_deref().unwrap_or("/")),
                Show { name, .. } => format!("ssm show {}", name),
                Set { name, kind, .. } => format!("ssm set {} ({}) [value redacted]", name, kind),
                Cp {
                    source,
                    destination,
                    ..
                } => format!("ssm cp {} {}", source, destination),
                Mv {
                    source,
                    destination,
                    ..
                } => format!("ssm mv {} {}", source, destination),
                Rm { names, .. } => format!("ssm rm {}", names.join(" ")),
                Label { name, labels } => format!("ssm label {} {}", name, labels.join(" ")),
                Unlabel { name, labels } => format!("ssm unlabel {} {}", name, labels.join(" ")),
                Revert { name, version } => format!("ssm revert {} {}", name, version),
                History { name, .. } => format!("ssm history {}", name),
                Edit { name } => format!("ssm edit {}", name),
                Cat { name } => format!("ssm cat {}", name),
            }
        }
        Commands::Rds(cmd) => format!("rds {:?}", cmd),
        Commands::Elasticache(cmd) => format!("elasticache {:?}", cmd),
        Commands::Iam(cmd) => format!("iam {:?}", cmd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_set_value_never_logged() {
        let cli = Cli::try_parse_from(["asc", "ssm", "set", "/app/db-pass", "hunter2"]).unwrap();
        let line = format_command(&cli.command);
        assert!(!line.contains("hunter2"));
        assert!(line.starts_with("ssm set /app/db-pass"));
    }
}
