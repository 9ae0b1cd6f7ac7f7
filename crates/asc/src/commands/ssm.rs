//! Parameter Store command implementations

use indicatif::ProgressBar;
use tracing::{debug, info};

use asc_core::model::{ParameterMetadata, ParameterType};
use asc_core::ssm::{
    ParameterService, PutParameter, is_path, param_basename, parse_param_version,
    validate_destination,
};
use asc_core::table::{DetailTable, Field, ListTable, Projector, SortSpec};
use asc_core::TableStyle;

use super::utils::{
    confirm_action, edit_in_editor, progress_spinner, read_stdin_value, spinner_callback,
    trim_trailing_newline,
};
use crate::aws::ssm::SsmStore;
use crate::cli::SsmCommands;
use crate::connection::ConnectionManager;
use crate::error::{AscError, Result as CliResult};
use crate::output::{print_detail, print_list, print_output};

const PARAMETER_DETAILS: &str = "Parameter Details";
const VERSION_DETAILS: &str = "Version Details";

const LS_SORT_FLAGS: &[(&str, &str)] = &[("sort_name", "Name"), ("sort_date", "Last Modified Date")];

fn ls_fields() -> Vec<Field> {
    vec![
        Field::new("Name").category(PARAMETER_DETAILS).default_sort(),
        Field::new("Type").category(PARAMETER_DETAILS),
        Field::new("Last Modified Date").category(PARAMETER_DETAILS).descending(),
        Field::new("Last Modified User").category(PARAMETER_DETAILS).hidden(),
        Field::new("Version").category(PARAMETER_DETAILS),
        Field::new("Tier").category(PARAMETER_DETAILS).hidden(),
        Field::new("Description").category(PARAMETER_DETAILS).hidden(),
    ]
}

fn show_fields() -> Vec<Field> {
    asc_core::table::fields_in(
        PARAMETER_DETAILS,
        &["Name", "Type", "Value", "Version", "Last Modified Date", "ARN", "Data Type"],
    )
}

fn history_fields() -> Vec<Field> {
    vec![
        Field::new("Version").category(VERSION_DETAILS).default_sort().descending(),
        Field::new("Value").category(VERSION_DETAILS),
        Field::new("Type").category(VERSION_DETAILS),
        Field::new("Last Modified Date").category(VERSION_DETAILS),
        Field::new("Last Modified User").category(VERSION_DETAILS).hidden(),
        Field::new("Labels").category(VERSION_DETAILS),
        Field::new("Description").category(VERSION_DETAILS).hidden(),
    ]
}

async fn service(conn: &ConnectionManager, spinner: Option<&ProgressBar>) -> ParameterService<SsmStore> {
    let svc = ParameterService::new(conn.ssm().await);
    match spinner {
        Some(pb) => svc.with_progress(spinner_callback(pb)),
        None => svc,
    }
}

fn finish(spinner: Option<ProgressBar>) {
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
}

/// Destination for a single copy: a trailing `/` keeps the source's name
pub fn copy_destination(source: &str, destination: &str) -> String {
    if is_path(destination) {
        format!("{destination}{}", param_basename(source))
    } else {
        destination.to_string()
    }
}

fn bracketed(items: &[String]) -> String {
    format!("[{}]", items.join(" "))
}

pub async fn handle_ssm_command(cmd: &SsmCommands, conn: &ConnectionManager) -> CliResult<()> {
    match cmd {
        SsmCommands::Ls {
            path,
            list,
            reverse_sort,
            ..
        } => list_parameters(conn, path.as_deref(), *list, *reverse_sort).await,
        SsmCommands::Show {
            name,
            decrypt,
            value_only,
            layout,
        } => {
            let svc = service(conn, None).await;
            if *value_only {
                let param = svc.get(name, true).await?;
                println!("{}", param.value);
                return Ok(());
            }
            let param = svc.get(name, *decrypt).await?;
            if !conn.output.is_table() {
                return print_output(&param, conn.output);
            }
            let table = DetailTable::build(&param, &show_fields(), &Projector::new(*decrypt))?;
            let opts = conn
                .detail_options(format!("Parameter: {}", param.name), *layout, 2)
                .max_column_width(Some(100));
            print_detail(&table, &opts)
        }
        SsmCommands::Set {
            name,
            value,
            kind,
            description,
            overwrite,
            stdin,
        } => {
            let kind: ParameterType = kind.parse()?;
            let value = if *stdin {
                read_stdin_value()?
            } else {
                value.clone().ok_or_else(|| {
                    AscError::invalid("value required: provide as argument or use --stdin")
                })?
            };
            set_parameter(conn, name, value, kind, description.clone(), *overwrite).await
        }
        SsmCommands::Cp {
            source,
            destination,
            recursive,
            overwrite,
        } => copy_parameters(conn, source, destination, *recursive, *overwrite).await,
        SsmCommands::Mv {
            source,
            destination,
            recursive,
        } => move_parameters(conn, source, destination, *recursive).await,
        SsmCommands::Rm {
            names,
            force,
            recursive,
        } => remove_parameters(conn, names, *force, *recursive).await,
        SsmCommands::Label { name, labels } => {
            let (name, version) = parse_param_version(name)?;
            let svc = service(conn, None).await;
            let invalid = svc.label(&name, version, labels).await?;
            if !invalid.is_empty() {
                println!("Warning: invalid labels: {}", bracketed(&invalid));
            }
            let added = labels.len().saturating_sub(invalid.len());
            if added > 0 {
                match version {
                    Some(v) => println!("Added {added} label(s) to {name} version {v}"),
                    None => println!("Added {added} label(s) to {name} (latest version)"),
                }
            }
            Ok(())
        }
        SsmCommands::Unlabel { name, labels } => {
            let svc = service(conn, None).await;
            let missing = svc.unlabel(name, labels).await?;
            if !missing.is_empty() {
                println!("Warning: labels not found: {}", bracketed(&missing));
            }
            let removed = labels.len().saturating_sub(missing.len());
            if removed > 0 {
                println!("Removed {removed} label(s) from {name}");
            }
            Ok(())
        }
        SsmCommands::Revert { name, version } => {
            if version.trim().is_empty() {
                return Err(AscError::invalid("version or label cannot be empty"));
            }
            let svc = service(conn, None).await;
            svc.revert(name, version).await?;
            println!("Reverted {name} to version {version}");
            Ok(())
        }
        SsmCommands::History {
            name,
            decrypt,
            limit,
            list,
        } => show_history(conn, name, *decrypt, *limit, *list).await,
        SsmCommands::Edit { name } => edit_parameter(conn, name).await,
        SsmCommands::Cat { name } => {
            let svc = service(conn, None).await;
            let param = svc.get(name, true).await?;
            println!("{}", param.value);
            Ok(())
        }
    }
}

async fn list_parameters(
    conn: &ConnectionManager,
    path: Option<&str>,
    list: bool,
    reverse: bool,
) -> CliResult<()> {
    let svc = service(conn, None).await;
    let records: Vec<ParameterMetadata> = svc.describe(path.unwrap_or(""), None).await?;
    debug!(count = records.len(), ?path, "described parameters");

    if !conn.output.is_table() {
        return print_output(&records, conn.output);
    }
    if records.is_empty() {
        match path {
            Some(p) if !p.is_empty() => println!("No parameters found under path: {p}"),
            _ => println!("No parameters found."),
        }
        return Ok(());
    }

    let sort = SortSpec::new(conn.sort_keys(LS_SORT_FLAGS), reverse);
    let table = ListTable::build(&records, &ls_fields(), &sort, &Projector::default())?;
    let style = list.then_some(TableStyle::Plain);
    print_list(&table, &conn.render_options("Parameters", style))
}

async fn set_parameter(
    conn: &ConnectionManager,
    name: &str,
    value: String,
    kind: ParameterType,
    description: Option<String>,
    overwrite: bool,
) -> CliResult<()> {
    let svc = service(conn, None).await;

    let existing = match svc.get(name, false).await {
        Ok(param) => Some(param),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e.into()),
    };
    if let Some(param) = &existing
        && !overwrite
    {
        println!("Parameter {name} already exists (type: {}).", param.kind);
        if !confirm_action("Overwrite?")? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let input = PutParameter::new(name, value, kind)
        .description(description)
        .overwrite(overwrite || existing.is_some());
    let version = svc.put(&input).await?;
    info!(name, version, "parameter written");

    if existing.is_some() {
        println!("Updated: {name}");
    } else {
        println!("Created: {name}");
    }
    Ok(())
}

async fn copy_parameters(
    conn: &ConnectionManager,
    source: &str,
    destination: &str,
    recursive: bool,
    overwrite: bool,
) -> CliResult<()> {
    if is_path(source) && !recursive {
        eprintln!("asc: -r not specified; omitting path '{source}'");
        return Ok(());
    }

    if recursive {
        validate_destination(source, destination)?;
        let spinner = progress_spinner(&format!("Copying {source}"));
        let svc = service(conn, spinner.as_ref()).await;
        let result = svc.copy_recursive(source, destination, overwrite).await;
        finish(spinner);
        match result? {
            0 => println!("No parameters found under path: {source}"),
            n => println!("Copied {n} parameter(s) from {source} to {destination}"),
        }
        return Ok(());
    }

    let destination = copy_destination(source, destination);
    validate_destination(source, &destination)?;
    let svc = service(conn, None).await;

    let mut overwrite = overwrite;
    match svc.get(&destination, false).await {
        Ok(existing) => {
            if !overwrite {
                println!(
                    "Parameter {destination} already exists (type: {}).",
                    existing.kind
                );
                if !confirm_action("Overwrite?")? {
                    println!("Aborted.");
                    return Ok(());
                }
            }
            overwrite = true;
        }
        Err(e) if e.is_not_found() => {}
        Err(e) => return Err(e.into()),
    }

    svc.copy(source, &destination, overwrite).await?;
    println!("Copied {source} to {destination}");
    Ok(())
}

async fn move_parameters(
    conn: &ConnectionManager,
    source: &str,
    destination: &str,
    recursive: bool,
) -> CliResult<()> {
    validate_destination(source, destination)?;

    if recursive {
        let spinner = progress_spinner(&format!("Moving {source}"));
        let svc = service(conn, spinner.as_ref()).await;
        let result = svc.move_recursive(source, destination).await;
        finish(spinner);
        match result? {
            0 => println!("No parameters found under path: {source}"),
            n => println!("Moved {n} parameter(s) from {source} to {destination}"),
        }
        return Ok(());
    }

    let svc = service(conn, None).await;
    svc.move_parameter(source, destination).await?;
    println!("Moved {source} to {destination}");
    Ok(())
}

async fn remove_parameters(
    conn: &ConnectionManager,
    targets: &[String],
    force: bool,
    recursive: bool,
) -> CliResult<()> {
    let names = if recursive {
        let spinner = progress_spinner("Finding parameters");
        let svc = service(conn, spinner.as_ref()).await;
        let found = svc.names_under(targets).await;
        finish(spinner);
        found?
    } else {
        targets.to_vec()
    };

    if names.is_empty() {
        println!("No parameters to delete.");
        return Ok(());
    }

    if !force {
        println!("The following parameters will be deleted:");
        for name in &names {
            println!("  - {name}");
        }
        println!();
        if !confirm_action(&format!("Delete {} parameter(s)?", names.len()))? {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let [name] = names.as_slice() {
        let svc = service(conn, None).await;
        svc.delete(name).await?;
        println!("Deleted: {name}");
        return Ok(());
    }

    let spinner = progress_spinner("Deleting parameters");
    let svc = service(conn, spinner.as_ref()).await;
    let result = svc.delete_batch(&names).await;
    finish(spinner);
    let outcome = result?;
    println!("Deleted {} parameter(s).", outcome.deleted);
    if !outcome.invalid.is_empty() {
        println!("Failed to delete:");
        for name in &outcome.invalid {
            println!("  - {name}");
        }
    }
    Ok(())
}

async fn show_history(
    conn: &ConnectionManager,
    name: &str,
    decrypt: bool,
    limit: usize,
    list: bool,
) -> CliResult<()> {
    let svc = service(conn, None).await;
    let mut versions = svc.history(name, decrypt, None).await?;
    // the service returns oldest first; a limit keeps the newest
    if limit > 0 && versions.len() > limit {
        versions.drain(..versions.len() - limit);
    }

    if !conn.output.is_table() {
        return print_output(&versions, conn.output);
    }
    if versions.is_empty() {
        println!("No history found for parameter: {name}");
        return Ok(());
    }

    let table = ListTable::build(
        &versions,
        &history_fields(),
        &SortSpec::default(),
        &Projector::new(decrypt),
    )?;
    let style = list.then_some(TableStyle::Plain);
    let opts = conn.render_options(format!("History: {}", param_basename(name)), style);
    print_list(&table, &opts)
}

async fn edit_parameter(conn: &ConnectionManager, name: &str) -> CliResult<()> {
    let svc = service(conn, None).await;
    let param = svc.get(name, true).await?;

    let edited = trim_trailing_newline(edit_in_editor(&param.value)?);
    if edited == param.value {
        println!("No changes made.");
        return Ok(());
    }

    let input = PutParameter::new(name, edited, param.kind).overwrite(true);
    svc.put(&input).await?;
    println!("Updated: {name}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use asc_core::model::ParameterVersion;

    #[test]
    fn test_copy_destination_keeps_basename() {
        assert_eq!(copy_destination("/app/prod/db-host", "/app/staging/"), "/app/staging/db-host");
        assert_eq!(copy_destination("/app/prod/db-host:3", "/backup/"), "/backup/db-host");
        assert_eq!(copy_destination("/app/prod/db-host", "/app/other"), "/app/other");
    }

    #[test]
    fn test_bracketed_matches_warning_format() {
        assert_eq!(bracketed(&["a".to_string(), "b c".to_string()]), "[a b c]");
        assert_eq!(bracketed(&[]), "[]");
    }

    #[test]
    fn test_history_defaults_to_newest_first() {
        let versions: Vec<ParameterVersion> = (1..=3)
            .map(|v| ParameterVersion {
                name: "/app/x".to_string(),
                version: v,
                value: format!("v{v}"),
                kind: ParameterType::String,
                last_modified: None,
                last_modified_user: None,
                labels: Vec::new(),
                description: None,
            })
            .collect();
        let table = ListTable::build(
            &versions,
            &history_fields(),
            &SortSpec::default(),
            &Projector::default(),
        )
        .unwrap();
        let first_column: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(first_column, vec!["3", "2", "1"]);
        assert_eq!(table.headers, vec!["Version", "Value", "Type", "Last Modified Date", "Labels"]);
    }

    #[test]
    fn test_ls_sorts_by_name_unless_flags_given() {
        let fields = ls_fields();
        assert!(fields.iter().any(|f| f.name == "Name" && f.default_sort));
        let hidden: Vec<&str> = fields
            .iter()
            .filter(|f| !f.visible)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(hidden, vec!["Last Modified User", "Tier", "Description"]);
    }
}
