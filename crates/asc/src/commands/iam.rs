//! IAM role command implementations

use asc_core::{Layout, TableStyle};
use asc_core::table::{DetailTable, Field, ListTable, Projector, SortSpec};

use crate::cli::{IamCommands, RoleCommands};
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::{print_detail, print_list, print_output};

const LS_SORT_FLAGS: &[(&str, &str)] = &[
    ("sort_name", "Name"),
    ("sort_arn", "Arn"),
    ("sort_path", "Path"),
];

fn ls_fields() -> Vec<Field> {
    vec![
        Field::new("Name").default_sort(),
        Field::new("Last Activity"),
        Field::new("Arn").hidden(),
        Field::new("Creation Time"),
        Field::new("Description").hidden(),
        Field::new("Path").hidden(),
    ]
}

fn show_fields() -> Vec<Field> {
    [
        "Name",
        "Role ID",
        "Last Activity",
        "Arn",
        "Creation Time",
        "Description",
        "Path",
        "Max Session Duration",
        "Permissions Boundary",
        "Assume Role Policy Document",
        "Inline Policies",
        "Managed Policies",
    ]
    .into_iter()
    .map(Field::new)
    .collect()
}

pub async fn handle_iam_command(cmd: &IamCommands, conn: &ConnectionManager) -> CliResult<()> {
    match cmd {
        IamCommands::Role(role_cmd) => handle_role_command(role_cmd, conn).await,
    }
}

async fn handle_role_command(cmd: &RoleCommands, conn: &ConnectionManager) -> CliResult<()> {
    match cmd {
        RoleCommands::Ls {
            list,
            reverse,
            max_items,
            path_prefix,
            ..
        } => {
            let iam = conn.iam().await;
            let roles = iam.roles(path_prefix.as_deref(), *max_items).await?;

            if !conn.output.is_table() {
                return print_output(&roles, conn.output);
            }
            if roles.is_empty() {
                println!("No roles found.");
                return Ok(());
            }

            let sort = SortSpec::new(conn.sort_keys(LS_SORT_FLAGS), *reverse);
            let table = ListTable::build(&roles, &ls_fields(), &sort, &Projector::default())?;
            let style = list.then_some(TableStyle::Plain);
            print_list(&table, &conn.render_options("Roles", style))
        }
        RoleCommands::Show { name } => {
            let iam = conn.iam().await;
            let role = iam.role(name).await?;

            if !conn.output.is_table() {
                return print_output(&role, conn.output);
            }
            let table = DetailTable::build(&role, &show_fields(), &Projector::default())?;
            let opts =
                conn.detail_options(format!("Role Details ({})", role.name), Layout::Horizontal, 2);
            print_detail(&table, &opts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asc_core::FieldSource;
    use asc_core::model::Role;

    #[test]
    fn test_show_fields_registered() {
        for field in show_fields() {
            assert!(Role::has_field(&field.name), "{}", field.name);
        }
    }

    #[test]
    fn test_hidden_arn_still_sorts() {
        let roles: Vec<Role> = [("b", "arn:aws:iam::1:role/a"), ("a", "arn:aws:iam::1:role/b")]
            .into_iter()
            .map(|(name, arn)| Role {
                name: name.to_string(),
                arn: arn.to_string(),
                ..Default::default()
            })
            .collect();

        let table = ListTable::build(&roles, &ls_fields(), &SortSpec::default(), &Projector::default()).unwrap();
        assert_eq!(table.rows[0][0], "a");
        assert_eq!(table.headers, vec!["Name", "Last Activity", "Creation Time"]);

        let table = ListTable::build(&roles, &ls_fields(), &SortSpec::by("Arn"), &Projector::default()).unwrap();
        assert_eq!(table.rows[0][0], "b");
    }
}
