//! RDS command implementations

use tracing::{debug, info};

use asc_core::TableStyle;
use asc_core::model::DbInstance;
use asc_core::model::rds::assign_roles;
use asc_core::render::Layout;
use asc_core::table::{DetailTable, Field, ListTable, Projector, SortSpec, fields_in};

use crate::aws::rds::ModifyInstance;
use crate::cli::{RdsCommands, RdsShowArgs, RdsShowTarget};
use crate::connection::ConnectionManager;
use crate::error::{AscError, Result as CliResult};
use crate::output::{print_detail, print_list, print_output};

const LS_SORT_FLAGS: &[(&str, &str)] = &[
    ("sort_name", "Identifier"),
    ("sort_cluster", "Cluster Identifier"),
    ("sort_type", "Size"),
    ("sort_engine", "Engine"),
    ("sort_status", "Status"),
    ("sort_role", "Role"),
];

/// Optional columns of `rds ls`
#[derive(Debug, Clone, Copy, Default)]
pub struct LsColumns {
    pub endpoint: bool,
    pub engine_version: bool,
    pub maintenance_window: bool,
}

pub fn ls_fields(columns: LsColumns, tags: &[String]) -> Vec<Field> {
    let mut fields = vec![
        Field::new("Cluster Identifier").merge(),
        Field::new("Identifier"),
        Field::new("Status"),
        Field::new("Role"),
        Field::new("Engine"),
        Field::new("Engine Version")
            .visible(columns.engine_version)
            .descending(),
        Field::new("Size"),
        Field::new("Endpoint").visible(columns.endpoint),
        Field::new("Maintenance Window").visible(columns.maintenance_window),
    ];
    fields.extend(tags.iter().map(Field::tag));
    fields
}

fn instance_show_fields() -> Vec<Field> {
    let mut fields = fields_in(
        "Instance Details",
        &[
            "Identifier",
            "ARN",
            "Status",
            "Role",
            "Engine",
            "Engine Version",
            "Endpoint",
            "Port",
            "Availability Zone",
            "VPC ID",
            "Subnet Group",
            "Subnets",
            "Network Type",
            "Security Group(s)",
            "Publicly Accessible",
            "Certificate Authority",
            "Certificate Expiry Date",
        ],
    );
    fields.extend(fields_in(
        "Configuration",
        &[
            "Cluster Identifier",
            "DB Name",
            "Option Group",
            "Created Time",
            "Parameter Group",
            "Class",
            "Failover Priority",
            "Resource ID",
        ],
    ));
    fields.extend(fields_in(
        "Storage",
        &["Encryption", "AWS KMS Key", "Storage Type", "Allocated Storage"],
    ));
    fields.extend(fields_in(
        "Monitoring",
        &["Performance Insights", "Monitoring Interval", "Monitoring Role"],
    ));
    fields.extend(fields_in(
        "Maintenance",
        &[
            "Auto Minor Version Upgrade",
            "Maintenance Window",
            "Pending Modifications",
        ],
    ));
    fields
}

fn cluster_show_fields() -> Vec<Field> {
    let mut fields = fields_in(
        "Connectivity & Security",
        &[
            "Endpoint",
            "Reader Endpoint",
            "Custom Endpoints",
            "Port",
            "Availability Zones",
            "Subnet Group",
            "Security Groups",
            "Publicly Accessible",
        ],
    );
    fields.extend(fields_in(
        "Configuration",
        &[
            "Cluster Identifier",
            "Status",
            "Engine",
            "Engine Version",
            "Resource ID",
            "DB Cluster ARN",
            "Network Type",
            "Parameter Group",
            "Deletion Protection",
            "Allocated Storage",
            "Created Time",
        ],
    ));
    fields.push(
        Field::new("DB Cluster Instance Class")
            .category("Configuration")
            .hidden(),
    );
    fields.extend(fields_in(
        "Authentication",
        &["IAM Database Authentication", "Master Username"],
    ));
    fields.extend(fields_in("Availability", &["Multi AZ"]));
    fields.extend(fields_in("Encryption", &["Encryption", "KMS Key ID"]));
    fields.extend(fields_in(
        "Monitoring",
        &["Performance Insights", "Monitoring Interval", "Monitoring Role"],
    ));
    fields.extend(fields_in(
        "Maintenance & Backups",
        &[
            "Auto Minor Version Upgrade",
            "Preferred Maintenance Window",
            "Pending Modifications",
            "Backup Retention Period",
            "Preferred Backup Window",
            "Copy Tags To Snapshot",
            "Earliest Restorable Time",
            "Latest Restorable Time",
        ],
    ));
    fields
}

/// The request that re-applies the current class, leaving nothing pending
pub fn cancel_request(instance: &DbInstance) -> CliResult<ModifyInstance> {
    let has_pending = instance
        .pending_modifications
        .as_ref()
        .is_some_and(|p| !p.is_empty());
    if !has_pending {
        return Err(AscError::invalid("no pending modifications found"));
    }
    let class = instance
        .class
        .clone()
        .ok_or_else(|| AscError::invalid("instance class not found"))?;
    Ok(ModifyInstance {
        identifier: instance.identifier.clone(),
        apply_immediately: false,
        instance_class: Some(class),
        maintenance_window: None,
    })
}

fn not_found(identifier: &str) -> AscError {
    AscError::NotFound {
        message: format!("RDS instance not found: {identifier}"),
    }
}

pub async fn handle_rds_command(cmd: &RdsCommands, conn: &ConnectionManager) -> CliResult<()> {
    match cmd {
        RdsCommands::Ls {
            list,
            endpoint,
            engine_version,
            maintenance_window,
            reverse_sort,
            tags,
            ..
        } => {
            let columns = LsColumns {
                endpoint: *endpoint,
                engine_version: *engine_version,
                maintenance_window: *maintenance_window,
            };
            list_instances(conn, columns, tags, *list, *reverse_sort).await
        }
        RdsCommands::Show(args) => show(conn, args).await,
        RdsCommands::Modify {
            instance,
            apply_immediately,
            class,
            maintenance_window,
        } => {
            if class.is_none() && maintenance_window.is_none() {
                return Err(AscError::invalid(
                    "nothing to modify: give --type or --maintenance-window",
                ));
            }
            let request = ModifyInstance {
                identifier: instance.clone(),
                apply_immediately: *apply_immediately,
                instance_class: class.clone(),
                maintenance_window: maintenance_window.clone(),
            };
            let rds = conn.rds().await;
            if rds.instances(Some(instance.as_str())).await?.is_empty() {
                return Err(not_found(instance));
            }
            rds.modify_instance(&request).await?;
            info!(instance, apply_immediately, "modification requested");
            if *apply_immediately {
                println!("Modified: {instance}");
            } else {
                println!("Modified: {instance} (pending until the next maintenance window)");
            }
            Ok(())
        }
        RdsCommands::CancelPendingModifications { instance } => {
            let rds = conn.rds().await;
            let found = rds.instances(Some(instance.as_str())).await?;
            let current = found.first().ok_or_else(|| not_found(instance))?;
            let request = cancel_request(current)?;
            debug!(instance, class = ?request.instance_class, "re-applying current class");
            rds.modify_instance(&request).await?;
            println!("Cancelled pending modifications for {instance}");
            Ok(())
        }
    }
}

async fn list_instances(
    conn: &ConnectionManager,
    columns: LsColumns,
    tags: &[String],
    list: bool,
    reverse: bool,
) -> CliResult<()> {
    let rds = conn.rds().await;
    let mut instances = rds.instances(None).await?;
    let clusters = rds.clusters(None).await?;
    assign_roles(&mut instances, &clusters);

    if !conn.output.is_table() {
        return print_output(&instances, conn.output);
    }
    if instances.is_empty() {
        println!("No database instances found.");
        return Ok(());
    }

    let sort = SortSpec::new(conn.sort_keys(LS_SORT_FLAGS), reverse);
    let table = ListTable::build(
        &instances,
        &ls_fields(columns, tags),
        &sort,
        &Projector::default(),
    )?;
    let style = if list {
        TableStyle::Plain
    } else {
        TableStyle::Separated
    };
    print_list(&table, &conn.render_options("Databases", Some(style)))
}

async fn show(conn: &ConnectionManager, args: &RdsShowArgs) -> CliResult<()> {
    match (&args.target, &args.instance) {
        (Some(RdsShowTarget::Cluster { identifier, layout }), _) => {
            show_cluster(conn, identifier, *layout).await
        }
        (None, Some(identifier)) => show_instance(conn, identifier, args.layout).await,
        (None, None) => Err(AscError::invalid("an instance identifier is required")),
    }
}

async fn show_instance(conn: &ConnectionManager, identifier: &str, layout: Layout) -> CliResult<()> {
    let rds = conn.rds().await;
    let mut instances = rds.instances(Some(identifier)).await?;
    let clusters = rds.clusters(None).await?;
    assign_roles(&mut instances, &clusters);
    let instance = instances.first().ok_or_else(|| not_found(identifier))?;

    if !conn.output.is_table() {
        return print_output(instance, conn.output);
    }
    let table = DetailTable::build(instance, &instance_show_fields(), &Projector::default())?;
    let opts = conn.detail_options(
        format!("Instance summary for {}", instance.identifier),
        layout,
        3,
    );
    print_detail(&table, &opts)
}

async fn show_cluster(conn: &ConnectionManager, identifier: &str, layout: Layout) -> CliResult<()> {
    let rds = conn.rds().await;
    let clusters = rds.clusters(Some(identifier)).await?;
    let cluster = clusters.first().ok_or_else(|| AscError::NotFound {
        message: format!("RDS cluster not found: {identifier}"),
    })?;

    if !conn.output.is_table() {
        return print_output(cluster, conn.output);
    }
    let table = DetailTable::build(cluster, &cluster_show_fields(), &Projector::default())?;
    let opts = conn.detail_options(
        format!("Cluster summary for {}", cluster.identifier),
        layout,
        3,
    );
    print_detail(&table, &opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use asc_core::FieldSource;
    use asc_core::model::{DbCluster, Tag};

    fn db(id: &str, cluster: Option<&str>, class: &str) -> DbInstance {
        DbInstance {
            identifier: id.to_string(),
            cluster_identifier: cluster.map(str::to_string),
            class: Some(class.to_string()),
            engine: Some("aurora-postgresql".to_string()),
            status: Some("available".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_every_show_field_is_registered() {
        for field in instance_show_fields() {
            assert!(DbInstance::has_field(&field.name), "{}", field.name);
        }
        for field in cluster_show_fields() {
            assert!(DbCluster::has_field(&field.name), "{}", field.name);
        }
    }

    #[test]
    fn test_ls_groups_by_cluster_and_blanks_repeats() {
        let instances = vec![
            db("c1-b", Some("c1"), "db.r6g.large"),
            db("solo", None, "db.t3.micro"),
            db("c1-a", Some("c1"), "db.r6g.large"),
        ];
        let table = ListTable::build(
            &instances,
            &ls_fields(LsColumns::default(), &[]),
            &SortSpec::default(),
            &Projector::default(),
        )
        .unwrap();
        assert_eq!(
            table.headers,
            vec!["Cluster Identifier", "Identifier", "Status", "Role", "Engine", "Size"]
        );
        let first_two: Vec<(&str, &str)> = table
            .rows
            .iter()
            .map(|r| (r[0].as_str(), r[1].as_str()))
            .collect();
        // "-" (standalone) sorts before "c1"
        assert_eq!(first_two, vec![("-", "solo"), ("c1", "c1-b"), ("", "c1-a")]);
    }

    #[test]
    fn test_tag_columns_follow_fixed_ones() {
        let mut tagged = db("db-1", None, "db.t3.micro");
        tagged.tags = vec![Tag::new("team", "payments")];
        let columns = LsColumns {
            endpoint: true,
            ..Default::default()
        };
        let table = ListTable::build(
            &[tagged],
            &ls_fields(columns, &["team".to_string()]),
            &SortSpec::default(),
            &Projector::default(),
        )
        .unwrap();
        assert_eq!(table.headers.last().map(String::as_str), Some("team"));
        assert!(table.headers.iter().any(|h| h == "Endpoint"));
        assert_eq!(table.rows[0].last().map(String::as_str), Some("payments"));
    }

    #[test]
    fn test_cancel_requires_pending_changes() {
        let mut instance = db("db-1", None, "db.r6g.large");
        let err = cancel_request(&instance).unwrap_err();
        assert_eq!(err.to_string(), "no pending modifications found");

        instance.pending_modifications = Some(Vec::new());
        assert!(cancel_request(&instance).is_err());

        instance.pending_modifications = Some(vec!["Instance Class: db.r6g.xlarge".to_string()]);
        let request = cancel_request(&instance).unwrap();
        assert_eq!(request.instance_class.as_deref(), Some("db.r6g.large"));
        assert!(!request.apply_immediately);
        assert!(request.maintenance_window.is_none());
    }
}
