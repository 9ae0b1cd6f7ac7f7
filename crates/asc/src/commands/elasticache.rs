use asc_core::TableStyle;
use asc_core::table::{Field, ListTable, Projector, SortSpec};

use crate::cli::ElastiCacheCommands;
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::{print_list, print_output};

const LS_SORT_FLAGS: &[(&str, &str)] = &[
    ("sort_name", "Cache Name"),
    ("sort_type", "Configuration"),
    ("sort_status", "Status"),
    ("sort_engine", "Engine Version"),
];

fn ls_fields(endpoint: bool, tags: &[String]) -> Vec<Field> {
    let mut fields = vec![
        Field::new("Cache Name").default_sort(),
        Field::new("Status"),
        Field::new("Engine Version"),
        Field::new("Configuration"),
        Field::new("Endpoint").visible(endpoint),
    ];
    fields.extend(tags.iter().map(Field::tag));
    fields
}

pub async fn handle_elasticache_command(
    cmd: &ElastiCacheCommands,
    conn: &ConnectionManager,
) -> CliResult<()> {
    match cmd {
        ElastiCacheCommands::Ls {
            list,
            endpoint,
            reverse_sort,
            tags,
            ..
        } => {
            let service = conn.elasticache().await;
            let clusters = service.clusters(!tags.is_empty()).await?;

            if !conn.output.is_table() {
                return print_output(&clusters, conn.output);
            }
            if clusters.is_empty() {
                println!("No cache clusters found.");
                return Ok(());
            }

            let sort = SortSpec::new(conn.sort_keys(LS_SORT_FLAGS), *reverse_sort);
            let table = ListTable::build(
                &clusters,
                &ls_fields(*endpoint, tags),
                &sort,
                &Projector::default(),
            )?;
            let style = if *list {
                TableStyle::Plain
            } else {
                TableStyle::Separated
            };
            print_list(&table, &conn.render_options("Elasticache Clusters", Some(style)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asc_core::model::CacheCluster;

    fn cluster(id: &str, node_type: &str) -> CacheCluster {
        CacheCluster {
            identifier: id.to_string(),
            node_type: Some(node_type.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_sorted_by_name_by_default() {
        let clusters = vec![cluster("sessions", "cache.t3.micro"), cluster("api", "cache.r7g.large")];
        let table = ListTable::build(
            &clusters,
            &ls_fields(false, &[]),
            &SortSpec::default(),
            &Projector::default(),
        )
        .unwrap();
        assert_eq!(table.rows[0][0], "api");
        assert_eq!(
            table.headers,
            vec!["Cache Name", "Status", "Engine Version", "Configuration"]
        );

        let by_type = SortSpec::by("Configuration").reversed(true);
        let table = ListTable::build(
            &clusters,
            &ls_fields(true, &[]),
            &by_type,
            &Projector::default(),
        )
        .unwrap();
        assert_eq!(table.rows[0][0], "sessions");
        assert_eq!(table.headers.len(), 5);
    }
}
