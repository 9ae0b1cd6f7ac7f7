use std::cmp::Ordering;

use tracing::debug;

use super::{Field, Projector, SortDirection};
use crate::error::Result;
use crate::fields::FieldSource;
use crate::format::{PLACEHOLDER, strip_ansi};

/// Sort keys in activation order plus the global reverse flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub keys: Vec<String>,
    pub reverse: bool,
}

impl SortSpec {
    pub fn new(keys: Vec<String>, reverse: bool) -> Self {
        Self { keys, reverse }
    }

    pub fn by(key: impl Into<String>) -> Self {
        Self::new(vec![key.into()], false)
    }

    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }
}

/// Flat table: visible columns, one sorted row per record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

struct SortKey {
    field: Field,
    direction: SortDirection,
}

fn resolve_keys(fields: &[Field], sort: &SortSpec) -> Vec<SortKey> {
    let lookup = |name: &str| {
        fields
            .iter()
            .find(|f| f.name == name)
            .cloned()
            .unwrap_or_else(|| Field::new(name))
    };

    if sort.keys.is_empty() {
        return fields
            .iter()
            .find(|f| f.default_sort)
            .or_else(|| fields.first())
            .map(|f| SortKey {
                field: f.clone(),
                direction: f.direction,
            })
            .into_iter()
            .collect();
    }

    sort.keys
        .iter()
        .map(|name| {
            let field = lookup(name);
            SortKey {
                direction: field.direction,
                field,
            }
        })
        .collect()
}

/// Compare cell text: integers first in numeric order, then everything else
/// as text
fn compare_cells(a: &str, b: &str) -> Ordering {
    let (a, b) = (strip_ansi(a), strip_ansi(b));
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(&b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(&b),
    }
}

impl ListTable {
    /// Project, sort and merge `records`
    ///
    /// Rows are ordered by each sort key in turn, falling back to input
    /// order; `reverse` then flips the whole result.
    pub fn build<R: FieldSource>(
        records: &[R],
        fields: &[Field],
        sort: &SortSpec,
        projector: &Projector,
    ) -> Result<Self> {
        let keys = resolve_keys(fields, sort);
        debug!(
            kind = %R::KIND,
            records = records.len(),
            keys = ?keys.iter().map(|k| k.field.name.as_str()).collect::<Vec<_>>(),
            reverse = sort.reverse,
            "building list table"
        );

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let cells = projector.row(record, fields)?;
            let sort_values = keys
                .iter()
                .map(|k| projector.value(record, &k.field))
                .collect::<Result<Vec<_>>>()?;
            rows.push((sort_values, cells));
        }

        rows.sort_by(|(a, _), (b, _)| {
            keys.iter()
                .zip(a.iter().zip(b.iter()))
                .map(|(key, (x, y))| match key.direction {
                    SortDirection::Asc => compare_cells(x, y),
                    SortDirection::Desc => compare_cells(y, x),
                })
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        if sort.reverse {
            rows.reverse();
        }

        let mut rows: Vec<Vec<String>> = rows.into_iter().map(|(_, cells)| cells).collect();

        let visible: Vec<&Field> = fields.iter().filter(|f| f.visible).collect();
        for (column, _) in visible.iter().enumerate().filter(|(_, f)| f.merge) {
            merge_column(&mut rows, column);
        }

        Ok(Self {
            headers: visible.iter().map(|f| f.name.clone()).collect(),
            rows,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Blank a cell that repeats the one above it
///
/// Empty and placeholder cells mark ungrouped rows and are never merged.
fn merge_column(rows: &mut [Vec<String>], column: usize) {
    let mut previous: Option<String> = None;
    for row in rows.iter_mut() {
        let Some(cell) = row.get_mut(column) else {
            continue;
        };
        if cell.is_empty() || strip_ansi(cell) == PLACEHOLDER {
            previous = None;
            continue;
        }
        if previous.as_deref() == Some(cell.as_str()) {
            cell.clear();
        } else {
            previous = Some(cell.clone());
        }
    }
}
