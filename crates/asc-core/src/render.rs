//! Drawing table models as text
//!
//! Style (box-drawn, plain, separated rows) and detail layout (name beside
//! value, or names above values in a grid) are chosen independently. Column
//! widths follow content up to `max_column_width`; longer cells wrap or are
//! truncated.

use std::io::Write;

use colored::Colorize;
use serde::{Deserialize, Serialize};
use tabled::Table;
use tabled::builder::Builder;
use tabled::settings::object::Segment;
use tabled::settings::{Panel, Span, Style, Width};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;
use crate::format::strip_ansi;
use crate::table::{DetailTable, ListTable};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    /// Rounded box with a title bar
    #[default]
    Rounded,
    /// No borders or separators
    Plain,
    /// Rounded box with a line between every row
    Separated,
}

/// Arrangement of fields in a detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Layout {
    /// One field per line: name, then its value across the remaining columns
    #[default]
    Horizontal,
    /// `columns` fields per row: a row of names above a row of values
    Grid,
}

/// What happens to content wider than the maximum column width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Wrap,
    Truncate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub title: Option<String>,
    pub style: TableStyle,
    pub layout: Layout,
    pub columns: usize,
    pub max_column_width: Option<usize>,
    pub overflow: Overflow,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            style: TableStyle::default(),
            layout: Layout::default(),
            columns: 2,
            max_column_width: None,
            overflow: Overflow::default(),
        }
    }
}

impl RenderOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Tighten the width limit; a larger value never loosens an existing one
    pub fn max_column_width(mut self, width: Option<usize>) -> Self {
        self.max_column_width = match (self.max_column_width, width) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    fn fit(&self, text: &str) -> String {
        match (self.overflow, self.max_column_width) {
            (Overflow::Truncate, Some(max)) => truncate(text, max),
            _ => text.to_string(),
        }
    }
}

/// Shorten each line of `text` to at most `max` graphemes, marking the cut
///
/// Colour codes are dropped from lines that need cutting.
pub fn truncate(text: &str, max: usize) -> String {
    text.split('\n')
        .map(|line| {
            let plain = strip_ansi(line);
            if plain.graphemes(true).count() <= max {
                return line.to_string();
            }
            let mut cut: String = plain.graphemes(true).take(max.saturating_sub(3)).collect();
            cut.push_str("...");
            cut
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn finish(table: &mut Table, opts: &RenderOptions) {
    match opts.style {
        TableStyle::Rounded => table.with(Style::rounded()),
        TableStyle::Plain => table.with(Style::blank()),
        TableStyle::Separated => table.with(Style::modern_rounded()),
    };

    if let (Overflow::Wrap, Some(max)) = (opts.overflow, opts.max_column_width) {
        table.modify(Segment::all(), Width::wrap(max));
    }

    if opts.style != TableStyle::Plain {
        if let Some(title) = &opts.title {
            table.with(Panel::header(title.clone()));
        }
    }
}

/// Write a list table: a header row, then one row per record
pub fn render_list<W: Write>(table: &ListTable, opts: &RenderOptions, out: &mut W) -> Result<()> {
    let mut builder = Builder::default();
    builder.push_record(table.headers.iter().map(|h| opts.fit(h).bold().to_string()));
    for row in &table.rows {
        builder.push_record(row.iter().map(|cell| opts.fit(cell)));
    }

    let mut rendered = builder.build();
    finish(&mut rendered, opts);
    writeln!(out, "{rendered}")?;
    Ok(())
}

/// Write a detail table, one titled block per section
pub fn render_detail<W: Write>(
    table: &DetailTable,
    opts: &RenderOptions,
    out: &mut W,
) -> Result<()> {
    let columns = match opts.layout {
        Layout::Grid => opts.columns.max(1),
        Layout::Horizontal => opts.columns.max(2),
    };
    let padded = |cells: Vec<String>| {
        let mut cells = cells;
        cells.resize(columns, String::new());
        cells
    };
    let label = |name: &str| opts.fit(name).bold().blue().to_string();

    let mut builder = Builder::default();
    // (row, column, width) of every cell that spans
    let mut spans: Vec<(usize, usize, usize)> = Vec::new();
    let mut row = 0;

    for section in &table.sections {
        if !section.title.is_empty() {
            builder.push_record(padded(vec![section.title.bold().to_string()]));
            spans.push((row, 0, columns));
            row += 1;
        }

        match opts.layout {
            Layout::Grid => {
                for chunk in section.entries.chunks(columns) {
                    builder.push_record(padded(chunk.iter().map(|(n, _)| label(n)).collect()));
                    builder.push_record(padded(chunk.iter().map(|(_, v)| opts.fit(v)).collect()));
                    row += 2;
                }
            }
            Layout::Horizontal => {
                for (name, value) in &section.entries {
                    builder.push_record(padded(vec![label(name), opts.fit(value)]));
                    spans.push((row, 1, columns - 1));
                    row += 1;
                }
            }
        }
    }

    let mut rendered = builder.build();
    for (r, c, width) in spans {
        if width > 1 {
            rendered.modify((r, c), Span::column(width as _));
        }
    }
    finish(&mut rendered, opts);
    writeln!(out, "{rendered}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Section;

    fn render_to_string(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        strip_ansi(&String::from_utf8(buf).unwrap())
    }

    fn list() -> ListTable {
        ListTable {
            headers: vec!["Name".to_string(), "Value".to_string()],
            rows: vec![
                vec!["/app/db-host".to_string(), "db.internal".to_string()],
                vec!["/app/db-pass".to_string(), "****".to_string()],
            ],
        }
    }

    fn detail() -> DetailTable {
        DetailTable {
            sections: vec![
                Section {
                    title: "Parameter".to_string(),
                    entries: vec![
                        ("Name".to_string(), "/app/db-host".to_string()),
                        ("Type".to_string(), "String".to_string()),
                        ("Version".to_string(), "3".to_string()),
                    ],
                },
                Section {
                    title: "Tags".to_string(),
                    entries: vec![("env".to_string(), "prod".to_string())],
                },
            ],
        }
    }

    #[test]
    fn test_rounded_list_has_title_and_rows() {
        let opts = RenderOptions::titled("Parameters");
        let text = render_to_string(|out| render_list(&list(), &opts, out));
        assert!(text.contains("Parameters"));
        assert!(text.contains("/app/db-pass"));
        assert!(text.contains('╭'));
    }

    #[test]
    fn test_plain_list_has_no_borders_or_title() {
        let opts = RenderOptions::titled("Parameters").style(TableStyle::Plain);
        let text = render_to_string(|out| render_list(&list(), &opts, out));
        assert!(!text.contains("Parameters"));
        assert!(!text.contains('│'));
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Name"));
    }

    #[test]
    fn test_detail_layouts() {
        let horizontal = render_to_string(|out| {
            render_detail(&detail(), &RenderOptions::titled("Parameter: db-host"), out)
        });
        assert!(horizontal.contains("Parameter: db-host"));
        let name_line = horizontal.lines().find(|l| l.contains("Version")).unwrap();
        assert!(name_line.contains('3'));

        let grid = render_to_string(|out| {
            render_detail(
                &detail(),
                &RenderOptions::default().layout(Layout::Grid).columns(3),
                out,
            )
        });
        let names_line = grid.lines().find(|l| l.contains("Version")).unwrap();
        assert!(names_line.contains("Name"));
        assert!(names_line.contains("Type"));
        assert!(grid.contains("prod"));
    }

    #[test]
    fn test_truncate_is_grapheme_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate("ééééééééé", 6), "ééé...");
        assert_eq!(truncate("ok\nabcdefghijkl", 8), "ok\nabcde...");
    }

    #[test]
    fn test_wrapped_columns_respect_max_width() {
        let long = ListTable {
            headers: vec!["Value".to_string()],
            rows: vec![vec!["x".repeat(50)]],
        };
        let opts = RenderOptions::default()
            .style(TableStyle::Plain)
            .max_column_width(Some(10));
        let text = render_to_string(|out| render_list(&long, &opts, out));
        assert!(text.lines().all(|l| l.trim_end().chars().count() <= 12));
        assert_eq!(text.matches('x').count(), 50);
    }

    #[test]
    fn test_max_width_only_tightens() {
        let opts = RenderOptions::default()
            .max_column_width(Some(100))
            .max_column_width(Some(40))
            .max_column_width(Some(80));
        assert_eq!(opts.max_column_width, Some(40));
    }
}
