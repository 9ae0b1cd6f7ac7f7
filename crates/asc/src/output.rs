//! Writing command results to stdout
//!
//! Records go out either as a rendered table or, with `--output json|yaml`,
//! as the serialized records themselves.

use std::io::{IsTerminal, Write};

use serde::Serialize;

use asc_core::RenderOptions;
use asc_core::render::{render_detail, render_list};
use asc_core::table::{DetailTable, ListTable};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

impl OutputFormat {
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table)
    }
}

/// Print serializable data as JSON or YAML
pub fn print_output<T: Serialize>(data: T, format: OutputFormat) -> Result<()> {
    let json_value = serde_json::to_value(data)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json_value)?);
        }
        OutputFormat::Yaml | OutputFormat::Table => {
            print!("{}", serde_yaml::to_string(&json_value)?);
        }
    }

    Ok(())
}

/// Width available to the table, when stdout is a terminal
pub fn terminal_width() -> Option<usize> {
    if !std::io::stdout().is_terminal() {
        return None;
    }
    terminal_size::terminal_size().map(|(width, _)| width.0 as usize)
}

/// Cap every column so the table stays inside the terminal
pub fn fit_to_terminal(opts: RenderOptions) -> RenderOptions {
    // borders and padding take a few columns of their own
    let cap = terminal_width().map(|w| w.saturating_sub(8).max(20));
    opts.max_column_width(cap)
}

pub fn print_list(table: &ListTable, opts: &RenderOptions) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render_list(table, opts, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn print_detail(table: &DetailTable, opts: &RenderOptions) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render_detail(table, opts, &mut out)?;
    out.flush()?;
    Ok(())
}
