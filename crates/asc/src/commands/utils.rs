//! Helpers shared by command handlers: prompts, spinners, editor, stdin

use std::io::{BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use asc_core::{ProgressCallback, ProgressEvent};

use crate::error::{AscError, Result as CliResult};

const FALLBACK_EDITORS: &[&str] = &["vim", "vi", "nano", "emacs"];

/// Whether an answer typed at a `[y/N]` prompt means yes
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Ask a yes/no question, defaulting to no
///
/// On a terminal the question goes through dialoguer; otherwise it is
/// written to stderr and one line is read from stdin.
pub fn confirm_action(question: &str) -> CliResult<bool> {
    if std::io::stdin().is_terminal() {
        return Ok(Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .context("Failed to get user confirmation")?);
    }

    eprint!("{question} [y/N]: ");
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

/// Spinner fed by progress events, drawn only when stderr is a terminal
pub fn progress_spinner(message: &str) -> Option<ProgressBar> {
    if !std::io::stderr().is_terminal() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg} [{elapsed_precise}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb.set_message(message.to_string());
    Some(pb)
}

/// Callback that moves the spinner along
pub fn spinner_callback(pb: &ProgressBar) -> ProgressCallback {
    let pb = pb.clone();
    // (copied, deleted)
    let counts = std::sync::Mutex::new((0usize, 0usize));
    Box::new(move |event: ProgressEvent| {
        let Ok(mut counts) = counts.lock() else {
            return;
        };
        match event {
            ProgressEvent::Enumerated { path, count } => {
                pb.set_message(format!("Found {count} parameter(s) under {path}"));
            }
            ProgressEvent::Copied { source, .. } => {
                counts.0 += 1;
                pb.set_message(format!("Copied {} ({source})", counts.0));
            }
            ProgressEvent::Deleted { count } => {
                counts.1 += count;
                pb.set_message(format!("Deleted {}", counts.1));
            }
        }
    })
}

/// Drop a single trailing line ending
pub fn trim_trailing_newline(mut value: String) -> String {
    if value.ends_with('\n') {
        value.pop();
        if value.ends_with('\r') {
            value.pop();
        }
    }
    value
}

pub fn read_stdin_value() -> CliResult<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read value from stdin")?;
    Ok(trim_trailing_newline(buffer))
}

fn find_on_path(program: &str, path_var: &std::ffi::OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Editor command line: `$EDITOR`, `$VISUAL`, then the first fallback on `PATH`
pub fn resolve_editor() -> Option<Vec<String>> {
    let from_env = ["EDITOR", "VISUAL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty());
    if let Some(command) = from_env {
        return Some(command.split_whitespace().map(str::to_string).collect());
    }

    let path_var = std::env::var_os("PATH")?;
    FALLBACK_EDITORS
        .iter()
        .find(|editor| find_on_path(editor, &path_var).is_some())
        .map(|editor| vec![editor.to_string()])
}

fn run_editor(editor: &[String], file: &Path) -> CliResult<()> {
    let Some((program, args)) = editor.split_first() else {
        return Err(AscError::invalid("editor command is empty"));
    };
    debug!(program, ?args, file = %file.display(), "launching editor");
    let status = Command::new(program)
        .args(args)
        .arg(file)
        .status()
        .with_context(|| format!("Failed to launch editor '{program}'"))?;
    if !status.success() {
        return Err(AscError::invalid(format!(
            "editor '{program}' exited with {status}"
        )));
    }
    Ok(())
}

/// Let the user edit `initial` in their editor and return the result
pub fn edit_in_editor(initial: &str) -> CliResult<String> {
    let editor = resolve_editor().ok_or_else(|| {
        AscError::invalid("no editor found: set $EDITOR or $VISUAL")
    })?;

    let mut file = tempfile::Builder::new()
        .prefix("asc-")
        .suffix(".txt")
        .tempfile()
        .map_err(|e| AscError::FileError {
            path: std::env::temp_dir().display().to_string(),
            message: e.to_string(),
        })?;
    file.write_all(initial.as_bytes())?;
    file.flush()?;

    run_editor(&editor, file.path())?;

    let edited = std::fs::read_to_string(file.path()).map_err(|e| AscError::FileError {
        path: file.path().display().to_string(),
        message: e.to_string(),
    })?;
    Ok(edited)
}
