//! Hierarchical parameter names
//!
//! Names are `/`-delimited paths. A `:suffix` after the last segment selects
//! a version number or label instead of the latest value.

use crate::error::{CoreError, Result};

/// Byte offset of the selector colon, if any
fn selector_index(name: &str) -> Option<usize> {
    let last_slash = name.rfind('/').map(|i| i + 1).unwrap_or(0);
    name[last_slash..].find(':').map(|i| last_slash + i)
}

/// Rewrite `name` from under `source_prefix` to under `dest_prefix`
///
/// Only the matching prefix is replaced; the remainder is kept verbatim.
/// A trailing `/` on either prefix makes no difference.
///
/// ```rust
/// use asc_core::ssm::transform_path;
///
/// assert_eq!(
///     transform_path("/app/prod/", "/app/staging", "/app/prod/db/host"),
///     "/app/staging/db/host"
/// );
/// ```
pub fn transform_path(source_prefix: &str, dest_prefix: &str, name: &str) -> String {
    let source = source_prefix.strip_suffix('/').unwrap_or(source_prefix);
    let dest = dest_prefix.strip_suffix('/').unwrap_or(dest_prefix);
    let remainder = name.strip_prefix(source).unwrap_or(name);
    format!("{dest}{remainder}")
}

/// Split `name:version` into the name and an optional version number
pub fn parse_param_version(input: &str) -> Result<(String, Option<i64>)> {
    let Some(idx) = selector_index(input) else {
        return Ok((input.to_string(), None));
    };

    let (name, suffix) = (&input[..idx], &input[idx + 1..]);
    let version: i64 = suffix.parse().map_err(|_| {
        CoreError::Validation(format!(
            "invalid version number {suffix:?}: must be a positive integer"
        ))
    })?;
    if version <= 0 {
        return Err(CoreError::Validation(format!(
            "invalid version number {version}: must be a positive integer"
        )));
    }
    Ok((name.to_string(), Some(version)))
}

/// The name without any `:version` or `:label` selector
pub fn strip_selector(name: &str) -> &str {
    match selector_index(name) {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Last path segment, selector removed
pub fn param_basename(name: &str) -> &str {
    let name = strip_selector(name);
    let trimmed = name.strip_suffix('/').unwrap_or(name);
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Whether the name denotes a path rather than a single parameter
pub fn is_path(name: &str) -> bool {
    name.ends_with('/')
}
