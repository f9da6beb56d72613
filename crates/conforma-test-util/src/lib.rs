//! Shared test utilities for the conforma-pvp workspace.
//!
//! Aggregation writes evidence next to the scan results it reads, so golden tests copy a
//! fixture tree into a scratch directory first and normalize the paths and wall-clock
//! timestamps that copy introduces.

use serde_json::Value;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const RESULTS_PLACEHOLDER: &str = "__RESULTS__";

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// `collected` is replaced at any depth. Any `href` starting with `file://<results_dir>` has
/// that directory replaced with `__RESULTS__`. Subject `evaluated_on` values come from the
/// scan reports and are left alone.
pub fn normalize_nondeterministic(mut value: Value, results_dir: &str) -> Value {
    let prefix = format!("file://{}", results_dir.trim_end_matches('/'));
    normalize_recursive(&mut value, &prefix);
    value
}

fn normalize_recursive(value: &mut Value, href_prefix: &str) {
    match value {
        Value::Object(map) => {
            if map.contains_key("collected") {
                map.insert(
                    "collected".to_string(),
                    Value::String(TIMESTAMP_PLACEHOLDER.to_string()),
                );
            }
            if let Some(Value::String(href)) = map.get_mut("href")
                && let Some(rest) = href.strip_prefix(href_prefix)
            {
                *href = format!("file://{RESULTS_PLACEHOLDER}{rest}");
            }
            for val in map.values_mut() {
                normalize_recursive(val, href_prefix);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_recursive(val, href_prefix);
            }
        }
        _ => {}
    }
}

/// Recursively copy `src` into `dst`, creating directories as needed.
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io::Error::other)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
