//! # Snapshot Store
//!
//! Seeds a [`MemoryStore`] from a property dump so a stage can be
//! dry-run on a host. Two line formats are accepted, mixed freely:
//!
//! ```text
//! [ro.product.model]: [Pixel 6]      # `adb shell getprop` output
//! ro.build.product=oriole             # build.prop style
//! ```
//!
//! Lines starting with `#` and lines matching neither format are ignored.

use ih8sn_core::{Ih8snError, MemoryStore};
use std::path::Path;

/// Read and parse a property dump. Unlike the override file, a missing
/// snapshot is an error: it was asked for explicitly.
pub fn load_snapshot(path: &Path) -> Result<MemoryStore, Ih8snError> {
    let bytes = std::fs::read(path)
        .map_err(|e| Ih8snError::IoError(format!("Read snapshot {}: {}", path.display(), e)))?;
    Ok(parse_snapshot(&String::from_utf8_lossy(&bytes)))
}

/// Parse a property dump. Later lines overwrite earlier ones.
pub fn parse_snapshot(contents: &str) -> MemoryStore {
    let mut store = MemoryStore::new();

    for line in contents.lines() {
        if line.starts_with('#') {
            continue;
        }
        if let Some((name, value)) = parse_getprop_line(line).or_else(|| line.split_once('=')) {
            store.set(name, value);
        }
    }

    store
}

/// `[name]: [value]`
fn parse_getprop_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('[')?;
    let (name, rest) = rest.split_once("]: [")?;
    let value = rest.strip_suffix(']')?;
    Some((name, value))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_getprop_output() {
        let store = parse_snapshot(
            "[ro.build.product]: [oriole]\n[ro.product.model]: [Pixel 6]\n[ro.debuggable]: []\n",
        );

        assert_eq!(store.value("ro.build.product"), Some("oriole"));
        assert_eq!(store.value("ro.product.model"), Some("Pixel 6"));
        assert_eq!(store.value("ro.debuggable"), Some(""));
    }

    #[test]
    fn parses_build_prop_lines() {
        let store = parse_snapshot("# begin build properties\nro.build.type=userdebug\r\n");
        assert_eq!(store.value("ro.build.type"), Some("userdebug"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn getprop_value_may_contain_brackets_and_equals() {
        let store = parse_snapshot("[ro.build.description]: [a=b [c]]");
        assert_eq!(store.value("ro.build.description"), Some("a=b [c]"));
    }

    #[test]
    fn malformed_lines_ignored() {
        let store = parse_snapshot("[ro.secure: 1\nnothing here\n\n");
        assert!(store.is_empty());
    }

    #[test]
    fn missing_snapshot_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_snapshot(&dir.path().join("getprop.txt"));
        assert!(matches!(result, Err(Ih8snError::IoError(_))));
    }
}
