//! # Config Locator
//!
//! Picks the one override file to load for this device.
//!
//! For each identity property (product, model, serial number) that is set,
//! two device-qualified candidates are probed:
//!
//! 1. `<base>.<normalized value>` (spaces before a non-space become `_`)
//! 2. `<base>.<value>` (the normalization undone)
//!
//! The first candidate that can be opened wins. If none can, the
//! unqualified base path is returned; whether that exists is the loader's
//! concern.

use crate::primitives::{DEFAULT_CONFIG_PATH, IDENTITY_PROPERTIES};
use crate::store::PropertyStore;
use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Resolves the configuration path from device identity properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocator {
    base: PathBuf,
}

impl Default for ConfigLocator {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}

impl ConfigLocator {
    /// Create a locator rooted at `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The unqualified configuration path.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// The two candidate paths for one identity value, in probe order.
    ///
    /// The second candidate restores only the underscores introduced by
    /// [`normalize_identity`], which is the raw value. The two candidates
    /// are equal when the value had nothing to normalize; both are still
    /// probed.
    #[must_use]
    pub fn candidates(&self, identity: &str) -> [PathBuf; 2] {
        let normalized = normalize_identity(identity);
        [self.qualified(&normalized), self.qualified(identity)]
    }

    /// Resolve the path to load for the device behind `store`.
    ///
    /// Identity properties are checked in priority order and the search
    /// stops at the first candidate that exists.
    pub fn locate<S: PropertyStore>(&self, store: &S) -> PathBuf {
        for property in IDENTITY_PROPERTIES {
            let Some(identity) = store.get(property) else {
                continue;
            };
            for candidate in self.candidates(&identity) {
                if is_readable(&candidate) {
                    return candidate;
                }
            }
        }
        self.base.clone()
    }

    fn qualified(&self, suffix: &str) -> PathBuf {
        let mut path = OsString::from(self.base.as_os_str());
        path.push(".");
        path.push(suffix);
        PathBuf::from(path)
    }
}

/// Replace each space that is directly followed by a non-space with `_`.
///
/// Runs of spaces keep all but their last space, and the final character
/// is never touched: `"Pixel 6"` -> `"Pixel_6"`, `"a  b"` -> `"a _b"`,
/// `"tail "` -> `"tail "`.
#[must_use]
pub fn normalize_identity(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| match chars.get(i + 1) {
            Some(&next) if c == ' ' && next != ' ' => '_',
            _ => c,
        })
        .collect()
}

/// A regular file that can be opened for reading.
fn is_readable(path: &Path) -> bool {
    File::open(path)
        .and_then(|file| file.metadata())
        .is_ok_and(|meta| meta.is_file())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use std::fs;

    #[test]
    fn normalize_single_space() {
        assert_eq!(normalize_identity("Pixel 6"), "Pixel_6");
        assert_eq!(normalize_identity("Pixel 6 Pro"), "Pixel_6_Pro");
    }

    #[test]
    fn normalize_space_runs_keep_leading_spaces() {
        assert_eq!(normalize_identity("a  b"), "a _b");
        assert_eq!(normalize_identity("a   b"), "a  _b");
    }

    #[test]
    fn normalize_trailing_and_leading() {
        assert_eq!(normalize_identity("tail "), "tail ");
        assert_eq!(normalize_identity("tail  "), "tail  ");
        assert_eq!(normalize_identity(" lead"), "_lead");
    }

    #[test]
    fn normalize_degenerate_values() {
        assert_eq!(normalize_identity(""), "");
        assert_eq!(normalize_identity(" "), " ");
        assert_eq!(normalize_identity("oriole"), "oriole");
        assert_eq!(normalize_identity("already_under"), "already_under");
    }

    #[test]
    fn candidates_probe_underscore_then_space() {
        let locator = ConfigLocator::new("/etc/ih8sn.conf");
        let [first, second] = locator.candidates("Pixel 6");

        assert_eq!(first, PathBuf::from("/etc/ih8sn.conf.Pixel_6"));
        assert_eq!(second, PathBuf::from("/etc/ih8sn.conf.Pixel 6"));
    }

    #[test]
    fn candidates_keep_existing_underscores() {
        let locator = ConfigLocator::new("/etc/my_ih8sn.conf");
        let [first, second] = locator.candidates("sdk_gphone 64");

        assert_eq!(first, PathBuf::from("/etc/my_ih8sn.conf.sdk_gphone_64"));
        assert_eq!(second, PathBuf::from("/etc/my_ih8sn.conf.sdk_gphone 64"));
    }

    #[test]
    fn default_base_path() {
        assert_eq!(
            ConfigLocator::default().base(),
            Path::new("/system/etc/ih8sn.conf")
        );
    }

    #[test]
    fn no_identity_falls_back_to_base() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("ih8sn.conf");
        let locator = ConfigLocator::new(&base);

        assert_eq!(locator.locate(&MemoryStore::new()), base);
    }

    #[test]
    fn underscore_variant_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("ih8sn.conf");
        fs::write(dir.path().join("ih8sn.conf.Pixel_6"), "A=1").expect("write");
        fs::write(dir.path().join("ih8sn.conf.Pixel 6"), "A=2").expect("write");

        let store: MemoryStore = [("ro.build.product", "Pixel 6")].into_iter().collect();
        let located = ConfigLocator::new(&base).locate(&store);

        assert_eq!(located, dir.path().join("ih8sn.conf.Pixel_6"));
    }

    #[test]
    fn space_variant_when_underscore_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("ih8sn.conf");
        fs::write(dir.path().join("ih8sn.conf.Pixel 6"), "A=2").expect("write");

        let store: MemoryStore = [("ro.build.product", "Pixel 6")].into_iter().collect();
        let located = ConfigLocator::new(&base).locate(&store);

        assert_eq!(located, dir.path().join("ih8sn.conf.Pixel 6"));
    }

    #[test]
    fn product_beats_model_beats_serial() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("ih8sn.conf");
        fs::write(dir.path().join("ih8sn.conf.oriole"), "").expect("write");
        fs::write(dir.path().join("ih8sn.conf.Pixel_6"), "").expect("write");
        fs::write(dir.path().join("ih8sn.conf.ABC123"), "").expect("write");

        let mut store: MemoryStore = [
            ("ro.build.product", "oriole"),
            ("ro.build.model", "Pixel 6"),
            ("ro.boot.serialno", "ABC123"),
        ]
        .into_iter()
        .collect();
        let locator = ConfigLocator::new(&base);
        assert_eq!(locator.locate(&store), dir.path().join("ih8sn.conf.oriole"));

        store.set("ro.build.product", "unknown");
        assert_eq!(locator.locate(&store), dir.path().join("ih8sn.conf.Pixel_6"));

        store.set("ro.build.model", "unknown");
        assert_eq!(locator.locate(&store), dir.path().join("ih8sn.conf.ABC123"));
    }

    #[test]
    fn directory_is_not_a_candidate() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("ih8sn.conf");
        fs::create_dir(dir.path().join("ih8sn.conf.oriole")).expect("mkdir");

        let store: MemoryStore = [("ro.build.product", "oriole")].into_iter().collect();
        assert_eq!(ConfigLocator::new(&base).locate(&store), base);
    }
}
