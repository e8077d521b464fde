//! # Configuration
//!
//! Loading and parsing of the `key=value` override file.
//!
//! ## Format
//!
//! ```text
//! # comment lines start with '#', even if they contain '='
//! BUILD_FINGERPRINT=google/oriole/oriole:13/TQ3A.230805.001/10316531:user/release-keys
//! FORCE_BASIC_ATTESTATION=1
//! ```
//!
//! - The key is everything before the FIRST `=`, the value everything after it
//! - Nothing is trimmed; values are used byte-for-byte
//! - Lines without `=` (including empty lines) are ignored
//! - A later duplicate key overwrites an earlier one

mod locator;

pub use locator::*;

use crate::Ih8snError;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// =============================================================================
// CONFIG KEYS
// =============================================================================

pub const BUILD_FINGERPRINT: &str = "BUILD_FINGERPRINT";
pub const BUILD_DESCRIPTION: &str = "BUILD_DESCRIPTION";
pub const BUILD_SECURITY_PATCH_DATE: &str = "BUILD_SECURITY_PATCH_DATE";
pub const VENDOR_SECURITY_PATCH_DATE: &str = "VENDOR_SECURITY_PATCH_DATE";
pub const BUILD_TAGS: &str = "BUILD_TAGS";
pub const BUILD_TYPE: &str = "BUILD_TYPE";
pub const BUILD_VERSION_RELEASE: &str = "BUILD_VERSION_RELEASE";
pub const BUILD_VERSION_RELEASE_OR_CODENAME: &str = "BUILD_VERSION_RELEASE_OR_CODENAME";
pub const DEBUGGABLE: &str = "DEBUGGABLE";
pub const FORCE_BASIC_ATTESTATION: &str = "FORCE_BASIC_ATTESTATION";
pub const MANUFACTURER_NAME: &str = "MANUFACTURER_NAME";
pub const PRODUCT_FIRST_API_LEVEL: &str = "PRODUCT_FIRST_API_LEVEL";
pub const PRODUCT_DEVICE: &str = "PRODUCT_DEVICE";
pub const PRODUCT_NAME: &str = "PRODUCT_NAME";
pub const PRODUCT_MODEL: &str = "PRODUCT_MODEL";
pub const PRODUCT_BRAND: &str = "PRODUCT_BRAND";

// =============================================================================
// CONFIG
// =============================================================================

/// The parsed override file: logical key -> value.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    entries: BTreeMap<String, String>,
}

impl Config {
    /// Create an empty configuration ("no overrides configured").
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse file contents.
    ///
    /// Lines are split on `\n` only. A `\r` before the newline stays part
    /// of the value.
    #[must_use]
    pub fn parse(contents: &str) -> Self {
        let mut entries = BTreeMap::new();

        for line in contents.split('\n') {
            // Guards the empty line as well: "" never starts with '#'
            if line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                entries.insert(key.to_string(), value.to_string());
            }
        }

        Self { entries }
    }

    /// Parse everything a reader yields.
    ///
    /// Values are stored as UTF-8, so each invalid byte sequence becomes
    /// U+FFFD. Valid bytes, `\r` included, pass through unchanged.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, Ih8snError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| Ih8snError::IoError(format!("Read config: {}", e)))?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Load the file at `path`.
    ///
    /// A file that cannot be opened is not an error: it yields an empty
    /// configuration. Only a failure while reading an opened file is.
    pub fn load(path: &Path) -> Result<Self, Ih8snError> {
        match File::open(path) {
            Ok(file) => Self::from_reader(file).map_err(|e| match e {
                Ih8snError::IoError(msg) => {
                    Ih8snError::IoError(format!("{}: {}", path.display(), msg))
                }
                other => other,
            }),
            Err(_) => Ok(Self::new()),
        }
    }

    /// Value for a logical key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All entries, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Config {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
