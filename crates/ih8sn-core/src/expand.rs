//! # Property Name Expander
//!
//! Turns one logical property family into every partition-qualified name
//! that must carry the same value.
//!
//! `expand("ro.", "build.fingerprint")` yields `ro.build.fingerprint`,
//! `ro.boot.build.fingerprint`, ... `ro.vendor.boot.build.fingerprint`.

use crate::primitives::PARTITION_SEGMENTS;

/// Build `prefix + segment + suffix` for every partition segment, in the
/// fixed segment order. Always returns exactly 13 names.
#[must_use]
pub fn expand(prefix: &str, suffix: &str) -> Vec<String> {
    PARTITION_SEGMENTS
        .iter()
        .map(|segment| format!("{prefix}{segment}{suffix}"))
        .collect()
}
