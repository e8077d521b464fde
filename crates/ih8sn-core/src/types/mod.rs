//! # Core Type Definitions
//!
//! This module contains the shared types of the override pipeline:
//! - Per-write outcomes (`Outcome`, `OverrideEntry`)
//! - The run report (`OverrideReport`)
//! - Error types (`Ih8snError`)
//!
//! Soft misses are NOT errors. A missing config key never produces an
//! entry, and a missing property under update-only semantics is recorded
//! as [`Outcome::Skipped`].

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// OUTCOME
// =============================================================================

/// What happened to a single property name during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The property existed and its value was replaced.
    Updated,
    /// The property was absent and was created (add-if-missing only).
    Added,
    /// The store refused the write. Never retried.
    Rejected,
    /// The property was absent and the rule is update-only.
    Skipped,
}

impl Outcome {
    /// Whether the store now holds the requested value for this name.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Updated | Outcome::Added)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Outcome::Updated => "updated",
            Outcome::Added => "added",
            Outcome::Rejected => "rejected",
            Outcome::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// One attempted write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideEntry {
    /// Concrete property name.
    pub name: String,
    /// Value the rule asked for.
    pub value: String,
    /// What the store did with it.
    pub outcome: Outcome,
}

/// Ordered record of every write attempted by one run.
///
/// Order follows the rule table, then partition expansion order.
/// Serializes as the bare list of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OverrideReport {
    pub entries: Vec<OverrideEntry>,
}

impl OverrideReport {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one attempted write.
    pub fn record(&mut self, name: impl Into<String>, value: impl Into<String>, outcome: Outcome) {
        self.entries.push(OverrideEntry {
            name: name.into(),
            value: value.into(),
            outcome,
        });
    }

    /// Number of entries with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.entries.iter().filter(|e| e.outcome == outcome).count()
    }

    /// Entries that changed the store.
    pub fn applied(&self) -> impl Iterator<Item = &OverrideEntry> {
        self.entries.iter().filter(|e| e.outcome.is_applied())
    }

    /// Last outcome recorded for a property name.
    #[must_use]
    pub fn outcome_for(&self, name: &str) -> Option<Outcome> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.name == name)
            .map(|e| e.outcome)
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

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Fatal errors of an ih8sn run.
///
/// Anything that reaches the binary as an `Ih8snError` aborts the run
/// with a non-zero exit status.
#[derive(Debug, Error)]
pub enum Ih8snError {
    /// The stage argument is neither `init` nor `boot_completed`.
    #[error("Invalid stage: {0:?} (expected \"init\" or \"boot_completed\")")]
    InvalidStage(String),

    /// The property store could not be initialized.
    #[error("Property store initialization failed: {0}")]
    StoreInit(String),

    /// A file that exists could not be read.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Run output could not be rendered.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_by_outcome() {
        let mut report = OverrideReport::new();
        report.record("ro.secure", "1", Outcome::Updated);
        report.record("ro.boot.secure", "1", Outcome::Skipped);
        report.record("ro.odm.secure", "1", Outcome::Skipped);

        assert_eq!(report.len(), 3);
        assert_eq!(report.count(Outcome::Updated), 1);
        assert_eq!(report.count(Outcome::Skipped), 2);
        assert_eq!(report.applied().count(), 1);
    }

    #[test]
    fn outcome_for_returns_last_write() {
        let mut report = OverrideReport::new();
        report.record("ro.product.model", "a", Outcome::Skipped);
        report.record("ro.product.model", "b", Outcome::Updated);

        assert_eq!(report.outcome_for("ro.product.model"), Some(Outcome::Updated));
        assert_eq!(report.outcome_for("ro.product.brand"), None);
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::Rejected.to_string(), "rejected");
        assert!(Outcome::Added.is_applied());
        assert!(!Outcome::Skipped.is_applied());
    }
}
