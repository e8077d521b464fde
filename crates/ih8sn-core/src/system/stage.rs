//! # Lifecycle Stage
//!
//! | Stage | Argument | Rules |
//! |-------|----------|-------|
//! | Init | `init` | fingerprint, tags, type, description, debuggable, `ro.secure`, product names, model |
//! | BootCompleted | `boot_completed` | version release, patch dates, first API level, boot-state lockdown |
//!
//! Any other argument is rejected with [`Ih8snError::InvalidStage`].

use crate::Ih8snError;
use serde::Serialize;
use std::str::FromStr;

// =============================================================================
// STAGE ENUM
// =============================================================================

/// The lifecycle point this process was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Early boot, before most services read identity properties.
    Init,
    /// `sys.boot_completed` has been set.
    BootCompleted,
}

impl Stage {
    /// All valid stages, in boot order.
    pub const ALL: [Stage; 2] = [Stage::Init, Stage::BootCompleted];

    /// The literal command-line argument for this stage.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::BootCompleted => "boot_completed",
        }
    }
}

impl FromStr for Stage {
    type Err = Ih8snError;

    /// Exact, case-sensitive match on the argument.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" => Ok(Stage::Init),
            "boot_completed" => Ok(Stage::BootCompleted),
            other => Err(Ih8snError::InvalidStage(other.to_string())),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================
