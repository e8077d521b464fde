//! # ih8sn-core
//!
//! The override resolution engine for ih8sn - THE LOGIC.
//!
//! ih8sn rewrites a device's identity properties (build fingerprint,
//! security patch dates, product names, verified boot state) from a small
//! `key=value` file. It runs once at `init` and once at `boot_completed`,
//! and each stage applies its own fixed subset of overrides.
//!
//! ## Pipeline
//!
//! ```text
//! PropertyStore ──► ConfigLocator ──► Config::load ──► OverrideEngine ──► PropertyStore
//!  (identity)        (pick file)       (parse)          (stage rules)       (writes)
//! ```
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Never touches a real property store; everything goes through [`PropertyStore`]
//! - Holds no state between runs; each run evaluates the store's current snapshot
//! - Has NO async, NO FFI, NO logging dependency (the app reports outcomes)

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod engine;
pub mod expand;
pub mod primitives;
pub mod store;
pub mod system;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Ih8snError, Outcome, OverrideEntry, OverrideReport};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use config::{Config, ConfigLocator, normalize_identity};
pub use engine::{Action, Mode, OverrideEngine, RULES, Rule, Target, apply_override};
pub use expand::expand;
pub use store::{MemoryStore, PropertyStore, SlotId};

// =============================================================================
// RE-EXPORTS: System (from system module)
// =============================================================================

pub use system::Stage;
