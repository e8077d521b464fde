//! # CLI Command Implementations
//!
//! The run driver shared by the native and snapshot backends:
//! locate the config, load it, run the engine, log the outcome.

use crate::backend::load_snapshot;
use ih8sn_core::{
    Config, ConfigLocator, Ih8snError, MemoryStore, Outcome, OverrideEngine, OverrideReport,
    PropertyStore, Stage,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

// =============================================================================
// RUN DRIVER
// =============================================================================

/// Apply one stage's overrides to `store`.
///
/// Config trouble never aborts a run: a missing file is an empty
/// configuration, and an unreadable one is logged and treated the same.
pub fn run_stage<S: PropertyStore>(store: &mut S, stage: Stage, base: &Path) -> OverrideReport {
    let path = ConfigLocator::new(base).locate(&*store);

    let config = match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring configuration: {}", e);
            Config::new()
        }
    };

    tracing::info!(
        stage = %stage,
        config = %path.display(),
        keys = config.len(),
        "Applying overrides"
    );

    let report = OverrideEngine::new(&config, stage).run(store);
    log_report(&report);
    report
}

/// Per-property outcomes at debug, totals at info.
fn log_report(report: &OverrideReport) {
    for entry in &report.entries {
        tracing::debug!(
            property = %entry.name,
            value = %entry.value,
            outcome = %entry.outcome,
            "override"
        );
    }

    tracing::info!(
        updated = report.count(Outcome::Updated),
        added = report.count(Outcome::Added),
        rejected = report.count(Outcome::Rejected),
        skipped = report.count(Outcome::Skipped),
        "Overrides applied"
    );
}

// =============================================================================
// NATIVE COMMAND
// =============================================================================

/// Run against the device's property area.
#[cfg(target_os = "android")]
pub fn cmd_native(stage: Stage, base: &Path) -> Result<(), Ih8snError> {
    let mut store = crate::backend::AndroidPropertyStore::init()?;
    run_stage(&mut store, stage, base);
    Ok(())
}

/// Run against the device's property area.
#[cfg(not(target_os = "android"))]
pub fn cmd_native(stage: Stage, _base: &Path) -> Result<(), Ih8snError> {
    Err(Ih8snError::StoreInit(format!(
        "no native property store on this platform; pass --snapshot to run {} against a property dump",
        stage
    )))
}

// =============================================================================
// SNAPSHOT COMMAND
// =============================================================================

/// What `--print` writes to stdout.
#[derive(Debug, Serialize)]
pub struct SnapshotOutput<'a> {
    pub stage: Stage,
    /// Store contents after the run, sorted by name.
    pub properties: BTreeMap<String, String>,
    /// Every attempted write, in application order.
    pub overrides: &'a OverrideReport,
}

/// Pretty JSON for a finished snapshot run.
pub fn render_snapshot(
    stage: Stage,
    store: &MemoryStore,
    report: &OverrideReport,
) -> Result<String, Ih8snError> {
    let output = SnapshotOutput {
        stage,
        properties: store.to_map(),
        overrides: report,
    };
    serde_json::to_string_pretty(&output)
        .map_err(|e| Ih8snError::SerializationError(e.to_string()))
}

/// Run against a property dump, optionally printing the result as JSON.
pub fn cmd_snapshot(
    stage: Stage,
    base: &Path,
    snapshot: &Path,
    print: bool,
) -> Result<MemoryStore, Ih8snError> {
    let mut store = load_snapshot(snapshot)?;
    tracing::info!("Loaded {} properties from {:?}", store.len(), snapshot);

    let report = run_stage(&mut store, stage, base);

    if print {
        println!("{}", render_snapshot(stage, &store, &report)?);
    }

    Ok(store)
}
