//! # Override Engine
//!
//! The stage-aware rule table and the code that applies it to a store.
//!
//! All overrides are:
//! - Gated by exactly one [`Stage`]
//! - Update-or-skip unless a rule is explicitly [`Mode::UpdateOrAdd`]
//! - Attempted once, in table order, with no retry and no rollback
//!
//! Rules are independent and idempotent: re-running a stage with the same
//! configuration writes the same values again.

use crate::config::{
    BUILD_DESCRIPTION, BUILD_FINGERPRINT, BUILD_SECURITY_PATCH_DATE, BUILD_TAGS, BUILD_TYPE,
    BUILD_VERSION_RELEASE, BUILD_VERSION_RELEASE_OR_CODENAME, Config, DEBUGGABLE,
    FORCE_BASIC_ATTESTATION, MANUFACTURER_NAME, PRODUCT_BRAND, PRODUCT_DEVICE,
    PRODUCT_FIRST_API_LEVEL, PRODUCT_MODEL, PRODUCT_NAME, VENDOR_SECURITY_PATCH_DATE,
};
use crate::expand::expand;
use crate::primitives::FORCE_BASIC_ATTESTATION_ON;
use crate::store::PropertyStore;
use crate::{Outcome, OverrideReport, Stage};
use Stage::{BootCompleted, Init};
use Target::Single;

// =============================================================================
// RULE DESCRIPTORS
// =============================================================================

/// Which concrete property names a rule writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// One literal property name.
    Single(&'static str),
    /// `prefix + segment + suffix` for every partition segment.
    Expanded {
        prefix: &'static str,
        suffix: &'static str,
    },
}

impl Target {
    /// Concrete names, in write order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        match self {
            Target::Single(name) => vec![(*name).to_string()],
            Target::Expanded { prefix, suffix } => expand(prefix, suffix),
        }
    }
}

/// What to do when a target property does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Leave missing properties missing.
    #[default]
    UpdateOnly,
    /// Create missing properties.
    UpdateOrAdd,
}

/// Where a rule's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Copy the value of a config key; nothing happens if the key is absent.
    Copy(&'static str),
    /// Write a fixed value regardless of the configuration.
    Fixed(&'static str),
    /// Model name derivation, see [`OverrideEngine::model_value`].
    Model,
}

/// One row of the override table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub stage: Stage,
    pub action: Action,
    pub target: Target,
    pub mode: Mode,
}

impl Rule {
    const fn copy(stage: Stage, key: &'static str, target: Target) -> Self {
        Self {
            stage,
            action: Action::Copy(key),
            target,
            mode: Mode::UpdateOnly,
        }
    }

    const fn fixed(stage: Stage, value: &'static str, target: Target) -> Self {
        Self {
            stage,
            action: Action::Fixed(value),
            target,
            mode: Mode::UpdateOnly,
        }
    }

    /// The config key this rule reads, if it reads exactly one.
    #[must_use]
    pub fn key(&self) -> Option<&'static str> {
        match self.action {
            Action::Copy(key) => Some(key),
            Action::Fixed(_) | Action::Model => None,
        }
    }
}

const fn ro(suffix: &'static str) -> Target {
    Target::Expanded {
        prefix: "ro.",
        suffix,
    }
}

const fn ro_product(suffix: &'static str) -> Target {
    Target::Expanded {
        prefix: "ro.product.",
        suffix,
    }
}

// =============================================================================
// RULE TABLE
// =============================================================================

/// Every override, in application order.
pub const RULES: &[Rule] = &[
    Rule::copy(Init, BUILD_FINGERPRINT, ro("build.fingerprint")),
    Rule::copy(Init, BUILD_TAGS, ro("build.tags")),
    Rule::copy(Init, BUILD_TYPE, ro("build.type")),
    Rule::copy(BootCompleted, BUILD_VERSION_RELEASE, ro("build.version.release")),
    Rule::copy(
        BootCompleted,
        BUILD_VERSION_RELEASE_OR_CODENAME,
        ro("build.version.release_or_codename"),
    ),
    Rule::copy(Init, BUILD_DESCRIPTION, Single("ro.build.description")),
    Rule::copy(
        BootCompleted,
        BUILD_SECURITY_PATCH_DATE,
        Single("ro.build.version.security_patch"),
    ),
    Rule::copy(
        BootCompleted,
        VENDOR_SECURITY_PATCH_DATE,
        Single("ro.vendor.build.security_patch"),
    ),
    Rule::copy(
        BootCompleted,
        PRODUCT_FIRST_API_LEVEL,
        Single("ro.product.first_api_level"),
    ),
    Rule::copy(Init, DEBUGGABLE, Single("ro.debuggable")),
    Rule::fixed(Init, "1", Single("ro.secure")),
    Rule::copy(Init, MANUFACTURER_NAME, ro_product("manufacturer")),
    Rule::copy(Init, PRODUCT_BRAND, ro_product("brand")),
    Rule::copy(Init, PRODUCT_NAME, ro_product("name")),
    Rule::copy(Init, PRODUCT_DEVICE, ro_product("device")),
    Rule {
        stage: Init,
        action: Action::Model,
        target: ro_product("model"),
        mode: Mode::UpdateOnly,
    },
    // Lock-down bundle
    Rule::fixed(BootCompleted, "1", Single("ro.boot.flash.locked")),
    Rule::fixed(BootCompleted, "locked", Single("ro.boot.vbmeta.device_state")),
    Rule::fixed(BootCompleted, "locked", Single("vendor.boot.vbmeta.device_state")),
    Rule::fixed(BootCompleted, "green", Single("ro.boot.verifiedbootstate")),
    Rule::fixed(BootCompleted, "green", Single("vendor.boot.verifiedbootstate")),
    Rule::fixed(BootCompleted, "enforcing", Single("ro.boot.veritymode")),
    Rule::fixed(BootCompleted, "0", Single("ro.is_ever_orange")),
    Rule::fixed(BootCompleted, "0", ro("warranty_bit")),
];

// =============================================================================
// ENGINE
// =============================================================================

/// Applies the rules of one stage, using one configuration.
///
/// The engine borrows the configuration and holds nothing else: every run
/// starts from the store's current contents.
#[derive(Debug, Clone, Copy)]
pub struct OverrideEngine<'a> {
    config: &'a Config,
    stage: Stage,
}

impl<'a> OverrideEngine<'a> {
    #[must_use]
    pub fn new(config: &'a Config, stage: Stage) -> Self {
        Self { config, stage }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Rules gated on this engine's stage, in table order.
    pub fn rules(&self) -> impl Iterator<Item = &'static Rule> + use<> {
        let stage = self.stage;
        RULES.iter().filter(move |rule| rule.stage == stage)
    }

    /// Apply every rule of the current stage to `store`.
    pub fn run<S: PropertyStore>(&self, store: &mut S) -> OverrideReport {
        let mut report = OverrideReport::new();

        for rule in self.rules() {
            let Some(value) = self.resolve(rule, &*store) else {
                continue;
            };
            for name in rule.target.names() {
                let outcome = apply_override(store, &name, &value, rule.mode);
                report.record(name, value.as_str(), outcome);
            }
        }

        report
    }

    /// The value a rule writes, or `None` if it has nothing to do.
    fn resolve<S: PropertyStore>(&self, rule: &Rule, store: &S) -> Option<String> {
        match rule.action {
            Action::Copy(key) => self.config.get(key).map(str::to_owned),
            Action::Fixed(value) => Some(value.to_owned()),
            Action::Model => self.model_value(store),
        }
    }

    /// Model name to write to every `ro.product.*model` property.
    ///
    /// With `FORCE_BASIC_ATTESTATION=1` the chosen value gets one trailing
    /// space: `PRODUCT_MODEL`, else `PRODUCT_DEVICE`, else the store's own
    /// current `ro.product.model`. Without it, `PRODUCT_MODEL` is used
    /// verbatim when present.
    pub fn model_value<S: PropertyStore>(&self, store: &S) -> Option<String> {
        if self.config.get(FORCE_BASIC_ATTESTATION) == Some(FORCE_BASIC_ATTESTATION_ON) {
            let base = self
                .config
                .get(PRODUCT_MODEL)
                .or_else(|| self.config.get(PRODUCT_DEVICE))
                .map(str::to_owned)
                .or_else(|| store.get("ro.product.model"))?;
            Some(format!("{base} "))
        } else {
            self.config.get(PRODUCT_MODEL).map(str::to_owned)
        }
    }
}

/// Write `value` to `name`, honoring `mode` for missing properties.
pub fn apply_override<S: PropertyStore>(
    store: &mut S,
    name: &str,
    value: &str,
    mode: Mode,
) -> Outcome {
    match store.find(name) {
        Some(handle) => {
            if store.update(handle, value) {
                Outcome::Updated
            } else {
                Outcome::Rejected
            }
        }
        None => match mode {
            Mode::UpdateOnly => Outcome::Skipped,
            Mode::UpdateOrAdd => {
                if store.add(name, value) {
                    Outcome::Added
                } else {
                    Outcome::Rejected
                }
            }
        },
    }
}

// =============================================================================
// TESTS
// =============================================================================
