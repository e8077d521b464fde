//! # Innate Primitives
//!
//! Hardcoded constants shared by the locator, expander and engine.
//!
//! These are compiled into the binary and are immutable at runtime.
//! The partition order and identity order are observable (they decide
//! which file is picked and the order writes happen in), so changing
//! either is a behavior change.

/// Default configuration path on the device.
///
/// Device-qualified variants live next to it as `<path>.<identity>`.
pub const DEFAULT_CONFIG_PATH: &str = "/system/etc/ih8sn.conf";

/// Identity properties consulted by the config locator, in priority order:
/// product, model, serial number.
pub const IDENTITY_PROPERTIES: [&str; 3] =
    ["ro.build.product", "ro.build.model", "ro.boot.serialno"];

/// Partition infixes that keep one logical property consistent across
/// every partition-scoped namespace.
///
/// The empty segment comes first, so `expand("ro.", "build.tags")` starts
/// with `ro.build.tags`.
pub const PARTITION_SEGMENTS: [&str; 13] = [
    "",
    "boot.",
    "bootimage.",
    "odm_dlkm.",
    "odm.",
    "oem.",
    "product.",
    "system_dlkm.",
    "system_ext.",
    "system.",
    "vendor_dlkm.",
    "vendor.",
    "vendor.boot.",
];

/// Size of the buffer a native property value is read into, NUL included.
pub const PROP_VALUE_MAX: usize = 92;

/// Value of `FORCE_BASIC_ATTESTATION` that turns the model rule into its
/// trailing-space form.
pub const FORCE_BASIC_ATTESTATION_ON: &str = "1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_segment_is_first() {
        assert_eq!(PARTITION_SEGMENTS[0], "");
        assert_eq!(PARTITION_SEGMENTS[12], "vendor.boot.");
    }

    #[test]
    fn identity_priority_order() {
        assert_eq!(
            IDENTITY_PROPERTIES,
            ["ro.build.product", "ro.build.model", "ro.boot.serialno"]
        );
    }
}
