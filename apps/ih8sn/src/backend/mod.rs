//! # Property Store Backends
//!
//! - `android`: bionic's property area, the store ih8sn exists to rewrite
//! - `snapshot`: a [`MemoryStore`](ih8sn_core::MemoryStore) seeded from a
//!   property dump, for dry runs on a host

#[cfg(target_os = "android")]
mod android;
mod snapshot;

#[cfg(target_os = "android")]
pub use android::*;
pub use snapshot::*;
