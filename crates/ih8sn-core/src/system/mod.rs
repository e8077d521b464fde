//! # System Module
//!
//! Lifecycle stages at which ih8sn is invoked.
//!
//! The stage is the only input that gates which override rules may run.
//! It is parsed before the store is touched, so an invalid stage never
//! causes a mutation.

mod stage;

pub use stage::*;
