//! # ih8sn
//!
//! Application layer around `ih8sn-core`: argument parsing, logging and
//! the property store backends.
//!
//! - [`cli`]: the clap interface and the run driver
//! - [`backend`]: the native Android store and the host snapshot store

pub mod backend;
pub mod cli;
