//! Utility types and functions used throughout the crate.
//!
//! # Contents
//!
//! - [`ExitCode`]: Process termination status
//! - [`measure_fn`]: Execution timing

mod exit;
mod measure;

pub(crate) use self::exit::ExitCode;
pub(crate) use self::measure::measure_fn;
