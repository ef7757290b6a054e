//! This crate is intended to contain code that is required to provide or
//! improve the observability of the deployer. For now that is the
//! initialization logic for logging and a panic hook that logs through it.
pub mod config;
pub mod panic_hook;
pub mod tracing;

pub use config::Config;
