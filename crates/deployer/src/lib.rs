#![forbid(unsafe_code)]

pub mod cli;
pub mod domain;
pub mod infra;
mod run;

pub use run::{Outcome, conclude, start};
