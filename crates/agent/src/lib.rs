//! `roadwatch-agent` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod config;
pub mod display;
pub mod error;
pub mod journal;
pub mod runner;
pub mod source;
