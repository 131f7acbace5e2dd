//! # Campus Library
//!
//! This library exposes the driver modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod logging;
pub mod scenario;

// Re-export campus_core for convenience
pub use campus_core;
