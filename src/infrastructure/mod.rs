//! Infrastructure
//!
//! This module contains the plumbing around the core:
//! - Configuration management
//! - Logging
//! - Atomic file replacement

pub mod config;
pub mod fs;
pub mod logging;

pub use fs::write_atomic;
pub use logging::init_logging;
