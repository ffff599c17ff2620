//! Infrastructure layer for cross-cutting concerns.
//!
//! Provides:
//! - Configuration loading and validation
//! - Error taxonomy and result types
//! - The diagnostic context drained at cleanup

pub mod config;
pub mod diagnostics;
pub mod error;
