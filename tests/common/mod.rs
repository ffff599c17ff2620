//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod confinement;
pub mod fixtures;
pub mod peers;
