//! Adapter layer for the worker's contact with the OS and its peers.
//!
//! Provides adapters for:
//! - Framed blocking message I/O over an inherited socket
//! - Sandbox bootstrap (chroot, seccomp, identity drop)

pub mod channel;
pub mod sandbox;
