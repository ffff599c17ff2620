//! One-shot, irreversible capability reduction.
//!
//! # Ordering
//!
//! ```text
//! 1. activate_profile    platform confinement (Linux: no_new_privs)
//! 2. confine_root        chroot into an empty directory, chdir("/")
//! 3. Diagnostics::prepare reserve the diagnostic buffer
//! 4. restrict_syscalls   seccomp filter: no more filesystem or network access
//! 5. drop_identity       switch to the unprivileged uid/gid
//! ```
//!
//! Each step narrows what the process can do and none can be undone. All
//! five complete before the first byte is read from a peer.

mod os;
#[cfg(target_os = "linux")]
mod seccomp;

pub use os::OsConfinement;

use std::path::Path;

use crate::infra::diagnostics::Diagnostics;
use crate::infra::error::BootstrapError;

/// Unprivileged identity assigned by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub uid: u32,
    pub gid: u32,
}

impl Identity {
    #[must_use]
    pub const fn new(uid: u32, gid: u32) -> Self {
        Self { uid, gid }
    }
}

/// OS-facing bootstrap steps.
pub trait Confinement {
    fn activate_profile(&mut self) -> Result<(), BootstrapError>;
    fn confine_root(&mut self, root: &Path) -> Result<(), BootstrapError>;
    fn restrict_syscalls(&mut self) -> Result<(), BootstrapError>;
    fn drop_identity(&mut self, identity: Identity) -> Result<(), BootstrapError>;
}

/// Run the five bootstrap steps in order, stopping at the first failure.
pub fn bootstrap<C: Confinement + ?Sized>(
    confinement: &mut C,
    root: &Path,
    identity: Identity,
    diagnostics: &mut Diagnostics,
) -> Result<(), BootstrapError> {
    confinement.activate_profile()?;
    log::debug!("Sandbox profile active");

    confinement.confine_root(root)?;
    log::debug!("Filesystem root confined to {}", root.display());

    diagnostics.prepare()?;

    confinement.restrict_syscalls()?;
    log::debug!("Syscall surface restricted");

    confinement.drop_identity(identity)?;
    log::info!(
        "Sandbox ready: root={}, uid={}, gid={}",
        root.display(),
        identity.uid,
        identity.gid
    );
    Ok(())
}
