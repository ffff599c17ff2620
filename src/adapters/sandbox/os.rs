use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use nix::unistd::{self, Gid, Uid};

use super::{Confinement, Identity};
use crate::infra::config::SyscallFilterMode;
use crate::infra::error::{BootstrapError, BootstrapStage};

/// Confinement backed by the host kernel.
#[derive(Debug, Clone)]
pub struct OsConfinement {
    syscall_filter: SyscallFilterMode,
}

impl OsConfinement {
    #[must_use]
    pub fn new(syscall_filter: SyscallFilterMode) -> Self {
        Self { syscall_filter }
    }
}

impl Confinement for OsConfinement {
    fn activate_profile(&mut self) -> Result<(), BootstrapError> {
        #[cfg(target_os = "linux")]
        nix::sys::prctl::set_no_new_privs().map_err(|e| {
            BootstrapError::new(BootstrapStage::Profile, format!("PR_SET_NO_NEW_PRIVS: {e}"))
        })?;
        #[cfg(not(target_os = "linux"))]
        log::warn!("No process confinement profile available on this platform");
        Ok(())
    }

    fn confine_root(&mut self, root: &Path) -> Result<(), BootstrapError> {
        let fail = |reason: String| BootstrapError::new(BootstrapStage::FilesystemRoot, reason);

        check_empty_root(root).map_err(fail)?;
        unistd::chroot(root).map_err(|e| fail(format!("{}: chroot: {e}", root.display())))?;
        unistd::chdir("/").map_err(|e| fail(format!("/: chdir: {e}")))?;
        Ok(())
    }

    fn restrict_syscalls(&mut self) -> Result<(), BootstrapError> {
        if self.syscall_filter == SyscallFilterMode::Off {
            log::warn!("Syscall filter disabled by configuration");
            return Ok(());
        }

        #[cfg(target_os = "linux")]
        {
            let allowed = super::seccomp::install()?;
            log::debug!("Seccomp filter installed, {allowed} syscalls allowed");
        }
        #[cfg(not(target_os = "linux"))]
        log::warn!("No syscall filter available on this platform");

        Ok(())
    }

    fn drop_identity(&mut self, identity: Identity) -> Result<(), BootstrapError> {
        let fail = |reason: String| BootstrapError::new(BootstrapStage::Identity, reason);
        let uid = Uid::from_raw(identity.uid);
        let gid = Gid::from_raw(identity.gid);

        #[cfg(target_os = "linux")]
        {
            unistd::setgroups(&[gid]).map_err(|e| fail(format!("setgroups: {e}")))?;
            unistd::setresgid(gid, gid, gid).map_err(|e| fail(format!("setresgid: {e}")))?;
            unistd::setresuid(uid, uid, uid).map_err(|e| fail(format!("setresuid: {e}")))?;
        }
        #[cfg(not(target_os = "linux"))]
        {
            unistd::setgid(gid).map_err(|e| fail(format!("setgid: {e}")))?;
            unistd::setuid(uid).map_err(|e| fail(format!("setuid: {e}")))?;
        }

        if unistd::getuid() != uid
            || unistd::geteuid() != uid
            || unistd::getgid() != gid
            || unistd::getegid() != gid
        {
            return Err(fail("process ids do not match target identity".to_string()));
        }
        if !uid.is_root() && unistd::setuid(Uid::from_raw(0)).is_ok() {
            return Err(fail("root privileges could be regained".to_string()));
        }
        Ok(())
    }
}

/// The new root must be an existing, empty directory nobody but its owner can write.
fn check_empty_root(root: &Path) -> Result<(), String> {
    let meta = fs::metadata(root).map_err(|e| format!("{}: {e}", root.display()))?;
    if !meta.is_dir() {
        return Err(format!("{}: not a directory", root.display()));
    }
    if meta.permissions().mode() & 0o022 != 0 {
        return Err(format!("{}: group or world writable", root.display()));
    }
    let mut entries = fs::read_dir(root).map_err(|e| format!("{}: {e}", root.display()))?;
    if entries.next().is_some() {
        return Err(format!("{}: directory is not empty", root.display()));
    }
    Ok(())
}
