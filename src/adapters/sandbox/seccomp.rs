//! Linux seccomp-bpf filter for the certificate worker.
//!
//! After bootstrap the worker only needs memory, reads and writes on its
//! two inherited sockets and stderr, and the `set*id` calls of the identity
//! drop that follows. Those are allowed; every other syscall fails with
//! `EPERM`.

use std::collections::BTreeMap;

use seccompiler::{BpfProgram, SeccompAction, SeccompFilter, SeccompRule, TargetArch};

use crate::infra::error::{BootstrapError, BootstrapStage};

/// Syscalls the worker may still make once the filter is active.
const ALLOWED: &[libc::c_long] = &[
    // Stream I/O on inherited descriptors
    libc::SYS_read,
    libc::SYS_readv,
    libc::SYS_write,
    libc::SYS_writev,
    libc::SYS_recvfrom,
    libc::SYS_recvmsg,
    libc::SYS_sendto,
    libc::SYS_sendmsg,
    libc::SYS_close,
    // Memory
    libc::SYS_brk,
    libc::SYS_mmap,
    libc::SYS_munmap,
    libc::SYS_mremap,
    libc::SYS_mprotect,
    libc::SYS_madvise,
    // Signals, threads, time
    libc::SYS_rt_sigreturn,
    libc::SYS_rt_sigprocmask,
    libc::SYS_rt_sigaction,
    libc::SYS_sigaltstack,
    libc::SYS_futex,
    libc::SYS_sched_yield,
    libc::SYS_getrandom,
    libc::SYS_clock_gettime,
    // Abort path
    libc::SYS_getpid,
    libc::SYS_gettid,
    libc::SYS_tgkill,
    // Identity drop and its verification
    libc::SYS_setgroups,
    libc::SYS_setresgid,
    libc::SYS_setresuid,
    libc::SYS_setgid,
    libc::SYS_setuid,
    libc::SYS_getuid,
    libc::SYS_geteuid,
    libc::SYS_getgid,
    libc::SYS_getegid,
    libc::SYS_getresuid,
    libc::SYS_getresgid,
    // Exit
    libc::SYS_exit,
    libc::SYS_exit_group,
];

/// Syscall numbers the filter lets through on this architecture.
pub(super) fn allowed_syscalls() -> Vec<i64> {
    ALLOWED.iter().map(|&nr| i64::from(nr)).collect()
}

fn compile() -> Result<BpfProgram, BootstrapError> {
    let fail = |reason: String| BootstrapError::new(BootstrapStage::SyscallFilter, reason);

    let arch: TargetArch = std::env::consts::ARCH
        .try_into()
        .map_err(|e| fail(format!("unsupported architecture: {e:?}")))?;

    // Empty rule list: unconditional match.
    let rules: BTreeMap<i64, Vec<SeccompRule>> = allowed_syscalls()
        .into_iter()
        .map(|nr| (nr, vec![]))
        .collect();

    let filter = SeccompFilter::new(
        rules,
        SeccompAction::Errno(libc::EPERM as u32),
        SeccompAction::Allow,
        arch,
    )
    .map_err(|e| fail(format!("failed to create seccomp filter: {e}")))?;

    filter.try_into().map_err(|e: seccompiler::BackendError| {
        fail(format!("failed to compile BPF program: {e}"))
    })
}

fn apply(program: &BpfProgram) -> Result<(), BootstrapError> {
    seccompiler::apply_filter(program).map_err(|e| {
        BootstrapError::new(
            BootstrapStage::SyscallFilter,
            format!("failed to apply seccomp filter: {e}"),
        )
    })
}

/// Install the filter on the calling process. Irreversible.
pub(super) fn install() -> Result<usize, BootstrapError> {
    apply(&compile()?)?;
    Ok(ALLOWED.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;
    use std::io::Read;
    use std::os::fd::AsRawFd;
    use std::os::unix::ffi::OsStrExt;
    use std::os::unix::net::UnixStream;

    use nix::sys::wait::{waitpid, WaitStatus};
    use nix::unistd::{fork, ForkResult};

    #[test]
    fn filesystem_and_network_are_not_allowed() {
        let allowed = allowed_syscalls();
        for denied in [
            libc::SYS_openat,
            libc::SYS_renameat2,
            libc::SYS_unlinkat,
            libc::SYS_io_uring_setup,
            libc::SYS_clone,
            libc::SYS_socket,
            libc::SYS_connect,
            libc::SYS_execve,
        ] {
            assert!(!allowed.contains(&i64::from(denied)));
        }
        #[cfg(target_arch = "x86_64")]
        for denied in [
            libc::SYS_open,
            libc::SYS_rename,
            libc::SYS_renameat,
            libc::SYS_fork,
        ] {
            assert!(!allowed.contains(&i64::from(denied)));
        }
    }

    #[test]
    fn keeps_identity_and_stream_io() {
        let allowed = allowed_syscalls();
        for needed in [
            libc::SYS_read,
            libc::SYS_write,
            libc::SYS_recvfrom,
            libc::SYS_sendto,
            libc::SYS_setresuid,
            libc::SYS_setresgid,
            libc::SYS_setgroups,
            libc::SYS_close,
            libc::SYS_exit_group,
        ] {
            assert!(allowed.contains(&i64::from(needed)));
        }
    }

    #[test]
    fn filter_compiles_without_applying() {
        compile().expect("BPF compilation should succeed");
    }

    /// Bit set in the child's exit code for each expectation that failed.
    const OPEN_ALLOWED: i32 = 1;
    const RENAME_ALLOWED: i32 = 2;
    const IO_URING_ALLOWED: i32 = 4;
    const WRITE_DENIED: i32 = 8;
    const APPLY_FAILED: i32 = 16;

    const REPLY: &[u8] = b"ok";

    fn denied_with_eperm(ret: libc::c_long) -> bool {
        ret == -1 && std::io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
    }

    #[test]
    fn applied_filter_blocks_filesystem_but_not_sockets() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("a");
        let to = dir.path().join("b");
        std::fs::write(&from, b"x").unwrap();
        let from_c = CString::new(from.as_os_str().as_bytes()).unwrap();
        let to_c = CString::new(to.as_os_str().as_bytes()).unwrap();
        let root_c = CString::new("/").unwrap();
        let (mut parent_end, child_end) = UnixStream::pair().unwrap();
        let program = compile().unwrap();

        // Only raw syscalls in the child; the parent may hold allocator locks.
        match unsafe { fork() }.unwrap() {
            ForkResult::Child => {
                let mut failed = 0;
                let no_new_privs = unsafe { libc::prctl(libc::PR_SET_NO_NEW_PRIVS, 1, 0, 0, 0) };
                if no_new_privs != 0 || apply(&program).is_err() {
                    unsafe { libc::_exit(APPLY_FAILED) };
                }
                let open = unsafe {
                    libc::syscall(
                        libc::SYS_openat,
                        libc::AT_FDCWD,
                        root_c.as_ptr(),
                        libc::O_RDONLY,
                    )
                };
                if !denied_with_eperm(open) {
                    failed |= OPEN_ALLOWED;
                }
                let rename = unsafe {
                    libc::syscall(
                        libc::SYS_renameat2,
                        libc::AT_FDCWD,
                        from_c.as_ptr(),
                        libc::AT_FDCWD,
                        to_c.as_ptr(),
                        0,
                    )
                };
                if !denied_with_eperm(rename) {
                    failed |= RENAME_ALLOWED;
                }
                let ring = unsafe {
                    libc::syscall(libc::SYS_io_uring_setup, 1, std::ptr::null_mut::<u8>())
                };
                if !denied_with_eperm(ring) {
                    failed |= IO_URING_ALLOWED;
                }
                let wrote = unsafe {
                    libc::write(child_end.as_raw_fd(), REPLY.as_ptr().cast(), REPLY.len())
                };
                if wrote != REPLY.len() as isize {
                    failed |= WRITE_DENIED;
                }
                unsafe { libc::_exit(failed) };
            }
            ForkResult::Parent { child } => {
                drop(child_end);
                let status = waitpid(child, None).unwrap();
                assert_eq!(status, WaitStatus::Exited(child, 0));

                let mut reply = Vec::new();
                parent_end.read_to_end(&mut reply).unwrap();
                assert_eq!(reply, REPLY);
                assert!(from.exists());
                assert!(!to.exists());
            }
        }
    }
}
