//! certproc: sandboxed certificate chain worker
//!
//! Started by the orchestrating ACME client with two connected sockets
//! already open: one to the network process, one to the file writer.

use std::os::fd::{FromRawFd, OwnedFd, RawFd};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

use certproc::{
    CertProcWorkflow, ChainCoordinator, Channel, ConfigManager, Identity, OsConfinement,
    WorkerConfiguration,
};
use clap::Parser;
use miette::{IntoDiagnostic, Result};

#[derive(Parser)]
#[command(name = "certproc")]
#[command(about = "Normalize an issued certificate and its CA chain inside a sandbox")]
#[command(long_about = "
certproc - certificate chain worker of a privilege-separated ACME client

Receives the issued DER certificate on --net-fd, asks the network process
for the certificate named by its CA Issuers URI, and writes PEM chain and
certificate to --writer-fd. The process chroots, installs a syscall filter
and drops to --uid/--gid before reading anything.

ENVIRONMENT VARIABLES:
    RUST_LOG        Logging level (debug, info, warn, error)
")]
#[command(version)]
struct Cli {
    /// Inherited socket connected to the network process
    #[arg(long, value_name = "FD")]
    net_fd: RawFd,

    /// Inherited socket connected to the file writer process
    #[arg(long, value_name = "FD")]
    writer_fd: RawFd,

    /// Unprivileged user id to drop to
    #[arg(long)]
    uid: u32,

    /// Unprivileged group id to drop to
    #[arg(long)]
    gid: u32,

    /// Worker configuration file (TOML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &cli.config {
        Some(path) => ConfigManager::with_path(path).load_or_default()?,
        None => WorkerConfiguration::default(),
    };

    if cli.net_fd == cli.writer_fd {
        return Err(miette::miette!("--net-fd and --writer-fd must differ"));
    }
    let net = inherited_socket(cli.net_fd)?;
    let writer = inherited_socket(cli.writer_fd)?;

    let max_payload = config.max_message_bytes as usize;
    let coordinator = ChainCoordinator::new(
        Channel::new(net, "netproc", max_payload),
        Channel::new(writer, "fileproc", max_payload),
    );

    let workflow = CertProcWorkflow::new(
        OsConfinement::new(config.syscall_filter),
        coordinator,
        Identity::new(cli.uid, cli.gid),
        &config,
    );
    workflow.run()?;
    Ok(())
}

fn inherited_socket(fd: RawFd) -> Result<UnixStream> {
    if fd < 0 {
        return Err(miette::miette!("invalid descriptor {fd}"));
    }
    // SAFETY: the orchestrator passes each descriptor to this process only,
    // and this is the single place it is taken over.
    let owned = unsafe { OwnedFd::from_raw_fd(fd) };
    let stream = UnixStream::from(owned);
    // Reject descriptors that are not sockets before bootstrap.
    stream.peer_addr().into_diagnostic()?;
    Ok(stream)
}
