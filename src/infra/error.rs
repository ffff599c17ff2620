//! Error types for the certificate worker.
//!
//! Each stage owns a small error enum; `CertprocError` is the single
//! terminal outcome surfaced to the supervisor.

use crate::domain::MessageKind;
use thiserror::Error;

/// Result type for worker operations
pub type CertprocResult<T> = Result<T, CertprocError>;

/// Bootstrap step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStage {
    Profile,
    FilesystemRoot,
    Diagnostics,
    SyscallFilter,
    Identity,
}

impl BootstrapStage {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            BootstrapStage::Profile => "sandbox profile",
            BootstrapStage::FilesystemRoot => "filesystem root",
            BootstrapStage::Diagnostics => "diagnostics",
            BootstrapStage::SyscallFilter => "syscall filter",
            BootstrapStage::Identity => "identity drop",
        }
    }
}

impl std::fmt::Display for BootstrapStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Irreversible capability reduction failed.
#[derive(Error, Debug, miette::Diagnostic)]
#[error("{stage}: {reason}")]
pub struct BootstrapError {
    pub stage: BootstrapStage,
    pub reason: String,
}

impl BootstrapError {
    pub fn new(stage: BootstrapStage, reason: impl Into<String>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }
}

/// Failures on a framed peer channel.
#[derive(Error, Debug, miette::Diagnostic)]
pub enum ChannelError {
    #[error("peer closed the channel while {kind} was expected")]
    Closed { kind: MessageKind },

    #[error("expected {expected} message, peer sent {found}")]
    UnexpectedKind {
        expected: MessageKind,
        found: MessageKind,
    },

    #[error("unknown message tag {0:#010x}")]
    UnknownKind(u32),

    #[error("{kind} message of {len} bytes exceeds limit of {max} bytes")]
    Oversized {
        kind: MessageKind,
        len: usize,
        max: usize,
    },

    #[error("I/O failure on {kind} message: {source}")]
    Io {
        kind: MessageKind,
        #[source]
        source: std::io::Error,
    },
}

/// Input bytes are not a single well-formed DER certificate.
#[derive(Error, Debug, Clone, PartialEq, Eq, miette::Diagnostic)]
pub enum DecodeError {
    #[error("malformed certificate: {0}")]
    Malformed(String),
}

impl From<der::Error> for DecodeError {
    fn from(error: der::Error) -> Self {
        DecodeError::Malformed(error.to_string())
    }
}

/// A decodable certificate that cannot be chained.
#[derive(Error, Debug, Clone, PartialEq, Eq, miette::Diagnostic)]
pub enum ResolveError {
    #[error("certificate has no Authority Information Access extension")]
    NoIssuerExtension,

    #[error("no CA issuer registered with certificate")]
    NoIssuerUri,

    #[error("unusable Authority Information Access extension: {0}")]
    MalformedExtension(String),
}

/// Text re-encoding failed.
#[derive(Error, Debug, Clone, PartialEq, Eq, miette::Diagnostic)]
pub enum EncodeError {
    #[error("chain is neither PEM nor a DER certificate: {0}")]
    UnreadableChain(#[source] DecodeError),

    #[error("PEM encoding failed: {0}")]
    Pem(String),
}

/// Terminal outcome of one worker run.
#[derive(Error, Debug, miette::Diagnostic)]
pub enum CertprocError {
    #[error("sandbox bootstrap failed: {0}")]
    FatalBootstrap(#[from] BootstrapError),

    #[error("channel failure: {0}")]
    ChannelIo(#[from] ChannelError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("chain subject {found} does not match certificate issuer {expected}")]
    IssuerMismatch { expected: String, found: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CertprocError {
    /// Stable label for the final status line.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            CertprocError::FatalBootstrap(_) => "FatalBootstrap",
            CertprocError::ChannelIo(_) => "ChannelIO",
            CertprocError::Decode(_) => "Malformed",
            CertprocError::Resolve(ResolveError::NoIssuerExtension) => "NoIssuerExtension",
            CertprocError::Resolve(ResolveError::NoIssuerUri) => "NoIssuerURI",
            CertprocError::Resolve(ResolveError::MalformedExtension(_)) => "MalformedExtension",
            CertprocError::Encode(_) => "EncodeError",
            CertprocError::IssuerMismatch { .. } => "IssuerMismatch",
            CertprocError::Configuration(_) => "Configuration",
        }
    }
}
