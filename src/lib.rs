//! Certificate chain worker
//!
//! The sandboxed, unprivileged stage of a privilege-separated ACME client.
//! It receives the issued certificate from the network process, finds the
//! issuing CA's certificate location, has the network process fetch it, and
//! hands PEM-encoded chain and certificate to the filesystem writer.

pub mod adapters;
pub mod domain;
pub mod infra;
pub mod pipelines;
pub mod services;

pub use adapters::channel::Channel;
pub use adapters::sandbox::{bootstrap, Confinement, Identity, OsConfinement};
pub use domain::{AccessDescriptor, Certificate, EncodedChain, IssuerUri, MessageKind, RawBuffer};
pub use infra::config::{ConfigManager, SyscallFilterMode, WorkerConfiguration};
pub use infra::error::{
    BootstrapError, BootstrapStage, CertprocError, CertprocResult, ChannelError, DecodeError,
    EncodeError, ResolveError,
};
pub use pipelines::{CertProcWorkflow, WorkerReport};
pub use services::{
    CertificateDecoder, ChainCoordinator, EncodingNormalizer, IssuerPolicy, IssuerResolver,
};
