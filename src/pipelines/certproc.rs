//! `CertProcWorkflow`: the worker's single entry operation.
//!
//! ```text
//! bootstrap -> receive certificate -> decode -> resolve issuer
//!   -> request chain -> receive chain -> normalize -> (policy)
//!   -> forward chain -> forward certificate -> success
//! ```
//!
//! Any failure jumps straight to cleanup. Cleanup runs on every path:
//! held objects drop at scope end, both channels close, the diagnostic
//! context is drained to the log.

use std::fmt::Display;
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::adapters::sandbox::{self, Confinement, Identity};
use crate::domain::IssuerUri;
use crate::infra::config::WorkerConfiguration;
use crate::infra::diagnostics::Diagnostics;
use crate::infra::error::{CertprocError, CertprocResult};
use crate::services::{
    CertificateDecoder, ChainCoordinator, EncodingNormalizer, IssuerPolicy, IssuerResolver,
};

/// What a successful run delivered to the writer peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub issuer: IssuerUri,
    pub chain_bytes: usize,
    pub certificate_bytes: usize,
}

/// Orchestrates one certificate-to-chain conversion.
pub struct CertProcWorkflow<C, N, W>
where
    C: Confinement,
    N: Read + Write,
    W: Read + Write,
{
    confinement: C,
    coordinator: ChainCoordinator<N, W>,
    identity: Identity,
    empty_root: PathBuf,
    policy: IssuerPolicy,
    diagnostics: Diagnostics,
}

impl<C, N, W> CertProcWorkflow<C, N, W>
where
    C: Confinement,
    N: Read + Write,
    W: Read + Write,
{
    pub fn new(
        confinement: C,
        coordinator: ChainCoordinator<N, W>,
        identity: Identity,
        config: &WorkerConfiguration,
    ) -> Self {
        Self {
            confinement,
            coordinator,
            identity,
            empty_root: config.empty_root.clone(),
            policy: config.issuer_policy,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Run every stage, then clean up regardless of outcome.
    pub fn run(mut self) -> CertprocResult<WorkerReport> {
        let result = self.execute();

        let Self {
            coordinator,
            mut diagnostics,
            ..
        } = self;
        coordinator.close();
        diagnostics.emit();

        match &result {
            Ok(report) => log::info!(
                "Chain for {} delivered ({} + {} bytes PEM)",
                report.issuer,
                report.chain_bytes,
                report.certificate_bytes
            ),
            Err(e) => log::error!("Certificate processing failed [{}]: {e}", e.kind()),
        }
        result
    }

    fn execute(&mut self) -> CertprocResult<WorkerReport> {
        let diag = &mut self.diagnostics;
        let coordinator = &mut self.coordinator;

        let booted = sandbox::bootstrap(
            &mut self.confinement,
            &self.empty_root,
            self.identity,
            diag,
        );
        record(diag, "bootstrap", booted)?;

        let raw = record(
            diag,
            "receive certificate",
            coordinator.receive_certificate(),
        )?;
        log::info!("Received signed certificate ({} bytes)", raw.len());
        let cert = record(diag, "decode certificate", CertificateDecoder::decode(raw))?;

        let issuer = record(diag, "resolve issuer", IssuerResolver::resolve(&cert))?;

        record(diag, "request chain", coordinator.request_chain(&issuer))?;
        let raw_chain = record(diag, "receive chain", coordinator.receive_chain())?;
        log::info!("Received certificate chain ({} bytes)", raw_chain.len());

        let chain = record(
            diag,
            "normalize chain",
            EncodingNormalizer::normalize(raw_chain),
        )?;
        record(diag, "issuer policy", self.policy.check(&cert, &chain))?;
        record(diag, "forward chain", coordinator.forward_chain(&chain))?;

        let pem = record(
            diag,
            "encode certificate",
            EncodingNormalizer::encode_certificate(&cert),
        )?;
        record(
            diag,
            "forward certificate",
            coordinator.forward_certificate(&pem),
        )?;

        Ok(WorkerReport {
            issuer,
            chain_bytes: chain.len(),
            certificate_bytes: pem.len(),
        })
    }
}

/// Note a stage failure in the diagnostic context and lift it to `CertprocError`.
fn record<T, E>(
    diag: &mut Diagnostics,
    stage: &'static str,
    result: Result<T, E>,
) -> CertprocResult<T>
where
    E: Display + Into<CertprocError>,
{
    result.map_err(|e| {
        diag.record(stage, e.to_string());
        e.into()
    })
}
