//! Trust policy applied to the chain returned by the network peer.

use der::DecodePem;
use serde::{Deserialize, Serialize};

use crate::domain::{Certificate, EncodedChain};
use crate::infra::error::{CertprocError, CertprocResult, EncodeError};

/// How far the fetched chain is trusted before it is forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssuerPolicy {
    /// Whatever the network peer returned is forwarded.
    #[default]
    Delegated,
    /// The first chain certificate's subject must equal the leaf's issuer.
    SubjectName,
}

impl IssuerPolicy {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            IssuerPolicy::Delegated => "delegated",
            IssuerPolicy::SubjectName => "subject-name",
        }
    }

    /// Check `chain` against the certificate it is meant to issue.
    pub fn check(&self, leaf: &Certificate, chain: &EncodedChain) -> CertprocResult<()> {
        match self {
            IssuerPolicy::Delegated => Ok(()),
            IssuerPolicy::SubjectName => {
                let first = x509_cert::Certificate::from_pem(first_pem_block(chain.as_bytes()))
                    .map_err(|e| EncodeError::Pem(e.to_string()))?;
                let expected = &leaf.inner().tbs_certificate.issuer;
                let found = &first.tbs_certificate.subject;
                if expected == found {
                    log::debug!("Chain subject matches certificate issuer {expected}");
                    Ok(())
                } else {
                    Err(CertprocError::IssuerMismatch {
                        expected: expected.to_string(),
                        found: found.to_string(),
                    })
                }
            }
        }
    }
}

/// Slice up to and including the first END boundary line.
fn first_pem_block(text: &[u8]) -> &[u8] {
    const END: &[u8] = b"-----END CERTIFICATE-----";
    let Some(pos) = text.windows(END.len()).position(|w| w == END) else {
        return text;
    };
    let end = pos + END.len();
    match text[end..].iter().position(|&b| b == b'\n') {
        Some(eol) => &text[..end + eol + 1],
        None => &text[..end],
    }
}
