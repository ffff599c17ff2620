//! Encoding normalization service.
//!
//! Produces the PEM text the writer peer stores. Input that already starts
//! with the PEM certificate marker passes through untouched; anything else
//! must decode as exactly one DER certificate and is re-encoded.

use der::pem::LineEnding;
use der::EncodePem;

use crate::domain::constants::PEM_CERTIFICATE_MARKER;
use crate::domain::{Certificate, EncodedChain, RawBuffer};
use crate::infra::error::EncodeError;
use crate::services::CertificateDecoder;

pub struct EncodingNormalizer;

impl EncodingNormalizer {
    /// Whether `bytes` is already PEM text.
    ///
    /// The buffer must be strictly longer than the marker and begin with it.
    #[must_use]
    pub fn is_text_encoded(bytes: &[u8]) -> bool {
        let marker = PEM_CERTIFICATE_MARKER.as_bytes();
        bytes.len() > marker.len() && bytes.starts_with(marker)
    }

    /// Normalize a chain received from the network peer.
    pub fn normalize(buf: RawBuffer) -> Result<EncodedChain, EncodeError> {
        if Self::is_text_encoded(buf.as_bytes()) {
            log::debug!(
                "Chain is already PEM ({} bytes), passing through",
                buf.len()
            );
            return Ok(EncodedChain::from_text(buf.into_vec()));
        }

        log::debug!("Chain is not PEM, decoding {} bytes as DER", buf.len());
        let cert = CertificateDecoder::decode(buf).map_err(EncodeError::UnreadableChain)?;
        Self::encode_certificate(&cert)
    }

    /// Re-encode a decoded certificate as PEM.
    pub fn encode_certificate(cert: &Certificate) -> Result<EncodedChain, EncodeError> {
        let pem = cert
            .inner()
            .to_pem(LineEnding::LF)
            .map_err(|e| EncodeError::Pem(e.to_string()))?;
        Ok(EncodedChain::from_text(pem.into_bytes()))
    }
}
