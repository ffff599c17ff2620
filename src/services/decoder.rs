//! Certificate decoding service.
//!
//! Bytes handed to this service come from a remote CA through the network
//! peer and are untrusted until they decode. Decoding is all-or-nothing:
//! the whole buffer must be exactly one DER `Certificate`.

use der::Decode;

use crate::domain::{Certificate, RawBuffer};
use crate::infra::error::DecodeError;

pub struct CertificateDecoder;

impl CertificateDecoder {
    /// Decode one DER certificate, consuming the buffer.
    ///
    /// Trailing bytes, truncation and any structural error yield
    /// [`DecodeError::Malformed`].
    pub fn decode(buf: RawBuffer) -> Result<Certificate, DecodeError> {
        Self::decode_der(buf.as_bytes())
    }

    pub(crate) fn decode_der(der: &[u8]) -> Result<Certificate, DecodeError> {
        if der.is_empty() {
            return Err(DecodeError::Malformed("empty buffer".to_string()));
        }
        let inner = x509_cert::Certificate::from_der(der).map_err(|e| {
            log::debug!("DER decode of {} bytes failed: {e}", der.len());
            DecodeError::from(e)
        })?;
        let certificate = Certificate::from_decoded(inner);
        log::debug!("Decoded {certificate:?} from {} bytes", der.len());
        Ok(certificate)
    }
}
