use std::fmt;

use super::constants::PEM_CERTIFICATE_MARKER;

/// Owned bytes received from, or destined for, a peer channel.
#[derive(Clone, PartialEq, Eq)]
pub struct RawBuffer {
    bytes: Vec<u8>,
}

/// Decoded X.509 certificate. Only constructed from a complete, successful decode.
#[derive(Clone, PartialEq, Eq)]
pub struct Certificate {
    inner: x509_cert::Certificate,
}

/// PEM text ready for the writer peer.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedChain {
    bytes: Vec<u8>,
}

impl RawBuffer {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for RawBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for RawBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl Certificate {
    pub(crate) fn from_decoded(inner: x509_cert::Certificate) -> Self {
        Self { inner }
    }
    #[must_use]
    pub fn inner(&self) -> &x509_cert::Certificate {
        &self.inner
    }
    #[must_use]
    pub fn subject(&self) -> String {
        self.inner.tbs_certificate.subject.to_string()
    }
    #[must_use]
    pub fn issuer(&self) -> String {
        self.inner.tbs_certificate.issuer.to_string()
    }
    #[must_use]
    pub fn serial_hex(&self) -> String {
        hex::encode(self.inner.tbs_certificate.serial_number.as_bytes())
    }
}

impl EncodedChain {
    /// Wrap bytes already known to start with the PEM marker.
    pub(crate) fn from_text(bytes: Vec<u8>) -> Self {
        debug_assert!(bytes.starts_with(PEM_CERTIFICATE_MARKER.as_bytes()));
        Self { bytes }
    }
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Debug for RawBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawBuffer(len={})", self.bytes.len())
    }
}
impl fmt::Debug for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Certificate(subject={}, serial={})",
            self.subject(),
            self.serial_hex()
        )
    }
}
impl fmt::Debug for EncodedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedChain(len={})", self.bytes.len())
    }
}
