//! Message kinds exchanged with the network and writer peers.
//!
//! Each frame on a channel is a 4-byte big-endian kind tag, a 4-byte
//! big-endian payload length, and the payload itself.

use std::fmt;

/// Size of the fixed frame header (tag + length).
pub const FRAME_HEADER_LEN: usize = 8;

/// Kind tag carried by every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MessageKind {
    /// Issued end-entity certificate. DER from the network peer, PEM to the writer.
    SignedCertificate = 1,
    /// UTF-8 URI of the issuing CA certificate.
    IssuerLocation = 2,
    /// Issuer certificate(s). DER or PEM from the network peer, PEM to the writer.
    CertificateChain = 3,
}

impl MessageKind {
    #[must_use]
    pub const fn tag(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub const fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            1 => Some(MessageKind::SignedCertificate),
            2 => Some(MessageKind::IssuerLocation),
            3 => Some(MessageKind::CertificateChain),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            MessageKind::SignedCertificate => "signed certificate",
            MessageKind::IssuerLocation => "issuer location",
            MessageKind::CertificateChain => "certificate chain",
        }
    }

    /// Encode the frame header for a payload of `len` bytes.
    #[must_use]
    pub fn header(self, len: u32) -> [u8; FRAME_HEADER_LEN] {
        let mut header = [0u8; FRAME_HEADER_LEN];
        header[..4].copy_from_slice(&self.tag().to_be_bytes());
        header[4..].copy_from_slice(&len.to_be_bytes());
        header
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
