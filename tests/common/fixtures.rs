//! Certificates generated with the OpenSSL CLI.
//!
//! `issuer.der` is a 743-byte RSA CA certificate (`CN=R`); every leaf is
//! signed by it. `issuer.pem` / `leaf_aia.pem` are `openssl x509 -outform PEM`
//! renderings of the matching DER files.

/// OCSP URI followed by `CA Issuers - URI:http://ca.example/issuer.der`.
pub const LEAF_AIA: &[u8] = include_bytes!("../fixtures/leaf_aia.der");
pub const LEAF_AIA_PEM: &[u8] = include_bytes!("../fixtures/leaf_aia.pem");
/// No Authority Information Access extension.
pub const LEAF_NO_AIA: &[u8] = include_bytes!("../fixtures/leaf_no_aia.der");
/// AIA with a single OCSP descriptor.
pub const LEAF_OCSP_ONLY: &[u8] = include_bytes!("../fixtures/leaf_ocsp_only.der");
/// AIA with `first.der` then `second.der` CA Issuers URIs.
pub const LEAF_TWO_ISSUERS: &[u8] = include_bytes!("../fixtures/leaf_two_issuers.der");
/// AIA whose CA Issuers location is a DNS name, not a URI.
pub const LEAF_ISSUER_DNS: &[u8] = include_bytes!("../fixtures/leaf_issuer_dns.der");
/// Empty `CA Issuers - URI` followed by `http://ca.example/issuer.der`.
pub const LEAF_EMPTY_FIRST: &[u8] = include_bytes!("../fixtures/leaf_empty_first.der");
/// A single, empty `CA Issuers - URI`.
pub const LEAF_EMPTY_ONLY: &[u8] = include_bytes!("../fixtures/leaf_empty_only.der");
/// Two AIA extensions (re-signed after splicing with `openssl dgst -sign`).
pub const LEAF_DUP_AIA: &[u8] = include_bytes!("../fixtures/leaf_dup_aia.der");
/// AIA whose value is an OCTET STRING instead of a SEQUENCE.
pub const LEAF_BAD_AIA: &[u8] = include_bytes!("../fixtures/leaf_bad_aia.der");

pub const ISSUER_DER: &[u8] = include_bytes!("../fixtures/issuer.der");
pub const ISSUER_PEM: &[u8] = include_bytes!("../fixtures/issuer.pem");

pub const ISSUER_URI: &str = "http://ca.example/issuer.der";
