//! Centralized constants for PEM detection and Authority Information Access decoding.

use der::asn1::ObjectIdentifier;

/// Pre-encapsulation boundary of a PEM certificate.
pub const PEM_CERTIFICATE_MARKER: &str = "-----BEGIN CERTIFICATE-----";

/// Access-descriptor name that points at the issuing CA certificate.
pub const CA_ISSUERS_URI: &str = "CA Issuers - URI";

// === Access method names ===

/// Display name of `id-ad-caIssuers`
pub const METHOD_CA_ISSUERS: &str = "CA Issuers";

/// Display name of `id-ad-ocsp`
pub const METHOD_OCSP: &str = "OCSP";

// === OIDs ===

/// `id-pe-authorityInfoAccess` (1.3.6.1.5.5.7.1.1)
pub const OID_AUTHORITY_INFO_ACCESS: ObjectIdentifier =
    const_oid::db::rfc5280::ID_PE_AUTHORITY_INFO_ACCESS;

/// `id-ad-caIssuers` (1.3.6.1.5.5.7.48.2)
pub const OID_AD_CA_ISSUERS: ObjectIdentifier = const_oid::db::rfc5280::ID_AD_CA_ISSUERS;

/// `id-ad-ocsp` (1.3.6.1.5.5.7.48.1)
pub const OID_AD_OCSP: ObjectIdentifier = const_oid::db::rfc5280::ID_AD_OCSP;

// === Limits ===

/// Default ceiling on a single inbound frame payload (1 MiB).
pub const DEFAULT_MAX_MESSAGE_BYTES: u32 = 1 << 20;

/// Hard ceiling accepted from configuration (16 MiB).
pub const MAX_MESSAGE_BYTES_LIMIT: u32 = 16 << 20;
