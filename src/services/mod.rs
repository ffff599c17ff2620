//! Services layer.
//!
//! Stateless operations composed by the worker pipeline:
//! - `decoder`: DER bytes to a decoded certificate
//! - `issuer_resolver`: Authority Information Access to the CA issuer URI
//! - `normalizer`: PEM detection and DER-to-PEM re-encoding
//! - `issuer_policy`: trust check on the fetched chain
//! - `chain_coordinator`: the request/response exchange with both peers

pub mod chain_coordinator;
pub mod decoder;
pub mod issuer_policy;
pub mod issuer_resolver;
pub mod normalizer;

pub use chain_coordinator::ChainCoordinator;
pub use decoder::CertificateDecoder;
pub use issuer_policy::IssuerPolicy;
pub use issuer_resolver::IssuerResolver;
pub use normalizer::EncodingNormalizer;
