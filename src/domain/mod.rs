//! Domain types for the certificate worker.
//!
//! Pure data with no I/O: buffers moving between stages, the decoded
//! certificate, Authority Information Access entries, and the message
//! kinds spoken on the two peer channels.

mod certificate;
pub mod constants;
mod issuer;
mod message;

pub use certificate::{Certificate, EncodedChain, RawBuffer};
pub use issuer::{AccessDescriptor, IssuerUri};
pub use message::{MessageKind, FRAME_HEADER_LEN};
