//! Workflow pipelines orchestrating stateless services.

pub mod certproc;

pub use certproc::{CertProcWorkflow, WorkerReport};
