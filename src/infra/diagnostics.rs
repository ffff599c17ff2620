//! Explicit diagnostic context.
//!
//! Failure detail is collected here as the worker runs and written to the
//! log once, at cleanup. The buffer is reserved during bootstrap, before
//! the syscall filter is installed.

use crate::infra::error::{BootstrapError, BootstrapStage};

/// Capacity reserved by [`Diagnostics::prepare`].
const RESERVED_ENTRIES: usize = 16;

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<(&'static str, String)>,
    prepared: bool,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bootstrap step 3.
    pub fn prepare(&mut self) -> Result<(), BootstrapError> {
        self.entries
            .try_reserve(RESERVED_ENTRIES)
            .map_err(|e| BootstrapError::new(BootstrapStage::Diagnostics, e.to_string()))?;
        self.prepared = true;
        log::debug!("Diagnostic context prepared");
        Ok(())
    }

    #[must_use]
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn record(&mut self, stage: &'static str, detail: impl Into<String>) {
        self.entries.push((stage, detail.into()));
    }

    #[must_use]
    pub fn entries(&self) -> &[(&'static str, String)] {
        &self.entries
    }

    /// Drain every entry to the log. Returns how many were written.
    pub fn emit(&mut self) -> usize {
        let count = self.entries.len();
        for (stage, detail) in self.entries.drain(..) {
            log::warn!("{stage}: {detail}");
        }
        count
    }
}
