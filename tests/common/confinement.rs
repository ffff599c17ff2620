//! Confinement double that records steps instead of touching the kernel.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use certproc::{BootstrapError, BootstrapStage, Confinement, Identity};

#[derive(Default)]
pub struct FakeConfinement {
    pub steps: Rc<RefCell<Vec<BootstrapStage>>>,
    pub fail_at: Option<BootstrapStage>,
}

impl FakeConfinement {
    pub fn failing_at(stage: BootstrapStage) -> Self {
        Self {
            fail_at: Some(stage),
            ..Self::default()
        }
    }

    fn step(&mut self, stage: BootstrapStage) -> Result<(), BootstrapError> {
        self.steps.borrow_mut().push(stage);
        if self.fail_at == Some(stage) {
            Err(BootstrapError::new(stage, "simulated failure"))
        } else {
            Ok(())
        }
    }
}

impl Confinement for FakeConfinement {
    fn activate_profile(&mut self) -> Result<(), BootstrapError> {
        self.step(BootstrapStage::Profile)
    }
    fn confine_root(&mut self, _root: &Path) -> Result<(), BootstrapError> {
        self.step(BootstrapStage::FilesystemRoot)
    }
    fn restrict_syscalls(&mut self) -> Result<(), BootstrapError> {
        self.step(BootstrapStage::SyscallFilter)
    }
    fn drop_identity(&mut self, _identity: Identity) -> Result<(), BootstrapError> {
        self.step(BootstrapStage::Identity)
    }
}
