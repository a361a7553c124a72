//! Recording observer for simulator tests.
//!
//! [`RecordingHook`] hands out closures that push a copy of every array
//! they are shown into a shared log. Cloning the hook shares the log, so a
//! test can keep one handle while the simulator owns the closure.

use coulomb_core::{ScalarField, StepIndex};
use std::cell::RefCell;
use std::rc::Rc;

/// One captured hook invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedStep {
    /// Label of the closure that recorded it.
    pub label: &'static str,
    pub step: StepIndex,
    pub values: ScalarField,
}

/// Shared log of hook invocations.
#[derive(Clone, Debug, Default)]
pub struct RecordingHook {
    log: Rc<RefCell<Vec<RecordedStep>>>,
}

impl RecordingHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A closure suitable for `Simulator::attach_step_hook`.
    pub fn recorder(&self) -> impl FnMut(&ScalarField, StepIndex) + 'static {
        self.labelled("hook")
    }

    /// Like [`recorder`](Self::recorder), tagging each entry with `label`.
    /// Useful for checking the order several hooks fire in.
    pub fn labelled(&self, label: &'static str) -> impl FnMut(&ScalarField, StepIndex) + 'static {
        let log = Rc::clone(&self.log);
        move |values: &ScalarField, step: StepIndex| {
            log.borrow_mut().push(RecordedStep {
                label,
                step,
                values: values.clone(),
            });
        }
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<RecordedStep> {
        self.log.borrow().clone()
    }

    /// Labels in invocation order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.log.borrow().iter().map(|r| r.label).collect()
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }
}
