use std::cell::Cell;
use std::rc::Rc;

use yew::prelude::*;

/// Synchronous in-flight flag. State updates only land on the next render,
/// so a second click before then must be caught here.
#[derive(Debug, Default)]
pub struct InFlight {
    busy: Cell<bool>,
}

impl InFlight {
    /// Returns `false` when a submission is already running.
    pub fn try_begin(&self) -> bool {
        !self.busy.replace(true)
    }

    pub fn finish(&self) {
        self.busy.set(false);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

/// Ignores submit events while a request from the same form is pending.
#[derive(Clone)]
pub struct SubmissionGuard {
    in_flight: Rc<InFlight>,
    submitting: UseStateHandle<bool>,
}

impl SubmissionGuard {
    pub fn try_begin(&self) -> bool {
        let started = self.in_flight.try_begin();
        if started {
            self.submitting.set(true);
        }
        started
    }

    pub fn finish(&self) {
        self.in_flight.finish();
        self.submitting.set(false);
    }

    /// For disabling the submit button.
    pub fn is_submitting(&self) -> bool {
        *self.submitting
    }
}

#[hook]
pub fn use_submission_guard() -> SubmissionGuard {
    let in_flight = use_memo((), |_| InFlight::default());
    let submitting = use_state(|| false);
    SubmissionGuard {
        in_flight,
        submitting,
    }
}
