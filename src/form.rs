use std::sync::{Mutex, MutexGuard};

use crate::{
    Error,
    error::Result,
    contact::{Draft, Field},
    validation::{self, ValidationErrors},
};

/// Receiver of a validated draft. Returning `Err` keeps the form as it is
/// so the user can correct and retry.
#[allow(async_fn_in_trait)]
pub trait SubmitHandler {
    async fn submit(&self, draft: &Draft) -> Result<()>;
}

#[derive(Debug)]
pub enum Submission {
    /// Validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// Another submission is still in flight.
    Busy,
    Submitted,
    Failed(Error),
}

impl Submission {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Submission::Submitted)
    }
}

#[derive(Default)]
struct FormState {
    draft       : Draft,
    errors      : ValidationErrors,
    submitting  : bool,
}

pub struct ContactForm {
    state: Mutex<FormState>,
}

struct InFlight<'a>(&'a Mutex<FormState>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).submitting = false;
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FormState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replaces one field of the draft. Existing validation messages stay
    /// until the next submit.
    pub fn set_field(&self, field: Field, value: &str) {
        self.state().draft.set_field(field, value);
    }

    pub fn draft(&self) -> Draft {
        self.state().draft.clone()
    }

    pub fn errors(&self) -> ValidationErrors {
        self.state().errors.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.state().submitting
    }

    pub async fn submit<H: SubmitHandler>(&self, handler: &H) -> Submission {
        let (draft, _guard) = {
            let mut state = self.state();
            if state.submitting {
                return Submission::Busy;
            }

            state.errors = validation::validate(&state.draft);
            if !state.errors.is_valid() {
                log::debug!("Contact form rejected: {:?}", state.errors.failed());
                return Submission::Invalid(state.errors.clone());
            }

            state.submitting = true;
            (state.draft.clone(), InFlight(&self.state))
        };

        match handler.submit(&draft).await {
            Ok(_) => {
                let mut state = self.state();
                state.draft = Draft::default();
                state.errors = ValidationErrors::default();
                Submission::Submitted
            }
            Err(e) => Submission::Failed(e),
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}
