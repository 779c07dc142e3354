//! Registration form controller.
//!
//! Owns the draft and everything derived from it. Validity flags are
//! recomputed on every edit; display decisions (hint notes, valid/invalid
//! marks) are pure reads over the current state.

use super::{
    ErrorReason, Field, RegisterError, RegistrationApi, RegistrationDraft, RegistrationReceipt,
    RegistrationRequest, Role,
};
use crate::validate::{self, ValidityFlags};

/// Result of the most recent submission attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Idle,
    Success,
    Error(ErrorReason),
}

/// Per-field validity indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMark {
    Valid,
    Invalid,
    /// Neither mark is shown.
    Blank,
}

/// Why `begin_submit` refused to start a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("a registration request is already in flight")]
    InFlight,
    #[error("the form has invalid entries")]
    Invalid,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    draft: RegistrationDraft,
    focus: Option<Field>,
    flags: ValidityFlags,
    outcome: Outcome,
    in_flight: bool,
    error_focused: bool,
}

impl RegistrationForm {
    pub fn new() -> Self {
        let mut form = Self::default();
        form.recompute_flags();
        form
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn value(&self, field: Field) -> &str {
        self.draft.get(field)
    }

    pub fn role(&self) -> Role {
        self.draft.role
    }

    pub fn flags(&self) -> ValidityFlags {
        self.flags
    }

    pub fn focused(&self) -> Option<Field> {
        self.focus
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// True after a failed submission until the user edits or refocuses.
    pub fn error_focused(&self) -> bool {
        self.error_focused
    }

    /// Whether the "Sign Up" affordance is enabled.
    pub fn can_submit(&self) -> bool {
        self.flags.all_valid() && !self.in_flight
    }

    // ========================================================================
    // Edits
    // ========================================================================

    /// Ignored while a request is in flight; the draft is what was sent.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        if self.in_flight {
            tracing::debug!(?field, "edit ignored while registration is in flight");
            return;
        }
        *self.draft.slot(field) = value.into();
        match field {
            Field::Username => {
                self.flags.username_valid = validate::is_valid_username(&self.draft.username);
            }
            Field::Password | Field::ConfirmPassword => {
                self.flags.password_valid = validate::is_valid_password(&self.draft.password);
                self.flags.passwords_match =
                    validate::passwords_match(&self.draft.password, &self.draft.confirm_password);
            }
        }
        self.clear_error();
    }

    /// Ignored while a request is in flight.
    pub fn set_role(&mut self, role: Role) {
        if self.in_flight {
            return;
        }
        self.draft.role = role;
    }

    pub fn focus(&mut self, field: Field) {
        self.focus = Some(field);
        self.error_focused = false;
    }

    pub fn blur(&mut self) {
        self.focus = None;
    }

    // ========================================================================
    // Display policy
    // ========================================================================

    /// Whether the hint note under `field` is visible.
    pub fn note_visible(&self, field: Field) -> bool {
        if self.focus != Some(field) {
            return false;
        }
        match field {
            Field::Username => !self.draft.username.is_empty() && !self.flags.username_valid,
            Field::Password => !self.flags.password_valid,
            Field::ConfirmPassword => !self.flags.passwords_match,
        }
    }

    pub fn mark(&self, field: Field) -> FieldMark {
        let value = self.draft.get(field);
        let flag = match field {
            Field::Username => self.flags.username_valid,
            Field::Password => self.flags.password_valid,
            Field::ConfirmPassword => self.flags.passwords_match,
        };
        // An empty confirm "matches" an empty password but is not shown as valid.
        let valid = flag && (field != Field::ConfirmPassword || !value.is_empty());
        if valid {
            FieldMark::Valid
        } else if !flag && !value.is_empty() {
            FieldMark::Invalid
        } else {
            FieldMark::Blank
        }
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Starts a submission.
    ///
    /// # Errors
    /// `InFlight` leaves the form untouched. `Invalid` records an
    /// `Invalid Entry` outcome and moves focus to the error region.
    pub fn begin_submit(&mut self) -> Result<RegistrationRequest, SubmitRejected> {
        if self.in_flight {
            return Err(SubmitRejected::InFlight);
        }
        // Re-derive instead of trusting the incremental flags.
        self.recompute_flags();
        if !self.flags.all_valid() {
            self.fail(ErrorReason::InvalidEntry);
            return Err(SubmitRejected::Invalid);
        }
        self.in_flight = true;
        Ok(RegistrationRequest {
            username: self.draft.username.clone(),
            password: self.draft.password.clone(),
            role: self.draft.role,
        })
    }

    pub fn finish_submit(&mut self, result: Result<RegistrationReceipt, RegisterError>) {
        self.in_flight = false;
        match result {
            Ok(_) => {
                self.draft = RegistrationDraft::default();
                self.recompute_flags();
                self.outcome = Outcome::Success;
                self.error_focused = false;
            }
            Err(err) => self.fail(err.reason()),
        }
    }

    /// Runs one full submission against `api`.
    pub async fn submit<A: RegistrationApi>(&mut self, api: &A) -> Outcome {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(_) => return self.outcome,
        };
        let result = api.register(&request).await;
        self.finish_submit(result);
        self.outcome
    }

    fn fail(&mut self, reason: ErrorReason) {
        self.outcome = Outcome::Error(reason);
        self.focus = None;
        self.error_focused = true;
    }

    fn clear_error(&mut self) {
        if matches!(self.outcome, Outcome::Error(_)) {
            self.outcome = Outcome::Idle;
        }
        self.error_focused = false;
    }

    fn recompute_flags(&mut self) {
        self.flags = ValidityFlags::derive(
            &self.draft.username,
            &self.draft.password,
            &self.draft.confirm_password,
        );
    }
}
