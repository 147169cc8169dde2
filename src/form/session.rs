//! Form session state machine
//!
//! A [`FormSession`] owns every field value and error message for one
//! editing session, runs each edit through mask then validator, and
//! gates progression through the three steps. Sessions are created
//! empty and discarded after submit or abandon; nothing persists.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::{debug, trace};

use crate::config::FormConfig;
use crate::format::Mask;
use crate::validate;

use super::field::{FieldId, Rule};
use super::step::Step;

const MSG_NAME: &str = "Full name must contain at least two names.";
const MSG_CPF: &str = "Invalid CPF.";
const MSG_LANDLINE: &str = "Invalid landline number.";
const MSG_MOBILE: &str = "Invalid mobile number.";
const MSG_CEP: &str = "Invalid CEP.";
const MSG_EMAIL: &str = "Invalid email address.";
const MSG_WEAK_PASSWORD: &str =
    "Weak password. Use at least 8 characters with upper and lower case letters, digits and special characters.";
const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match.";

fn required_message(id: FieldId) -> &'static str {
    match id {
        FieldId::BirthDate => "Birth date is required.",
        FieldId::FatherName => "Father's name is required for minors.",
        FieldId::MotherName => "Mother's name is required for minors.",
        FieldId::Street => "Street is required.",
        FieldId::Number => "Number is required.",
        FieldId::City => "City is required.",
        FieldId::State => "State is required.",
        FieldId::Password => "Password is required.",
        FieldId::ConfirmPassword => "Password confirmation is required.",
        _ => "This field is required.",
    }
}

/// Source of "today" for age computation, mockable in tests
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send {
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the local system date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Where the session currently is in the step sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Editing the given step
    Editing(Step),
    /// Account step validated, waiting for the user to confirm submission
    AwaitingConfirmation,
    /// Terminal state; the form data is committed
    Submitted,
}

/// Outcome of a single field edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Value as stored, after masking
    pub formatted: String,
    /// Error for this field, if it is currently invalid
    pub error: Option<String>,
}

/// Outcome of a step-advance or submit request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub success: bool,
    /// Every currently-invalid field of the validated step
    pub errors: BTreeMap<FieldId, String>,
}

/// One registration form editing session
pub struct FormSession {
    values: BTreeMap<FieldId, String>,
    errors: BTreeMap<FieldId, String>,
    state: SessionState,
    age: Option<i32>,
    is_minor: bool,
    config: FormConfig,
    clock: Box<dyn Clock>,
}

impl FormSession {
    /// Create an empty session on the first step
    pub fn new(config: FormConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Create a session with an explicit clock
    pub fn with_clock(config: FormConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            values: FieldId::ALL.iter().map(|&id| (id, String::new())).collect(),
            errors: BTreeMap::new(),
            state: SessionState::Editing(Step::FIRST),
            age: None,
            is_minor: false,
            config,
            clock,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Step currently being edited (the confirmation gate still counts
    /// as the Account step); `None` once submitted
    pub fn current_step(&self) -> Option<Step> {
        match self.state {
            SessionState::Editing(step) => Some(step),
            SessionState::AwaitingConfirmation => Some(Step::Account),
            SessionState::Submitted => None,
        }
    }

    /// Current (masked) value of a field
    pub fn value(&self, id: FieldId) -> &str {
        self.values.get(&id).map(String::as_str).unwrap_or_default()
    }

    /// Current error of a field, if any
    pub fn error(&self, id: FieldId) -> Option<&str> {
        self.errors.get(&id).map(String::as_str)
    }

    /// All field values
    pub fn values(&self) -> &BTreeMap<FieldId, String> {
        &self.values
    }

    /// All current field errors
    pub fn errors(&self) -> &BTreeMap<FieldId, String> {
        &self.errors
    }

    /// Age derived from a fully-typed birth date
    pub fn age(&self) -> Option<i32> {
        self.age
    }

    /// Whether the derived age is below the adulthood threshold
    pub fn is_minor(&self) -> bool {
        self.is_minor
    }

    /// Record a field edit: mask, store, validate that one field
    ///
    /// Only the edited field's error entry changes; the rest of the form
    /// is re-checked at step boundaries. Editing while the confirmation
    /// gate is open cancels it; edits after submission are ignored.
    pub fn field_changed(&mut self, id: FieldId, raw: &str) -> FieldChange {
        if self.state == SessionState::Submitted {
            return FieldChange {
                formatted: self.value(id).to_string(),
                error: self.error(id).map(str::to_string),
            };
        }
        if self.state == SessionState::AwaitingConfirmation {
            self.state = SessionState::Editing(Step::Account);
        }

        let formatted = match id.mask() {
            Some(mask) => mask.apply(raw),
            None => raw.to_string(),
        };
        self.values.insert(id, formatted.clone());

        if id == FieldId::BirthDate {
            self.refresh_age();
        }

        let error = self.check_field(id).map(str::to_string);
        match &error {
            Some(message) => {
                self.errors.insert(id, message.clone());
            }
            None => {
                self.errors.remove(&id);
            }
        }
        trace!(field = ?id, value = %formatted, valid = error.is_none(), "field changed");

        FieldChange { formatted, error }
    }

    /// Run every validator owned by `step`, returning all failures
    ///
    /// Guardian-name fields are checked only if the registrant is a
    /// minor at call time. Does not mutate the session.
    pub fn validate_step(&self, step: Step) -> BTreeMap<FieldId, String> {
        step.fields()
            .iter()
            .filter_map(|&id| self.check_field(id).map(|msg| (id, msg.to_string())))
            .collect()
    }

    /// Try to move forward from the current step
    ///
    /// On the last step this validates but stays put; submission goes
    /// through [`request_submit`](Self::request_submit). In both the
    /// success and failure case the session's error map is replaced by
    /// the step result.
    pub fn advance_step(&mut self) -> StepOutcome {
        let SessionState::Editing(step) = self.state else {
            return StepOutcome {
                success: false,
                errors: BTreeMap::new(),
            };
        };
        let errors = self.validate_step(step);
        self.errors = errors.clone();
        if !errors.is_empty() {
            debug!(step = ?step, failures = errors.len(), "step advance rejected");
            return StepOutcome {
                success: false,
                errors,
            };
        }
        if let Some(next) = step.next() {
            debug!(from = ?step, to = ?next, "step advanced");
            self.state = SessionState::Editing(next);
        }
        StepOutcome {
            success: true,
            errors,
        }
    }

    /// Move back one step; always allowed, validates nothing
    ///
    /// Returns the step now being edited, or `None` when the session is
    /// not editing (already submitted).
    pub fn step_back(&mut self) -> Option<Step> {
        match self.state {
            SessionState::Editing(step) => {
                let target = step.prev().unwrap_or(step);
                self.state = SessionState::Editing(target);
                Some(target)
            }
            SessionState::AwaitingConfirmation => {
                self.state = SessionState::Editing(Step::Account);
                Some(Step::Account)
            }
            SessionState::Submitted => None,
        }
    }

    /// Validate the Account step and open the confirmation gate
    pub fn request_submit(&mut self) -> StepOutcome {
        match self.state {
            SessionState::Editing(Step::Account) => {}
            SessionState::AwaitingConfirmation => {
                return StepOutcome {
                    success: true,
                    errors: BTreeMap::new(),
                }
            }
            _ => {
                return StepOutcome {
                    success: false,
                    errors: BTreeMap::new(),
                }
            }
        }
        let errors = self.validate_step(Step::Account);
        self.errors = errors.clone();
        if errors.is_empty() {
            debug!("submit requested, awaiting confirmation");
            self.state = SessionState::AwaitingConfirmation;
            StepOutcome {
                success: true,
                errors,
            }
        } else {
            debug!(failures = errors.len(), "submit rejected");
            StepOutcome {
                success: false,
                errors,
            }
        }
    }

    /// Commit a pending submission; returns whether the commit happened
    pub fn confirm_submit(&mut self) -> bool {
        if self.state != SessionState::AwaitingConfirmation {
            return false;
        }
        self.state = SessionState::Submitted;
        debug!("form submitted");
        true
    }

    /// Close the confirmation gate and return to editing
    pub fn cancel_submit(&mut self) {
        if self.state == SessionState::AwaitingConfirmation {
            self.state = SessionState::Editing(Step::Account);
        }
    }

    /// Recompute age and the minor flag from the birth-date field
    ///
    /// Only a fully-typed canonical date is parsed; anything shorter
    /// (or a full-length string that is not a real date) clears both.
    fn refresh_age(&mut self) {
        let value = self.value(FieldId::BirthDate);
        if value.len() != Mask::BirthDate.canonical_len() {
            self.age = None;
            self.is_minor = false;
            return;
        }
        match validate::calculate_age(value, self.clock.today()) {
            Ok(age) => {
                self.age = Some(age);
                self.is_minor = age < self.config.adulthood_age;
                debug!(age, is_minor = self.is_minor, "age recomputed");
            }
            Err(_) => {
                self.age = None;
                self.is_minor = false;
            }
        }
    }

    /// Apply a field's rule to its current value
    fn check_field(&self, id: FieldId) -> Option<&'static str> {
        let value = self.value(id);
        match id.rule() {
            Rule::FullName => (!validate::validate_name(value)).then_some(MSG_NAME),
            Rule::BirthDate => value.is_empty().then(|| required_message(id)),
            Rule::Cpf => (!validate::validate_cpf(value)).then_some(MSG_CPF),
            Rule::Phone => {
                let ok = if self.config.strict_phone_lengths {
                    // mask() is total for phone fields
                    id.mask()
                        .is_some_and(|m| validate::digit_count(value) == m.max_digits())
                } else {
                    validate::validate_phone(value)
                };
                (!ok).then_some(if id == FieldId::Landline {
                    MSG_LANDLINE
                } else {
                    MSG_MOBILE
                })
            }
            Rule::Cep => (!validate::validate_cep(value)).then_some(MSG_CEP),
            Rule::Email => (!validate::validate_email(value)).then_some(MSG_EMAIL),
            Rule::Password => {
                if value.is_empty() {
                    Some(required_message(id))
                } else if !validate::validate_password(value) {
                    Some(MSG_WEAK_PASSWORD)
                } else {
                    None
                }
            }
            Rule::PasswordConfirmation => {
                if value.is_empty() {
                    Some(required_message(id))
                } else if value != self.value(FieldId::Password) {
                    Some(MSG_PASSWORD_MISMATCH)
                } else {
                    None
                }
            }
            Rule::Required => value.is_empty().then(|| required_message(id)),
            Rule::RequiredIfMinor => {
                (self.is_minor && value.is_empty()).then(|| required_message(id))
            }
            Rule::Optional => None,
        }
    }
}
