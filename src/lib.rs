//! cadastro-core - validation and formatting engine for multi-step
//! registration forms
//!
//! Three cooperating pieces:
//!
//! - [`format`]: pure input masks that turn raw keystrokes into the
//!   canonical display form of a field (CPF, phones, birth date, CEP).
//! - [`validate`]: pure validators, including the CPF weighted mod-11
//!   checksum and age derivation from a `DD/MM/YYYY` birth date.
//! - [`form`]: the [`FormSession`] state machine that owns field values
//!   and errors, runs every edit through mask then validator, and gates
//!   the Personal → Address → Account step sequence plus the final
//!   submit confirmation.
//!
//! ```
//! use cadastro_core::{FieldId, FormConfig, FormSession};
//!
//! let mut session = FormSession::new(FormConfig::default());
//! let change = session.field_changed(FieldId::Cpf, "52998224725");
//! assert_eq!(change.formatted, "529.982.247-25");
//! assert!(change.error.is_none());
//! ```

pub mod config;
pub mod form;
pub mod format;
pub mod validate;

pub use config::FormConfig;
pub use form::{
    Clock, FieldChange, FieldId, FormSession, Rule, SessionState, Step, StepOutcome, SystemClock,
};
pub use format::Mask;
pub use validate::DateError;
