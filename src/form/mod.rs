//! Form domain layer
//!
//! Field vocabulary, step sequencing and the session state machine that
//! ties masking and validation together.

mod field;
mod session;
mod step;

pub use field::{FieldId, Rule};
pub use session::{Clock, FieldChange, FormSession, SessionState, StepOutcome, SystemClock};
pub use step::Step;
