//! Booking wizard state machine.
//!
//! The wizard is an explicit value ([`WizardState`]) advanced by a pure
//! reducer over [`WizardEvent`]s. Events whose guard fails leave the state
//! untouched and report an [`IgnoredEvent`].

mod event;
mod state;
mod transition;

pub use event::WizardEvent;
pub use state::{InvariantViolation, PaymentStatus, WizardState, WizardStep};
pub use transition::IgnoredEvent;
