use crate::catalog::ServiceId;
use crate::payment::{AttemptId, PaymentFailure, PaymentReceipt};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    SelectingService,
    Paying,
    Scheduling,
    Confirmed,
}

impl WizardStep {
    pub const ALL: [Self; 4] = [
        Self::SelectingService,
        Self::Paying,
        Self::Scheduling,
        Self::Confirmed,
    ];

    /// One-based position shown by the progress indicator.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::SelectingService => 1,
            Self::Paying => 2,
            Self::Scheduling => 3,
            Self::Confirmed => 4,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SelectingService => "service",
            Self::Paying => "payment",
            Self::Scheduling => "scheduling",
            Self::Confirmed => "confirmed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    NotStarted,
    Processing {
        attempt: AttemptId,
    },
    Succeeded,
    Failed {
        failure: PaymentFailure,
    },
}

impl PaymentStatus {
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        matches!(self, Self::Processing { .. })
    }

    /// The attempt currently awaiting an outcome, if any.
    #[must_use]
    pub const fn in_flight(&self) -> Option<AttemptId> {
        match self {
            Self::Processing { attempt } => Some(*attempt),
            _ => None,
        }
    }

    #[must_use]
    pub const fn failure(&self) -> Option<&PaymentFailure> {
        match self {
            Self::Failed { failure } => Some(failure),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::Processing { .. } => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}

/// State of one open booking overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub selected_service: Option<ServiceId>,
    pub payment_status: PaymentStatus,
    pub booking_complete: bool,
    pub receipt: Option<PaymentReceipt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("paying without a selected service")]
    PayingWithoutService,
    #[error("scheduling before payment succeeded")]
    SchedulingWithoutPayment,
    #[error("confirmed but booking is not complete")]
    ConfirmedIncomplete,
    #[error("confirmed without a successful payment")]
    ConfirmedWithoutPayment,
    #[error("booking complete outside the confirmed step")]
    CompleteOutsideConfirmed,
    #[error("payment processing outside the payment step")]
    ProcessingOutsidePaying,
}

impl WizardState {
    /// Check every structural invariant of the wizard.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.step == WizardStep::Paying && self.selected_service.is_none() {
            return Err(InvariantViolation::PayingWithoutService);
        }
        if self.step == WizardStep::Scheduling && self.payment_status != PaymentStatus::Succeeded {
            return Err(InvariantViolation::SchedulingWithoutPayment);
        }
        if self.step == WizardStep::Confirmed {
            if !self.booking_complete {
                return Err(InvariantViolation::ConfirmedIncomplete);
            }
            if self.payment_status != PaymentStatus::Succeeded {
                return Err(InvariantViolation::ConfirmedWithoutPayment);
            }
        }
        if self.booking_complete && self.step != WizardStep::Confirmed {
            return Err(InvariantViolation::CompleteOutsideConfirmed);
        }
        if self.payment_status.is_processing() && self.step != WizardStep::Paying {
            return Err(InvariantViolation::ProcessingOutsidePaying);
        }
        Ok(())
    }

    /// Pay and back are disabled while an attempt is in flight.
    #[must_use]
    pub const fn actions_locked(&self) -> bool {
        self.payment_status.is_processing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_valid() {
        let state = WizardState::default();
        assert_eq!(state.step, WizardStep::SelectingService);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn detects_each_broken_invariant() {
        let paying = WizardState {
            step: WizardStep::Paying,
            ..WizardState::default()
        };
        assert_eq!(
            paying.check_invariants(),
            Err(InvariantViolation::PayingWithoutService)
        );

        let scheduling = WizardState {
            step: WizardStep::Scheduling,
            selected_service: Some(ServiceId::new("life")),
            ..WizardState::default()
        };
        assert_eq!(
            scheduling.check_invariants(),
            Err(InvariantViolation::SchedulingWithoutPayment)
        );

        let stray_complete = WizardState {
            booking_complete: true,
            ..WizardState::default()
        };
        assert_eq!(
            stray_complete.check_invariants(),
            Err(InvariantViolation::CompleteOutsideConfirmed)
        );

        let stray_processing = WizardState {
            payment_status: PaymentStatus::Processing {
                attempt: AttemptId::from_raw(1),
            },
            ..WizardState::default()
        };
        assert_eq!(
            stray_processing.check_invariants(),
            Err(InvariantViolation::ProcessingOutsidePaying)
        );
    }

    #[test]
    fn step_numbers_follow_flow_order() {
        let numbers: Vec<u8> = WizardStep::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }
}
