use crate::catalog::ServiceId;
use crate::payment::{AttemptId, PaymentFailure, PaymentReceipt};
use serde::{Deserialize, Serialize};

/// Everything that can happen to an open booking wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardEvent {
    /// User picked a service card.
    ChooseService { service: ServiceId },
    /// User returned to selection and wants to proceed with the highlighted service.
    ContinueToPayment,
    /// Payment could not even be attempted.
    PaymentUnavailable { failure: PaymentFailure },
    PaymentStarted { attempt: AttemptId },
    PaymentSucceeded {
        attempt: AttemptId,
        receipt: PaymentReceipt,
    },
    PaymentFailed {
        attempt: AttemptId,
        failure: PaymentFailure,
    },
    CheckoutDismissed { attempt: AttemptId },
    RetryPayment,
    Back,
    /// User asserts the external scheduling widget is done.
    CompleteScheduling,
    Close,
}

impl WizardEvent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ChooseService { .. } => "choose-service",
            Self::ContinueToPayment => "continue-to-payment",
            Self::PaymentUnavailable { .. } => "payment-unavailable",
            Self::PaymentStarted { .. } => "payment-started",
            Self::PaymentSucceeded { .. } => "payment-succeeded",
            Self::PaymentFailed { .. } => "payment-failed",
            Self::CheckoutDismissed { .. } => "checkout-dismissed",
            Self::RetryPayment => "retry-payment",
            Self::Back => "back",
            Self::CompleteScheduling => "complete-scheduling",
            Self::Close => "close",
        }
    }

    /// Attempt an outcome event belongs to.
    #[must_use]
    pub const fn attempt(&self) -> Option<AttemptId> {
        match self {
            Self::PaymentStarted { attempt }
            | Self::PaymentSucceeded { attempt, .. }
            | Self::PaymentFailed { attempt, .. }
            | Self::CheckoutDismissed { attempt } => Some(*attempt),
            _ => None,
        }
    }
}
