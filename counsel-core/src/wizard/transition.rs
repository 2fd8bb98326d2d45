use super::event::WizardEvent;
use super::state::{PaymentStatus, WizardState, WizardStep};
use crate::payment::AttemptId;
use thiserror::Error;

/// Why an event left the wizard unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IgnoredEvent {
    #[error("{event} is not accepted while {step:?}")]
    WrongStep {
        event: &'static str,
        step: WizardStep,
    },
    #[error("no service selected")]
    NoServiceSelected,
    #[error("payment is {status}, not idle")]
    PaymentNotIdle { status: &'static str },
    #[error("outcome for attempt {attempt} does not match the payment in flight")]
    StaleAttempt { attempt: AttemptId },
    #[error("no failed payment to retry")]
    NothingToRetry,
    #[error("a payment is in flight")]
    PaymentInFlight,
    #[error("payment has not succeeded")]
    PaymentIncomplete,
}

impl WizardState {
    /// Apply `event`, returning the next state or the reason it was ignored.
    ///
    /// # Errors
    ///
    /// Returns an [`IgnoredEvent`] when the event's guard fails for the
    /// current state. The caller keeps the current state in that case.
    pub fn apply(&self, event: WizardEvent) -> Result<Self, IgnoredEvent> {
        let wrong_step = |event: &WizardEvent| IgnoredEvent::WrongStep {
            event: event.name(),
            step: self.step,
        };

        match event {
            WizardEvent::Close => Ok(Self::default()),

            WizardEvent::ChooseService { service } => {
                if self.step != WizardStep::SelectingService {
                    return Err(wrong_step(&WizardEvent::ChooseService { service }));
                }
                let changed = self.selected_service.as_ref() != Some(&service);
                let payment_status = match &self.payment_status {
                    PaymentStatus::Failed { .. } if changed => PaymentStatus::NotStarted,
                    other => other.clone(),
                };
                Ok(Self {
                    step: WizardStep::Paying,
                    selected_service: Some(service),
                    payment_status,
                    ..self.clone()
                })
            }

            WizardEvent::ContinueToPayment => {
                if self.step != WizardStep::SelectingService {
                    return Err(wrong_step(&event));
                }
                if self.selected_service.is_none() {
                    return Err(IgnoredEvent::NoServiceSelected);
                }
                Ok(Self {
                    step: WizardStep::Paying,
                    ..self.clone()
                })
            }

            WizardEvent::PaymentUnavailable { ref failure } => {
                self.require_idle_payment(&event)?;
                Ok(Self {
                    payment_status: PaymentStatus::Failed {
                        failure: failure.clone(),
                    },
                    ..self.clone()
                })
            }

            WizardEvent::PaymentStarted { attempt } => {
                self.require_idle_payment(&event)?;
                Ok(Self {
                    payment_status: PaymentStatus::Processing { attempt },
                    ..self.clone()
                })
            }

            WizardEvent::PaymentSucceeded { attempt, receipt } => {
                self.require_in_flight(attempt)?;
                Ok(Self {
                    step: WizardStep::Scheduling,
                    payment_status: PaymentStatus::Succeeded,
                    receipt: Some(receipt),
                    ..self.clone()
                })
            }

            WizardEvent::PaymentFailed { attempt, failure } => {
                self.require_in_flight(attempt)?;
                Ok(Self {
                    payment_status: PaymentStatus::Failed { failure },
                    ..self.clone()
                })
            }

            WizardEvent::CheckoutDismissed { attempt } => {
                self.require_in_flight(attempt)?;
                Ok(Self {
                    payment_status: PaymentStatus::NotStarted,
                    ..self.clone()
                })
            }

            WizardEvent::RetryPayment => {
                if self.step != WizardStep::Paying {
                    return Err(wrong_step(&event));
                }
                if self.payment_status.failure().is_none() {
                    return Err(IgnoredEvent::NothingToRetry);
                }
                Ok(Self {
                    payment_status: PaymentStatus::NotStarted,
                    ..self.clone()
                })
            }

            WizardEvent::Back => {
                if self.step != WizardStep::Paying {
                    return Err(wrong_step(&event));
                }
                if self.payment_status.is_processing() {
                    return Err(IgnoredEvent::PaymentInFlight);
                }
                Ok(Self {
                    step: WizardStep::SelectingService,
                    ..self.clone()
                })
            }

            WizardEvent::CompleteScheduling => {
                if self.step != WizardStep::Scheduling {
                    return Err(wrong_step(&event));
                }
                if self.payment_status != PaymentStatus::Succeeded {
                    return Err(IgnoredEvent::PaymentIncomplete);
                }
                Ok(Self {
                    step: WizardStep::Confirmed,
                    booking_complete: true,
                    ..self.clone()
                })
            }
        }
    }

    /// Like [`apply`](Self::apply), but keeps the current state when the
    /// event is ignored.
    #[must_use]
    pub fn reduce(&self, event: WizardEvent) -> Self {
        let name = event.name();
        match self.apply(event) {
            Ok(next) => next,
            Err(reason) => {
                log::debug!("ignored wizard event {name}: {reason}");
                self.clone()
            }
        }
    }

    fn require_idle_payment(&self, event: &WizardEvent) -> Result<(), IgnoredEvent> {
        if self.step != WizardStep::Paying {
            return Err(IgnoredEvent::WrongStep {
                event: event.name(),
                step: self.step,
            });
        }
        if self.payment_status != PaymentStatus::NotStarted {
            return Err(IgnoredEvent::PaymentNotIdle {
                status: self.payment_status.label(),
            });
        }
        Ok(())
    }

    fn require_in_flight(&self, attempt: AttemptId) -> Result<(), IgnoredEvent> {
        if self.payment_status.in_flight() == Some(attempt) {
            Ok(())
        } else {
            Err(IgnoredEvent::StaleAttempt { attempt })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceId;
    use crate::payment::{PaymentFailure, PaymentReceipt};

    fn choose(id: &str) -> WizardEvent {
        WizardEvent::ChooseService {
            service: ServiceId::new(id),
        }
    }

    fn receipt() -> PaymentReceipt {
        PaymentReceipt {
            payment_id: "pay_test".into(),
            order_id: None,
            signature: None,
        }
    }

    fn paying(id: &str) -> WizardState {
        WizardState::default().apply(choose(id)).unwrap()
    }

    #[test]
    fn choosing_advances_to_payment() {
        let state = paying("education");
        assert_eq!(state.step, WizardStep::Paying);
        assert_eq!(state.selected_service, Some(ServiceId::new("education")));
        assert_eq!(state.payment_status, PaymentStatus::NotStarted);
    }

    #[test]
    fn second_choice_while_paying_is_ignored() {
        let state = paying("education");
        let err = state.apply(choose("life")).unwrap_err();
        assert!(matches!(err, IgnoredEvent::WrongStep { .. }));
        assert_eq!(state.reduce(choose("life")), state);
    }

    #[test]
    fn continue_requires_selection() {
        assert_eq!(
            WizardState::default().apply(WizardEvent::ContinueToPayment),
            Err(IgnoredEvent::NoServiceSelected)
        );
        let back = paying("life").apply(WizardEvent::Back).unwrap();
        let again = back.apply(WizardEvent::ContinueToPayment).unwrap();
        assert_eq!(again.step, WizardStep::Paying);
        assert_eq!(again.selected_service, Some(ServiceId::new("life")));
    }

    #[test]
    fn outcome_for_other_attempt_is_stale() {
        let attempt = AttemptId::from_raw(10);
        let state = paying("life")
            .apply(WizardEvent::PaymentStarted { attempt })
            .unwrap();
        let stale = WizardEvent::PaymentSucceeded {
            attempt: AttemptId::from_raw(9),
            receipt: receipt(),
        };
        assert_eq!(
            state.apply(stale),
            Err(IgnoredEvent::StaleAttempt {
                attempt: AttemptId::from_raw(9)
            })
        );
    }

    #[test]
    fn duplicate_outcome_is_ignored() {
        let attempt = AttemptId::from_raw(11);
        let state = paying("life")
            .apply(WizardEvent::PaymentStarted { attempt })
            .unwrap()
            .apply(WizardEvent::PaymentSucceeded {
                attempt,
                receipt: receipt(),
            })
            .unwrap();
        let late_failure = WizardEvent::PaymentFailed {
            attempt,
            failure: PaymentFailure::Declined { reason: None },
        };
        assert!(state.apply(late_failure).is_err());
        assert_eq!(state.step, WizardStep::Scheduling);
    }

    #[test]
    fn dismissal_reenables_pay_without_error() {
        let attempt = AttemptId::from_raw(12);
        let state = paying("life")
            .apply(WizardEvent::PaymentStarted { attempt })
            .unwrap()
            .apply(WizardEvent::CheckoutDismissed { attempt })
            .unwrap();
        assert_eq!(state.payment_status, PaymentStatus::NotStarted);
        assert!(state.payment_status.failure().is_none());
    }

    #[test]
    fn back_is_blocked_while_processing() {
        let state = paying("life")
            .apply(WizardEvent::PaymentStarted {
                attempt: AttemptId::from_raw(13),
            })
            .unwrap();
        assert_eq!(
            state.apply(WizardEvent::Back),
            Err(IgnoredEvent::PaymentInFlight)
        );
        assert!(state.actions_locked());
    }

    #[test]
    fn unavailable_payment_never_processes() {
        let state = paying("life")
            .apply(WizardEvent::PaymentUnavailable {
                failure: PaymentFailure::Configuration,
            })
            .unwrap();
        assert_eq!(
            state.payment_status.failure(),
            Some(&PaymentFailure::Configuration)
        );
        assert!(matches!(
            state.apply(WizardEvent::PaymentStarted {
                attempt: AttemptId::from_raw(14)
            }),
            Err(IgnoredEvent::PaymentNotIdle { status: "failed" })
        ));
    }

    #[test]
    fn changing_service_clears_stale_failure() {
        let failed = paying("life")
            .apply(WizardEvent::PaymentUnavailable {
                failure: PaymentFailure::Configuration,
            })
            .unwrap()
            .apply(WizardEvent::Back)
            .unwrap();
        let same = failed.apply(choose("life")).unwrap();
        assert!(same.payment_status.failure().is_some());
        let other = failed.apply(choose("education")).unwrap();
        assert_eq!(other.payment_status, PaymentStatus::NotStarted);
    }

    #[test]
    fn scheduling_completion_requires_scheduling_step() {
        assert!(matches!(
            paying("life").apply(WizardEvent::CompleteScheduling),
            Err(IgnoredEvent::WrongStep { .. })
        ));
        assert_eq!(
            paying("life").apply(WizardEvent::RetryPayment),
            Err(IgnoredEvent::NothingToRetry)
        );
    }

    #[test]
    fn close_resets_from_any_step() {
        let attempt = AttemptId::from_raw(15);
        let state = paying("life")
            .apply(WizardEvent::PaymentStarted { attempt })
            .unwrap();
        assert_eq!(state.reduce(WizardEvent::Close), WizardState::default());
    }
}
