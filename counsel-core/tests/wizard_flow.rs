use counsel_core::{
    AttemptId, IgnoredEvent, PaymentFailure, PaymentReceipt, PaymentStatus, ServiceId,
    WizardEvent, WizardState, WizardStep,
};

fn choose(id: &str) -> WizardEvent {
    WizardEvent::ChooseService {
        service: ServiceId::new(id),
    }
}

fn receipt(id: &str) -> PaymentReceipt {
    PaymentReceipt {
        payment_id: id.to_string(),
        order_id: None,
        signature: None,
    }
}

fn run(state: &WizardState, events: impl IntoIterator<Item = WizardEvent>) -> WizardState {
    events.into_iter().fold(state.clone(), |acc, event| {
        let next = acc.reduce(event);
        next.check_invariants().unwrap();
        next
    })
}

#[test]
fn marriage_booking_reaches_confirmation() {
    let attempt = AttemptId::next();
    let state = run(
        &WizardState::default(),
        [
            choose("marriage"),
            WizardEvent::PaymentStarted { attempt },
            WizardEvent::PaymentSucceeded {
                attempt,
                receipt: receipt("pay_marriage"),
            },
            WizardEvent::CompleteScheduling,
        ],
    );
    assert_eq!(state.step, WizardStep::Confirmed);
    assert!(state.booking_complete);
    assert_eq!(state.selected_service, Some(ServiceId::new("marriage")));
    assert_eq!(
        state.receipt.as_ref().map(|r| r.payment_id.as_str()),
        Some("pay_marriage")
    );
}

#[test]
fn decline_then_retry_then_success_keeps_service() {
    let first = AttemptId::next();
    let second = AttemptId::next();
    let declined = run(
        &WizardState::default(),
        [
            choose("education"),
            WizardEvent::PaymentStarted { attempt: first },
            WizardEvent::PaymentFailed {
                attempt: first,
                failure: PaymentFailure::Declined {
                    reason: Some("insufficient funds".into()),
                },
            },
        ],
    );
    assert_eq!(declined.step, WizardStep::Paying);
    assert_eq!(
        declined.payment_status.failure().map(ToString::to_string),
        Some("payment declined: insufficient funds".to_string())
    );

    let state = run(
        &declined,
        [
            WizardEvent::RetryPayment,
            WizardEvent::PaymentStarted { attempt: second },
            WizardEvent::PaymentSucceeded {
                attempt: second,
                receipt: receipt("pay_retry"),
            },
        ],
    );
    assert_eq!(state.step, WizardStep::Scheduling);
    assert_eq!(state.payment_status, PaymentStatus::Succeeded);
    assert_eq!(state.selected_service, Some(ServiceId::new("education")));
}

#[test]
fn choosing_twice_is_idempotent() {
    let once = WizardState::default().reduce(choose("life"));
    let twice = once.reduce(choose("life"));
    assert_eq!(once, twice);
}

#[test]
fn back_from_payment_preserves_selection() {
    let state = run(&WizardState::default(), [choose("life"), WizardEvent::Back]);
    assert_eq!(state.step, WizardStep::SelectingService);
    assert_eq!(state.selected_service, Some(ServiceId::new("life")));
}

#[test]
fn reopen_after_close_is_pristine_from_every_step() {
    let attempt = AttemptId::next();
    let checkpoints = [
        vec![],
        vec![choose("marriage")],
        vec![choose("marriage"), WizardEvent::PaymentStarted { attempt }],
        vec![
            choose("marriage"),
            WizardEvent::PaymentStarted { attempt },
            WizardEvent::PaymentSucceeded {
                attempt,
                receipt: receipt("pay"),
            },
        ],
        vec![
            choose("marriage"),
            WizardEvent::PaymentStarted { attempt },
            WizardEvent::PaymentSucceeded {
                attempt,
                receipt: receipt("pay"),
            },
            WizardEvent::CompleteScheduling,
        ],
    ];
    for events in checkpoints {
        let state = run(&WizardState::default(), events);
        assert_eq!(state.reduce(WizardEvent::Close), WizardState::default());
    }
}

#[test]
fn late_outcome_after_close_does_not_touch_fresh_state() {
    let attempt = AttemptId::next();
    let in_flight = run(
        &WizardState::default(),
        [choose("marriage"), WizardEvent::PaymentStarted { attempt }],
    );
    let fresh = in_flight.reduce(WizardEvent::Close);

    let late = WizardEvent::PaymentSucceeded {
        attempt,
        receipt: receipt("pay_late"),
    };
    assert_eq!(
        fresh.apply(late),
        Err(IgnoredEvent::StaleAttempt { attempt })
    );

    // the same holds once the reopened wizard has its own attempt in flight
    let newer = AttemptId::next();
    let reopened = run(
        &fresh,
        [choose("life"), WizardEvent::PaymentStarted { attempt: newer }],
    );
    let after_late = reopened.reduce(WizardEvent::PaymentFailed {
        attempt,
        failure: PaymentFailure::Declined { reason: None },
    });
    assert_eq!(after_late, reopened);
}

#[test]
fn sdk_failure_and_decline_are_distinguishable() {
    let sdk = PaymentFailure::SdkUnavailable {
        detail: "timed out".into(),
    };
    let declined = PaymentFailure::Declined { reason: None };
    assert_ne!(sdk.kind(), declined.kind());
    assert_ne!(sdk.to_string(), declined.to_string());
}

#[test]
fn dismissal_returns_to_idle_payment() {
    let attempt = AttemptId::next();
    let state = run(
        &WizardState::default(),
        [
            choose("education"),
            WizardEvent::PaymentStarted { attempt },
            WizardEvent::CheckoutDismissed { attempt },
        ],
    );
    assert_eq!(state.step, WizardStep::Paying);
    assert_eq!(state.payment_status, PaymentStatus::NotStarted);

    let again = AttemptId::next();
    let resumed = state.reduce(WizardEvent::PaymentStarted { attempt: again });
    assert_eq!(resumed.payment_status.in_flight(), Some(again));
}
