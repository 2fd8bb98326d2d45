//! Seeded random event sequences over the wizard reducer.
use anyhow::{Result, bail};
use counsel_core::{
    AttemptId, PaymentFailure, PaymentReceipt, ServiceCatalog, ServiceId, WizardEvent, WizardState,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

pub const DEFAULT_WALK_STEPS: usize = 400;

/// Counters gathered over one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub applied: usize,
    pub ignored: usize,
    pub confirmed: usize,
    pub closes: usize,
}

struct Walker<'a> {
    rng: ChaCha20Rng,
    services: Vec<&'a ServiceId>,
    issued: Vec<AttemptId>,
}

impl Walker<'_> {
    fn attempt_for(&mut self, state: &WizardState) -> AttemptId {
        // mostly the live attempt, sometimes a stale or unseen one
        if let Some(live) = state.payment_status.in_flight()
            && self.rng.gen_range(0..4) < 3
        {
            return live;
        }
        if !self.issued.is_empty() && self.rng.gen_bool(0.5) {
            return self.issued[self.rng.gen_range(0..self.issued.len())];
        }
        AttemptId::next()
    }

    fn next_event(&mut self, state: &WizardState) -> WizardEvent {
        let attempt = self.attempt_for(state);
        match self.rng.gen_range(0..12) {
            0 | 1 => {
                let pick = self.rng.gen_range(0..self.services.len());
                WizardEvent::ChooseService {
                    service: self.services[pick].clone(),
                }
            }
            2 => WizardEvent::ContinueToPayment,
            3 => WizardEvent::PaymentUnavailable {
                failure: PaymentFailure::Configuration,
            },
            4 => {
                let fresh = AttemptId::next();
                self.issued.push(fresh);
                WizardEvent::PaymentStarted { attempt: fresh }
            }
            5 => WizardEvent::PaymentSucceeded {
                attempt,
                receipt: PaymentReceipt {
                    payment_id: format!("pay_walk_{}", attempt.get()),
                    order_id: None,
                    signature: None,
                },
            },
            6 => WizardEvent::PaymentFailed {
                attempt,
                failure: PaymentFailure::Declined {
                    reason: Some("insufficient funds".into()),
                },
            },
            7 => WizardEvent::CheckoutDismissed { attempt },
            8 => WizardEvent::RetryPayment,
            9 => WizardEvent::Back,
            10 => WizardEvent::CompleteScheduling,
            _ if self.rng.gen_bool(0.25) => WizardEvent::Close,
            _ => WizardEvent::Back,
        }
    }
}

/// Run `steps` random events from a fresh wizard, checking every invariant
/// after each one.
///
/// # Errors
///
/// Fails on the first invariant violation or when a close does not reset
/// the wizard.
pub fn random_walk(catalog: &ServiceCatalog, seed: u64, steps: usize) -> Result<WalkStats> {
    let mut walker = Walker {
        rng: ChaCha20Rng::seed_from_u64(seed),
        services: catalog.iter().map(|s| &s.id).collect(),
        issued: Vec::new(),
    };
    if walker.services.is_empty() {
        bail!("catalog has no services to walk");
    }

    let mut stats = WalkStats::default();
    let mut state = WizardState::default();
    for step in 0..steps {
        let event = walker.next_event(&state);
        let name = event.name();
        let is_close = matches!(event, WizardEvent::Close);
        match state.apply(event) {
            Ok(next) => {
                stats.applied += 1;
                if let Err(violation) = next.check_invariants() {
                    bail!("step {step}: {name} broke an invariant ({violation}) from {state:?}");
                }
                state = next;
            }
            Err(reason) => {
                log::trace!("step {step}: {name} ignored: {reason}");
                stats.ignored += 1;
            }
        }
        if is_close {
            stats.closes += 1;
            if state != WizardState::default() {
                bail!("step {step}: close left {state:?}");
            }
        }
        if state.booking_complete {
            stats.confirmed += 1;
        }
    }
    Ok(stats)
}
