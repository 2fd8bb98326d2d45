//! End-to-end booking scenarios driven through the real reducer and
//! checkout runner with a scripted provider.
use super::gateway::{OrderScript, Script, ScriptedGateway};
use super::walk::{DEFAULT_WALK_STEPS, random_walk};
use super::TesterAssets;
use anyhow::{Context, Result, anyhow, ensure};
use counsel_core::{
    AttemptGuard, PaymentAttempt, PaymentConfig, PaymentFailure, PaymentStatus, Service, ServiceId,
    WizardEvent, WizardState, WizardStep,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Every scenario key with a one-line description.
pub const SCENARIOS: &[(&str, &str)] = &[
    (
        "marriage-booking",
        "Marriage & Relationship Guidance paid in paise and confirmed",
    ),
    (
        "decline-then-retry",
        "Insufficient funds decline, user retry, then success",
    ),
    (
        "sdk-unavailable",
        "Checkout script fails to load; message differs from a decline",
    ),
    (
        "overlay-failure",
        "SDK loads but the overlay cannot open; reported apart from an outage",
    ),
    ("missing-key", "No provider key: failure without processing"),
    ("dismissal", "Closing the checkout re-enables payment"),
    (
        "close-mid-payment",
        "Overlay closed while paying; checkout never opens and the late outcome is ignored",
    ),
    ("back-preserves-selection", "Back from payment keeps the chosen service"),
    (
        "order-degrade",
        "Order endpoint failure falls back to an order-less checkout",
    ),
    ("random-walk", "Seeded random events never break an invariant"),
];

/// Scenario keys run for `all`.
#[must_use]
pub fn all_keys() -> Vec<&'static str> {
    SCENARIOS.iter().map(|(key, _)| *key).collect()
}

#[must_use]
pub fn describe(key: &str) -> Option<&'static str> {
    SCENARIOS
        .iter()
        .find_map(|(k, description)| (*k == key).then_some(*description))
}

pub struct ScenarioCtx<'a> {
    pub assets: &'a TesterAssets,
    pub seed: u64,
    pub verbose: bool,
}

impl ScenarioCtx<'_> {
    fn config(&self) -> PaymentConfig {
        PaymentConfig::default().with_key("rzp_test_counsel")
    }

    fn service(&self, id: &str) -> Result<&Service> {
        self.assets
            .catalog
            .get(&ServiceId::new(id))
            .ok_or_else(|| anyhow!("service {id} missing from catalog"))
    }

    /// A seed-chosen service.
    fn any_service(&self) -> Result<&Service> {
        let mut rng = ChaCha20Rng::seed_from_u64(self.seed);
        let services: Vec<&Service> = self.assets.catalog.iter().collect();
        ensure!(!services.is_empty(), "catalog is empty");
        Ok(services[rng.gen_range(0..services.len())])
    }
}

/// Wizard state plus the trail of events that produced it.
struct Flow {
    state: WizardState,
    trail: Vec<&'static str>,
}

impl Flow {
    fn new() -> Self {
        Self {
            state: WizardState::default(),
            trail: Vec::new(),
        }
    }

    fn apply(&mut self, event: WizardEvent) -> Result<()> {
        self.trail.push(event.name());
        self.state = self.state.reduce(event);
        self.state
            .check_invariants()
            .with_context(|| format!("after {}", self.trail.join(" -> ")))
    }

    fn choose(&mut self, service: &Service) -> Result<()> {
        self.apply(WizardEvent::ChooseService {
            service: service.id.clone(),
        })
    }

    /// Press pay and wait for the attempt's outcome.
    async fn pay(
        &mut self,
        config: &PaymentConfig,
        service: &Service,
        gateway: &ScriptedGateway,
    ) -> Result<()> {
        match PaymentAttempt::begin(config, service) {
            Err(failure) => self.apply(WizardEvent::PaymentUnavailable { failure }),
            Ok(attempt) => {
                self.apply(attempt.started())?;
                ensure!(self.state.payment_status.is_processing(), "pay did not start");
                let outcome = attempt.run(gateway).await;
                self.apply(outcome)
            }
        }
    }

    fn expect_step(&self, step: WizardStep) -> Result<()> {
        ensure!(
            self.state.step == step,
            "expected {step:?}, at {:?} after {}",
            self.state.step,
            self.trail.join(" -> ")
        );
        Ok(())
    }

    fn failure(&self) -> Result<&PaymentFailure> {
        self.state
            .payment_status
            .failure()
            .ok_or_else(|| anyhow!("expected a failure, status {}", self.state.payment_status.label()))
    }
}

/// Run the scenario `key`. Returns `None` for unknown keys.
pub async fn run_scenario(key: &str, ctx: &ScenarioCtx<'_>) -> Option<Result<()>> {
    let result = match key {
        "marriage-booking" => marriage_booking(ctx).await,
        "decline-then-retry" => decline_then_retry(ctx).await,
        "sdk-unavailable" => sdk_unavailable(ctx).await,
        "overlay-failure" => overlay_failure(ctx).await,
        "missing-key" => missing_key(ctx).await,
        "dismissal" => dismissal(ctx).await,
        "close-mid-payment" => close_mid_payment(ctx).await,
        "back-preserves-selection" => back_preserves_selection(ctx),
        "order-degrade" => order_degrade(ctx).await,
        "random-walk" => walk(ctx),
        _ => return None,
    };
    Some(result)
}

async fn marriage_booking(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let service = ctx.service("marriage")?;
    ensure!(service.title == "Marriage & Relationship Guidance");
    ensure!(service.price.minor_units() == 149_900, "₹1499 must be 149900 paise");

    let gateway = ScriptedGateway::new([Script::Succeed("pay_marriage")]);
    let mut flow = Flow::new();
    flow.choose(service)?;
    flow.expect_step(WizardStep::Paying)?;
    flow.pay(&ctx.config(), service, &gateway).await?;
    flow.expect_step(WizardStep::Scheduling)?;
    flow.apply(WizardEvent::CompleteScheduling)?;
    flow.expect_step(WizardStep::Confirmed)?;

    let opened = gateway.opened();
    let request = opened.first().context("checkout never opened")?;
    ensure!(request.amount == 149_900, "amount sent was {}", request.amount);
    ensure!(request.currency.code() == "INR");
    ensure!(request.description.contains(&service.title));
    ensure!(flow.state.booking_complete);
    ensure!(flow.state.selected_service.as_ref() == Some(&service.id));
    ensure!(
        flow.state.receipt.as_ref().map(|r| r.payment_id.as_str()) == Some("pay_marriage")
    );
    Ok(())
}

async fn decline_then_retry(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let service = ctx.any_service()?;
    let gateway = ScriptedGateway::new([
        Script::Decline(Some("insufficient funds")),
        Script::Succeed("pay_retry"),
    ]);
    let config = ctx.config();
    let mut flow = Flow::new();
    flow.choose(service)?;
    flow.pay(&config, service, &gateway).await?;

    flow.expect_step(WizardStep::Paying)?;
    let message = flow.failure()?.to_string();
    ensure!(message.contains("insufficient funds"), "message was {message}");

    flow.apply(WizardEvent::RetryPayment)?;
    ensure!(flow.state.payment_status == PaymentStatus::NotStarted);
    flow.pay(&config, service, &gateway).await?;
    flow.expect_step(WizardStep::Scheduling)?;
    ensure!(flow.state.payment_status == PaymentStatus::Succeeded);
    ensure!(flow.state.selected_service.as_ref() == Some(&service.id));
    Ok(())
}

async fn sdk_unavailable(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let service = ctx.any_service()?;
    let gateway = ScriptedGateway::new([Script::SdkDown, Script::Decline(None)]);
    let config = ctx.config();
    let mut flow = Flow::new();
    flow.choose(service)?;

    flow.pay(&config, service, &gateway).await?;
    let sdk = flow.failure()?.clone();
    ensure!(sdk.kind() == "sdk_unavailable", "got {}", sdk.kind());
    ensure!(gateway.opened().is_empty(), "overlay opened without an SDK");

    flow.apply(WizardEvent::RetryPayment)?;
    flow.pay(&config, service, &gateway).await?;
    let declined = flow.failure()?.clone();
    ensure!(declined.kind() == "declined");
    ensure!(sdk.to_string() != declined.to_string());
    ensure!(gateway.sdk_loads() == 2, "a failed load must be retried");
    Ok(())
}

async fn overlay_failure(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let service = ctx.any_service()?;
    let gateway = ScriptedGateway::new([Script::OverlayFails, Script::Succeed("pay_reopened")]);
    let config = ctx.config();
    let mut flow = Flow::new();
    flow.choose(service)?;

    flow.pay(&config, service, &gateway).await?;
    let failure = flow.failure()?.clone();
    ensure!(failure.kind() == "checkout_failed", "got {}", failure.kind());
    ensure!(gateway.sdk_loads() == 1);

    flow.apply(WizardEvent::RetryPayment)?;
    flow.pay(&config, service, &gateway).await?;
    flow.expect_step(WizardStep::Scheduling)
}

async fn missing_key(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let service = ctx.any_service()?;
    let gateway = ScriptedGateway::new([Script::Succeed("pay_never")]);
    let mut flow = Flow::new();
    flow.choose(service)?;
    flow.pay(&PaymentConfig::default(), service, &gateway).await?;
    ensure!(*flow.failure()? == PaymentFailure::Configuration);
    ensure!(!flow.trail.contains(&"payment-started"), "processing was entered");
    ensure!(gateway.sdk_loads() == 0);
    Ok(())
}

async fn dismissal(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let service = ctx.any_service()?;
    let gateway = ScriptedGateway::new([Script::Dismiss, Script::Succeed("pay_after")]);
    let config = ctx.config();
    let mut flow = Flow::new();
    flow.choose(service)?;
    flow.pay(&config, service, &gateway).await?;
    flow.expect_step(WizardStep::Paying)?;
    ensure!(flow.state.payment_status == PaymentStatus::NotStarted);
    flow.pay(&config, service, &gateway).await?;
    flow.expect_step(WizardStep::Scheduling)
}

async fn close_mid_payment(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let service = ctx.any_service()?;
    let gateway = ScriptedGateway::new([Script::Succeed("pay_late")]);
    let mut flow = Flow::new();
    flow.choose(service)?;
    let guard = AttemptGuard::new();
    let attempt = PaymentAttempt::begin(&ctx.config(), service)?.with_guard(guard.clone());
    flow.apply(attempt.started())?;
    flow.apply(WizardEvent::Close)?;
    guard.cancel();
    ensure!(flow.state == WizardState::default());

    // reopened wizard, then the old attempt reports
    flow.choose(service)?;
    let before = flow.state.clone();
    let late = attempt.run(&gateway).await;
    flow.apply(late)?;
    ensure!(flow.state == before, "late outcome changed {before:?}");
    ensure!(gateway.opened().is_empty(), "checkout opened after close");
    Ok(())
}

fn back_preserves_selection(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let service = ctx.any_service()?;
    let mut flow = Flow::new();
    flow.choose(service)?;
    flow.apply(WizardEvent::Back)?;
    flow.expect_step(WizardStep::SelectingService)?;
    ensure!(flow.state.selected_service.as_ref() == Some(&service.id));
    flow.apply(WizardEvent::ContinueToPayment)?;
    flow.expect_step(WizardStep::Paying)?;
    flow.choose(service)?;
    ensure!(flow.state.step == WizardStep::Paying, "choose while paying is ignored");
    Ok(())
}

async fn order_degrade(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let service = ctx.any_service()?;
    let config = ctx.config();

    let issued = ScriptedGateway::new([Script::Succeed("pay_order")]).with_orders(OrderScript::Issue);
    let mut flow = Flow::new();
    flow.choose(service)?;
    flow.pay(&config, service, &issued).await?;
    let with_order = issued.opened();
    ensure!(
        with_order.first().and_then(|r| r.order_id.as_deref()).is_some(),
        "order id was not forwarded"
    );

    let failing = ScriptedGateway::new([Script::Succeed("pay_plain")]).with_orders(OrderScript::Fail);
    let mut flow = Flow::new();
    flow.choose(service)?;
    flow.pay(&config, service, &failing).await?;
    flow.expect_step(WizardStep::Scheduling)?;
    ensure!(
        failing.opened().first().is_some_and(|r| r.order_id.is_none()),
        "failed order should open an order-less checkout"
    );
    Ok(())
}

fn walk(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let stats = random_walk(&ctx.assets.catalog, ctx.seed, DEFAULT_WALK_STEPS)?;
    if ctx.verbose {
        println!(
            "   walk seed {}: {} applied, {} ignored, {} closes, {} confirmed steps",
            ctx.seed, stats.applied, stats.ignored, stats.closes, stats.confirmed
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(assets: &TesterAssets, seed: u64) -> ScenarioCtx<'_> {
        ScenarioCtx {
            assets,
            seed,
            verbose: false,
        }
    }

    #[tokio::test]
    async fn every_listed_scenario_passes() {
        let assets = TesterAssets::load_default().unwrap();
        for seed in [1, 42, 1337] {
            for key in all_keys() {
                let result = run_scenario(key, &ctx(&assets, seed)).await;
                match result {
                    Some(Ok(())) => {}
                    Some(Err(err)) => panic!("{key} seed {seed}: {err:#}"),
                    None => panic!("{key} is listed but not runnable"),
                }
            }
        }
    }

    #[tokio::test]
    async fn unknown_scenarios_are_reported() {
        let assets = TesterAssets::load_default().unwrap();
        assert!(run_scenario("nope", &ctx(&assets, 1)).await.is_none());
        assert!(describe("nope").is_none());
        assert!(describe("marriage-booking").is_some());
    }
}
