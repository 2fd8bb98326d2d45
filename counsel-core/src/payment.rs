//! Checkout contract between the booking wizard and a hosted payment provider.
//!
//! The provider SDK sits behind [`CheckoutGateway`]; everything that decides
//! what an attempt produces lives here so the browser adapter stays a thin
//! translation layer and the flow can be exercised with fakes.
use crate::catalog::Service;
use crate::price::Currency;
use crate::wizard::WizardEvent;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use thiserror::Error;

/// Default display name passed to the checkout overlay.
pub const DEFAULT_BUSINESS_NAME: &str = "Dinesh Pathak Counselling";
/// Default accent colour for the checkout overlay.
pub const DEFAULT_THEME_COLOR: &str = "#10b981";
pub const DEFAULT_SDK_TIMEOUT_MS: u32 = 15_000;
pub const DEFAULT_ORDER_TIMEOUT_MS: u32 = 8_000;
/// Same-origin endpoint that creates a provider order before checkout.
pub const DEFAULT_ORDER_ENDPOINT: &str = "/api/create-order";

static NEXT_ATTEMPT: AtomicU64 = AtomicU64::new(1);

/// Identifies one press of the pay button for the lifetime of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptId(u64);

impl AttemptId {
    /// Allocate a fresh id. Ids are never reused, even across overlay reopen cycles.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_ATTEMPT.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared liveness flag for the wizard that started an attempt.
///
/// Clones observe the same flag. Once cancelled, an attempt still loading
/// the SDK or waiting on an order never opens the checkout overlay.
#[derive(Debug, Clone)]
pub struct AttemptGuard(Arc<AtomicBool>);

impl Default for AttemptGuard {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl AttemptGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Build-time payment settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Publishable provider key; `None` disables payments.
    pub key_id: Option<String>,
    pub business_name: String,
    pub theme_color: String,
    /// Endpoint that creates a provider order before checkout; `None` skips
    /// the pre-step.
    pub order_endpoint: Option<String>,
    pub sdk_timeout_ms: u32,
    pub order_timeout_ms: u32,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            key_id: None,
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            order_endpoint: Some(DEFAULT_ORDER_ENDPOINT.to_string()),
            sdk_timeout_ms: DEFAULT_SDK_TIMEOUT_MS,
            order_timeout_ms: DEFAULT_ORDER_TIMEOUT_MS,
        }
    }
}

impl PaymentConfig {
    #[must_use]
    pub fn with_key(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    #[must_use]
    pub fn with_order_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.order_endpoint = Some(endpoint.into());
        self
    }

    /// Skip the order pre-step; checkout opens without an order id.
    #[must_use]
    pub fn without_order_endpoint(mut self) -> Self {
        self.order_endpoint = None;
        self
    }

    /// The configured key, ignoring blank values.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key_id
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Body of the order pre-step request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub amount: u64,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
}

/// Everything the checkout overlay needs for one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub key: String,
    /// Amount in minor units.
    pub amount: u64,
    pub currency: Currency,
    pub name: String,
    pub description: String,
    pub order_id: Option<String>,
    pub theme_color: String,
}

/// Provider references for a captured payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    #[serde(alias = "razorpay_payment_id")]
    pub payment_id: String,
    #[serde(default, alias = "razorpay_order_id")]
    pub order_id: Option<String>,
    #[serde(default, alias = "razorpay_signature")]
    pub signature: Option<String>,
}

/// What the checkout overlay reported for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Succeeded(PaymentReceipt),
    Declined { reason: Option<String> },
    /// The user closed the overlay without paying.
    Dismissed,
    /// The wizard closed before the overlay opened; nothing was shown.
    Abandoned,
}

/// Why an attempt did not capture a payment.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PaymentFailure {
    #[error("payments are not configured")]
    Configuration,
    #[error("payment service could not be loaded: {detail}")]
    SdkUnavailable { detail: String },
    #[error("checkout could not be opened: {detail}")]
    CheckoutFailed { detail: String },
    #[error("payment declined{}", reason_suffix(.reason))]
    Declined { reason: Option<String> },
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(": {r}"))
        .unwrap_or_default()
}

impl PaymentFailure {
    /// Stable key used to pick the user-facing message.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::SdkUnavailable { .. } => "sdk_unavailable",
            Self::CheckoutFailed { .. } => "checkout_failed",
            Self::Declined { .. } => "declined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkLoadError {
    #[error("script failed to load: {0}")]
    Network(String),
    #[error("timed out")]
    TimedOut,
    #[error("script loaded but checkout constructor is missing")]
    MissingGlobal,
    #[error("checkout could not be opened: {0}")]
    Open(String),
}

impl From<SdkLoadError> for PaymentFailure {
    fn from(err: SdkLoadError) -> Self {
        match err {
            SdkLoadError::Open(detail) => Self::CheckoutFailed { detail },
            other => Self::SdkUnavailable {
                detail: other.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("no order endpoint configured")]
    NotConfigured,
    #[error("order request failed: {0}")]
    Request(String),
    #[error("order endpoint returned status {0}")]
    Status(u16),
    #[error("order response could not be decoded: {0}")]
    Decode(String),
    #[error("order request timed out")]
    TimedOut,
}

/// Capabilities of a hosted checkout provider.
#[async_trait(?Send)]
pub trait CheckoutGateway {
    /// Make the provider SDK available. Implementations cache a successful load.
    async fn load_sdk(&self) -> Result<(), SdkLoadError>;

    /// Ask the backend for a provider order id.
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResponse, OrderError>;

    /// Open the interactive checkout and wait for its single outcome.
    ///
    /// There is no local timeout: the overlay always reports a dismissal.
    async fn open_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutOutcome, SdkLoadError>;
}

/// Build the checkout parameters for `service`.
///
/// # Errors
///
/// Returns [`PaymentFailure::Configuration`] when no provider key is set.
pub fn prepare_checkout(
    config: &PaymentConfig,
    service: &Service,
    order_id: Option<String>,
) -> Result<CheckoutRequest, PaymentFailure> {
    let key = config.key().ok_or(PaymentFailure::Configuration)?;
    Ok(CheckoutRequest {
        key: key.to_string(),
        amount: service.price.minor_units(),
        currency: service.price.currency(),
        name: config.business_name.clone(),
        description: service.checkout_description(),
        order_id,
        theme_color: config.theme_color.clone(),
    })
}

/// Run one checkout end to end: load the SDK, try to obtain an order id,
/// then open the overlay.
///
/// # Errors
///
/// Returns a [`PaymentFailure`] when the key is missing, the SDK cannot be
/// loaded or the overlay cannot be opened. Declines and dismissals are
/// reported through the [`CheckoutOutcome`].
pub async fn run_checkout<G>(
    gateway: &G,
    config: &PaymentConfig,
    service: &Service,
) -> Result<CheckoutOutcome, PaymentFailure>
where
    G: CheckoutGateway + ?Sized,
{
    run_checkout_while(gateway, config, service, &AttemptGuard::new()).await
}

/// [`run_checkout`] for an attempt owned by a wizard that may close first.
///
/// `guard` is checked after the SDK load and after the order pre-step; a
/// cancelled guard yields [`CheckoutOutcome::Abandoned`] without opening
/// the overlay.
///
/// # Errors
///
/// Same as [`run_checkout`].
pub async fn run_checkout_while<G>(
    gateway: &G,
    config: &PaymentConfig,
    service: &Service,
    guard: &AttemptGuard,
) -> Result<CheckoutOutcome, PaymentFailure>
where
    G: CheckoutGateway + ?Sized,
{
    // fail fast before touching the network
    prepare_checkout(config, service, None)?;

    gateway.load_sdk().await.map_err(|err| {
        log::error!("checkout SDK unavailable: {err}");
        PaymentFailure::from(err)
    })?;
    if !guard.is_live() {
        log::info!("wizard closed while the checkout SDK loaded");
        return Ok(CheckoutOutcome::Abandoned);
    }

    let order = OrderRequest {
        amount: service.price.minor_units(),
        currency: service.price.currency(),
    };
    let order_id = match gateway.create_order(&order).await {
        Ok(response) => Some(response.id),
        Err(OrderError::NotConfigured) => None,
        Err(err) => {
            log::warn!("continuing without order id: {err}");
            None
        }
    };
    if !guard.is_live() {
        log::info!("wizard closed while the order was created");
        return Ok(CheckoutOutcome::Abandoned);
    }

    let request = prepare_checkout(config, service, order_id)?;
    let outcome = gateway.open_checkout(&request).await.map_err(|err| {
        log::error!("checkout overlay failed: {err}");
        PaymentFailure::from(err)
    })?;
    match &outcome {
        CheckoutOutcome::Succeeded(receipt) => {
            log::info!("payment captured: {}", receipt.payment_id);
        }
        CheckoutOutcome::Declined { reason } => {
            log::warn!("payment declined: {}", reason.as_deref().unwrap_or("no reason"));
        }
        CheckoutOutcome::Dismissed | CheckoutOutcome::Abandoned => {
            log::info!("checkout dismissed");
        }
    }
    Ok(outcome)
}

/// One press of the pay button, tagged so its outcome can be matched to it.
#[derive(Debug, Clone)]
pub struct PaymentAttempt {
    id: AttemptId,
    service: Service,
    config: PaymentConfig,
    guard: AttemptGuard,
}

impl PaymentAttempt {
    /// Start an attempt for `service`.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentFailure::Configuration`] when payments are not
    /// configured; no attempt id is allocated in that case.
    pub fn begin(config: &PaymentConfig, service: &Service) -> Result<Self, PaymentFailure> {
        if config.key().is_none() {
            return Err(PaymentFailure::Configuration);
        }
        Ok(Self {
            id: AttemptId::next(),
            service: service.clone(),
            config: config.clone(),
            guard: AttemptGuard::new(),
        })
    }

    /// Tie the attempt to the liveness of its wizard.
    #[must_use]
    pub fn with_guard(mut self, guard: AttemptGuard) -> Self {
        self.guard = guard;
        self
    }

    #[must_use]
    pub const fn id(&self) -> AttemptId {
        self.id
    }

    /// Event to dispatch before the attempt is awaited.
    #[must_use]
    pub const fn started(&self) -> WizardEvent {
        WizardEvent::PaymentStarted { attempt: self.id }
    }

    /// Drive the checkout and translate its result into the wizard event
    /// that closes this attempt.
    pub async fn run<G>(self, gateway: &G) -> WizardEvent
    where
        G: CheckoutGateway + ?Sized,
    {
        let attempt = self.id;
        match run_checkout_while(gateway, &self.config, &self.service, &self.guard).await {
            Ok(CheckoutOutcome::Succeeded(receipt)) => {
                WizardEvent::PaymentSucceeded { attempt, receipt }
            }
            Ok(CheckoutOutcome::Declined { reason }) => WizardEvent::PaymentFailed {
                attempt,
                failure: PaymentFailure::Declined { reason },
            },
            Ok(CheckoutOutcome::Dismissed | CheckoutOutcome::Abandoned) => {
                WizardEvent::CheckoutDismissed { attempt }
            }
            Err(failure) => WizardEvent::PaymentFailed { attempt, failure },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ServiceIcon, ServiceId};
    use crate::price::Price;

    fn service() -> Service {
        Service {
            id: ServiceId::new("marriage"),
            title: "Marriage & Relationship Guidance".to_string(),
            price: Price::parse("₹1499").unwrap(),
            duration: "45 minutes".to_string(),
            description: String::new(),
            headline: None,
            overview: String::new(),
            audience: Vec::new(),
            includes: Vec::new(),
            icon: ServiceIcon::Heart,
        }
    }

    #[test]
    fn attempt_ids_are_monotonic() {
        let a = AttemptId::next();
        let b = AttemptId::next();
        assert!(b > a);
        assert_eq!(AttemptId::from_raw(7).to_string(), "#7");
    }

    #[test]
    fn prepare_requires_a_non_blank_key() {
        let config = PaymentConfig::default();
        assert_eq!(
            prepare_checkout(&config, &service(), None),
            Err(PaymentFailure::Configuration)
        );
        let blank = PaymentConfig::default().with_key("   ");
        assert!(blank.key().is_none());
    }

    #[test]
    fn prepare_uses_minor_units_and_theme() {
        let config = PaymentConfig::default().with_key("rzp_test_123");
        let request = prepare_checkout(&config, &service(), Some("order_9".into())).unwrap();
        assert_eq!(request.amount, 149_900);
        assert_eq!(request.currency.code(), "INR");
        assert_eq!(request.theme_color, "#10b981");
        assert_eq!(request.order_id.as_deref(), Some("order_9"));
        assert!(request.description.starts_with("Marriage & Relationship Guidance"));
    }

    #[test]
    fn receipt_accepts_provider_field_names() {
        let json = r#"{"razorpay_payment_id":"pay_1","razorpay_order_id":"order_1"}"#;
        let receipt: PaymentReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.payment_id, "pay_1");
        assert_eq!(receipt.order_id.as_deref(), Some("order_1"));
        assert!(receipt.signature.is_none());
    }

    #[test]
    fn failure_messages_are_distinct() {
        let sdk = PaymentFailure::from(SdkLoadError::TimedOut);
        let declined = PaymentFailure::Declined {
            reason: Some("insufficient funds".into()),
        };
        assert_ne!(sdk.kind(), declined.kind());
        assert_eq!(sdk.to_string(), "payment service could not be loaded: timed out");
        assert_eq!(declined.to_string(), "payment declined: insufficient funds");
        assert_eq!(
            PaymentFailure::Declined { reason: None }.to_string(),
            "payment declined"
        );
    }

    #[test]
    fn overlay_failures_are_not_reported_as_sdk_outages() {
        let open = PaymentFailure::from(SdkLoadError::Open("constructor threw".into()));
        assert_eq!(open.kind(), "checkout_failed");
        assert_eq!(open.to_string(), "checkout could not be opened: constructor threw");
        let missing = PaymentFailure::from(SdkLoadError::MissingGlobal);
        assert_eq!(missing.kind(), "sdk_unavailable");
    }

    #[test]
    fn guard_clones_share_cancellation() {
        let guard = AttemptGuard::new();
        let held = guard.clone();
        assert!(held.is_live());
        guard.cancel();
        assert!(!held.is_live());
    }

    #[test]
    fn default_config_targets_the_same_origin_order_endpoint() {
        let config = PaymentConfig::default();
        assert_eq!(config.order_endpoint.as_deref(), Some(DEFAULT_ORDER_ENDPOINT));
        assert!(config.without_order_endpoint().order_endpoint.is_none());
    }

    #[test]
    fn begin_without_key_allocates_nothing() {
        assert!(matches!(
            PaymentAttempt::begin(&PaymentConfig::default(), &service()),
            Err(PaymentFailure::Configuration)
        ));
    }
}
