//! Counselling booking core
//!
//! Platform-agnostic domain for the counselling practice site: the service
//! catalog, the booking wizard state machine, the page shell, the checkout
//! contract and the scheduling embed configuration.
//! This crate has no DOM or wasm dependencies.

pub mod catalog;
pub mod payment;
pub mod price;
pub mod scheduling;
pub mod shell;
pub mod wizard;

pub use catalog::{
    BUNDLED_SERVICES_JSON, CatalogError, Service, ServiceCatalog, ServiceIcon, ServiceId,
};
pub use payment::{
    AttemptGuard, AttemptId, CheckoutGateway, CheckoutOutcome, CheckoutRequest,
    DEFAULT_ORDER_ENDPOINT, OrderError, OrderRequest, OrderResponse, PaymentAttempt,
    PaymentConfig, PaymentFailure, PaymentReceipt, SdkLoadError, prepare_checkout, run_checkout,
    run_checkout_while,
};
pub use price::{Currency, Price, PriceParseError};
pub use scheduling::{CampaignTags, DEFAULT_SCHEDULING_URL, PageSettings, SchedulingEmbed};
pub use shell::{ShellEvent, ShellState};
pub use wizard::{
    IgnoredEvent, InvariantViolation, PaymentStatus, WizardEvent, WizardState, WizardStep,
};
