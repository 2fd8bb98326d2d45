//! Razorpay implementation of the checkout capability.
pub mod order;
pub mod sdk;

use async_trait::async_trait;
use counsel_core::{
    CheckoutGateway, CheckoutOutcome, CheckoutRequest, OrderError, OrderRequest, OrderResponse,
    PaymentConfig, SdkLoadError,
};
use std::rc::Rc;

/// Gateway that drives Razorpay Checkout v1 in the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RazorpayGateway {
    config: PaymentConfig,
}

impl RazorpayGateway {
    #[must_use]
    pub const fn new(config: PaymentConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl CheckoutGateway for RazorpayGateway {
    async fn load_sdk(&self) -> Result<(), SdkLoadError> {
        sdk::load_script(
            sdk::RAZORPAY_SCRIPT_ID,
            sdk::RAZORPAY_SCRIPT_SRC,
            sdk::RAZORPAY_GLOBAL,
            self.config.sdk_timeout_ms,
        )
        .await
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResponse, OrderError> {
        order::create_order(
            self.config.order_endpoint.as_deref(),
            order,
            self.config.order_timeout_ms,
        )
        .await
    }

    async fn open_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutOutcome, SdkLoadError> {
        overlay::open(request).await
    }
}

/// Shared gateway handle passed through component props.
#[derive(Clone)]
pub struct GatewayHandle(pub Rc<dyn CheckoutGateway>);

impl GatewayHandle {
    #[must_use]
    pub fn razorpay(config: PaymentConfig) -> Self {
        Self(Rc::new(RazorpayGateway::new(config)))
    }
}

impl PartialEq for GatewayHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for GatewayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GatewayHandle")
    }
}

/// Reason text from a `payment.failed` payload: `{error: {description, reason}}`.
fn decline_reason(payload: &serde_json::Value) -> Option<String> {
    let error = payload.get("error")?;
    ["description", "reason"]
        .iter()
        .filter_map(|field| error.get(field).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(target_arch = "wasm32")]
mod overlay {
    use super::decline_reason;
    use crate::dom::js_error_message;
    use counsel_core::{CheckoutOutcome, CheckoutRequest, PaymentReceipt, SdkLoadError};
    use futures::channel::oneshot;
    use js_sys::{Object, Reflect};
    use serde::Serialize;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        type Razorpay;

        #[wasm_bindgen(constructor, catch)]
        fn new(options: &JsValue) -> Result<Razorpay, JsValue>;

        #[wasm_bindgen(method, catch)]
        fn open(this: &Razorpay) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch)]
        fn close(this: &Razorpay) -> Result<(), JsValue>;

        #[wasm_bindgen(method)]
        fn on(this: &Razorpay, event: &str, callback: &JsValue);
    }

    #[derive(Serialize)]
    struct Theme<'a> {
        color: &'a str,
    }

    #[derive(Serialize)]
    struct Options<'a> {
        key: &'a str,
        amount: u64,
        currency: &'a str,
        name: &'a str,
        description: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        order_id: Option<&'a str>,
        theme: Theme<'a>,
    }

    type Slot = Rc<RefCell<Option<oneshot::Sender<CheckoutOutcome>>>>;

    /// First report wins; later callbacks find the slot empty.
    fn settle(slot: &Slot, outcome: CheckoutOutcome) {
        if let Some(tx) = slot.borrow_mut().take() {
            let _ = tx.send(outcome);
        }
    }

    fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), SdkLoadError> {
        Reflect::set(target, &JsValue::from_str(key), value)
            .map(|_| ())
            .map_err(|e| SdkLoadError::Open(js_error_message(&e)))
    }

    pub(super) async fn open(request: &CheckoutRequest) -> Result<CheckoutOutcome, SdkLoadError> {
        let options = serde_wasm_bindgen::to_value(&Options {
            key: &request.key,
            amount: request.amount,
            currency: request.currency.code(),
            name: &request.name,
            description: &request.description,
            order_id: request.order_id.as_deref(),
            theme: Theme {
                color: &request.theme_color,
            },
        })
        .map_err(|e| SdkLoadError::Open(e.to_string()))?;

        let (tx, rx) = oneshot::channel();
        let slot: Slot = Rc::new(RefCell::new(Some(tx)));

        // the provider may call back long after this attempt settles, so the
        // closures are handed to JS instead of being dropped with this frame
        let on_success = {
            let slot = Rc::clone(&slot);
            Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| {
                let outcome = match serde_wasm_bindgen::from_value::<PaymentReceipt>(response) {
                    Ok(receipt) => CheckoutOutcome::Succeeded(receipt),
                    Err(err) => {
                        log::error!("unreadable payment response: {err}");
                        CheckoutOutcome::Declined { reason: None }
                    }
                };
                settle(&slot, outcome);
            })
            .into_js_value()
        };
        let on_dismiss = {
            let slot = Rc::clone(&slot);
            Closure::<dyn FnMut()>::new(move || settle(&slot, CheckoutOutcome::Dismissed))
                .into_js_value()
        };
        set(&options, "handler", &on_success)?;
        let modal = Object::new();
        set(&modal, "ondismiss", &on_dismiss)?;
        set(&options, "modal", &modal)?;

        let rzp = Rc::new(Razorpay::new(&options).map_err(|e| SdkLoadError::Open(js_error_message(&e)))?);

        let on_failed = {
            let slot = Rc::clone(&slot);
            let rzp = Rc::clone(&rzp);
            Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
                let payload: serde_json::Value =
                    serde_wasm_bindgen::from_value(payload).unwrap_or_default();
                settle(
                    &slot,
                    CheckoutOutcome::Declined {
                        reason: decline_reason(&payload),
                    },
                );
                if let Err(err) = rzp.close() {
                    log::debug!("checkout already closed: {}", js_error_message(&err));
                }
            })
            .into_js_value()
        };
        rzp.on("payment.failed", &on_failed);
        rzp.open()
            .map_err(|e| SdkLoadError::Open(js_error_message(&e)))?;

        rx.await
            .map_err(|_| SdkLoadError::Open("checkout closed without reporting".into()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod overlay {
    use counsel_core::{CheckoutOutcome, CheckoutRequest, SdkLoadError};

    #[allow(clippy::unused_async)]
    pub(super) async fn open(_request: &CheckoutRequest) -> Result<CheckoutOutcome, SdkLoadError> {
        Err(SdkLoadError::Open("checkout requires a browser".into()))
    }
}
