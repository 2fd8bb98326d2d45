//! Scripted stand-in for the hosted checkout.
use async_trait::async_trait;
use counsel_core::{
    CheckoutGateway, CheckoutOutcome, CheckoutRequest, OrderError, OrderRequest, OrderResponse,
    PaymentReceipt, SdkLoadError,
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// What the provider does for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    Succeed(&'static str),
    Decline(Option<&'static str>),
    Dismiss,
    /// The script tag never loads.
    SdkDown,
    /// The SDK loads but the overlay refuses to open.
    OverlayFails,
}

/// How the order endpoint behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderScript {
    #[default]
    Disabled,
    Issue,
    Fail,
}

#[derive(Debug, Default)]
pub struct ScriptedGateway {
    plan: RefCell<VecDeque<Script>>,
    orders: OrderScript,
    sdk_loads: Cell<u32>,
    opened: RefCell<Vec<CheckoutRequest>>,
}

impl ScriptedGateway {
    #[must_use]
    pub fn new(plan: impl IntoIterator<Item = Script>) -> Self {
        Self {
            plan: RefCell::new(plan.into_iter().collect()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_orders(mut self, orders: OrderScript) -> Self {
        self.orders = orders;
        self
    }

    /// Every checkout request handed to the overlay, in order.
    #[must_use]
    pub fn opened(&self) -> Vec<CheckoutRequest> {
        self.opened.borrow().clone()
    }

    #[must_use]
    pub fn sdk_loads(&self) -> u32 {
        self.sdk_loads.get()
    }
}

#[async_trait(?Send)]
impl CheckoutGateway for ScriptedGateway {
    async fn load_sdk(&self) -> Result<(), SdkLoadError> {
        self.sdk_loads.set(self.sdk_loads.get() + 1);
        let mut plan = self.plan.borrow_mut();
        if plan.front() == Some(&Script::SdkDown) {
            plan.pop_front();
            return Err(SdkLoadError::Network("checkout.js unreachable".into()));
        }
        Ok(())
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResponse, OrderError> {
        match self.orders {
            OrderScript::Disabled => Err(OrderError::NotConfigured),
            OrderScript::Issue => Ok(OrderResponse {
                id: format!("order_{}", order.amount),
            }),
            OrderScript::Fail => Err(OrderError::Status(502)),
        }
    }

    async fn open_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutOutcome, SdkLoadError> {
        self.opened.borrow_mut().push(request.clone());
        let script = self.plan.borrow_mut().pop_front();
        if script == Some(Script::OverlayFails) {
            return Err(SdkLoadError::Open("checkout options rejected".into()));
        }
        Ok(match script {
            Some(Script::Succeed(payment_id)) => CheckoutOutcome::Succeeded(PaymentReceipt {
                payment_id: payment_id.to_string(),
                order_id: request.order_id.clone(),
                signature: None,
            }),
            Some(Script::Decline(reason)) => CheckoutOutcome::Declined {
                reason: reason.map(str::to_string),
            },
            Some(Script::Dismiss | Script::SdkDown | Script::OverlayFails) | None => {
                CheckoutOutcome::Dismissed
            }
        })
    }
}
