//! The booking overlay: service choice, payment, scheduling and confirmation.
pub mod confirmation;
pub mod payment_form;
pub mod progress;
pub mod scheduling;
pub mod service_selection;

use crate::app::state::WizardModel;
use crate::checkout::GatewayHandle;
use crate::config::SiteConfig;
use crate::i18n::{t, tr1};
use confirmation::Confirmation;
use counsel_core::{
    AttemptGuard, PaymentAttempt, SchedulingEmbed, Service, ServiceCatalog, ServiceId, WizardEvent,
    WizardState, WizardStep,
};
use payment_form::{PaymentForm, failure_message};
use progress::Progress;
use scheduling::Scheduling;
use service_selection::ServiceSelection;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub catalog: Rc<ServiceCatalog>,
    pub config: Rc<SiteConfig>,
    pub gateway: GatewayHandle,
    pub support_mailto: AttrValue,
    pub on_close: Callback<()>,
    /// State the wizard mounts with.
    #[prop_or_default]
    pub initial: WizardState,
}

/// Text for the live region after each change of step or payment result.
#[must_use]
pub fn status_text(state: &WizardState, catalog: &ServiceCatalog) -> String {
    if let Some(failure) = state.payment_status.failure() {
        return failure_message(failure);
    }
    match state.step {
        WizardStep::Paying => {
            let title = selected(state, catalog).map_or("", |s| s.title.as_str());
            tr1("booking.status.payment", "service", title)
        }
        step => t(&format!("booking.status.{}", step.key())),
    }
}

/// Scheduling widget URL for the chosen service.
#[must_use]
pub fn scheduling_url(base: &str, service: Option<&Service>) -> String {
    let embed = SchedulingEmbed::for_service(base, service);
    #[cfg(target_arch = "wasm32")]
    let embed = match crate::dom::page_host() {
        Some(host) => embed.with_embed_domain(host),
        None => embed,
    };
    embed.embed_url()
}

fn selected<'a>(state: &WizardState, catalog: &'a ServiceCatalog) -> Option<&'a Service> {
    state.selected_service.as_ref().and_then(|id| catalog.get(id))
}

#[function_component(BookingWizard)]
pub fn booking_wizard(p: &Props) -> Html {
    let wizard = {
        let initial = p.initial.clone();
        use_reducer(move || WizardModel(initial))
    };
    let state = &wizard.0;
    let liveness = use_memo((), |_| AttemptGuard::new());

    {
        let liveness = (*liveness).clone();
        use_effect_with((), move |_| move || liveness.cancel());
    }

    {
        let status = status_text(state, &p.catalog);
        use_effect_with(status, |status| {
            crate::a11y::set_status(status);
            || {}
        });
    }

    let dispatch = |event: WizardEvent| {
        let wizard = wizard.dispatcher();
        Callback::from(move |()| wizard.dispatch(event.clone()))
    };

    let on_choose = {
        let wizard = wizard.dispatcher();
        Callback::from(move |service: ServiceId| {
            wizard.dispatch(WizardEvent::ChooseService { service });
        })
    };

    let on_pay = {
        let wizard = wizard.dispatcher();
        let gateway = p.gateway.clone();
        let payment = p.config.payment.clone();
        let service = selected(state, &p.catalog).cloned();
        let liveness = (*liveness).clone();
        Callback::from(move |()| {
            let Some(service) = service.as_ref() else {
                return;
            };
            match PaymentAttempt::begin(&payment, service) {
                Err(failure) => {
                    log::error!("payment unavailable: {failure}");
                    wizard.dispatch(WizardEvent::PaymentUnavailable { failure });
                }
                Ok(attempt) => {
                    log::info!("starting payment attempt {}", attempt.id());
                    wizard.dispatch(attempt.started());
                    let attempt = attempt.with_guard(liveness.clone());
                    let liveness = liveness.clone();
                    let wizard = wizard.clone();
                    let gateway = gateway.clone();
                    yew::platform::spawn_local(async move {
                        let outcome = attempt.run(gateway.0.as_ref()).await;
                        if liveness.is_live() {
                            wizard.dispatch(outcome);
                        } else {
                            log::debug!("dropping outcome of closed booking dialog");
                        }
                    });
                }
            }
        })
    };

    let on_done = {
        let wizard = wizard.dispatcher();
        let on_close = p.on_close.clone();
        Callback::from(move |()| {
            wizard.dispatch(WizardEvent::Close);
            on_close.emit(());
        })
    };

    let body = match (state.step, selected(state, &p.catalog)) {
        (WizardStep::Paying, Some(service)) => html! {
            <PaymentForm
                service={service.clone()}
                status={state.payment_status.clone()}
                {on_pay}
                on_retry={dispatch(WizardEvent::RetryPayment)}
                on_back={dispatch(WizardEvent::Back)}
            />
        },
        (WizardStep::Scheduling, service) => html! {
            <Scheduling
                embed_url={scheduling_url(&p.config.scheduling_url, service)}
                on_complete={dispatch(WizardEvent::CompleteScheduling)}
            />
        },
        (WizardStep::Confirmed, Some(service)) => html! {
            <Confirmation
                service={service.clone()}
                receipt={state.receipt.clone()}
                support_mailto={p.support_mailto.clone()}
                {on_done}
            />
        },
        _ => html! {
            <ServiceSelection
                catalog={Rc::clone(&p.catalog)}
                selected={state.selected_service.clone()}
                {on_choose}
                on_continue={dispatch(WizardEvent::ContinueToPayment)}
            />
        },
    };

    html! {
        <div class="booking-wizard" data-step={state.step.key()} data-payment={state.payment_status.label()}>
            <Progress step={state.step} />
            { body }
        </div>
    }
}
