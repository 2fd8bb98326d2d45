use crate::i18n::{t, tr1};
use counsel_core::{PaymentFailure, PaymentStatus, Service};
use yew::prelude::*;

/// User-facing text for a failed attempt. Declines quote the provider reason.
#[must_use]
pub fn failure_message(failure: &PaymentFailure) -> String {
    match failure {
        PaymentFailure::Declined {
            reason: Some(reason),
        } => tr1("booking.payment.errors.declined_reason", "reason", reason),
        other => t(&format!("booking.payment.errors.{}", other.kind())),
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub service: Service,
    pub status: PaymentStatus,
    pub on_pay: Callback<()>,
    pub on_retry: Callback<()>,
    pub on_back: Callback<()>,
}

#[function_component(PaymentForm)]
pub fn payment_form(p: &Props) -> Html {
    let processing = p.status.is_processing();
    let can_pay = p.status == PaymentStatus::NotStarted;
    let emit = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let price = p.service.price.to_string();

    html! {
        <div class="booking-payment">
            <h3>{ t("booking.payment.title") }</h3>
            <p class="booking-payment__subtitle">{ t("booking.payment.subtitle") }</p>

            <section class="order-summary" aria-label={t("booking.payment.summary")}>
                <h4>{ t("booking.payment.summary") }</h4>
                <p class="order-summary__service">{ p.service.title.clone() }</p>
                <dl>
                    <dt>{ t("booking.payment.duration") }</dt>
                    <dd>{ p.service.duration.clone() }</dd>
                    <dt>{ t("booking.payment.total") }</dt>
                    <dd class="order-summary__total">{ price.clone() }</dd>
                </dl>
            </section>

            if let Some(failure) = p.status.failure() {
                <div class="alert alert-error" role="alert" data-failure={failure.kind()}>
                    <p class="alert__title">{ t("booking.payment.failed") }</p>
                    <p>{ failure_message(failure) }</p>
                    <button type="button" class="btn btn-outline" onclick={emit(&p.on_retry)}>
                        { t("booking.payment.retry") }
                    </button>
                </div>
            }

            <button
                type="button"
                class="btn btn-primary booking-payment__pay"
                disabled={!can_pay}
                aria-busy={processing.then_some("true")}
                onclick={emit(&p.on_pay)}
            >
                if processing {
                    <><span class="spinner" aria-hidden="true"></span>{ t("booking.payment.processing") }</>
                } else {
                    { tr1("booking.payment.pay", "price", &price) }
                }
            </button>
            <button type="button" class="btn btn-link" disabled={processing} onclick={emit(&p.on_back)}>
                { t("booking.payment.back") }
            </button>
            <p class="booking-payment__secure">{ t("booking.payment.secure") }</p>
        </div>
    }
}
