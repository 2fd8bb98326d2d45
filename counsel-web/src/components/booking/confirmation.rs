use crate::i18n::{t, tr1};
use counsel_core::{PaymentReceipt, Service};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub service: Service,
    #[prop_or_default]
    pub receipt: Option<PaymentReceipt>,
    pub support_mailto: AttrValue,
    pub on_done: Callback<()>,
}

#[function_component(Confirmation)]
pub fn confirmation(p: &Props) -> Html {
    let on_done = {
        let cb = p.on_done.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="booking-confirm">
            <h3>{ t("booking.confirm.title") }</h3>
            <p class="booking-confirm__body">{ tr1("booking.confirm.body", "service", &p.service.title) }</p>
            if let Some(receipt) = p.receipt.as_ref() {
                <p class="booking-confirm__reference">
                    { tr1("booking.confirm.reference", "id", &receipt.payment_id) }
                </p>
            }
            <section>
                <h4>{ t("booking.confirm.next_title") }</h4>
                <ul>
                    <li>{ t("booking.confirm.next_email") }</li>
                    <li>{ t("booking.confirm.next_calendar") }</li>
                    <li>{ t("booking.confirm.next_reminder") }</li>
                    <li>{ t("booking.confirm.next_reschedule") }</li>
                </ul>
            </section>
            <section>
                <h4>{ t("booking.confirm.prepare_title") }</h4>
                <p>{ t("booking.confirm.prepare_body") }</p>
            </section>
            <p class="booking-confirm__receipt">{ t("booking.confirm.receipt") }</p>
            <div class="booking-confirm__actions">
                <button type="button" class="btn btn-primary" onclick={on_done}>{ t("booking.confirm.done") }</button>
                <a class="btn btn-outline" href={p.support_mailto.clone()}>{ t("booking.confirm.support") }</a>
            </div>
        </div>
    }
}
