use crate::components::icons::ServiceGlyph;
use crate::i18n::{t, tr1};
use counsel_core::{Service, ServiceCatalog, ServiceId};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub catalog: Rc<ServiceCatalog>,
    #[prop_or_default]
    pub selected: Option<ServiceId>,
    pub on_choose: Callback<ServiceId>,
    pub on_continue: Callback<()>,
}

#[function_component(ServiceSelection)]
pub fn service_selection(p: &Props) -> Html {
    let on_continue = {
        let cb = p.on_continue.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="booking-select">
            <h3>{ t("booking.select.title") }</h3>
            <p class="booking-select__subtitle">{ t("booking.select.subtitle") }</p>
            <div class="booking-select__list">
                { for p.catalog.iter().map(|service| {
                    let selected = p.selected.as_ref() == Some(&service.id);
                    option(service, selected, &p.on_choose)
                }) }
            </div>
            if p.selected.is_some() {
                <button type="button" class="btn btn-primary booking-select__continue" onclick={on_continue}>
                    { t("booking.select.continue") }
                </button>
            }
        </div>
    }
}

fn option(service: &Service, selected: bool, on_choose: &Callback<ServiceId>) -> Html {
    let onclick = {
        let cb = on_choose.clone();
        let id = service.id.clone();
        Callback::from(move |_| cb.emit(id.clone()))
    };
    let class = classes!("booking-option", selected.then_some("is-selected"));
    html! {
        <button type="button" {class} aria-pressed={selected.to_string()} data-service={service.id.to_string()} {onclick}>
            <ServiceGlyph icon={service.icon} />
            <span class="booking-option__head">
                <span class="booking-option__title">{ service.title.clone() }</span>
                <span class="booking-option__price">{ service.price.to_string() }</span>
            </span>
            <span class="booking-option__duration">
                { tr1("booking.select.session", "duration", &service.duration) }
            </span>
            <span class="booking-option__description">{ service.description.clone() }</span>
            if !service.includes.is_empty() {
                <>
                <span class="booking-option__includes">{ t("booking.select.includes") }</span>
                <span class="booking-option__chips">
                    { for service.includes.iter().map(|item| html! { <span class="chip">{ item.clone() }</span> }) }
                </span>
                </>
            }
            if selected {
                <span class="badge">{ t("booking.select.selected") }</span>
            }
        </button>
    }
}
