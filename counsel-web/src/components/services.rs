use crate::components::icons::ServiceGlyph;
use crate::i18n::t;
use counsel_core::{Service, ServiceCatalog};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub catalog: Rc<ServiceCatalog>,
    pub on_book: Callback<AttrValue>,
}

/// Landing page grid; every card opens the booking overlay.
#[function_component(ServicesGrid)]
pub fn services_grid(p: &Props) -> Html {
    html! {
        <section id="services" class="services" aria-labelledby="services-title">
            <h2 id="services-title">{ t("services.title") }</h2>
            <p class="services__subtitle">{ t("services.subtitle") }</p>
            <div class="services__grid">
                { for p.catalog.iter().map(|service| card(service, &p.on_book)) }
            </div>
            <p class="services__confidential">{ t("services.confidential") }</p>
        </section>
    }
}

fn card(service: &Service, on_book: &Callback<AttrValue>) -> Html {
    let button_id = AttrValue::from(format!("service-book-{}", service.id));
    let onclick = {
        let cb = on_book.clone();
        let id = button_id.clone();
        Callback::from(move |_| cb.emit(id.clone()))
    };
    let audience = service.audience.join(", ");
    html! {
        <article class="service-card" data-service={service.id.to_string()}>
            <ServiceGlyph icon={service.icon} />
            <h3>{ service.grid_title().to_string() }</h3>
            <p class="service-card__overview">{ service.overview.clone() }</p>
            if !audience.is_empty() {
                <p class="service-card__audience">
                    <strong>{ t("services.for") }</strong>{" "}{ audience }
                </p>
            }
            <button id={button_id} type="button" class="btn btn-outline" onclick={onclick}>
                { t("site.cta") }
            </button>
        </article>
    }
}
