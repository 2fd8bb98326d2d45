use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Fully built scheduling widget URL.
    pub embed_url: AttrValue,
    pub on_complete: Callback<()>,
}

#[function_component(Scheduling)]
pub fn scheduling(p: &Props) -> Html {
    let on_complete = {
        let cb = p.on_complete.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="booking-schedule">
            <h3>{ t("booking.scheduling.title") }</h3>
            <p>{ t("booking.scheduling.subtitle") }</p>
            <iframe
                class="booking-schedule__frame"
                src={p.embed_url.clone()}
                title={t("booking.scheduling.frame_title")}
                width="100%"
                height="700"
                frameborder="0"
            />
            <button type="button" class="btn btn-primary" onclick={on_complete}>
                { t("booking.scheduling.complete") }
            </button>
        </div>
    }
}
