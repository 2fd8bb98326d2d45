use crate::i18n::t;
use yew::prelude::*;

pub const BOOK_BUTTON_ID: &str = "how-book";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Receives the id of the pressed button.
    pub on_book: Callback<AttrValue>,
}

#[function_component(HowItWorks)]
pub fn how_it_works(p: &Props) -> Html {
    let open_booking = {
        let cb = p.on_book.clone();
        Callback::from(move |_| cb.emit(AttrValue::from(BOOK_BUTTON_ID)))
    };
    html! {
        <section id="how-it-works" class="how" aria-labelledby="how-title">
            <h2 id="how-title">{ t("how.title") }</h2>
            <ol class="how__steps">
                <li>{ t("how.step1") }</li>
                <li>{ t("how.step2") }</li>
                <li>{ t("how.step3") }</li>
            </ol>
            <button id={BOOK_BUTTON_ID} type="button" class="btn btn-primary" onclick={open_booking}>
                { t("site.cta") }
            </button>
            <p class="how__reassurance">{ t("how.reassurance") }</p>
        </section>
    }
}
