use crate::i18n::t;
use yew::prelude::*;

pub const BOOK_BUTTON_ID: &str = "hero-book";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Receives the id of the pressed button.
    pub on_book: Callback<AttrValue>,
}

#[function_component(Hero)]
pub fn hero(p: &Props) -> Html {
    let open_booking = {
        let cb = p.on_book.clone();
        Callback::from(move |_| cb.emit(AttrValue::from(BOOK_BUTTON_ID)))
    };
    html! {
        <section class="hero" aria-labelledby="hero-title">
            <h1 id="hero-title">{ t("hero.title") }</h1>
            <p class="hero__subtitle">{ t("hero.subtitle") }</p>
            <p class="hero__supporting">{ t("hero.supporting") }</p>
            <button id={BOOK_BUTTON_ID} type="button" class="btn btn-primary btn-lg" onclick={open_booking}>
                { t("site.cta") }
            </button>
            <p class="hero__reassurance">{ t("hero.reassurance") }</p>
        </section>
    }
}
