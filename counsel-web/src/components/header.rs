use crate::i18n::t;
use yew::prelude::*;

/// Id of the header call to action, used to restore focus after booking.
pub const BOOK_BUTTON_ID: &str = "header-book";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Receives the id of the pressed button.
    pub on_book: Callback<AttrValue>,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let open_booking = {
        let cb = p.on_book.clone();
        Callback::from(move |_| cb.emit(AttrValue::from(BOOK_BUTTON_ID)))
    };
    html! {
        <header role="banner" class="site-header">
            <a href="#main" class="sr-only">{ t("ui.skip_to_content") }</a>
            <div class="header-content">
                <div class="header-left">
                    <p class="site-name">{ t("site.name") }</p>
                    <p class="site-tagline">{ t("site.tagline") }</p>
                </div>
                <div class="header-right">
                    <button id={BOOK_BUTTON_ID} type="button" class="btn btn-primary" onclick={open_booking}>
                        { t("site.cta") }
                    </button>
                </div>
            </div>
        </header>
    }
}
