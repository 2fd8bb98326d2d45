use crate::a11y::{STATUS_REGION_ID, visible_focus_css};
use crate::app::state::{ShellModel, SiteData};
use crate::checkout::GatewayHandle;
use crate::components::about::About;
use crate::components::booking::BookingWizard;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::hero::{self, Hero};
use crate::components::how_it_works::HowItWorks;
use crate::components::media::ContentMedia;
use crate::components::modal::Modal;
use crate::components::services::ServicesGrid;
use crate::content::current_year;
use crate::i18n::t;
use crate::router::Route;
use counsel_core::ShellEvent;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub route: Route,
    pub data: SiteData,
    pub gateway: GatewayHandle,
}

/// The single landing page with the booking overlay mounted on demand.
#[function_component(Site)]
pub fn site(p: &Props) -> Html {
    let shell = {
        let open = p.route.opens_booking();
        use_reducer(move || ShellModel::opened(open))
    };
    let opener = use_mut_ref(|| AttrValue::from(hero::BOOK_BUTTON_ID));
    let navigator = use_navigator();

    {
        let shell = shell.dispatcher();
        use_effect_with(p.route.clone(), move |route| {
            if route.opens_booking() {
                shell.dispatch(ShellEvent::OpenOverlay);
            }
            || {}
        });
    }

    let on_book = {
        let shell = shell.dispatcher();
        let opener = Rc::clone(&opener);
        Callback::from(move |id: AttrValue| {
            *opener.borrow_mut() = id;
            shell.dispatch(ShellEvent::OpenOverlay);
        })
    };
    let on_close = {
        let shell = shell.dispatcher();
        let on_book_route = p.route.opens_booking();
        Callback::from(move |()| {
            shell.dispatch(ShellEvent::CloseOverlay);
            if on_book_route && let Some(nav) = navigator.as_ref() {
                nav.push(&Route::Home);
            }
        })
    };

    let data = &p.data;
    let return_focus = opener.borrow().clone();

    html! {
        <>
            <style>{ visible_focus_css() }</style>
            <Header on_book={on_book.clone()} />
            <main id="main" role="main">
                <Hero on_book={on_book.clone()} />
                <About portrait={data.content.portrait.clone()} />
                <ServicesGrid catalog={Rc::clone(&data.catalog)} on_book={on_book.clone()} />
                <HowItWorks on_book={on_book.clone()} />
                <ContentMedia video={data.content.video.clone()} books={data.content.books.clone()} />
            </main>
            <Footer socials={data.content.socials.clone()} year={current_year()} />
            <div id={STATUS_REGION_ID} class="sr-only" role="status" aria-live="polite"></div>
            <Modal
                open={shell.overlay_open()}
                title={t("booking.dialog_title")}
                on_close={on_close.clone()}
                return_focus_id={Some(return_focus)}
            >
                <BookingWizard
                    catalog={Rc::clone(&data.catalog)}
                    config={Rc::clone(&data.config)}
                    gateway={p.gateway.clone()}
                    support_mailto={data.content.support_mailto()}
                    {on_close}
                />
            </Modal>
        </>
    }
}
