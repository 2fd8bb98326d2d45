#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

pub mod state;
pub mod view;

pub use state::SiteData;
pub use view::Site;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
pub fn app_inner() -> Html {
    let data = use_memo((), |()| {
        SiteData::load(crate::config::site_config()).map_err(|err| {
            log::error!("bundled site data is invalid: {err}");
            err.to_string()
        })
    });
    let gateway = use_memo((), |()| {
        crate::checkout::GatewayHandle::razorpay(crate::config::site_config().payment)
    });
    let route = use_route::<Route>().unwrap_or(Route::Home);

    match data.as_ref() {
        Ok(data) => html! {
            <Site route={route} data={data.clone()} gateway={(*gateway).clone()} />
        },
        Err(message) => html! {
            <main id="main" role="main">
                <p role="alert">{ message.clone() }</p>
            </main>
        },
    }
}
