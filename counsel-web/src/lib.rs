#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod app;
pub mod checkout;
pub mod components;
pub mod config;
pub mod content;
pub mod dom;
pub mod i18n;
pub mod logging;
pub mod paths;
pub mod router;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(config::site_config().log_level);
    i18n::set_lang(&i18n::current_lang());
    yew::Renderer::<app::App>::new().render();
}
