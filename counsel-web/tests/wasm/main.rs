#![cfg(target_arch = "wasm32")]

use counsel_core::SdkLoadError;
use counsel_web::app::App;
use counsel_web::checkout::sdk::{is_cached, load_script};
use counsel_web::{a11y, dom};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, KeyboardEvent, KeyboardEventInit};
use yew::Renderer;

wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document();
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    dom::body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

async fn render_app() {
    counsel_web::i18n::set_lang("en");
    Renderer::<App>::with_root(ensure_app_root()).render();
    dom::sleep_ms(50).await.expect("timer");
}

fn by_id(id: &str) -> Option<HtmlElement> {
    dom::document()
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn dialog() -> Option<web_sys::Element> {
    dom::document()
        .query_selector("[role='dialog']")
        .expect("query dialog")
}

#[wasm_bindgen_test]
async fn skip_link_points_to_main_landmark() {
    render_app().await;
    let doc = dom::document();
    let skip = doc
        .query_selector("a[href='#main']")
        .expect("query skip link")
        .expect("skip link exists");
    assert_eq!(skip.get_attribute("href").as_deref(), Some("#main"));
    let main = doc.get_element_by_id("main").expect("main landmark");
    assert_eq!(main.tag_name(), "MAIN");
}

#[wasm_bindgen_test]
async fn cta_opens_dialog_and_escape_returns_focus() {
    render_app().await;
    assert!(dialog().is_none());

    by_id("hero-book").expect("hero cta").click();
    dom::sleep_ms(50).await.expect("timer");
    let dialog_el = dialog().expect("dialog open");
    let active = dom::document().active_element().expect("focused element");
    let focused: &web_sys::Node = active.as_ref();
    assert!(dialog_el.contains(Some(focused)), "focus moves into the dialog");

    let init = KeyboardEventInit::new();
    init.set_key("Escape");
    init.set_bubbles(true);
    let escape = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).expect("event");
    active.dispatch_event(&escape).expect("dispatch");
    dom::sleep_ms(50).await.expect("timer");

    assert!(dialog().is_none());
    let active = dom::document().active_element().expect("focused element");
    assert_eq!(active.id(), "hero-book");
}

#[wasm_bindgen_test]
async fn live_region_receives_status_updates() {
    render_app().await;
    a11y::set_status("Step 1 of 3: choose a service");
    let region = by_id(a11y::STATUS_REGION_ID).expect("live region");
    assert_eq!(region.get_attribute("aria-live").as_deref(), Some("polite"));
    assert_eq!(
        region.text_content().as_deref(),
        Some("Step 1 of 3: choose a service")
    );
}

#[wasm_bindgen_test]
async fn missing_script_fails_and_is_retried() {
    let result = load_script("missing-sdk", "/no-such-sdk.js", "NoSuchSdk", 2_000).await;
    assert!(matches!(
        result,
        Err(SdkLoadError::Network(_) | SdkLoadError::TimedOut)
    ));
    assert!(!is_cached("missing-sdk"));
}

#[wasm_bindgen_test]
async fn successful_script_is_fetched_once() {
    const ID: &str = "counsel-test-sdk";
    const SRC: &str = "data:text/javascript,window.CounselTestSdk=function(){}";
    let (first, second) = futures::join!(
        load_script(ID, SRC, "CounselTestSdk", 2_000),
        load_script(ID, SRC, "CounselTestSdk", 2_000),
    );
    assert_eq!(first, Ok(()));
    assert_eq!(second, Ok(()));
    assert!(is_cached(ID));

    load_script(ID, SRC, "CounselTestSdk", 2_000)
        .await
        .expect("cached load");
    let tags = dom::document()
        .query_selector_all(&format!("script#{ID}"))
        .expect("query script tags")
        .length();
    assert_eq!(tags, 1);
}
