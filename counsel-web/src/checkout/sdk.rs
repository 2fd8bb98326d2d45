//! Lazy loading of third-party checkout scripts.
//!
//! A script is fetched at most once per page session. Concurrent callers share
//! the in-flight load; a failed or timed-out load is evicted so the next call
//! fetches again.
use counsel_core::SdkLoadError;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use std::cell::RefCell;
use std::collections::HashMap;

pub const RAZORPAY_SCRIPT_ID: &str = "razorpay-checkout-js";
pub const RAZORPAY_SCRIPT_SRC: &str = "https://checkout.razorpay.com/v1/checkout.js";
/// Global constructor the checkout script defines.
pub const RAZORPAY_GLOBAL: &str = "Razorpay";

type LoadFuture = Shared<LocalBoxFuture<'static, Result<(), SdkLoadError>>>;

thread_local! {
    static LOADS: RefCell<HashMap<&'static str, LoadFuture>> = RefCell::new(HashMap::new());
}

/// Load the script `src` under element id `id`, waiting at most `timeout_ms`.
///
/// # Errors
///
/// Returns an [`SdkLoadError`] when the script cannot be fetched in time or
/// does not define `global`.
pub async fn load_script(
    id: &'static str,
    src: &'static str,
    global: &'static str,
    timeout_ms: u32,
) -> Result<(), SdkLoadError> {
    let load = LOADS.with(|loads| {
        loads
            .borrow_mut()
            .entry(id)
            .or_insert_with(|| fetch(id, src, global, timeout_ms).boxed_local().shared())
            .clone()
    });
    let result = load.clone().await;
    if let Err(err) = &result {
        log::warn!("script {id} failed to load: {err}");
        evict(id, &load);
    }
    result
}

/// Drop the cached load for `id` if it is still `failed`; a newer load
/// started by another caller stays.
fn evict(id: &str, failed: &LoadFuture) {
    LOADS.with(|loads| {
        let mut loads = loads.borrow_mut();
        if loads.get(id).is_some_and(|cached| cached.ptr_eq(failed)) {
            loads.remove(id);
        }
    });
}

/// Whether a load for `id` is cached (finished or in flight).
#[must_use]
pub fn is_cached(id: &str) -> bool {
    LOADS.with(|loads| loads.borrow().contains_key(id))
}

#[cfg(target_arch = "wasm32")]
fn defines_global(win: &web_sys::Window, global: &str) -> bool {
    js_sys::Reflect::get(win, &wasm_bindgen::JsValue::from_str(global)).is_ok_and(|v| v.is_function())
}

#[cfg(target_arch = "wasm32")]
async fn fetch(
    id: &'static str,
    src: &'static str,
    global: &'static str,
    timeout_ms: u32,
) -> Result<(), SdkLoadError> {
    use crate::dom::{body, document, js_error_message, window, with_timeout};
    use js_sys::Promise;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    if defines_global(&window(), global) {
        return Ok(());
    }
    let doc = document();
    // a tag left behind by an earlier failed load never fires again
    if let Some(stale) = doc.get_element_by_id(id) {
        stale.remove();
    }
    let script = doc
        .create_element("script")
        .map_err(|e| SdkLoadError::Network(js_error_message(&e)))?
        .dyn_into::<web_sys::HtmlScriptElement>()
        .map_err(|_| SdkLoadError::Network("not a script element".into()))?;
    script.set_id(id);
    script.set_src(src);
    script.set_async(true);

    let loaded = Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });
    body()
        .and_then(|b| b.append_child(&script))
        .map_err(|e| SdkLoadError::Network(js_error_message(&e)))?;

    match with_timeout(JsFuture::from(loaded), timeout_ms).await {
        None => return Err(SdkLoadError::TimedOut),
        Some(Err(err)) => {
            let detail = if err.is_instance_of::<web_sys::Event>() {
                format!("could not fetch {src}")
            } else {
                js_error_message(&err)
            };
            return Err(SdkLoadError::Network(detail));
        }
        Some(Ok(_)) => {}
    }

    if defines_global(&window(), global) {
        Ok(())
    } else {
        Err(SdkLoadError::MissingGlobal)
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch(
    _id: &'static str,
    src: &'static str,
    _global: &'static str,
    _timeout_ms: u32,
) -> Result<(), SdkLoadError> {
    Err(SdkLoadError::Network(format!(
        "{src} can only be loaded in a browser"
    )))
}
