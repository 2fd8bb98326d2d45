use futures::future::{Either, select};
use js_sys::{Function, Promise};
use std::future::Future;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, Window};

/// Retrieve the global `window` object.
///
/// # Panics
/// Panics if executed outside of a browser context where `window` is unavailable.
#[must_use]
pub fn window() -> Window {
    web_sys::window().expect("`window` should be available in web context")
}

/// Retrieve the document object for DOM interactions.
///
/// # Panics
/// Panics when the document cannot be accessed from the current browser window.
#[must_use]
pub fn document() -> Document {
    window()
        .document()
        .expect("`document` should exist in browser context")
}

/// The `<body>` element, or an error when the document has none.
///
/// # Errors
/// Returns an error if the document has no body.
pub fn body() -> Result<HtmlElement, JsValue> {
    document()
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Yield execution for the requested number of milliseconds.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled or the underlying JavaScript promise rejects.
///
/// # Panics
/// Panics if no browser `window` is available.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn sleep_ms(duration_ms: i32) -> Result<(), JsValue> {
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve =
        resolve_slot.ok_or_else(|| JsValue::from_str("resolve function should be set"))?;
    let closure = Closure::once(move || {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });

    let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        duration_ms,
    )?;
    closure.forget();

    JsFuture::from(promise).await?;
    Ok(())
}

/// Race `fut` against a timer. Returns `None` when the timer fires first.
///
/// If the timer cannot be scheduled the future runs unbounded.
#[allow(clippy::future_not_send)]
pub async fn with_timeout<F>(fut: F, timeout_ms: u32) -> Option<F::Output>
where
    F: Future,
{
    let timeout = i32::try_from(timeout_ms).unwrap_or(i32::MAX);
    let fut = Box::pin(fut);
    let timer = Box::pin(sleep_ms(timeout));
    match select(fut, timer).await {
        Either::Left((output, _)) => Some(output),
        Either::Right((Ok(()), _)) => None,
        Either::Right((Err(err), fut)) => {
            log::warn!("timer unavailable, waiting without timeout: {}", js_error_message(&err));
            Some(fut.await)
        }
    }
}

/// Host of the current page, used to identify the embedding site to widgets.
#[must_use]
pub fn page_host() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.location().host().ok())
        .filter(|host| !host.is_empty())
}
