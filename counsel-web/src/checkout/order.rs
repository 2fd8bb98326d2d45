//! Optional server pre-step that creates a provider order before checkout.
use counsel_core::{OrderError, OrderRequest, OrderResponse};

/// POST `order` as JSON to `endpoint` and decode the returned order id.
///
/// # Errors
///
/// Returns [`OrderError::NotConfigured`] when `endpoint` is `None`, and the
/// matching variant when the request fails, times out, answers with a
/// non-success status, or returns a body without an `id`.
pub async fn create_order(
    endpoint: Option<&str>,
    order: &OrderRequest,
    timeout_ms: u32,
) -> Result<OrderResponse, OrderError> {
    let endpoint = endpoint
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or(OrderError::NotConfigured)?;
    let body = serde_json::to_string(order).map_err(|e| OrderError::Request(e.to_string()))?;
    post_json(endpoint, body, timeout_ms).await
}

#[cfg(target_arch = "wasm32")]
async fn post_json(
    endpoint: &str,
    body: String,
    timeout_ms: u32,
) -> Result<OrderResponse, OrderError> {
    use crate::dom::{js_error_message, window, with_timeout};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

    let request_error = |e: JsValue| OrderError::Request(js_error_message(&e));

    let headers = Headers::new().map_err(request_error)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(request_error)?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&body));
    let request = Request::new_with_str_and_init(endpoint, &init).map_err(request_error)?;

    let exchange = async {
        let resp = JsFuture::from(window().fetch_with_request(&request))
            .await
            .map_err(request_error)?;
        let resp: Response = resp
            .dyn_into()
            .map_err(|_| OrderError::Request("fetch did not return a response".into()))?;
        if !resp.ok() {
            return Err(OrderError::Status(resp.status()));
        }
        let json = JsFuture::from(
            resp.json()
                .map_err(|e| OrderError::Decode(js_error_message(&e)))?,
        )
        .await
        .map_err(|e| OrderError::Decode(js_error_message(&e)))?;
        serde_wasm_bindgen::from_value::<OrderResponse>(json)
            .map_err(|e| OrderError::Decode(e.to_string()))
    };

    with_timeout(exchange, timeout_ms)
        .await
        .unwrap_or(Err(OrderError::TimedOut))
}

#[cfg(not(target_arch = "wasm32"))]
async fn post_json(
    endpoint: &str,
    _body: String,
    _timeout_ms: u32,
) -> Result<OrderResponse, OrderError> {
    Err(OrderError::Request(format!(
        "{endpoint} is only reachable from a browser"
    )))
}
