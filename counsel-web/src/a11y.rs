// Accessibility helpers

/// Id of the polite live region that announces wizard progress.
pub const STATUS_REGION_ID: &str = "booking-status";

const FOCUSABLE: &str = "a[href], button:not([disabled]), iframe, input:not([disabled]), select:not([disabled]), textarea:not([disabled]), [tabindex]:not([tabindex='-1'])";

/// CSS for visible focus indicators and screen reader utilities.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus-visible{outline:3px solid #10b981;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Update the live region so screen readers announce `msg`.
pub fn set_status(msg: &str) {
    if let Some(node) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
}

fn focusable_in(container_id: &str) -> Vec<web_sys::HtmlElement> {
    use wasm_bindgen::JsCast;

    let Some(container) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(container_id))
    else {
        return Vec::new();
    };
    let Ok(nodes) = container.query_selector_all(FOCUSABLE) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

/// Move focus to the first focusable element inside `container_id`.
pub fn trap_focus_in(container_id: &str) {
    if let Some(first) = focusable_in(container_id).first() {
        let _ = first.focus();
    }
}

/// Keep Tab navigation inside `container_id`, wrapping at either end.
///
/// Returns `true` when focus was moved and the default action should be suppressed.
pub fn cycle_focus(container_id: &str, backwards: bool) -> bool {
    let items = focusable_in(container_id);
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return false;
    };
    let active = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.active_element());
    let at = |el: &web_sys::HtmlElement| {
        let node: &web_sys::Node = el.as_ref();
        active.as_ref().is_some_and(|a| a.is_same_node(Some(node)))
    };
    if backwards && at(first) {
        let _ = last.focus();
        true
    } else if !backwards && at(last) {
        let _ = first.focus();
        true
    } else {
        false
    }
}

/// Return focus to the element that opened a dialog.
pub fn restore_focus(element_id: &str) {
    use wasm_bindgen::JsCast;

    if let Some(el) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(element_id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = el.focus();
    }
}
