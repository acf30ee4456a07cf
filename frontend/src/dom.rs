use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement};

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// Runs `f` once the HTML is parsed. The wasm module usually finishes loading
/// after DOMContentLoaded has already fired, in which case `f` runs now.
pub fn on_dom_ready(f: impl FnOnce() + 'static) {
    let Some(document) = document() else { return };
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let callback = Closure::once_into_js(f);
    let _ = document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref());
}

/// Runs `f` on the window `load` event, or now if it has already happened.
pub fn on_window_load(f: impl FnOnce() + 'static) {
    let Some(window) = window() else { return };
    let complete = window
        .document()
        .map(|d| d.ready_state() == "complete")
        .unwrap_or(false);
    if complete {
        f();
        return;
    }
    let callback = Closure::once_into_js(f);
    let _ = window.add_event_listener_with_callback("load", callback.unchecked_ref());
}

/// Every element matching `selector`, in document order.
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let mut found = Vec::new();
    if let Ok(list) = root.query_selector_all(selector) {
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                found.push(el);
            }
        }
    }
    found
}

pub fn query_document(document: &Document, selector: &str) -> Vec<Element> {
    match document.document_element() {
        Some(root) => query_all(&root, selector),
        None => Vec::new(),
    }
}

pub fn set_style_property(el: &Element, name: &str, value: &str) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property(name, value);
    }
}

pub fn style_property(el: &Element, name: &str) -> String {
    el.dyn_ref::<HtmlElement>()
        .and_then(|el| el.style().get_property_value(name).ok())
        .unwrap_or_default()
}

pub fn toggle_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}
