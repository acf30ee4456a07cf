use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;
use super::motion::MotionPrefs;

const REVEAL_SELECTORS: &[&str] = &[
    ".hero",
    ".services-header",
    ".service-card",
    ".blogs-header-section",
    ".blog-card",
    ".intro-section",
    ".founder-card",
    ".detail-row",
    ".team-card",
    ".contact-hero",
    ".contact-card",
    ".partner-logo",
    ".work-item",
    ".service-page",
    ".service-links-grid a",
    ".blog-container",
    ".site-footer",
];

/// Containers whose children appear one after another.
const STAGGER_GROUPS: &[&str] = &[
    ".services-grid",
    ".blog-grid",
    ".founder-grid",
    ".team-grid",
    ".contact-grid",
    ".partner-grid",
    ".work-list",
    ".service-links-grid",
];

const STAGGER_STEP_MS: u32 = 70;
const STAGGER_MAX_MS: u32 = 420;
const THRESHOLD: f64 = 0.14;
const ROOT_MARGIN: &str = "0px 0px -8% 0px";
/// Anything starting above this share of the viewport is shown right away.
const INITIAL_VISIBLE_SHARE: f64 = 0.9;

pub fn stagger_delay(index: usize) -> String {
    let delay = (index as u32).saturating_mul(STAGGER_STEP_MS).min(STAGGER_MAX_MS);
    format!("{}ms", delay)
}

fn apply_stagger(document: &Document) {
    for selector in STAGGER_GROUPS {
        for group in dom::query_document(document, selector) {
            let children = group.children();
            for index in 0..children.length() {
                let Some(child) = children.item(index) else { continue };
                if dom::style_property(&child, "--reveal-delay").is_empty() {
                    dom::set_style_property(&child, "--reveal-delay", &stagger_delay(index as usize));
                }
            }
        }
    }
}

fn reveal_targets(document: &Document) -> Vec<Element> {
    let mut targets: Vec<Element> = Vec::new();
    for selector in REVEAL_SELECTORS {
        for el in dom::query_document(document, selector) {
            if !targets.contains(&el) {
                targets.push(el);
            }
        }
    }
    targets
}

pub fn init(document: &Document, prefs: MotionPrefs) {
    let Some(window) = window() else { return };
    let targets = reveal_targets(document);
    apply_stagger(document);

    for el in &targets {
        if !el.has_attribute("data-aos") {
            dom::add_class(el, "reveal-item");
        }
    }
    let targets: Vec<Element> = targets
        .into_iter()
        .filter(|el| el.class_list().contains("reveal-item"))
        .collect();

    let has_observer = js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
    if prefs.reduced_motion || !has_observer {
        for el in &targets {
            dom::add_class(el, "is-visible");
        }
        return;
    }

    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
            if !entry.is_intersecting() {
                continue;
            }
            let target = entry.target();
            dom::add_class(&target, "is-visible");
            observer.unobserve(&target);
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let mut options = IntersectionObserverInit::new();
    options.threshold(&JsValue::from_f64(THRESHOLD));
    options.root_margin(ROOT_MARGIN);
    let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => observer,
        Err(e) => {
            debug!("IntersectionObserver unavailable: {:?}", e);
            for el in &targets {
                dom::add_class(el, "is-visible");
            }
            return;
        }
    };
    callback.forget();

    let viewport_height = window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0);
    for el in &targets {
        if el.get_bounding_client_rect().top() < viewport_height * INITIAL_VISIBLE_SHARE {
            dom::add_class(el, "is-visible");
            continue;
        }
        observer.observe(el);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger_delay_caps() {
        assert_eq!(stagger_delay(0), "0ms");
        assert_eq!(stagger_delay(1), "70ms");
        assert_eq!(stagger_delay(5), "350ms");
        assert_eq!(stagger_delay(6), "420ms");
        assert_eq!(stagger_delay(40), "420ms");
    }
}
