use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, AddEventListenerOptions, Document, Element};

use crate::config;
use crate::dom;
use super::paths::{current_page_name, normalize_page_from_href, resolve_base_path};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavFrame {
    pub scrolled: bool,
    /// Share of the page scrolled past, in `[0, 1]`.
    pub progress: f64,
    pub visible: bool,
}

/// Remembers the previous scroll position so the nav can hide on the way
/// down and come back on the way up.
pub struct NavTracker {
    last_scroll_top: Cell<f64>,
}

impl NavTracker {
    pub fn new(scroll_top: f64) -> Self {
        NavTracker {
            last_scroll_top: Cell::new(scroll_top),
        }
    }

    pub fn next_frame(&self, metrics: ScrollMetrics, menu_open: bool) -> NavFrame {
        let top = metrics.scroll_top;
        let scrollable = metrics.scroll_height - metrics.viewport_height;
        let ratio = if scrollable > 0.0 { top / scrollable } else { 0.0 };

        let visible = menu_open
            || top < config::NAV_ALWAYS_VISIBLE_ABOVE
            || top < self.last_scroll_top.get();
        self.last_scroll_top.set(if top <= 0.0 { 0.0 } else { top });

        NavFrame {
            scrolled: top > config::NAV_SCROLLED_AFTER,
            progress: ratio.clamp(0.0, 1.0),
            visible,
        }
    }
}

fn scroll_metrics() -> Option<ScrollMetrics> {
    let window = window()?;
    let root = window.document()?.document_element()?;
    let scroll_top = window
        .scroll_y()
        .unwrap_or_else(|_| root.scroll_top() as f64);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    Some(ScrollMetrics {
        scroll_top,
        scroll_height: root.scroll_height() as f64,
        viewport_height,
    })
}

fn menu(document: &Document) -> Option<Element> {
    document.get_element_by_id("nav-links")
}

fn menu_open(document: &Document) -> bool {
    menu(document)
        .map(|m| m.class_list().contains("show-menu"))
        .unwrap_or(false)
}

/// Applies the current scroll position to the nav bar.
pub fn update(tracker: &NavTracker) {
    let Some(document) = dom::document() else { return };
    let Ok(Some(nav)) = document.query_selector("nav") else { return };
    let Some(metrics) = scroll_metrics() else { return };

    let frame = tracker.next_frame(metrics, menu_open(&document));

    dom::toggle_class(&nav, "nav-scrolled", frame.scrolled);
    if let Ok(Some(bar)) = nav.query_selector(".nav-progress-bar") {
        dom::set_style_property(&bar, "transform", &format!("scaleX({})", frame.progress));
    }
    let top = if frame.visible { "0" } else { config::NAV_HIDDEN_TOP };
    dom::set_style_property(&nav, "top", top);
}

/// Marks the active page, adds the call-to-action link and the progress bar.
pub fn enhance_header(document: &Document, path: &str) {
    let Ok(Some(nav)) = document.query_selector("nav") else { return };
    dom::add_class(&nav, "site-nav");

    if let Some(menu) = menu(document) {
        let current = current_page_name(path);
        for link in dom::query_all(&menu, "a") {
            let page = normalize_page_from_href(&link.get_attribute("href").unwrap_or_default());
            if page.is_empty() || !page.ends_with(".html") {
                continue;
            }
            dom::toggle_class(&link, "active", page == current);
        }

        if let Ok(None) = menu.query_selector(".nav-cta-link") {
            if let Ok(item) = document.create_element("li") {
                item.set_class_name("nav-cta-item");
                item.set_inner_html(&format!(
                    r#"<a href="{}contact.html" class="nav-cta-link">Get Proposal</a>"#,
                    resolve_base_path(path)
                ));
                let _ = menu.append_child(&item);
            }
        }
    }

    if let Ok(None) = nav.query_selector(".nav-progress") {
        if let Ok(progress) = document.create_element("div") {
            progress.set_class_name("nav-progress");
            progress.set_inner_html(r#"<span class="nav-progress-bar"></span>"#);
            let _ = nav.append_child(&progress);
        }
    }
}

pub fn toggle_menu(tracker: &NavTracker) {
    let Some(document) = dom::document() else { return };
    let Some(menu) = menu(&document) else { return };

    let open = menu.class_list().toggle("show-menu").unwrap_or(false);
    if let Ok(Some(button)) = document.query_selector(".popup-toggle") {
        let _ = button.set_attribute("aria-expanded", if open { "true" } else { "false" });
    }
    update(tracker);
}

/// Scroll and load listeners, plus `window.toggleMenu` for inline handlers.
pub fn install_listeners(tracker: Rc<NavTracker>) {
    let Some(window) = window() else { return };

    let on_scroll = {
        let tracker = tracker.clone();
        Closure::wrap(Box::new(move || update(&tracker)) as Box<dyn FnMut()>)
    };
    let mut options = AddEventListenerOptions::new();
    options.passive(true);
    let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        on_scroll.as_ref().unchecked_ref(),
        &options,
    );
    let _ = window.add_event_listener_with_callback("load", on_scroll.as_ref().unchecked_ref());
    on_scroll.forget();

    let toggle = Closure::wrap(Box::new(move || toggle_menu(&tracker)) as Box<dyn FnMut()>);
    let _ = js_sys::Reflect::set(&window, &JsValue::from_str("toggleMenu"), toggle.as_ref());
    toggle.forget();
}

/// Menu links close the menu when followed.
pub fn wire_menu_links(document: &Document, tracker: Rc<NavTracker>) {
    let Some(menu) = menu(document) else { return };
    for link in dom::query_all(&menu, "a") {
        let menu = menu.clone();
        let tracker = tracker.clone();
        let on_click = Closure::wrap(Box::new(move || {
            let _ = menu.class_list().remove_1("show-menu");
            update(&tracker);
        }) as Box<dyn FnMut()>);
        let _ = link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(scroll_top: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top,
            scroll_height: 2000.0,
            viewport_height: 1000.0,
        }
    }

    #[test]
    fn test_scrolled_class_threshold() {
        let tracker = NavTracker::new(0.0);
        assert!(!tracker.next_frame(at(12.0), false).scrolled);
        assert!(tracker.next_frame(at(13.0), false).scrolled);
    }

    #[test]
    fn test_progress_is_clamped() {
        let tracker = NavTracker::new(0.0);
        assert_eq!(tracker.next_frame(at(500.0), false).progress, 0.5);
        assert_eq!(tracker.next_frame(at(1500.0), false).progress, 1.0);
        assert_eq!(tracker.next_frame(at(-40.0), false).progress, 0.0);
    }

    #[test]
    fn test_short_page_has_no_progress() {
        let tracker = NavTracker::new(0.0);
        let metrics = ScrollMetrics {
            scroll_top: 0.0,
            scroll_height: 800.0,
            viewport_height: 1000.0,
        };
        assert_eq!(tracker.next_frame(metrics, false).progress, 0.0);
    }

    #[test]
    fn test_hides_scrolling_down_shows_scrolling_up() {
        let tracker = NavTracker::new(0.0);
        assert!(tracker.next_frame(at(50.0), false).visible);
        assert!(!tracker.next_frame(at(300.0), false).visible);
        assert!(!tracker.next_frame(at(400.0), false).visible);
        assert!(tracker.next_frame(at(350.0), false).visible);
        assert!(!tracker.next_frame(at(360.0), false).visible);
    }

    #[test]
    fn test_open_menu_keeps_nav_visible() {
        let tracker = NavTracker::new(300.0);
        assert!(tracker.next_frame(at(600.0), true).visible);
    }

    #[test]
    fn test_overscroll_resets_last_position() {
        let tracker = NavTracker::new(500.0);
        tracker.next_frame(at(-20.0), false);
        // Coming from 0, any downward position past the threshold hides.
        assert!(!tracker.next_frame(at(100.0), false).visible);
    }
}
