use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, MouseEvent, PointerEvent};

use crate::dom;
use super::motion::MotionPrefs;

const MAGNETIC_SELECTOR: &str =
    ".service-read-more, .contact-cta, .back-btn, .blog-read-more, .social-btn, .cookie-btn, button";
const TILT_SELECTOR: &str =
    ".service-card, .blog-card, .founder-card, .team-card, .contact-card, .work-item, .partner-logo";

const MAGNETIC_PULL: f64 = 18.0;
const MAGNETIC_MAX_PX: f64 = 8.0;
const TILT_MAX_DEG: f64 = 4.0;
const GLOW_RADIUS_PX: f64 = 90.0;
const GLOW_PRESS_MS: u32 = 180;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    fn of(el: &Element) -> Self {
        let r = el.get_bounding_client_rect();
        Rect {
            left: r.left(),
            top: r.top(),
            width: r.width(),
            height: r.height(),
        }
    }
}

fn share(offset: f64, size: f64) -> f64 {
    if size > 0.0 {
        offset / size
    } else {
        0.0
    }
}

/// Pull towards the pointer, in px, at most 8 either way.
pub fn magnetic_offset(rect: Rect, x: f64, y: f64) -> (f64, f64) {
    let dx = x - rect.left - rect.width / 2.0;
    let dy = y - rect.top - rect.height / 2.0;
    let pull = |d: f64, size: f64| (share(d, size) * MAGNETIC_PULL).clamp(-MAGNETIC_MAX_PX, MAGNETIC_MAX_PX);
    (pull(dx, rect.width), pull(dy, rect.height))
}

/// `(rotate_x, rotate_y)` in degrees; edges of the card tilt by 4.
pub fn tilt_angles(rect: Rect, x: f64, y: f64) -> (f64, f64) {
    let center_x = rect.width / 2.0;
    let center_y = rect.height / 2.0;
    let rotate_y = share(x - rect.left - center_x, center_x) * TILT_MAX_DEG;
    let rotate_x = -share(y - rect.top - center_y, center_y) * TILT_MAX_DEG;
    (rotate_x, rotate_y)
}

pub fn format_deg(value: f64) -> String {
    // `+ 0.0` turns -0.0 into 0.0.
    format!("{:.2}deg", value + 0.0)
}

pub fn glow_transform(x: f64, y: f64) -> String {
    format!("translate3d({}px, {}px, 0)", x - GLOW_RADIUS_PX, y - GLOW_RADIUS_PX)
}

fn on_pointer_over(el: &Element, on_move: impl Fn(&Element, Rect, f64, f64) + 'static, on_leave: impl Fn(&Element) + 'static) {
    let move_target = el.clone();
    let mouse_move = Closure::wrap(Box::new(move |event: MouseEvent| {
        let rect = Rect::of(&move_target);
        on_move(&move_target, rect, event.client_x() as f64, event.client_y() as f64);
    }) as Box<dyn FnMut(MouseEvent)>);
    let _ = el.add_event_listener_with_callback("mousemove", mouse_move.as_ref().unchecked_ref());
    mouse_move.forget();

    let leave_target = el.clone();
    let mouse_leave = Closure::wrap(Box::new(move || on_leave(&leave_target)) as Box<dyn FnMut()>);
    let _ = el.add_event_listener_with_callback("mouseleave", mouse_leave.as_ref().unchecked_ref());
    mouse_leave.forget();
}

pub fn init_magnetic(document: &Document, prefs: MotionPrefs) {
    if !prefs.pointer_effects() {
        return;
    }
    for target in dom::query_document(document, MAGNETIC_SELECTOR) {
        dom::add_class(&target, "magnetic-target");
        on_pointer_over(
            &target,
            |el, rect, x, y| {
                let (tx, ty) = magnetic_offset(rect, x, y);
                dom::set_style_property(el, "--mx", &format!("{}px", tx));
                dom::set_style_property(el, "--my", &format!("{}px", ty));
            },
            |el| {
                dom::set_style_property(el, "--mx", "0px");
                dom::set_style_property(el, "--my", "0px");
            },
        );
    }
}

pub fn init_tilt(document: &Document, prefs: MotionPrefs) {
    if !prefs.pointer_effects() {
        return;
    }
    for card in dom::query_document(document, TILT_SELECTOR) {
        dom::add_class(&card, "interactive-card");
        on_pointer_over(
            &card,
            |el, rect, x, y| {
                let (rotate_x, rotate_y) = tilt_angles(rect, x, y);
                dom::set_style_property(el, "--card-rotate-x", &format_deg(rotate_x));
                dom::set_style_property(el, "--card-rotate-y", &format_deg(rotate_y));
            },
            |el| {
                dom::set_style_property(el, "--card-rotate-x", "0deg");
                dom::set_style_property(el, "--card-rotate-y", "0deg");
            },
        );
    }
}

/// A soft glow that trails the pointer, repainted at most once per frame.
pub fn init_cursor_glow(document: &Document, prefs: MotionPrefs) {
    if !prefs.pointer_effects() {
        return;
    }
    let Some(window) = window() else { return };
    let Some(body) = document.body() else { return };
    let Ok(glow) = document.create_element("div") else { return };
    glow.set_class_name("cursor-glow");
    if body.append_child(&glow).is_err() {
        return;
    }

    let position = Rc::new(Cell::new((0.0, 0.0)));
    let frame_requested = Rc::new(Cell::new(false));

    let paint = {
        let glow = glow.clone();
        let position = position.clone();
        let frame_requested = frame_requested.clone();
        Rc::new(Closure::wrap(Box::new(move |_timestamp: f64| {
            let (x, y) = position.get();
            dom::set_style_property(&glow, "transform", &glow_transform(x, y));
            frame_requested.set(false);
        }) as Box<dyn FnMut(f64)>))
    };

    let pointer_move = {
        let window = window.clone();
        Closure::wrap(Box::new(move |event: PointerEvent| {
            position.set((event.client_x() as f64, event.client_y() as f64));
            if !frame_requested.get() {
                let _ = window.request_animation_frame((*paint).as_ref().unchecked_ref());
                frame_requested.set(true);
            }
        }) as Box<dyn FnMut(PointerEvent)>)
    };
    let _ = window.add_event_listener_with_callback("pointermove", pointer_move.as_ref().unchecked_ref());
    pointer_move.forget();

    let pointer_down = Closure::wrap(Box::new(move || {
        dom::add_class(&glow, "active");
        let glow = glow.clone();
        Timeout::new(GLOW_PRESS_MS, move || {
            let _ = glow.class_list().remove_1("active");
        })
        .forget();
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("pointerdown", pointer_down.as_ref().unchecked_ref());
    pointer_down.forget();
}
