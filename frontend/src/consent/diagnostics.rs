use log::debug;
use wasm_bindgen::JsValue;
use web_sys::window;

use crate::config;
use super::tracking::VisitorEntry;

/// Exposes the recorded visit as `window.JSparksVisitorData` for console checks.
pub fn publish(entry: &VisitorEntry) {
    if let Ok(json) = serde_json::to_string(entry) {
        debug!("Visitor data: {}", json);
    }
    let Some(window) = window() else { return };
    let value = match serde_wasm_bindgen::to_value(entry) {
        Ok(value) => value,
        Err(e) => {
            debug!("Could not convert visitor data: {}", e);
            return;
        }
    };
    if let Err(e) = js_sys::Reflect::set(&window, &JsValue::from_str(config::DIAGNOSTICS_GLOBAL), &value) {
        debug!("Could not publish visitor data: {:?}", e);
    }
}
