use std::rc::Rc;

use log::info;
use web_sys::window;

mod config;
mod dom;
mod storage {
    pub mod backend;
    pub mod cookie;
    pub mod local;
    #[cfg(test)]
    pub mod memory;
}
mod consent {
    pub mod banner;
    pub mod diagnostics;
    pub mod flow;
    pub mod store;
    pub mod tracking;
}
mod site {
    pub mod footer;
    pub mod motion;
    pub mod nav;
    pub mod paths;
    pub mod pointer;
    pub mod reveal;
}

use consent::{
    banner,
    diagnostics,
    flow::{BootAction, ConsentFlow},
    store::ConsentStore,
    tracking::BrowserContext,
};
use site::{
    footer,
    motion::MotionPrefs,
    nav::{self, NavTracker},
    paths::resolve_base_path,
    pointer,
    reveal,
};

fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn enhance_page(tracker: Rc<NavTracker>) {
    let Some(document) = dom::document() else { return };
    let path = current_path();
    let prefs = MotionPrefs::detect();

    nav::enhance_header(&document, &path);
    footer::mount(&document, resolve_base_path(&path));
    nav::update(&tracker);
    reveal::init(&document, prefs);
    pointer::init_magnetic(&document, prefs);
    pointer::init_tilt(&document, prefs);
    pointer::init_cursor_glow(&document, prefs);
    nav::wire_menu_links(&document, tracker);
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site enhancements");

    let initial_scroll = window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
    let tracker = Rc::new(NavTracker::new(initial_scroll));
    nav::install_listeners(tracker.clone());

    let flow = Rc::new(
        ConsentFlow::new(ConsentStore::browser(), Rc::new(BrowserContext))
            .on_entry(diagnostics::publish),
    );
    if flow.boot() == BootAction::PromptOnLoad {
        dom::on_window_load(move || banner::mount(flow));
    }

    dom::on_dom_ready(move || enhance_page(tracker));
}
