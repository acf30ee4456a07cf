use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::info;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::dom;
use super::flow::ConsentFlow;

const HOST_ID: &str = "cookie-consent-root";
const BANNER_ID: &str = "cookie-consent-banner";

#[derive(Properties, PartialEq)]
pub struct CookieBannerProps {
    pub on_accept: Callback<()>,
    pub on_decline: Callback<()>,
}

#[function_component(CookieBanner)]
pub fn cookie_banner(props: &CookieBannerProps) -> Html {
    let visible = use_state(|| false);
    let dismissed = use_state(|| false);

    {
        let visible = visible.clone();
        use_effect_with_deps(move |_| {
            // Add `show` a frame after insertion so the entrance transition runs.
            let timeout = Timeout::new(16, move || {
                visible.set(true);
            });
            timeout.forget();
            || ()
        }, ());
    }

    if *dismissed {
        return html! {};
    }

    let handle_accept = {
        let on_accept = props.on_accept.clone();
        let dismissed = dismissed.clone();
        Callback::from(move |_: MouseEvent| {
            on_accept.emit(());
            dismissed.set(true);
        })
    };

    let handle_decline = {
        let on_decline = props.on_decline.clone();
        let dismissed = dismissed.clone();
        Callback::from(move |_: MouseEvent| {
            on_decline.emit(());
            dismissed.set(true);
        })
    };

    let show = (*visible).then(|| "show");

    html! {
        <>
            <div id="cookie-consent-overlay" class={classes!("cookie-overlay", show)}></div>
            <div id={BANNER_ID} class={classes!("cookie-banner", show)}>
                <h3>{"We value your privacy"}</h3>
                <p>{"We use cookies to understand website visits and improve your experience."}</p>
                <div class="cookie-actions">
                    <button type="button" class="cookie-btn cookie-accept" onclick={handle_accept}>
                        {"Accept All"}
                    </button>
                    <button type="button" class="cookie-btn cookie-decline" onclick={handle_decline}>
                        {"Decline"}
                    </button>
                </div>
            </div>
        </>
    }
}

/// Draws the banner into a fresh host at the end of `<body>`. Does nothing if
/// a banner is already on the page or this flow has already prompted.
pub fn mount(flow: Rc<ConsentFlow>) {
    let Some(document) = dom::document() else { return };
    if document.get_element_by_id(BANNER_ID).is_some() || document.get_element_by_id(HOST_ID).is_some() {
        return;
    }
    let Some(body) = document.body() else { return };
    let Ok(host) = document.create_element("div") else { return };
    host.set_id(HOST_ID);

    if !flow.open_prompt() {
        return;
    }
    if body.append_child(&host).is_err() {
        return;
    }
    info!("Showing cookie consent banner");

    let on_accept = {
        let flow = flow.clone();
        Callback::from(move |_| {
            flow.accept();
        })
    };
    let on_decline = Callback::from(move |_| {
        flow.decline();
    });

    yew::Renderer::<CookieBanner>::with_root_and_props(host, CookieBannerProps { on_accept, on_decline })
        .render();
}
