use chrono::{Datelike, Utc};
use log::debug;
use web_sys::Document;
use yew::prelude::*;
use yew::virtual_dom::AttrValue;

use crate::config;
use crate::dom;

#[derive(Properties, PartialEq)]
pub struct SiteFooterProps {
    /// Prefix for internal links, `""` or `"../"`.
    pub base: AttrValue,
    pub year: i32,
}

#[function_component(SiteFooter)]
pub fn site_footer(props: &SiteFooterProps) -> Html {
    let internal = |links: &'static [(&'static str, &'static str)]| -> Html {
        links
            .iter()
            .map(|(label, page)| {
                html! { <a href={format!("{}{}", props.base, page)}>{*label}</a> }
            })
            .collect()
    };

    html! {
        <div class="footer-inner">
            <div class="footer-grid">
                <section class="footer-brand">
                    <h3>{config::BRAND_NAME}</h3>
                    <p>{config::BRAND_TAGLINE}</p>
                    <a href={format!("mailto:{}", config::CONTACT_EMAIL)} class="footer-mail">
                        {config::CONTACT_EMAIL}
                    </a>
                </section>
                <section class="footer-col">
                    <h4>{"Company"}</h4>
                    { internal(config::COMPANY_LINKS) }
                </section>
                <section class="footer-col">
                    <h4>{"Services"}</h4>
                    { internal(config::SERVICE_LINKS) }
                </section>
                <section class="footer-col">
                    <h4>{"Connect"}</h4>
                    {
                        config::SOCIAL_LINKS.iter().map(|(label, url)| html! {
                            <a href={*url} target="_blank" rel="noopener noreferrer">{*label}</a>
                        }).collect::<Html>()
                    }
                    <a href={format!("mailto:{}", config::CONTACT_EMAIL)}>{"Email Us"}</a>
                </section>
            </div>
            <div class="footer-bottom">
                <p>{format!("© {} {}. All rights reserved.", props.year, config::BRAND_NAME)}</p>
                <p>{config::LOCATION}</p>
            </div>
        </div>
    }
}

/// Replaces whatever the page put in `<footer>` with the shared footer.
pub fn mount(document: &Document, base: &'static str) {
    let Ok(Some(footer)) = document.query_selector("footer") else { return };
    dom::add_class(&footer, "site-footer");
    footer.set_inner_html("");
    debug!("Rendering site footer");
    yew::Renderer::<SiteFooter>::with_root_and_props(
        footer,
        SiteFooterProps {
            base: AttrValue::from(base),
            year: Utc::now().year(),
        },
    )
    .render();
}
