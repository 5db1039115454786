//! Page bootstrap: find each widget's host element and mount into it.
//!
//! SYSTEM CONTEXT
//! ==============
//! The site is static HTML. Rather than owning the whole `<body>`, each widget
//! mounts into its own host element, so a page opts into a widget just by
//! including the host. Hosts that are absent leave that widget disabled and
//! never stop the others from mounting.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::util::dom::{HostLookup, SetupError, Widget, acquire};

/// Resolve the host of every widget, in mount order.
///
/// The carousel is reported as disabled when there are no slides to show,
/// even if its host is present.
pub fn resolve_hosts<L: HostLookup>(lookup: &L, slide_count: usize) -> Vec<(Widget, Result<L::Element, SetupError>)> {
    Widget::ALL
        .iter()
        .map(|&widget| {
            let host = acquire(lookup, widget).and_then(|host| {
                if widget == Widget::Carousel && slide_count == 0 {
                    Err(SetupError::NothingToShow { widget: widget.name(), reason: "no testimonials" })
                } else {
                    Ok(host)
                }
            });
            (widget, host)
        })
        .collect()
}

/// WASM entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use crate::config::SiteConfig;
    use crate::content::testimonials;
    use crate::util::dom::DocumentLookup;

    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(e) = console_log::init_with_level(level) {
        leptos::logging::warn!("console logger already installed: {e}");
    }

    let config = SiteConfig::from_build_env().unwrap_or_else(|e| {
        log::warn!("invalid build-time config, using defaults: {e}");
        SiteConfig::default()
    });
    let slides = testimonials();

    for (widget, host) in resolve_hosts(&DocumentLookup, slides.len()) {
        match host {
            Ok(host) => {
                log::debug!("mounting {} into #{}", widget.name(), widget.host_id());
                mount_widget(widget, host, &config, &slides);
            }
            Err(e) => log::info!("{e}"),
        }
    }
}

#[cfg(feature = "csr")]
fn mount_widget(
    widget: Widget,
    host: web_sys::HtmlElement,
    config: &crate::config::SiteConfig,
    slides: &[crate::content::Testimonial],
) {
    use leptos::mount::mount_to;
    use leptos::prelude::*;

    use crate::components::chat_widget::ChatWidget;
    use crate::components::contact_form::ContactForm;
    use crate::components::cookie_banner::CookieBanner;
    use crate::components::testimonial_carousel::TestimonialCarousel;
    use crate::content::contact_form_schema;

    let config = config.clone();
    match widget {
        Widget::CookieBanner => mount_to(host, move || view! { <CookieBanner config=config /> }).forget(),
        Widget::ContactForm => {
            let endpoint = config.endpoint_for(host.get_attribute("data-endpoint").as_deref());
            if endpoint.is_empty() {
                log::warn!("contact form has no relay endpoint; submissions will fall back to email");
            }
            let schema = contact_form_schema();
            mount_to(host, move || view! { <ContactForm config=config schema=schema endpoint=endpoint /> }).forget();
        }
        Widget::Chatbot => mount_to(host, move || view! { <ChatWidget config=config /> }).forget(),
        Widget::Carousel => {
            let testimonials = slides.to_vec();
            mount_to(host, move || view! { <TestimonialCarousel config=config testimonials=testimonials /> }).forget();
        }
    }
}
