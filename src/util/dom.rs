//! Host-element acquisition for widget setup.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each widget mounts into one fixed element of the static page. Pages that
//! leave a widget out simply omit its host, so a missing host is an expected
//! outcome: setup reports it and the widget stays disabled.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

/// The interactive widgets the site can mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Widget {
    CookieBanner,
    ContactForm,
    Chatbot,
    Carousel,
}

impl Widget {
    pub const ALL: [Self; 4] = [Self::CookieBanner, Self::ContactForm, Self::Chatbot, Self::Carousel];

    /// Id of the element the widget mounts into.
    #[must_use]
    pub fn host_id(self) -> &'static str {
        match self {
            Self::CookieBanner => "cookie-banner",
            Self::ContactForm => "contact-form",
            Self::Chatbot => "chatbot",
            Self::Carousel => "testimonial-carousel",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CookieBanner => "cookie banner",
            Self::ContactForm => "contact form",
            Self::Chatbot => "chatbot",
            Self::Carousel => "carousel",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("{widget} disabled: host #{id} not found")]
    MissingHost { widget: &'static str, id: &'static str },
    #[error("{widget} disabled: {reason}")]
    NothingToShow { widget: &'static str, reason: &'static str },
}

/// Something that can resolve element ids, the document in the browser.
pub trait HostLookup {
    type Element;

    fn find(&self, id: &str) -> Option<Self::Element>;
}

/// Resolve the host for `widget`.
///
/// # Errors
///
/// Returns [`SetupError::MissingHost`] when the page has no such element.
pub fn acquire<L: HostLookup>(lookup: &L, widget: Widget) -> Result<L::Element, SetupError> {
    lookup
        .find(widget.host_id())
        .ok_or(SetupError::MissingHost { widget: widget.name(), id: widget.host_id() })
}

/// Lookup against `window.document`.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentLookup;

#[cfg(feature = "csr")]
impl HostLookup for DocumentLookup {
    type Element = web_sys::HtmlElement;

    fn find(&self, id: &str) -> Option<Self::Element> {
        use wasm_bindgen::JsCast;

        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    }
}

/// Move keyboard focus to the element with `id`, if it exists.
#[cfg(feature = "csr")]
pub fn focus_by_id(id: &str) {
    let Some(el) = DocumentLookup.find(id) else {
        log::debug!("focus target #{id} not found");
        return;
    };
    if let Err(e) = el.focus() {
        log::debug!("focus #{id} failed: {e:?}");
    }
}

/// `window.innerWidth` in CSS px.
#[cfg(feature = "csr")]
pub fn viewport_width() -> Option<f64> {
    match web_sys::window()?.inner_width() {
        Ok(width) => width.as_f64(),
        Err(e) => {
            log::debug!("innerWidth unavailable: {e:?}");
            None
        }
    }
}

#[cfg(not(feature = "csr"))]
pub fn viewport_width() -> Option<f64> {
    None
}

/// Whether the visitor asked the OS for reduced motion.
#[cfg(feature = "csr")]
pub fn prefers_reduced_motion() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    if let Ok(Some(query)) = window.match_media("(prefers-reduced-motion: reduce)") {
        query.matches()
    } else {
        false
    }
}

#[cfg(not(feature = "csr"))]
pub fn prefers_reduced_motion() -> bool {
    false
}

/// Whether the tab is currently in the background.
#[cfg(feature = "csr")]
pub fn document_hidden() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .is_some_and(|doc| doc.hidden())
}

#[cfg(not(feature = "csr"))]
pub fn document_hidden() -> bool {
    false
}
