//! Cookie-consent banner.

use leptos::prelude::*;

use crate::config::SiteConfig;
use crate::state::consent::ConsentState;
use crate::util::storage::browser_store;

/// Banner shown until the visitor accepts cookies. Acceptance persists across
/// visits when storage allows it, and always hides the banner for the session.
#[component]
pub fn CookieBanner(config: SiteConfig) -> impl IntoView {
    let key = StoredValue::new(config.consent_key);
    let consent = RwSignal::new(key.with_value(|k| ConsentState::load(&browser_store(), k)));

    let on_accept = move |_| {
        consent.update(|c| {
            let mut store = browser_store();
            if let Err(e) = key.with_value(|k| c.accept(&mut store, k)) {
                leptos::logging::warn!("cookie consent not persisted: {e}");
            }
        });
    };

    view! {
        <Show when=move || consent.get().banner_visible()>
            <div id="cookie-consent" class="cookie-banner" role="dialog" aria-live="polite" aria-label="Cookie consent">
                <p class="cookie-banner__text">
                    "We use cookies to understand how visitors use this site and to improve it."
                </p>
                <button id="accept-cookies" class="btn btn--primary cookie-banner__accept" type="button" on:click=on_accept>
                    "Accept"
                </button>
            </div>
        </Show>
    }
}
