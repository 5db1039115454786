//! Site configuration resolved from build-time environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! The site is shipped as static files, so there is no runtime environment to
//! read. Values are captured at build time through `option_env!` and parsed
//! through a lookup function so the parsing rules stay unit-testable.

use crate::state::carousel::{Breakpoints, WrapPolicy};

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_SCHEDULING_URL: &str = "https://calendly.com/example/consultation";
pub const DEFAULT_CONTACT_EMAIL: &str = "hello@example.com";
pub const DEFAULT_CONSENT_KEY: &str = "cookieConsent";
pub const DEFAULT_AUTOPLAY_MS: u32 = 5_000;
pub const DEFAULT_NOTICE_MS: u32 = 5_000;
pub const DEFAULT_REPLY_DELAY_MS: u32 = 1_000;
pub const DEFAULT_SWIPE_THRESHOLD_PX: f64 = 50.0;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown SITEKIT_CAROUSEL_WRAP: {0} (expected 'clamp' or 'wrap')")]
    UnknownWrapPolicy(String),
    #[error("invalid contact email: {0}")]
    InvalidContactEmail(String),
}

/// Endpoints, outbound links, and timings shared by every widget.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Form relay URL. Empty means unconfigured; submissions then fail over
    /// to the contact email.
    pub relay_endpoint: String,
    pub scheduling_url: String,
    pub contact_email: String,
    pub consent_key: String,
    pub autoplay_ms: u32,
    pub notice_ms: u32,
    pub reply_delay_ms: u32,
    pub swipe_threshold_px: f64,
    pub wrap_policy: WrapPolicy,
    pub breakpoints: Breakpoints,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            relay_endpoint: String::new(),
            scheduling_url: DEFAULT_SCHEDULING_URL.to_owned(),
            contact_email: DEFAULT_CONTACT_EMAIL.to_owned(),
            consent_key: DEFAULT_CONSENT_KEY.to_owned(),
            autoplay_ms: DEFAULT_AUTOPLAY_MS,
            notice_ms: DEFAULT_NOTICE_MS,
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            wrap_policy: WrapPolicy::Clamp,
            breakpoints: Breakpoints::default(),
        }
    }
}

impl SiteConfig {
    /// Build config from variables captured when the crate was compiled.
    ///
    /// Optional:
    /// - `SITEKIT_RELAY_ENDPOINT`: form relay URL (default empty)
    /// - `SITEKIT_SCHEDULING_URL`: booking link used in chat replies
    /// - `SITEKIT_CONTACT_EMAIL`: fallback address in replies and alerts
    /// - `SITEKIT_CONSENT_KEY`: storage key for the consent flag
    /// - `SITEKIT_AUTOPLAY_MS`: carousel autoplay interval, default 5000
    /// - `SITEKIT_NOTICE_MS`: success notice display window, default 5000
    /// - `SITEKIT_REPLY_DELAY_MS`: chatbot reply delay, default 1000
    /// - `SITEKIT_CAROUSEL_WRAP`: `clamp` (default) or `wrap`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a value is present but not recognized.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let raw = match key {
                "SITEKIT_RELAY_ENDPOINT" => option_env!("SITEKIT_RELAY_ENDPOINT"),
                "SITEKIT_SCHEDULING_URL" => option_env!("SITEKIT_SCHEDULING_URL"),
                "SITEKIT_CONTACT_EMAIL" => option_env!("SITEKIT_CONTACT_EMAIL"),
                "SITEKIT_CONSENT_KEY" => option_env!("SITEKIT_CONSENT_KEY"),
                "SITEKIT_AUTOPLAY_MS" => option_env!("SITEKIT_AUTOPLAY_MS"),
                "SITEKIT_NOTICE_MS" => option_env!("SITEKIT_NOTICE_MS"),
                "SITEKIT_REPLY_DELAY_MS" => option_env!("SITEKIT_REPLY_DELAY_MS"),
                "SITEKIT_CAROUSEL_WRAP" => option_env!("SITEKIT_CAROUSEL_WRAP"),
                _ => None,
            };
            raw.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a value is present but not recognized.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let contact_email = text("SITEKIT_CONTACT_EMAIL", defaults.contact_email);
        if !crate::util::validate::is_valid_email(&contact_email) {
            return Err(ConfigError::InvalidContactEmail(contact_email));
        }

        Ok(Self {
            relay_endpoint: text("SITEKIT_RELAY_ENDPOINT", defaults.relay_endpoint),
            scheduling_url: text("SITEKIT_SCHEDULING_URL", defaults.scheduling_url),
            contact_email,
            consent_key: text("SITEKIT_CONSENT_KEY", defaults.consent_key),
            autoplay_ms: parse_ms(lookup("SITEKIT_AUTOPLAY_MS").as_deref(), DEFAULT_AUTOPLAY_MS),
            notice_ms: parse_ms(lookup("SITEKIT_NOTICE_MS").as_deref(), DEFAULT_NOTICE_MS),
            reply_delay_ms: parse_ms(lookup("SITEKIT_REPLY_DELAY_MS").as_deref(), DEFAULT_REPLY_DELAY_MS),
            swipe_threshold_px: defaults.swipe_threshold_px,
            wrap_policy: parse_wrap_policy(lookup("SITEKIT_CAROUSEL_WRAP").as_deref())?,
            breakpoints: defaults.breakpoints,
        })
    }

    /// Relay URL to use for a form host, preferring the host's own
    /// `data-endpoint` attribute when it carries one.
    #[must_use]
    pub fn endpoint_for(&self, host_override: Option<&str>) -> String {
        host_override
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map_or_else(|| self.relay_endpoint.clone(), str::to_owned)
    }
}

/// Parse a millisecond duration, falling back on absent, malformed, or zero values.
fn parse_ms(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(default)
}

fn parse_wrap_policy(raw: Option<&str>) -> Result<WrapPolicy, ConfigError> {
    match raw.map(str::trim).unwrap_or("clamp") {
        "" | "clamp" => Ok(WrapPolicy::Clamp),
        "wrap" => Ok(WrapPolicy::Wrap),
        other => Err(ConfigError::UnknownWrapPolicy(other.to_owned())),
    }
}
