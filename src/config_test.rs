use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_empty_uses_defaults() {
    let cfg = SiteConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, SiteConfig::default());
    assert_eq!(cfg.consent_key, "cookieConsent");
    assert_eq!(cfg.wrap_policy, WrapPolicy::Clamp);
    assert!(cfg.relay_endpoint.is_empty());
}

#[test]
fn from_lookup_applies_overrides() {
    let cfg = SiteConfig::from_lookup(lookup_from(&[
        ("SITEKIT_RELAY_ENDPOINT", "https://relay.example.test/f/abc"),
        ("SITEKIT_SCHEDULING_URL", "https://book.example.test/intro"),
        ("SITEKIT_CONTACT_EMAIL", "team@example.test"),
        ("SITEKIT_CONSENT_KEY", "consent_v2"),
        ("SITEKIT_AUTOPLAY_MS", "7000"),
        ("SITEKIT_NOTICE_MS", "3000"),
        ("SITEKIT_REPLY_DELAY_MS", "250"),
        ("SITEKIT_CAROUSEL_WRAP", "wrap"),
    ]))
    .unwrap();

    assert_eq!(cfg.relay_endpoint, "https://relay.example.test/f/abc");
    assert_eq!(cfg.scheduling_url, "https://book.example.test/intro");
    assert_eq!(cfg.contact_email, "team@example.test");
    assert_eq!(cfg.consent_key, "consent_v2");
    assert_eq!(cfg.autoplay_ms, 7000);
    assert_eq!(cfg.notice_ms, 3000);
    assert_eq!(cfg.reply_delay_ms, 250);
    assert_eq!(cfg.wrap_policy, WrapPolicy::Wrap);
}

#[test]
fn from_lookup_blank_values_fall_back() {
    let cfg = SiteConfig::from_lookup(lookup_from(&[
        ("SITEKIT_SCHEDULING_URL", "   "),
        ("SITEKIT_CAROUSEL_WRAP", ""),
    ]))
    .unwrap();
    assert_eq!(cfg.scheduling_url, DEFAULT_SCHEDULING_URL);
    assert_eq!(cfg.wrap_policy, WrapPolicy::Clamp);
}

#[test]
fn from_lookup_unknown_wrap_policy_errors() {
    let err = SiteConfig::from_lookup(lookup_from(&[("SITEKIT_CAROUSEL_WRAP", "bounce")])).unwrap_err();
    assert_eq!(err, ConfigError::UnknownWrapPolicy("bounce".to_owned()));
    assert!(err.to_string().contains("unknown SITEKIT_CAROUSEL_WRAP"));
}

#[test]
fn from_lookup_rejects_malformed_contact_email() {
    let err = SiteConfig::from_lookup(lookup_from(&[("SITEKIT_CONTACT_EMAIL", "not-an-email")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidContactEmail("not-an-email".to_owned()));
}

#[test]
fn parse_ms_falls_back_on_garbage_and_zero() {
    assert_eq!(parse_ms(None, 10), 10);
    assert_eq!(parse_ms(Some("abc"), 10), 10);
    assert_eq!(parse_ms(Some("0"), 10), 10);
    assert_eq!(parse_ms(Some("-5"), 10), 10);
    assert_eq!(parse_ms(Some(" 42 "), 10), 42);
}

#[test]
fn endpoint_for_prefers_host_override() {
    let cfg = SiteConfig { relay_endpoint: "https://default.test".to_owned(), ..SiteConfig::default() };
    assert_eq!(cfg.endpoint_for(Some("https://host.test")), "https://host.test");
    assert_eq!(cfg.endpoint_for(Some("  ")), "https://default.test");
    assert_eq!(cfg.endpoint_for(None), "https://default.test");
}

#[test]
fn from_build_env_without_overrides_is_valid() {
    assert!(SiteConfig::from_build_env().is_ok());
}
