//! Static site content bundled into the WASM binary.
//!
//! Testimonials ship as JSON next to the crate so copy edits do not touch
//! code. The contact-form schema is code because validation depends on it.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use serde::Deserialize;

use crate::state::form::FormSchema;
use crate::util::validate::{FieldKind, FieldSpec};

const TESTIMONIALS_JSON: &str = include_str!("../content/testimonials.json");

pub const HONEYPOT_FIELD: &str = "_gotcha";

pub const SERVICE_OPTIONS: &[&str] = &["Website design", "Local SEO", "Online booking", "Ongoing maintenance"];

/// One carousel slide.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    #[serde(default)]
    pub role: String,
}

/// Parse a testimonial document.
///
/// # Errors
///
/// Returns the `serde_json` error when the document is malformed.
pub fn parse_testimonials(raw: &str) -> Result<Vec<Testimonial>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Testimonials bundled with the site. Malformed content yields no slides,
/// which leaves the carousel disabled.
pub fn testimonials() -> Vec<Testimonial> {
    match parse_testimonials(TESTIMONIALS_JSON) {
        Ok(items) => items,
        Err(e) => {
            log::warn!("bundled testimonials are malformed: {e}");
            Vec::new()
        }
    }
}

/// Fields of the contact form, in display order.
pub fn contact_form_schema() -> FormSchema {
    FormSchema::new(
        vec![
            FieldSpec::new("name", "Name", FieldKind::ShortText),
            FieldSpec::new("email", "Email", FieldKind::Email),
            FieldSpec::new("service", "Service", FieldKind::Choice).with_options(SERVICE_OPTIONS),
            FieldSpec::new("message", "Message", FieldKind::LongText),
        ],
        Some(HONEYPOT_FIELD),
    )
}
