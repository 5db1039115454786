//! # sitekit
//!
//! Leptos + WASM interactivity layer for a static marketing site: a
//! cookie-consent banner, a validated contact form posting to a hosted relay,
//! a keyword-rule chatbot, and an autoplaying testimonial carousel.
//!
//! Widget behaviour lives in plain state machines under [`state`] so it can be
//! tested natively. [`components`] binds them to the DOM and [`app`] mounts
//! each one into its host element when the WASM module starts. Browser glue is
//! compiled only with the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod content;
pub mod net;
pub mod state;
pub mod util;
