//! Leptos components for the interactive widgets.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each component owns one state machine from [`crate::state`] in a signal,
//! dispatches DOM events into it, and runs the effects it returns (timers,
//! relay requests, focus changes). Browser-only effects are gated behind the
//! `csr` feature so the crate still builds and tests natively.

pub mod chat_widget;
pub mod contact_form;
pub mod cookie_banner;
pub mod testimonial_carousel;
