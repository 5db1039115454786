//! Network boundary to the hosted form relay.
//!
//! SYSTEM CONTEXT
//! ==============
//! The contact form and the chatbot both post to the same third-party relay.
//! Everything network-shaped goes through the [`relay::Relay`] trait so the
//! state machines can be exercised headlessly.

pub mod relay;

#[cfg(test)]
pub(crate) mod testing;
