//! Client for the hosted form-relay endpoint.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds and tests: callers supply their own [`Relay`] implementation.
//!
//! ERROR HANDLING
//! ==============
//! The relay contract is "2xx or not". No response body is parsed, so every
//! failure collapses into a [`RelayError`] the form turns into a fallback
//! message and the chatbot only logs.

#[cfg(test)]
#[path = "relay_test.rs"]
mod relay_test;

use async_trait::async_trait;

pub const CHAT_SOURCE: &str = "chatbot";
pub const CHAT_SUBJECT: &str = "New chatbot message";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("relay endpoint not configured")]
    NotConfigured,
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("relay unreachable: {0}")]
    Transport(String),
    #[error("relay responded with status {0}")]
    Status(u16),
}

/// Ordered name/value pairs posted to the relay as a JSON object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelayPayload {
    fields: Vec<(String, String)>,
}

impl RelayPayload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, replacing an earlier one with the same name.
    #[must_use]
    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value.to_owned();
        } else {
            self.fields.push((name.to_owned(), value.to_owned()));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Copy of a chatbot message forwarded to the relay.
    #[must_use]
    pub fn chat_message(text: &str) -> Self {
        Self::new()
            .field("_subject", CHAT_SUBJECT)
            .field("source", CHAT_SOURCE)
            .field("message", text)
    }

    /// JSON object with keys in insertion order.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(n, v)| (n.clone(), serde_json::Value::String(v.clone())))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

/// Anything that can deliver a payload to the relay.
#[async_trait(?Send)]
pub trait Relay {
    /// Post `payload` once. No retries.
    ///
    /// # Errors
    ///
    /// Returns a [`RelayError`] for transport failures and non-2xx responses.
    async fn send(&self, payload: &RelayPayload) -> Result<(), RelayError>;
}

/// Map an HTTP status onto the relay's success contract.
///
/// # Errors
///
/// Returns [`RelayError::Status`] for anything outside `200..300`.
pub fn status_outcome(status: u16) -> Result<(), RelayError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(RelayError::Status(status))
    }
}

/// Relay backed by `fetch` through `gloo-net`.
#[cfg(feature = "csr")]
#[derive(Clone, Debug)]
pub struct HttpRelay {
    endpoint: String,
}

#[cfg(feature = "csr")]
impl HttpRelay {
    #[must_use]
    pub fn new(endpoint: String) -> Self {
        Self { endpoint }
    }
}

#[cfg(feature = "csr")]
#[async_trait(?Send)]
impl Relay for HttpRelay {
    async fn send(&self, payload: &RelayPayload) -> Result<(), RelayError> {
        if self.endpoint.trim().is_empty() {
            return Err(RelayError::NotConfigured);
        }
        let resp = gloo_net::http::Request::post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&payload.to_json())
            .map_err(|e| RelayError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;
        status_outcome(resp.status())
    }
}
