//! Chatbot widget state: open/closed toggle and message history.
//!
//! DESIGN
//! ======
//! Same shape as the form: `handle` is pure and returns effects. The relay
//! copy of each visitor message is fire-and-forget; the canned reply is
//! scheduled independently, so a relay failure never holds it back.
//!
//! History is append-only and lives only as long as the page.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::config::SiteConfig;
use crate::net::relay::{Relay, RelayPayload};
use crate::util::chat_rules::{WELCOME_MESSAGE, topic_for};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

/// A single chat message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatEvent {
    LauncherClicked,
    /// `Escape` pressed while the widget has focus or is open.
    CancelKey,
    /// Pointer-down outside the widget's bounds.
    ClickOutside,
    Submit(String),
    ReplyDue { text: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatEffect {
    FocusInput,
    ScrollToLatest,
    Relay(RelayPayload),
    ScheduleReply { delay_ms: u32, text: String },
}

#[derive(Clone, Debug)]
pub struct ChatState {
    pub is_open: bool,
    pub history: Vec<ChatMessage>,
    pending_replies: usize,
    config: SiteConfig,
}

impl ChatState {
    pub fn new(config: &SiteConfig) -> Self {
        Self { is_open: false, history: Vec::new(), pending_replies: 0, config: config.clone() }
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Canned replies scheduled but not yet delivered.
    #[must_use]
    pub fn pending_replies(&self) -> usize {
        self.pending_replies
    }

    /// Whether the typing indicator should show.
    #[must_use]
    pub fn typing(&self) -> bool {
        self.pending_replies > 0
    }

    pub fn handle(&mut self, event: ChatEvent) -> Vec<ChatEffect> {
        match event {
            ChatEvent::LauncherClicked => {
                if self.is_open {
                    self.close()
                } else {
                    self.open()
                }
            }
            ChatEvent::CancelKey | ChatEvent::ClickOutside => {
                if self.is_open {
                    self.close()
                } else {
                    Vec::new()
                }
            }
            ChatEvent::Submit(text) => self.submit(&text),
            ChatEvent::ReplyDue { text } => {
                self.pending_replies = self.pending_replies.saturating_sub(1);
                self.history.push(ChatMessage { role: ChatRole::Bot, text });
                vec![ChatEffect::ScrollToLatest]
            }
        }
    }

    fn open(&mut self) -> Vec<ChatEffect> {
        self.is_open = true;
        if self.history.is_empty() {
            self.history.push(ChatMessage { role: ChatRole::Bot, text: WELCOME_MESSAGE.to_owned() });
        }
        vec![ChatEffect::FocusInput, ChatEffect::ScrollToLatest]
    }

    fn close(&mut self) -> Vec<ChatEffect> {
        self.is_open = false;
        Vec::new()
    }

    fn submit(&mut self, text: &str) -> Vec<ChatEffect> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let topic = topic_for(text);
        log::debug!("chat message matched {topic:?}");
        self.history.push(ChatMessage { role: ChatRole::User, text: text.to_owned() });
        self.pending_replies += 1;
        vec![
            ChatEffect::ScrollToLatest,
            ChatEffect::Relay(RelayPayload::chat_message(text)),
            ChatEffect::ScheduleReply { delay_ms: self.config.reply_delay_ms, text: topic.reply(&self.config) },
        ]
    }
}

/// Best-effort copy of a chat message to the relay. Failures are logged and
/// otherwise swallowed. Returns whether the relay accepted it.
pub async fn forward<R: Relay + ?Sized>(relay: &R, payload: &RelayPayload) -> bool {
    match relay.send(payload).await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("chat relay failed: {e}");
            false
        }
    }
}
