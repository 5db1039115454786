//! Keyword rules for the chatbot's canned replies.
//!
//! Rules are scanned in order and the first one with a matching keyword wins,
//! so a message mentioning both "price" and "service" gets the pricing reply.

#[cfg(test)]
#[path = "chat_rules_test.rs"]
mod chat_rules_test;

use crate::config::SiteConfig;

/// Which canned reply a message maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyTopic {
    Pricing,
    Services,
    Booking,
    Contact,
    Fallback,
}

struct ReplyRule {
    keywords: &'static [&'static str],
    topic: ReplyTopic,
}

const RULES: &[ReplyRule] = &[
    ReplyRule { keywords: &["quote", "price", "pricing", "cost"], topic: ReplyTopic::Pricing },
    ReplyRule { keywords: &["service"], topic: ReplyTopic::Services },
    ReplyRule { keywords: &["book", "schedule", "call", "meeting", "appointment"], topic: ReplyTopic::Booking },
    ReplyRule { keywords: &["contact", "email"], topic: ReplyTopic::Contact },
];

/// Pick the reply topic for a visitor message. Matching is case-insensitive substring.
#[must_use]
pub fn topic_for(message: &str) -> ReplyTopic {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map_or(ReplyTopic::Fallback, |rule| rule.topic)
}

impl ReplyTopic {
    /// Reply text, with the configured links filled in.
    #[must_use]
    pub fn reply(self, config: &SiteConfig) -> String {
        match self {
            Self::Pricing => "Every project is quoted individually. Most small-business sites land between \
                 $1,500 and $5,000. Fill in the contact form with a few details and we'll send a \
                 tailored quote within one business day."
                .to_owned(),
            Self::Services => "We offer website design, local SEO, online booking setup, and ongoing \
                 maintenance. Ask about any of them, or use the contact form to tell us what you need."
                .to_owned(),
            Self::Booking => format!(
                "You can book a free 30-minute consultation here: {}",
                config.scheduling_url
            ),
            Self::Contact => format!(
                "You can reach us directly at {}. We reply within one business day.",
                config.contact_email
            ),
            Self::Fallback => format!(
                "Thanks for your message! For anything specific, email us at {} or book a call at {}.",
                config.contact_email, config.scheduling_url
            ),
        }
    }
}

/// Greeting shown the first time the widget opens.
pub const WELCOME_MESSAGE: &str = "Hi there! Ask me about pricing, our services, or booking a call.";

/// Preset prompts offered as buttons under the message list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub message: &'static str,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction { label: "Get a quote", message: "How much does a new website cost?" },
    QuickAction { label: "Our services", message: "What services do you offer?" },
    QuickAction { label: "Book a call", message: "I'd like to book a call." },
    QuickAction { label: "Contact us", message: "How can I contact you?" },
];
