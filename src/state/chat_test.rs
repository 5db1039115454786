use super::*;
use crate::net::relay::RelayError;
use crate::net::testing::RecordingRelay;
use crate::util::chat_rules::ReplyTopic;

fn chat() -> ChatState {
    let config = SiteConfig { reply_delay_ms: 600, ..SiteConfig::default() };
    ChatState::new(&config)
}

fn scheduled_reply(effects: &[ChatEffect]) -> Option<String> {
    effects.iter().find_map(|e| match e {
        ChatEffect::ScheduleReply { text, .. } => Some(text.clone()),
        _ => None,
    })
}

// =============================================================
// ChatState defaults
// =============================================================

#[test]
fn chat_state_keeps_its_config() {
    assert_eq!(chat().config().reply_delay_ms, 600);
}

#[test]
fn chat_state_starts_closed_and_empty() {
    let state = chat();
    assert!(!state.is_open);
    assert!(state.history.is_empty());
    assert!(!state.typing());
}

// =============================================================
// Toggle
// =============================================================

#[test]
fn launcher_toggles_open_and_closed() {
    let mut state = chat();
    let effects = state.handle(ChatEvent::LauncherClicked);
    assert!(state.is_open);
    assert_eq!(effects, vec![ChatEffect::FocusInput, ChatEffect::ScrollToLatest]);

    assert!(state.handle(ChatEvent::LauncherClicked).is_empty());
    assert!(!state.is_open);
}

#[test]
fn cancel_key_and_outside_click_close() {
    let mut state = chat();
    state.handle(ChatEvent::LauncherClicked);
    state.handle(ChatEvent::CancelKey);
    assert!(!state.is_open);

    state.handle(ChatEvent::LauncherClicked);
    state.handle(ChatEvent::ClickOutside);
    assert!(!state.is_open);
}

#[test]
fn cancel_and_outside_click_do_not_open() {
    let mut state = chat();
    assert!(state.handle(ChatEvent::CancelKey).is_empty());
    assert!(state.handle(ChatEvent::ClickOutside).is_empty());
    assert!(!state.is_open);
}

#[test]
fn welcome_message_is_added_once() {
    let mut state = chat();
    state.handle(ChatEvent::LauncherClicked);
    state.handle(ChatEvent::LauncherClicked);
    state.handle(ChatEvent::LauncherClicked);
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history[0].role, ChatRole::Bot);
    assert_eq!(state.history[0].text, WELCOME_MESSAGE);
}

// =============================================================
// Messages
// =============================================================

#[test]
fn submit_appends_relays_and_schedules_reply() {
    let mut state = chat();
    state.handle(ChatEvent::LauncherClicked);
    let effects = state.handle(ChatEvent::Submit("  What's the price?  ".to_owned()));

    assert_eq!(
        state.history.last(),
        Some(&ChatMessage { role: ChatRole::User, text: "What's the price?".to_owned() })
    );
    assert!(state.typing());
    assert!(effects.contains(&ChatEffect::Relay(RelayPayload::chat_message("What's the price?"))));
    assert!(effects.contains(&ChatEffect::ScheduleReply {
        delay_ms: 600,
        text: ReplyTopic::Pricing.reply(&SiteConfig::default()),
    }));
}

#[test]
fn empty_submit_is_ignored() {
    let mut state = chat();
    assert!(state.handle(ChatEvent::Submit("   ".to_owned())).is_empty());
    assert!(state.history.is_empty());
    assert!(!state.typing());
}

#[test]
fn price_and_service_message_gets_pricing_reply() {
    let mut state = chat();
    let effects = state.handle(ChatEvent::Submit("price for your service".to_owned()));
    assert_eq!(scheduled_reply(&effects), Some(ReplyTopic::Pricing.reply(&SiteConfig::default())));
}

#[test]
fn reply_due_appends_bot_message_and_clears_typing() {
    let mut state = chat();
    let effects = state.handle(ChatEvent::Submit("hello".to_owned()));
    let reply = scheduled_reply(&effects).unwrap();

    state.handle(ChatEvent::ReplyDue { text: reply.clone() });
    assert_eq!(state.history.last(), Some(&ChatMessage { role: ChatRole::Bot, text: reply }));
    assert!(!state.typing());
}

#[test]
fn typing_stays_on_until_every_reply_lands() {
    let mut state = chat();
    state.handle(ChatEvent::Submit("one".to_owned()));
    state.handle(ChatEvent::Submit("two".to_owned()));
    assert_eq!(state.pending_replies(), 2);
    state.handle(ChatEvent::ReplyDue { text: "a".to_owned() });
    assert!(state.typing());
    state.handle(ChatEvent::ReplyDue { text: "b".to_owned() });
    assert!(!state.typing());
    assert_eq!(state.pending_replies(), 0);
}

#[test]
fn history_is_append_only_across_toggles() {
    let mut state = chat();
    state.handle(ChatEvent::LauncherClicked);
    state.handle(ChatEvent::Submit("hello".to_owned()));
    state.handle(ChatEvent::CancelKey);
    state.handle(ChatEvent::ReplyDue { text: "late reply".to_owned() });
    state.handle(ChatEvent::LauncherClicked);

    let texts = state.history.iter().map(|m| m.text.as_str()).collect::<Vec<_>>();
    assert_eq!(texts, vec![WELCOME_MESSAGE, "hello", "late reply"]);
}

// =============================================================
// Relay forwarding
// =============================================================

#[test]
fn forward_failure_is_swallowed() {
    let relay = RecordingRelay::failing(RelayError::Status(500));
    let payload = RelayPayload::chat_message("hi");
    assert!(!futures::executor::block_on(forward(&relay, &payload)));
    assert_eq!(relay.call_count(), 1);
}

#[test]
fn forward_success_reports_true() {
    let relay = RecordingRelay::ok();
    assert!(futures::executor::block_on(forward(&relay, &RelayPayload::chat_message("hi"))));
}

#[test]
fn reply_is_scheduled_even_when_relay_fails() {
    let mut state = chat();
    let relay = RecordingRelay::failing(RelayError::Transport("offline".to_owned()));
    let effects = state.handle(ChatEvent::Submit("book".to_owned()));
    for effect in &effects {
        if let ChatEffect::Relay(payload) = effect {
            futures::executor::block_on(forward(&relay, payload));
        }
    }
    let reply = scheduled_reply(&effects).unwrap();
    state.handle(ChatEvent::ReplyDue { text: reply });
    assert_eq!(state.history.last().map(|m| m.role), Some(ChatRole::Bot));
}
