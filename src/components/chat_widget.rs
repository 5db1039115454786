//! Floating chatbot with canned keyword replies.
//!
//! SYSTEM CONTEXT
//! ==============
//! A launcher button toggles the chat window. Visitor messages are copied to
//! the relay in the background and answered from the local rule table after a
//! short delay, so the widget works even when the relay is down.

#[cfg(test)]
#[path = "chat_widget_test.rs"]
mod chat_widget_test;

use leptos::prelude::*;

use crate::config::SiteConfig;
use crate::state::chat::{ChatEffect, ChatEvent, ChatRole, ChatState};
use crate::util::chat_rules::QUICK_ACTIONS;

pub fn message_class(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "chatbot__message chatbot__message--user",
        ChatRole::Bot => "chatbot__message chatbot__message--bot",
    }
}

pub fn launcher_label(open: bool) -> &'static str {
    if open { "Close chat" } else { "Chat with us" }
}

#[derive(Clone, Copy)]
struct ChatController {
    state: RwSignal<ChatState>,
    input_ref: NodeRef<leptos::html::Input>,
    messages_ref: NodeRef<leptos::html::Div>,
    #[cfg(feature = "csr")]
    reply_timers: StoredValue<Vec<gloo_timers::callback::Timeout>, LocalStorage>,
}

impl ChatController {
    fn dispatch(self, event: ChatEvent) {
        let Some(effects) = self.state.try_update(|s| s.handle(event)) else {
            return;
        };
        for effect in effects {
            self.run(effect);
        }
    }

    #[cfg(feature = "csr")]
    fn run(self, effect: ChatEffect) {
        use gloo_timers::callback::Timeout;

        use crate::net::relay::HttpRelay;
        use crate::state::chat::forward;

        match effect {
            ChatEffect::FocusInput => {
                let input_ref = self.input_ref;
                request_animation_frame(move || {
                    if let Some(input) = input_ref.get_untracked() {
                        if let Err(e) = input.focus() {
                            log::debug!("focus #chatbot-input failed: {e:?}");
                        }
                    }
                });
            }
            ChatEffect::ScrollToLatest => {
                let messages_ref = self.messages_ref;
                request_animation_frame(move || {
                    if let Some(list) = messages_ref.get_untracked() {
                        list.set_scroll_top(list.scroll_height());
                    }
                });
            }
            ChatEffect::Relay(payload) => {
                let Some(endpoint) = self.state.try_with_untracked(|s| s.config().relay_endpoint.clone()) else {
                    return;
                };
                leptos::task::spawn_local(async move {
                    forward(&HttpRelay::new(endpoint), &payload).await;
                });
            }
            ChatEffect::ScheduleReply { delay_ms, text } => {
                let timeout = Timeout::new(delay_ms, move || self.dispatch(ChatEvent::ReplyDue { text }));
                // With only this reply pending, every older timeout has already fired.
                let only_pending = self.state.try_with_untracked(ChatState::pending_replies) == Some(1);
                self.reply_timers.try_update_value(|timers| {
                    if only_pending {
                        timers.clear();
                    }
                    timers.push(timeout);
                });
            }
        }
    }

    #[cfg(not(feature = "csr"))]
    fn run(self, effect: ChatEffect) {
        log::debug!("chat effect needs a browser, skipped: {effect:?}");
    }
}

/// Chatbot launcher and window.
#[component]
pub fn ChatWidget(config: SiteConfig) -> impl IntoView {
    let root_ref = NodeRef::<leptos::html::Div>::new();
    let ctl = ChatController {
        state: RwSignal::new(ChatState::new(&config)),
        input_ref: NodeRef::new(),
        messages_ref: NodeRef::new(),
        #[cfg(feature = "csr")]
        reply_timers: StoredValue::new_local(Vec::new()),
    };
    let state = ctl.state;
    let draft = RwSignal::new(String::new());

    #[cfg(feature = "csr")]
    {
        let keydown = window_event_listener(leptos::ev::keydown, move |ev| {
            if ev.key() == "Escape" {
                ctl.dispatch(ChatEvent::CancelKey);
            }
        });
        let pointerdown = window_event_listener(leptos::ev::pointerdown, move |ev| {
            if state.try_with_untracked(|s| s.is_open) != Some(true) {
                return;
            }
            let inside = root_ref.get_untracked().is_some_and(|root| event_inside(&root, &ev));
            if !inside {
                ctl.dispatch(ChatEvent::ClickOutside);
            }
        });
        on_cleanup(move || {
            keydown.remove();
            pointerdown.remove();
        });
    }

    let is_open = move || state.with(|s| s.is_open);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = draft.get_untracked();
        draft.set(String::new());
        ctl.dispatch(ChatEvent::Submit(text));
    };

    view! {
        <div class="chatbot" class:chatbot--open=is_open node_ref=root_ref>
            <button
                id="chatbot-launcher"
                class="chatbot__launcher"
                type="button"
                aria-controls="chatbot-window"
                aria-expanded=move || if is_open() { "true" } else { "false" }
                on:click=move |_| ctl.dispatch(ChatEvent::LauncherClicked)
            >
                {move || launcher_label(is_open())}
            </button>

            <div id="chatbot-window" class="chatbot__window" role="dialog" aria-label="Chat" hidden=move || !is_open()>
                <div id="chatbot-messages" class="chatbot__messages" aria-live="polite" node_ref=ctl.messages_ref>
                    {move || {
                        state
                            .get()
                            .history
                            .into_iter()
                            .map(|msg| view! { <div class=message_class(msg.role)>{msg.text}</div> })
                            .collect::<Vec<_>>()
                    }}
                    {move || {
                        state
                            .with(ChatState::typing)
                            .then(|| view! { <div class="chatbot__typing">"Typing..."</div> })
                    }}
                </div>

                <div class="chatbot__quick-actions">
                    {QUICK_ACTIONS
                        .iter()
                        .map(|action| {
                            let message = action.message;
                            view! {
                                <button
                                    class="chatbot__quick-action"
                                    type="button"
                                    on:click=move |_| ctl.dispatch(ChatEvent::Submit(message.to_owned()))
                                >
                                    {action.label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <form class="chatbot__input-row" on:submit=on_submit>
                    <input
                        id="chatbot-input"
                        class="chatbot__input"
                        type="text"
                        placeholder="Type your message..."
                        autocomplete="off"
                        node_ref=ctl.input_ref
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary chatbot__send" type="submit">
                        "Send"
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(feature = "csr")]
fn event_inside(root: &web_sys::HtmlDivElement, ev: &web_sys::Event) -> bool {
    use wasm_bindgen::JsCast;

    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
        .is_some_and(|node| root.contains(Some(&node)))
}
