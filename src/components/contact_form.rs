//! Contact form with inline validation and relay submission.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the fields of a [`FormSchema`] and forwards every input, blur and
//! submit to [`FormState::handle`]. The effects it gets back are the only
//! things this component does on its own: focus a field, post the payload,
//! arm the success-notice timer, or raise the failure alert.
//!
//! ERROR HANDLING
//! ==============
//! Relay failures come back as `FormEvent::RelayFailed` and surface as a
//! blocking alert naming the fallback email address. Responses that land after
//! the component is gone are dropped by `try_update`.

#[cfg(test)]
#[path = "contact_form_test.rs"]
mod contact_form_test;

use leptos::prelude::*;

use crate::config::SiteConfig;
use crate::state::form::{FormEffect, FormEvent, FormSchema, FormState, SubmitPhase};
use crate::util::validate::{FieldKind, FieldSpec};

/// Element id of the control for field `name`.
pub fn field_id(name: &str) -> String {
    format!("contact-{name}")
}

/// Element id of the inline error message for field `name`.
pub fn error_id(name: &str) -> String {
    format!("contact-{name}-error")
}

/// `type` attribute for single-line inputs.
pub fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::ShortText | FieldKind::LongText | FieldKind::Choice => "text",
    }
}

pub fn submit_label(phase: SubmitPhase) -> &'static str {
    if phase == SubmitPhase::Submitting { "Sending..." } else { "Send message" }
}

/// Signals and timer slots shared by the form's event handlers.
#[derive(Clone, Copy)]
struct FormController {
    state: RwSignal<FormState>,
    endpoint: StoredValue<String>,
    #[cfg(feature = "csr")]
    notice_timer: StoredValue<Option<gloo_timers::callback::Timeout>, LocalStorage>,
}

impl FormController {
    fn new(schema: FormSchema, config: &SiteConfig, endpoint: String) -> Self {
        Self {
            state: RwSignal::new(FormState::new(schema, config)),
            endpoint: StoredValue::new(endpoint),
            #[cfg(feature = "csr")]
            notice_timer: StoredValue::new_local(None),
        }
    }

    fn dispatch(self, event: FormEvent) {
        let Some(effects) = self.state.try_update(|s| s.handle(event)) else {
            return;
        };
        for effect in effects {
            self.run(effect);
        }
    }

    #[cfg(feature = "csr")]
    fn run(self, effect: FormEffect) {
        use gloo_timers::callback::Timeout;

        use crate::net::relay::HttpRelay;
        use crate::state::form::deliver;

        match effect {
            FormEffect::FocusField(name) => {
                request_animation_frame(move || crate::util::dom::focus_by_id(&field_id(&name)));
            }
            FormEffect::Send(payload) => {
                let Some(endpoint) = self.endpoint.try_get_value() else {
                    return;
                };
                leptos::task::spawn_local(async move {
                    let relay = HttpRelay::new(endpoint);
                    let outcome = deliver(&relay, &payload).await;
                    self.dispatch(outcome);
                });
            }
            FormEffect::ScheduleNoticeHide { seq, after_ms } => {
                let timeout = Timeout::new(after_ms, move || self.dispatch(FormEvent::NoticeExpired { seq }));
                // Replacing the handle drops, and so clears, the previous timeout.
                self.notice_timer.try_update_value(|slot| *slot = Some(timeout));
            }
            FormEffect::ShowAlert(message) => {
                if let Some(window) = web_sys::window() {
                    if let Err(e) = window.alert_with_message(&message) {
                        leptos::logging::warn!("alert failed: {e:?}");
                    }
                }
                self.dispatch(FormEvent::AlertDismissed);
            }
        }
    }

    #[cfg(not(feature = "csr"))]
    fn run(self, effect: FormEffect) {
        log::debug!("form effect needs a browser, skipped: {effect:?}");
    }
}

/// Contact form bound to the relay at `endpoint`.
#[component]
pub fn ContactForm(config: SiteConfig, schema: FormSchema, endpoint: String) -> impl IntoView {
    let ctl = FormController::new(schema, &config, endpoint);
    let state = ctl.state;

    let fields = state.with_untracked(|s| s.schema().fields().to_vec());
    let honeypot = state.with_untracked(|s| s.schema().honeypot().map(str::to_owned));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        ctl.dispatch(FormEvent::Submit);
    };

    view! {
        <form
            id="contact-form-el"
            class="contact-form"
            method="post"
            action=ctl.endpoint.get_value()
            novalidate
            on:submit=on_submit
        >
            {fields.into_iter().map(|spec| field_view(ctl, spec)).collect_view()}
            {honeypot.map(|name| honeypot_view(ctl, name))}
            <button
                id="contact-submit"
                class="btn btn--primary contact-form__submit"
                type="submit"
                disabled=move || state.with(FormState::submit_disabled)
            >
                {move || submit_label(state.with(FormState::phase))}
            </button>
            <Show when=move || state.with(FormState::notice_visible)>
                <div id="form-success" class="form-success" role="status">
                    "Thanks! Your message has been sent. We'll be in touch soon."
                </div>
            </Show>
        </form>
    }
}

fn field_view(ctl: FormController, spec: FieldSpec) -> impl IntoView {
    let state = ctl.state;
    let id = field_id(&spec.name);
    let described_by = error_id(&spec.name);

    let name = spec.name.clone();
    let value = move || state.with(|s| s.value(&name).to_owned());
    let name = spec.name.clone();
    let error = move || state.with(|s| s.error(&name).map(str::to_owned));
    let name = spec.name.clone();
    let invalid = move || state.with(|s| s.error(&name).is_some()).then_some("true");
    let name = spec.name.clone();
    let set_value = move |value: String| ctl.dispatch(FormEvent::Input { field: name.clone(), value });
    let name = spec.name.clone();
    let on_blur = move |_| ctl.dispatch(FormEvent::Blur { field: name.clone() });

    let control = match spec.kind {
        FieldKind::LongText => view! {
            <textarea
                id=id.clone()
                name=spec.name.clone()
                class="contact-form__control"
                rows="5"
                aria-invalid=invalid
                aria-describedby=described_by.clone()
                prop:value=value
                on:input=move |ev| set_value(event_target_value(&ev))
                on:blur=on_blur
            ></textarea>
        }
        .into_any(),
        FieldKind::Choice => view! {
            <select
                id=id.clone()
                name=spec.name.clone()
                class="contact-form__control"
                aria-invalid=invalid
                aria-describedby=described_by.clone()
                prop:value=value
                on:input=move |ev| set_value(event_target_value(&ev))
                on:blur=on_blur
            >
                <option value="">"Choose one..."</option>
                {spec
                    .options
                    .iter()
                    .map(|option| view! { <option value=option.clone()>{option.clone()}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::ShortText | FieldKind::Email => view! {
            <input
                id=id.clone()
                name=spec.name.clone()
                class="contact-form__control"
                type=input_type(spec.kind)
                aria-invalid=invalid
                aria-describedby=described_by.clone()
                prop:value=value
                on:input=move |ev| set_value(event_target_value(&ev))
                on:blur=on_blur
            />
        }
        .into_any(),
    };

    view! {
        <div class="contact-form__field">
            <label for=id>{spec.label}</label>
            {control}
            <p id=described_by class="field-error" role="alert">{error}</p>
        </div>
    }
}

/// Hidden bot trap. Real visitors never see or fill it.
fn honeypot_view(ctl: FormController, name: String) -> impl IntoView {
    let field = name.clone();
    view! {
        <input
            class="contact-form__trap"
            type="text"
            name=name
            tabindex="-1"
            autocomplete="off"
            aria-hidden="true"
            style="position:absolute;left:-10000px"
            on:input=move |ev| ctl.dispatch(FormEvent::Input { field: field.clone(), value: event_target_value(&ev) })
        />
    }
}
