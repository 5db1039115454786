//! Contact-form validation and submission lifecycle.
//!
//! DESIGN
//! ======
//! `FormState::handle` is a pure transition function: it takes one UI or
//! network event, updates the state, and returns the side effects the
//! component must perform (focus a field, post to the relay, arm the notice
//! timer, show an alert). The component never decides anything itself.
//!
//! The submit-disabled flag is the single-flight guard: a `Submit` that
//! arrives while a request is in flight produces no effects at all.
//!
//! Relay outcomes that arrive when no request is in flight (after a reset, or
//! twice for the same request) are ignored.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::collections::HashMap;

use crate::config::SiteConfig;
use crate::net::relay::{Relay, RelayPayload};
use crate::util::validate::{FieldSpec, validate_field};

/// Ordered field definitions plus the optional honeypot field name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
    honeypot: Option<String>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>, honeypot: Option<&str>) -> Self {
        Self { fields, honeypot: honeypot.map(str::to_owned) }
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn honeypot(&self) -> Option<&str> {
        self.honeypot.as_deref()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn is_honeypot(&self, name: &str) -> bool {
        self.honeypot.as_deref() == Some(name)
    }
}

/// Submission lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Inputs to the form state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    Input { field: String, value: String },
    Blur { field: String },
    Submit,
    RelaySucceeded,
    RelayFailed { reason: String },
    NoticeExpired { seq: u64 },
    AlertDismissed,
}

/// Side effects requested by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEffect {
    FocusField(String),
    Send(RelayPayload),
    ScheduleNoticeHide { seq: u64, after_ms: u32 },
    ShowAlert(String),
}

#[derive(Clone, Debug)]
pub struct FormState {
    schema: FormSchema,
    values: HashMap<String, String>,
    errors: HashMap<String, String>,
    phase: SubmitPhase,
    submit_disabled: bool,
    notice_visible: bool,
    notice_seq: u64,
    alert: Option<String>,
    notice_ms: u32,
    contact_email: String,
}

impl FormState {
    pub fn new(schema: FormSchema, config: &SiteConfig) -> Self {
        Self {
            schema,
            values: HashMap::new(),
            errors: HashMap::new(),
            phase: SubmitPhase::Idle,
            submit_disabled: false,
            notice_visible: false,
            notice_seq: 0,
            alert: None,
            notice_ms: config.notice_ms,
            contact_email: config.contact_email.clone(),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    #[must_use]
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    #[must_use]
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn submit_disabled(&self) -> bool {
        self.submit_disabled
    }

    #[must_use]
    pub fn notice_visible(&self) -> bool {
        self.notice_visible
    }

    #[must_use]
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Apply one event and return the effects the caller must run, in order.
    pub fn handle(&mut self, event: FormEvent) -> Vec<FormEffect> {
        match event {
            FormEvent::Input { field, value } => {
                self.on_input(field, value);
                Vec::new()
            }
            FormEvent::Blur { field } => {
                self.validate_one(&field);
                Vec::new()
            }
            FormEvent::Submit => self.on_submit(),
            FormEvent::RelaySucceeded => self.on_success(),
            FormEvent::RelayFailed { reason } => self.on_failure(&reason),
            FormEvent::NoticeExpired { seq } => {
                if seq == self.notice_seq && self.notice_visible {
                    self.notice_visible = false;
                    if self.phase == SubmitPhase::Succeeded {
                        self.phase = SubmitPhase::Idle;
                    }
                }
                Vec::new()
            }
            FormEvent::AlertDismissed => {
                if self.phase == SubmitPhase::Failed {
                    self.phase = SubmitPhase::Idle;
                    self.alert = None;
                }
                Vec::new()
            }
        }
    }

    fn on_input(&mut self, field: String, value: String) {
        let known = self.schema.field(&field).is_some() || self.schema.is_honeypot(&field);
        if !known {
            return;
        }
        let revalidate = self.errors.contains_key(&field);
        self.values.insert(field.clone(), value);
        if revalidate {
            self.validate_one(&field);
        }
    }

    /// Validate a single field and record or clear its error. Returns whether it passed.
    fn validate_one(&mut self, field: &str) -> bool {
        let Some(spec) = self.schema.field(field) else {
            return true;
        };
        match validate_field(spec, self.value(field)) {
            Ok(()) => {
                self.errors.remove(field);
                true
            }
            Err(e) => {
                self.errors.insert(field.to_owned(), e.to_string());
                false
            }
        }
    }

    fn on_submit(&mut self) -> Vec<FormEffect> {
        if self.submit_disabled {
            log::debug!("submit ignored: request already in flight");
            return Vec::new();
        }

        let names = self
            .schema
            .fields()
            .iter()
            .map(|f| f.name.clone())
            .collect::<Vec<_>>();
        let mut first_invalid = None;
        for name in names {
            if !self.validate_one(&name) && first_invalid.is_none() {
                first_invalid = Some(name);
            }
        }
        if let Some(field) = first_invalid {
            return vec![FormEffect::FocusField(field)];
        }

        self.phase = SubmitPhase::Submitting;
        self.submit_disabled = true;
        self.alert = None;
        if self.notice_visible {
            self.notice_visible = false;
            self.notice_seq += 1;
        }
        vec![FormEffect::Send(self.payload())]
    }

    fn on_success(&mut self) -> Vec<FormEffect> {
        if self.phase != SubmitPhase::Submitting {
            log::debug!("ignoring relay success outside of submission");
            return Vec::new();
        }
        self.values.clear();
        self.errors.clear();
        self.submit_disabled = false;
        self.phase = SubmitPhase::Succeeded;
        self.notice_visible = true;
        self.notice_seq += 1;
        vec![FormEffect::ScheduleNoticeHide { seq: self.notice_seq, after_ms: self.notice_ms }]
    }

    fn on_failure(&mut self, reason: &str) -> Vec<FormEffect> {
        if self.phase != SubmitPhase::Submitting {
            log::debug!("ignoring relay failure outside of submission: {reason}");
            return Vec::new();
        }
        log::warn!("contact form submission failed: {reason}");
        self.submit_disabled = false;
        self.phase = SubmitPhase::Failed;
        let message = failure_message(&self.contact_email);
        self.alert = Some(message.clone());
        vec![FormEffect::ShowAlert(message)]
    }

    /// Every field value in schema order, honeypot last.
    fn payload(&self) -> RelayPayload {
        let mut payload = RelayPayload::new();
        for spec in self.schema.fields() {
            payload.push(&spec.name, self.value(&spec.name).trim());
        }
        if let Some(honeypot) = self.schema.honeypot() {
            payload.push(honeypot, self.value(honeypot));
        }
        payload
    }
}

/// Alert text shown when the relay could not take the message.
#[must_use]
pub fn failure_message(contact_email: &str) -> String {
    format!("Sorry, your message could not be sent. Please try again or email us directly at {contact_email}.")
}

/// Post `payload` through `relay` and translate the outcome into the event
/// that resolves the submission.
pub async fn deliver<R: Relay + ?Sized>(relay: &R, payload: &RelayPayload) -> FormEvent {
    match relay.send(payload).await {
        Ok(()) => FormEvent::RelaySucceeded,
        Err(e) => FormEvent::RelayFailed { reason: e.to_string() },
    }
}
