use super::*;
use crate::net::testing::RecordingRelay;

#[test]
fn status_outcome_accepts_only_2xx() {
    assert!(status_outcome(200).is_ok());
    assert!(status_outcome(204).is_ok());
    assert!(status_outcome(299).is_ok());
    assert_eq!(status_outcome(199), Err(RelayError::Status(199)));
    assert_eq!(status_outcome(302), Err(RelayError::Status(302)));
    assert_eq!(status_outcome(422), Err(RelayError::Status(422)));
    assert_eq!(status_outcome(500), Err(RelayError::Status(500)));
}

#[test]
fn payload_keeps_insertion_order_and_replaces_duplicates() {
    let payload = RelayPayload::new()
        .field("name", "Ada")
        .field("email", "ada@example.com")
        .field("name", "Ada L.");
    assert_eq!(
        payload.fields(),
        &[("name".to_owned(), "Ada L.".to_owned()), ("email".to_owned(), "ada@example.com".to_owned())]
    );
    assert_eq!(payload.get("email"), Some("ada@example.com"));
    assert_eq!(payload.get("missing"), None);
}

#[test]
fn payload_serializes_as_flat_json_object() {
    let payload = RelayPayload::new().field("name", "Ada").field("message", "Hello there");
    assert_eq!(payload.to_json(), serde_json::json!({ "name": "Ada", "message": "Hello there" }));
}

#[test]
fn payload_wire_format_keeps_field_order() {
    let payload = RelayPayload::new()
        .field("name", "Ada")
        .field("email", "ada@example.com")
        .field("service", "Local SEO")
        .field("message", "Hello there")
        .field("_gotcha", "");
    assert_eq!(
        payload.to_json().to_string(),
        r#"{"name":"Ada","email":"ada@example.com","service":"Local SEO","message":"Hello there","_gotcha":""}"#
    );
}

#[test]
fn chat_message_payload_is_tagged() {
    let payload = RelayPayload::chat_message("what does it cost?");
    assert_eq!(payload.get("source"), Some(CHAT_SOURCE));
    assert_eq!(payload.get("_subject"), Some(CHAT_SUBJECT));
    assert_eq!(payload.get("message"), Some("what does it cost?"));
}

#[test]
fn relay_error_messages() {
    assert_eq!(RelayError::NotConfigured.to_string(), "relay endpoint not configured");
    assert_eq!(RelayError::Status(503).to_string(), "relay responded with status 503");
    assert_eq!(RelayError::Transport("offline".to_owned()).to_string(), "relay unreachable: offline");
}

#[test]
fn recording_relay_records_and_answers() {
    let relay = RecordingRelay::failing(RelayError::Status(500));
    let payload = RelayPayload::new().field("a", "b");
    let result = futures::executor::block_on(relay.send(&payload));
    assert_eq!(result, Err(RelayError::Status(500)));
    assert_eq!(relay.calls(), vec![payload]);
}
