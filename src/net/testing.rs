//! Test doubles for the relay boundary.

use std::cell::RefCell;

use async_trait::async_trait;

use super::relay::{Relay, RelayError, RelayPayload};

/// Relay that records every payload and answers with a fixed outcome.
pub struct RecordingRelay {
    outcome: Result<(), RelayError>,
    calls: RefCell<Vec<RelayPayload>>,
}

impl RecordingRelay {
    pub fn ok() -> Self {
        Self { outcome: Ok(()), calls: RefCell::new(Vec::new()) }
    }

    pub fn failing(err: RelayError) -> Self {
        Self { outcome: Err(err), calls: RefCell::new(Vec::new()) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls(&self) -> Vec<RelayPayload> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Relay for RecordingRelay {
    async fn send(&self, payload: &RelayPayload) -> Result<(), RelayError> {
        self.calls.borrow_mut().push(payload.clone());
        self.outcome.clone()
    }
}
