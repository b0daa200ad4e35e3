//! In-memory connector for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::composition::CapabilityDescriptor;
use crate::connector::{ApiRequest, Connector};
use crate::error::{RemoteError, Result};

/// Canned connector outcome.
pub(crate) enum Reply {
    Json(Value),
    Fail { status: u16, message: &'static str },
}

/// Records every request and answers from a queue of replies.
///
/// An exhausted queue answers `Value::Null`, which suits endpoints with
/// empty bodies and makes decoding into a model fail loudly otherwise.
#[derive(Default)]
pub(crate) struct RecordingConnector {
    requests: Mutex<Vec<ApiRequest>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl RecordingConnector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn reply_json(self, value: Value) -> Self {
        self.reply(Reply::Json(value))
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for RecordingConnector {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Fail { status, message }) => Err(RemoteError::Api {
                status,
                message: message.to_string(),
            }
            .into()),
            None => Ok(Value::Null),
        }
    }
}

/// A minimal issue document as GitHub would return it.
pub(crate) fn issue_json(number: u64, title: &str, labels: &[&str]) -> Value {
    serde_json::json!({
        "id": 1000 + number,
        "number": number,
        "title": title,
        "body": null,
        "state": "open",
        "labels": labels
            .iter()
            .map(|name| serde_json::json!({"name": name}))
            .collect::<Vec<_>>(),
        "assignees": []
    })
}

/// Assert that a descriptor names exactly the methods a test exercised.
pub(crate) fn assert_descriptor_covers(descriptor: CapabilityDescriptor, exercised: &[&str]) {
    let mut declared = descriptor.methods.to_vec();
    declared.sort_unstable();
    let mut called = exercised.to_vec();
    called.sort_unstable();
    assert_eq!(declared, called, "descriptor '{}' is out of date", descriptor.name);
}
