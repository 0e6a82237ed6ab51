//! Test helpers shared by the client and demo test suites.
//!
//! [`ScriptedInvoker`] stands in for a deployed render function: it replays
//! queued reply bodies in order and records every payload it receives.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use remotion_core::config::LambdaConfig;

use crate::error::LambdaError;
use crate::invoker::LambdaInvoker;

/// Invoker that replays canned reply bodies and records every call.
///
/// Once the queue is exhausted every further call gets an empty body.
#[derive(Default)]
pub struct ScriptedInvoker {
    replies: Mutex<VecDeque<Result<Vec<u8>, LambdaError>>>,
    calls: Mutex<Vec<(String, serde_json::Value)>>,
}

impl ScriptedInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON reply body.
    ///
    /// # Panics
    ///
    /// Panics if `body` cannot be serialized (never for a `Value`).
    pub fn reply(self, body: serde_json::Value) -> Self {
        let bytes = serde_json::to_vec(&body).expect("Value is always serialisable");
        self.reply_raw(bytes)
    }

    /// Queue a raw reply body.
    pub fn reply_raw(self, body: Vec<u8>) -> Self {
        self.push(Ok(body));
        self
    }

    /// Queue a failed invocation.
    pub fn fail(self, error: LambdaError) -> Self {
        self.push(Err(error));
        self
    }

    /// `(function_name, payload)` of every invocation so far.
    pub fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn push(&self, reply: Result<Vec<u8>, LambdaError>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }
}

#[async_trait]
impl LambdaInvoker for ScriptedInvoker {
    async fn invoke(&self, function_name: &str, payload: Vec<u8>) -> Result<Vec<u8>, LambdaError> {
        let payload = serde_json::from_slice(&payload)?;
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((function_name.to_string(), payload));
        }

        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Configuration with the four required variables set and no version override.
pub fn test_config() -> LambdaConfig {
    LambdaConfig {
        region: "us-east-1".to_string(),
        bucket: Some("remotionlambda-test".to_string()),
        function_name: "remotion-render-test".to_string(),
        serve_url: "https://remotionlambda-test.s3.amazonaws.com/sites/demo/index.html"
            .to_string(),
        version: None,
    }
}
