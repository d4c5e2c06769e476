//! Test utilities for Flashgate
//!
//! This module provides a stub provider that records requests and replies
//! with canned text or errors, plus assertion helpers.

use crate::error::{FlashgateError, Result};
use crate::providers::Provider;
use crate::request::ModelRequest;
use async_trait::async_trait;
use std::sync::Mutex;

type ErrorFactory = Box<dyn Fn() -> anyhow::Error + Send + Sync>;

enum Outcome {
    Reply(String),
    Fail(ErrorFactory),
}

/// Provider double that never touches the network
pub struct StubProvider {
    outcome: Outcome,
    requests: Mutex<Vec<ModelRequest>>,
}

impl StubProvider {
    /// Always replies with `text`
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Reply(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with a provider error carrying `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::failing_with(move || FlashgateError::Provider(reason.clone()).into())
    }

    /// Always fails with whatever `make_error` builds
    pub fn failing_with(make_error: impl Fn() -> anyhow::Error + Send + Sync + 'static) -> Self {
        Self {
            outcome: Outcome::Fail(Box::new(make_error)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().expect("stub lock poisoned").clone()
    }
}

#[async_trait]
impl Provider for StubProvider {
    async fn generate_content(&self, request: &ModelRequest) -> Result<String> {
        self.requests
            .lock()
            .expect("stub lock poisoned")
            .push(request.clone());
        match &self.outcome {
            Outcome::Reply(text) => Ok(text.clone()),
            Outcome::Fail(make_error) => Err(make_error()),
        }
    }

    fn model(&self) -> String {
        "stub-model".to_string()
    }
}

/// Assert that a result failed with `InvalidInput` containing `expected`
///
/// # Panics
///
/// Panics if the result is Ok, is another error kind, or the message differs
pub fn assert_invalid_input<T: std::fmt::Debug>(result: Result<T>, expected: &str) {
    let err = result.expect_err("expected an InvalidInput error");
    match err.downcast_ref::<FlashgateError>() {
        Some(FlashgateError::InvalidInput(reason)) => assert!(
            reason.contains(expected),
            "InvalidInput '{}' does not contain '{}'",
            reason,
            expected
        ),
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}
