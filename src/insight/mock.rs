//! Mock insight backend for tests.

use super::backend::{GenerationRequest, InsightBackend};
use crate::error::InsightError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted backend: returns a fixed response (or error) after an optional delay.
pub struct MockBackend {
    response: Result<String, fn() -> InsightError>,
    delay: Option<Duration>,
    call_count: AtomicU32,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl MockBackend {
    pub fn with_response(content: impl Into<String>) -> Self {
        Self {
            response: Ok(content.into()),
            delay: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(make_error: fn() -> InsightError) -> Self {
        Self {
            response: Err(make_error),
            ..Self::with_response("")
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl InsightBackend for MockBackend {
    fn id(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, InsightError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}
