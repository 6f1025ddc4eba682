//! Scripted service backends for tests and demos
//!
//! Each mock returns a fixed outcome, counts its invocations, and (for
//! generation) records the last prompt it received, so tests can assert
//! call counts and prompt contents without a live service.

use crate::client::{GenerationService, VisionService};
use async_trait::async_trait;
use listguard_core::ServiceError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Vision service returning a scripted outcome
pub struct ScriptedVisionService {
    outcome: Result<String, ServiceError>,
    calls: AtomicUsize,
}

impl ScriptedVisionService {
    /// Always succeed with the given model content
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            outcome: Ok(content.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with the given service error
    pub fn err(error: ServiceError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times the service was invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionService for ScriptedVisionService {
    async fn describe_image(
        &self,
        _image_ref: &str,
        _instruction: &str,
    ) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Generation service returning a scripted outcome
pub struct ScriptedGenerationService {
    outcome: Result<String, ServiceError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedGenerationService {
    /// Always succeed with the given generated text
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Always fail with the given service error
    pub fn err(error: ServiceError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// How many times the service was invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The last prompt passed to the service, if any
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().expect("prompt lock").clone()
    }
}

#[async_trait]
impl GenerationService for ScriptedGenerationService {
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().expect("prompt lock") = Some(prompt.to_string());
        self.outcome.clone()
    }
}
