//! Test oracles — scripted `OracleClient` implementations for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use galaxy_core::error::DomainError;
use galaxy_core::oracle::{OracleClient, OraclePrompt};

/// An oracle that replies with queued completions in order and records every
/// prompt it receives. Returns `DomainError::Oracle` once the queue is empty.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<OraclePrompt>>,
}

impl ScriptedOracle {
    /// Create an oracle that will answer with `replies`, one per call.
    #[must_use]
    pub fn new(replies: impl IntoIterator<Item = String>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all prompts received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn prompts(&self) -> Vec<OraclePrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl OracleClient for ScriptedOracle {
    async fn complete(&self, prompt: &OraclePrompt) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| DomainError::Oracle("scripted oracle has no replies left".into()))
    }
}

/// An oracle whose transport always fails. Useful for testing error-handling
/// paths.
#[derive(Debug)]
pub struct FailingOracle;

#[async_trait]
impl OracleClient for FailingOracle {
    async fn complete(&self, _prompt: &OraclePrompt) -> Result<String, DomainError> {
        Err(DomainError::Oracle("connection refused".into()))
    }
}
