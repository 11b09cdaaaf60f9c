//! Oracle transport abstraction.
//!
//! The oracle is an external text-completion service treated as a black box:
//! a rendered prompt goes in, raw text comes out.

use async_trait::async_trait;

use crate::error::DomainError;

/// A rendered two-message prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OraclePrompt {
    /// Fixed system directive.
    pub system: String,
    /// World-state snapshot plus player input.
    pub user: String,
}

/// Transport to a narrative-generation service.
#[async_trait]
pub trait OracleClient: Send + Sync {
    /// Send the prompt and return the completion's raw text.
    ///
    /// Only transport failures are errors; whatever text the service returns
    /// is passed back verbatim for the caller to interpret.
    async fn complete(&self, prompt: &OraclePrompt) -> Result<String, DomainError>;
}
