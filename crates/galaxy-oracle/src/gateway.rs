//! The oracle gateway.

use std::sync::Arc;

use tracing::{debug, instrument};

use galaxy_core::error::DomainError;
use galaxy_core::oracle::{OracleClient, OraclePrompt};
use galaxy_core::world_state::WorldState;

use crate::directive::SYSTEM_DIRECTIVE;
use crate::prompt::{render_prompt, resolve_player_input};
use crate::turn_result::{OracleOutcome, normalize};

/// Formats turns for the oracle and normalizes what comes back.
#[derive(Clone)]
pub struct OracleGateway {
    client: Arc<dyn OracleClient>,
    directive: String,
}

impl std::fmt::Debug for OracleGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleGateway").finish_non_exhaustive()
    }
}

impl OracleGateway {
    /// Creates a gateway that sends [`SYSTEM_DIRECTIVE`].
    #[must_use]
    pub fn new(client: Arc<dyn OracleClient>) -> Self {
        Self::with_directive(client, SYSTEM_DIRECTIVE)
    }

    #[must_use]
    pub fn with_directive(client: Arc<dyn OracleClient>, directive: impl Into<String>) -> Self {
        Self {
            client,
            directive: directive.into(),
        }
    }

    /// Builds the prompt for a turn without sending it.
    #[must_use]
    pub fn prompt_for(
        &self,
        world_state: &WorldState,
        content: &str,
        is_new_session: bool,
    ) -> OraclePrompt {
        let player_input = resolve_player_input(content, is_new_session);
        render_prompt(&self.directive, world_state, player_input)
    }

    /// Runs one oracle call.
    ///
    /// Unreadable output comes back as [`OracleOutcome::ParseFailure`], never
    /// as an error.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Oracle` when the transport itself fails.
    #[instrument(skip(self, world_state, content))]
    pub async fn converse(
        &self,
        world_state: &WorldState,
        content: &str,
        is_new_session: bool,
    ) -> Result<OracleOutcome, DomainError> {
        let prompt = self.prompt_for(world_state, content, is_new_session);
        let raw = self.client.complete(&prompt).await?;
        debug!(bytes = raw.len(), "oracle completion received");
        Ok(normalize(&raw))
    }
}
