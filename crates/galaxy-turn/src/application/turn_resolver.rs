//! The turn resolver.
//!
//! One turn runs `ResolveSession → Invoke → Validate → Merge → Respond` while
//! holding its session's lock, so a concurrent turn for the same session
//! always starts from the world state this one persisted.

use std::sync::{Arc, Mutex};

use tracing::{error, info, instrument, warn};

use galaxy_core::command::Command;
use galaxy_core::error::DomainError;
use galaxy_core::repository::{Session, SessionStore};
use galaxy_core::rng::DeterministicRng;
use galaxy_core::session_id::mint_session_id;
use galaxy_core::world_state::WorldState;
use galaxy_oracle::{OracleGateway, OracleOutcome};

use crate::application::session_locks::{SessionLocks, SessionTurnGuard};
use crate::domain::commands::PlayTurn;
use crate::domain::outcome::{TurnOutcome, fallback_turn_result};
use crate::domain::phase::TurnPhase;

/// Attempts at minting an unused session id before giving up.
pub const MAX_MINT_ATTEMPTS: usize = 8;

/// A session resolved for the current turn, with its lock held.
struct ResolvedSession {
    session: Session,
    created: bool,
    _guard: SessionTurnGuard,
}

/// Orchestrates turns against a session store and an oracle gateway.
pub struct TurnResolver {
    store: Arc<dyn SessionStore>,
    gateway: OracleGateway,
    rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    locks: SessionLocks,
}

impl std::fmt::Debug for TurnResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnResolver")
            .field("gateway", &self.gateway)
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

impl TurnResolver {
    /// Creates a resolver. `rng` mints identifiers for new sessions.
    #[must_use]
    pub fn new(
        store: Arc<dyn SessionStore>,
        gateway: OracleGateway,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    ) -> Self {
        Self {
            store,
            gateway,
            rng,
            locks: SessionLocks::new(),
        }
    }

    /// Number of sessions with a turn currently running or queued.
    #[must_use]
    pub fn in_flight_sessions(&self) -> usize {
        self.locks.in_flight()
    }

    /// Plays one turn.
    ///
    /// Unreadable oracle output never fails the turn: the fallback narrative
    /// is returned and the world state is persisted unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Oracle` if the oracle transport fails, and
    /// `DomainError::Infrastructure` if the store fails, no unused session id
    /// could be minted, or the session disappeared before its world state
    /// could be written.
    #[instrument(
        skip(self, command),
        fields(command = command.command_type(), correlation_id = %command.correlation_id())
    )]
    pub async fn play_turn(&self, command: &PlayTurn) -> Result<TurnOutcome, DomainError> {
        let resolved = self.resolve_session(command.requested_session_id()).await?;
        let session = &resolved.session;
        let session_id = session.session_id.as_str();
        let prior = &session.world_state;
        info!(
            phase = %TurnPhase::ResolveSession,
            session_id,
            created = resolved.created,
            "session resolved"
        );

        let is_new_session = resolved.created || prior.is_awaiting_start();
        info!(phase = %TurnPhase::Invoke, session_id, is_new_session, "invoking oracle");
        let outcome = self
            .gateway
            .converse(prior, &command.content, is_new_session)
            .await?;

        let (result, fell_back) = match outcome {
            OracleOutcome::Parsed(result) => (result, false),
            OracleOutcome::ParseFailure(failure) => {
                warn!(
                    phase = %TurnPhase::Validate,
                    session_id,
                    reason = %failure.reason,
                    raw = %failure.raw,
                    "oracle output unreadable, using fallback"
                );
                (fallback_turn_result(prior), true)
            }
        };

        let next_world_state = result.world_state.unwrap_or_else(|| prior.clone());
        let stored = self.merge(session_id, next_world_state).await?;
        info!(phase = %TurnPhase::Merge, session_id, "world state persisted");

        info!(
            phase = %TurnPhase::Respond,
            session_id,
            choices = result.choices.len(),
            is_game_over = result.is_game_over,
            "turn resolved"
        );
        Ok(TurnOutcome {
            session_id: stored.session_id,
            narrative: result.narrative,
            choices: result.choices,
            is_game_over: result.is_game_over,
            player_update: result.player_update,
            world_state: stored.world_state,
            session_created: resolved.created,
            fell_back,
        })
    }

    async fn resolve_session(
        &self,
        requested: Option<&str>,
    ) -> Result<ResolvedSession, DomainError> {
        match requested {
            Some(session_id) => self.resolve_requested(session_id).await,
            None => self.create_minted().await,
        }
    }

    /// Resumes `session_id`, or adopts it for a new session if unknown.
    async fn resolve_requested(&self, session_id: &str) -> Result<ResolvedSession, DomainError> {
        let guard = self.locks.acquire(session_id).await;

        if let Some(session) = self.store.get(session_id).await? {
            return Ok(ResolvedSession {
                session,
                created: false,
                _guard: guard,
            });
        }

        match self.store.create(session_id, WorldState::seed()).await {
            Ok(session) => Ok(ResolvedSession {
                session,
                created: true,
                _guard: guard,
            }),
            // Another process sharing the store won the race.
            Err(DomainError::DuplicateSession(_)) => {
                let session = self.store.get(session_id).await?.ok_or_else(|| {
                    DomainError::Infrastructure(format!(
                        "session {session_id} reported as duplicate but cannot be read"
                    ))
                })?;
                Ok(ResolvedSession {
                    session,
                    created: false,
                    _guard: guard,
                })
            }
            Err(err) => Err(err),
        }
    }

    async fn create_minted(&self) -> Result<ResolvedSession, DomainError> {
        for _ in 0..MAX_MINT_ATTEMPTS {
            let session_id = self.mint()?;
            let guard = self.locks.acquire(&session_id).await;

            if self.store.get(&session_id).await?.is_some() {
                warn!(session_id = %session_id, "minted session id already in use");
                continue;
            }
            match self.store.create(&session_id, WorldState::seed()).await {
                Ok(session) => {
                    return Ok(ResolvedSession {
                        session,
                        created: true,
                        _guard: guard,
                    });
                }
                Err(DomainError::DuplicateSession(_)) => {
                    warn!(session_id = %session_id, "minted session id already in use");
                }
                Err(err) => return Err(err),
            }
        }

        Err(DomainError::Infrastructure(format!(
            "no unused session id after {MAX_MINT_ATTEMPTS} attempts"
        )))
    }

    fn mint(&self) -> Result<String, DomainError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| DomainError::Infrastructure("rng lock poisoned".into()))?;
        Ok(mint_session_id(&mut *rng))
    }

    /// Writes the world state. The session was resolved under the lock this
    /// turn still holds, so its absence means storage is broken.
    async fn merge(
        &self,
        session_id: &str,
        world_state: WorldState,
    ) -> Result<Session, DomainError> {
        match self.store.replace_world_state(session_id, world_state).await {
            Err(DomainError::SessionNotFound(_)) => {
                error!(
                    phase = %TurnPhase::Merge,
                    session_id,
                    "session vanished between resolve and merge"
                );
                Err(DomainError::Infrastructure(format!(
                    "session {session_id} vanished between resolve and merge"
                )))
            }
            other => other,
        }
    }
}
