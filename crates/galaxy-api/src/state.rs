//! Shared application state.

use std::sync::{Arc, Mutex};

use galaxy_core::oracle::OracleClient;
use galaxy_core::repository::SessionStore;
use galaxy_core::rng::DeterministicRng;
use galaxy_oracle::OracleGateway;
use galaxy_turn::application::turn_resolver::TurnResolver;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Session store, also read directly by the session query endpoint.
    pub store: Arc<dyn SessionStore>,
    /// Turn orchestration over `store` and the oracle.
    pub resolver: Arc<TurnResolver>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        store: Arc<dyn SessionStore>,
        oracle: Arc<dyn OracleClient>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    ) -> Self {
        let resolver = TurnResolver::new(Arc::clone(&store), OracleGateway::new(oracle), rng);
        Self {
            store,
            resolver: Arc::new(resolver),
        }
    }
}
