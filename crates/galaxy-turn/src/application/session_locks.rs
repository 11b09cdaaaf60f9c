//! Per-session turn serialization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<String, Arc<AsyncMutex<()>>>;

/// One async mutex per session id, created on demand and dropped when no
/// turn holds or awaits it.
///
/// Waiters are queued FIFO, so turns for a session apply in the order they
/// arrived. Different sessions never contend.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: Arc<Mutex<LockMap>>,
}

/// Exclusive right to run a turn for one session. Released on drop.
#[derive(Debug)]
pub struct SessionTurnGuard {
    // Declared before `lease` so the mutex is released before the entry is
    // checked for removal.
    _guard: OwnedMutexGuard<()>,
    lease: LockLease,
}

/// A claim on a session's map entry, held from before the wait starts.
///
/// Whichever claim drops last removes the entry, including a waiter whose
/// turn is cancelled before it ever gets the lock.
#[derive(Debug)]
struct LockLease {
    session_id: String,
    lock: Arc<AsyncMutex<()>>,
    locks: Arc<Mutex<LockMap>>,
}

impl Drop for LockLease {
    fn drop(&mut self) {
        // Every other clone belongs to a live lease or to the guard or wait
        // of one, and leases only start under the map lock. So the map's
        // copy plus this one means nobody else wants the entry.
        let mut locks = lock_map(&self.locks);
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.session_id);
        }
    }
}

fn lock_map(locks: &Mutex<LockMap>) -> MutexGuard<'_, LockMap> {
    // The map holds no invariants a panicking holder could break.
    locks.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other turn for `session_id` is running.
    pub async fn acquire(&self, session_id: &str) -> SessionTurnGuard {
        let lock = lock_map(&self.locks)
            .entry(session_id.to_owned())
            .or_default()
            .clone();
        let lease = LockLease {
            session_id: session_id.to_owned(),
            lock,
            locks: Arc::clone(&self.locks),
        };

        let guard = Arc::clone(&lease.lock).lock_owned().await;

        SessionTurnGuard {
            _guard: guard,
            lease,
        }
    }

    /// Number of sessions with a turn running or waiting.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        lock_map(&self.locks).len()
    }
}

impl SessionTurnGuard {
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.lease.session_id
    }
}
