use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::time::Instant;

use storefront_cart::CartLedger;
use storefront_core::{DomainError, DomainResult, SessionId};

/// Session-scoped cart storage (server variant: productId → quantity per session).
pub trait SessionCartStore: Send + Sync {
    /// Snapshot of the session's cart; an unknown session reads as empty.
    fn get(&self, session_id: SessionId) -> CartLedger;

    /// Apply `f` to the session's cart, creating it on first use.
    ///
    /// On error the stored cart is left as it was.
    fn update(
        &self,
        session_id: SessionId,
        f: &mut dyn FnMut(&mut CartLedger) -> DomainResult<u64>,
    ) -> DomainResult<u64>;

    /// Drop the session's cart (session end).
    fn clear(&self, session_id: SessionId);

    /// Session end by inactivity: clear every idle cart; returns how many.
    fn evict_idle(&self) -> usize;

    /// Number of carts currently held.
    fn session_count(&self) -> usize;
}

impl<S> SessionCartStore for Arc<S>
where
    S: SessionCartStore + ?Sized,
{
    fn get(&self, session_id: SessionId) -> CartLedger {
        (**self).get(session_id)
    }

    fn update(
        &self,
        session_id: SessionId,
        f: &mut dyn FnMut(&mut CartLedger) -> DomainResult<u64>,
    ) -> DomainResult<u64> {
        (**self).update(session_id, f)
    }

    fn clear(&self, session_id: SessionId) {
        (**self).clear(session_id)
    }

    fn evict_idle(&self) -> usize {
        (**self).evict_idle()
    }

    fn session_count(&self) -> usize {
        (**self).session_count()
    }
}

/// Idle time after which a session cart is dropped (PHP's default session GC lifetime).
pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(1440);

#[derive(Debug, Clone)]
struct SessionEntry {
    ledger: CartLedger,
    touched: Instant,
}

/// In-memory session carts for tests/dev and single-process deployments.
///
/// Entries untouched for longer than the idle timeout read as empty and are
/// removed by [`SessionCartStore::evict_idle`].
#[derive(Debug)]
pub struct InMemorySessionCartStore {
    inner: RwLock<HashMap<SessionId, SessionEntry>>,
    idle_timeout: Duration,
}

impl Default for InMemorySessionCartStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_SESSION_IDLE_TIMEOUT)
    }
}

impl InMemorySessionCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    fn is_idle(&self, entry: &SessionEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.touched) >= self.idle_timeout
    }

    fn clear_if_idle(&self, session_id: SessionId, now: Instant) -> bool {
        let Ok(mut map) = self.inner.write() else {
            return false;
        };
        let idle = map
            .get(&session_id)
            .is_some_and(|entry| self.is_idle(entry, now));
        if idle {
            map.remove(&session_id);
        }
        idle
    }
}

impl SessionCartStore for InMemorySessionCartStore {
    fn get(&self, session_id: SessionId) -> CartLedger {
        let now = Instant::now();
        let Ok(mut map) = self.inner.write() else {
            tracing::error!("session cart store lock poisoned");
            return CartLedger::empty(session_id);
        };
        match map.get_mut(&session_id) {
            Some(entry) if !self.is_idle(entry, now) => {
                entry.touched = now;
                entry.ledger.clone()
            }
            _ => CartLedger::empty(session_id),
        }
    }

    fn update(
        &self,
        session_id: SessionId,
        f: &mut dyn FnMut(&mut CartLedger) -> DomainResult<u64>,
    ) -> DomainResult<u64> {
        let now = Instant::now();
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("session cart store lock poisoned"))?;

        // Work on a copy so a failed update leaves the stored ledger untouched.
        let mut ledger = match map.get(&session_id) {
            Some(entry) if !self.is_idle(entry, now) => entry.ledger.clone(),
            _ => CartLedger::empty(session_id),
        };
        let total = f(&mut ledger)?;
        map.insert(
            session_id,
            SessionEntry {
                ledger,
                touched: now,
            },
        );
        Ok(total)
    }

    fn clear(&self, session_id: SessionId) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(&session_id);
        }
    }

    fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let idle: Vec<SessionId> = match self.inner.read() {
            Ok(map) => map
                .iter()
                .filter(|(_, entry)| self.is_idle(entry, now))
                .map(|(id, _)| *id)
                .collect(),
            Err(_) => return 0,
        };
        // Re-checked under the write lock: a cart touched since the scan stays.
        let evicted = idle
            .into_iter()
            .filter(|session_id| self.clear_if_idle(*session_id, now))
            .count();
        if evicted > 0 {
            tracing::debug!(evicted, "idle session carts evicted");
        }
        evicted
    }

    fn session_count(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }
}
