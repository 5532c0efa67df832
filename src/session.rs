//! Per-session cart storage.
//!
//! Carts live in a [`SessionStore`] keyed by the client's session id, apart
//! from the relational database. [`CartStore`] serializes every
//! read-modify-write on a session behind an async mutex so that concurrent
//! requests from one client cannot lose updates or check out twice.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::{cart::Cart, error::AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Key-value storage for session carts.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session: SessionId) -> AppResult<Cart>;
    async fn save(&self, session: SessionId, cart: &Cart) -> AppResult<()>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    carts: DashMap<SessionId, Cart>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session: SessionId) -> AppResult<Cart> {
        Ok(self
            .carts
            .get(&session)
            .map(|cart| cart.value().clone())
            .unwrap_or_default())
    }

    async fn save(&self, session: SessionId, cart: &Cart) -> AppResult<()> {
        if cart.is_empty() {
            self.carts.remove(&session);
        } else {
            self.carts.insert(session, cart.clone());
        }
        Ok(())
    }
}

type LockMap = DashMap<SessionId, Arc<Mutex<()>>>;

pub struct CartStore {
    backend: Arc<dyn SessionStore>,
    locks: Arc<LockMap>,
}

impl CartStore {
    pub fn new(backend: Arc<dyn SessionStore>) -> Self {
        Self {
            backend,
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Take the session's lock and load its cart. Changes made through the
    /// returned guard are persisted only by [`SessionCart::commit`].
    pub async fn lock(&self, session: SessionId) -> AppResult<SessionCart> {
        let slot = LockSlot::acquire(self.locks.clone(), session);
        let guard = slot.mutex().lock_owned().await;
        let cart = self.backend.load(session).await?;
        Ok(SessionCart {
            session,
            cart,
            backend: self.backend.clone(),
            _guard: guard,
            _slot: slot,
        })
    }

    /// Read-only view of the session's cart, taken under the lock.
    pub async fn read(&self, session: SessionId) -> AppResult<Cart> {
        Ok(self.lock(session).await?.cart)
    }

    /// Sessions that currently have a holder or waiter on their lock.
    pub fn active_sessions(&self) -> usize {
        self.locks.len()
    }
}

/// A reference to a session's lock entry. The entry is removed from the map
/// when the last slot for that session goes away.
struct LockSlot {
    locks: Arc<LockMap>,
    session: SessionId,
    mutex: Option<Arc<Mutex<()>>>,
}

impl LockSlot {
    fn acquire(locks: Arc<LockMap>, session: SessionId) -> Self {
        let mutex = locks
            .entry(session)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        Self {
            locks,
            session,
            mutex: Some(mutex),
        }
    }

    fn mutex(&self) -> Arc<Mutex<()>> {
        self.mutex.clone().unwrap_or_default()
    }
}

impl Drop for LockSlot {
    fn drop(&mut self) {
        drop(self.mutex.take());
        // Only the map's own reference left: nobody holds or awaits the lock.
        self.locks
            .remove_if(&self.session, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

pub struct SessionCart {
    session: SessionId,
    pub cart: Cart,
    backend: Arc<dyn SessionStore>,
    // Field order matters: the guard is released before the slot is dropped.
    _guard: OwnedMutexGuard<()>,
    _slot: LockSlot,
}

impl SessionCart {
    pub fn session(&self) -> SessionId {
        self.session
    }

    pub async fn commit(self) -> AppResult<Cart> {
        self.backend.save(self.session, &self.cart).await?;
        Ok(self.cart)
    }
}
