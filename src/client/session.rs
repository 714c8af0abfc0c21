//! Client-side session storage.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::web::dto::UserProfile;

/// A signed-in session: both tokens plus the user they belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

/// Pluggable session persistence.
///
/// Implementations decide where the session lives (memory, keyring,
/// a file). The client reads and writes through this trait only.
pub trait SessionStore: Send + Sync {
    /// Get the current session, if any.
    fn get(&self) -> Option<Session>;
    /// Replace the current session.
    fn set(&self, session: Session);
    /// Discard the current session.
    fn clear(&self);
}

/// In-memory session store. The default for tests and short-lived tools.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    // A poisoned lock still holds a coherent Option; recover it instead
    // of propagating a panic into the host application.
    fn get(&self) -> Option<Session> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set(&self, session: Session) {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = Some(session);
    }

    fn clear(&self) {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session {
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            user: UserProfile {
                id: "u1".to_string(),
                name: "Ana".to_string(),
                email: "ana@mineria.com".to_string(),
                roles: vec!["admin".to_string()],
            },
        }
    }

    #[test]
    fn test_store_survives_poisoned_lock() {
        let store = std::sync::Arc::new(MemorySessionStore::new());
        store.set(sample_session());

        // Panic while holding the lock to poison it
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("boom");
        })
        .join();

        assert_eq!(store.get().unwrap().access_token, "at");
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert!(store.get().is_none());

        store.set(sample_session());
        assert_eq!(store.get().unwrap().access_token, "at");

        store.clear();
        assert!(store.get().is_none());
    }
}
