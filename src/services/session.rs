// src/services/session.rs

use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// The authenticated-user record carried by each request.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub username: String,
}

/// In-process session map: random id -> signed-in user. The browser cookie
/// only ever holds the id.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<Uuid, SessionUser>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.insert(
            id,
            SessionUser {
                username: username.to_string(),
            },
        );
        id
    }

    pub fn get(&self, id: Uuid) -> Option<SessionUser> {
        self.inner.get(&id).map(|entry| entry.value().clone())
    }

    pub fn destroy(&self, id: Uuid) {
        self.inner.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_sessions_resolve_to_their_user() {
        let store = SessionStore::new();
        let id = store.create("admin");
        assert_eq!(store.get(id).unwrap().username, "admin");
    }

    #[test]
    fn destroyed_sessions_stop_resolving() {
        let store = SessionStore::new();
        let id = store.create("admin");
        store.destroy(id);
        assert!(store.get(id).is_none());
    }

    #[test]
    fn unknown_ids_do_not_resolve() {
        let store = SessionStore::new();
        assert!(store.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn destroy_is_unconditional() {
        let store = SessionStore::new();
        // destroying an id that never existed is fine
        store.destroy(Uuid::new_v4());
    }
}
