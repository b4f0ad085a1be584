//! The single process-wide record of who is logged in.
//!
//! The session is the last successful login/signup response cached verbatim:
//! there is no token, no expiry and no refresh. If the backend stops
//! recognizing the user, the next failing request is the first sign of it.

use api_types::{UserId, user::User};

use crate::{error::StoreError, storage::Storage};

/// Storage key holding the serialized [`User`].
pub const SESSION_KEY: &str = "pf_user";

pub struct SessionStore {
    storage: Box<dyn Storage>,
    user: Option<User>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Restores the persisted user, if any.
    ///
    /// Never fails: an unreadable store starts unauthenticated, and a record
    /// that does not decode is removed before starting unauthenticated.
    pub fn restore(storage: impl Storage + 'static) -> Self {
        let user = match storage.read(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    tracing::info!(user_id = user.id, "restored session");
                    Some(user)
                }
                Err(err) => {
                    tracing::warn!("discarding corrupt session record: {err}");
                    if let Err(err) = storage.remove(SESSION_KEY) {
                        tracing::warn!("failed to remove corrupt session record: {err}");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("failed to read session record: {err}");
                None
            }
        };

        Self {
            storage: Box::new(storage),
            user,
        }
    }

    pub fn get(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|user| user.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Replaces the session user and mirrors it into durable storage.
    ///
    /// The in-memory user is replaced even when persisting fails.
    pub fn set(&mut self, user: Option<User>) -> Result<(), StoreError> {
        let persisted = match &user {
            Some(user) => serde_json::to_string(user)
                .map_err(StoreError::from)
                .and_then(|raw| self.storage.write(SESSION_KEY, &raw)),
            None => self.storage.remove(SESSION_KEY),
        };
        self.user = user;
        persisted
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.set(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn user(id: UserId) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            created_at: "2024-01-01T10:00:00".to_string(),
        }
    }

    #[test]
    fn set_then_restore_round_trips() {
        let storage = MemoryStorage::new();
        let mut session = SessionStore::restore(storage.clone());
        assert!(session.get().is_none());

        session.set(Some(user(1))).unwrap();
        session.set(Some(user(2))).unwrap();

        let restored = SessionStore::restore(storage);
        assert_eq!(restored.get(), Some(&user(2)));
        assert_eq!(restored.user_id(), Some(2));
    }

    #[test]
    fn clearing_removes_the_record() {
        let storage = MemoryStorage::new();
        let mut session = SessionStore::restore(storage.clone());
        session.set(Some(user(1))).unwrap();
        session.clear().unwrap();

        assert!(!session.is_authenticated());
        assert!(!storage.contains(SESSION_KEY));
        assert!(SessionStore::restore(storage).get().is_none());
    }

    #[test]
    fn corrupt_record_is_discarded() {
        let storage = MemoryStorage::new();
        storage.write(SESSION_KEY, "{not json").unwrap();

        let session = SessionStore::restore(storage.clone());
        assert!(session.get().is_none());
        assert!(!storage.contains(SESSION_KEY));
    }

    #[test]
    fn record_with_wrong_shape_is_discarded() {
        let storage = MemoryStorage::new();
        storage.write(SESSION_KEY, r#"{"id":"one","username":3}"#).unwrap();

        assert!(SessionStore::restore(storage.clone()).get().is_none());
        assert!(!storage.contains(SESSION_KEY));
    }
}
