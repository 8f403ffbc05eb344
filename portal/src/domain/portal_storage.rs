//! JSON encoding of portal entries over a [`KeyValueStore`].
//!
//! Three fixed entries back the portal: the session user, the user list and
//! the ticket list. Each is written whole on every change; there is no
//! transaction spanning more than one entry.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::application::Application;
use super::ports::{KeyValueStore, KeyValueStoreError};
use super::user::User;

/// Entry holding the signed-in user, absent when nobody is signed in.
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Entry holding every registered user.
pub const USERS_KEY: &str = "users";
/// Entry holding every filed ticket.
pub const APPLICATIONS_KEY: &str = "applications";

/// Failures while moving portal entries in or out of the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortalStorageError {
    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] KeyValueStoreError),
    /// A value could not be encoded as JSON.
    #[error("failed to encode entry {key}: {message}")]
    Encode { key: String, message: String },
    /// A stored value was not valid JSON for its entry.
    #[error("failed to decode entry {key}: {message}")]
    Decode { key: String, message: String },
}

impl PortalStorageError {
    /// Whether the failure happened while reading.
    pub fn is_read(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::Store(KeyValueStoreError::Read { .. })
        )
    }
}

/// Typed access to the portal's persisted entries.
pub struct PortalStorage<S> {
    store: Arc<S>,
}

impl<S> Clone for PortalStorage<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> PortalStorage<S>
where
    S: KeyValueStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Session user, if one was saved.
    pub fn load_session(&self) -> Result<Option<User>, PortalStorageError> {
        self.read(CURRENT_USER_KEY)
    }

    /// Save the session user, or remove the entry when `user` is `None`.
    pub fn save_session(&self, user: Option<&User>) -> Result<(), PortalStorageError> {
        match user {
            Some(user) => self.write(CURRENT_USER_KEY, user),
            None => {
                debug!(key = CURRENT_USER_KEY, "removing portal entry");
                self.store.remove(CURRENT_USER_KEY)?;
                Ok(())
            }
        }
    }

    /// Stored user list. `None` means the entry has never been written.
    pub fn load_users(&self) -> Result<Option<Vec<User>>, PortalStorageError> {
        self.read(USERS_KEY)
    }

    pub fn save_users(&self, users: &[User]) -> Result<(), PortalStorageError> {
        self.write(USERS_KEY, users)
    }

    /// Stored tickets, empty when the entry is absent.
    pub fn load_applications(&self) -> Result<Vec<Application>, PortalStorageError> {
        Ok(self.read(APPLICATIONS_KEY)?.unwrap_or_default())
    }

    pub fn save_applications(&self, applications: &[Application]) -> Result<(), PortalStorageError> {
        self.write(APPLICATIONS_KEY, applications)
    }

    fn read<T>(&self, key: &str) -> Result<Option<T>, PortalStorageError>
    where
        T: DeserializeOwned,
    {
        let Some(raw) = self.store.get(key)? else {
            debug!(key, "portal entry absent");
            return Ok(None);
        };
        let value = serde_json::from_str(&raw).map_err(|err| PortalStorageError::Decode {
            key: key.to_owned(),
            message: err.to_string(),
        })?;
        debug!(key, bytes = raw.len(), "loaded portal entry");
        Ok(Some(value))
    }

    fn write<T>(&self, key: &str, value: &T) -> Result<(), PortalStorageError>
    where
        T: Serialize + ?Sized,
    {
        let encoded = serde_json::to_string(value).map_err(|err| PortalStorageError::Encode {
            key: key.to_owned(),
            message: err.to_string(),
        })?;
        self.store.set(key, &encoded)?;
        debug!(key, bytes = encoded.len(), "saved portal entry");
        Ok(())
    }
}
