use std::sync::Arc;

use tracing::debug;

use crate::auth::errors::AuthError;
use crate::auth::{CredentialStore, validate_user};
use crate::storage::{KeyValueStore, USER_KEY};
use crate::types::UserName;

/// The logged-in user, persisted in the `pfand_user` slot so that it survives
/// restarts. An empty slot means nobody is logged in.
pub struct Session<K: KeyValueStore> {
    store: Arc<K>,
}

impl<K: KeyValueStore> Session<K> {
    pub fn new(store: Arc<K>) -> Self {
        Self { store }
    }

    pub fn current_user(&self) -> Result<Option<UserName>, AuthError> {
        Ok(self.store.get(USER_KEY)?.filter(|name| !name.trim().is_empty()))
    }

    /// Checks the pair against `credentials` and stores the lower-cased name.
    pub fn sign_in(&self, credentials: &dyn CredentialStore, name: &str, key: &str) -> Result<UserName, AuthError> {
        let name = name.trim();

        if name.is_empty() || key.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        if !validate_user(credentials, name, key) {
            debug!("Rejected login for [{name}]");
            return Err(AuthError::InvalidCredentials);
        }

        let user = name.to_lowercase();
        self.store.set(USER_KEY, &user)?;
        debug!("User [{user}] logged in");

        Ok(user)
    }

    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.store.remove(USER_KEY)?;

        Ok(())
    }

    /// The current user, or `NotLoggedIn`.
    pub fn require_user(&self) -> Result<UserName, AuthError> {
        self.current_user()?.ok_or(AuthError::NotLoggedIn)
    }
}
