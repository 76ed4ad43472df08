//! Token store port: client-side persistence of the session token.

use std::rc::Rc;
use std::sync::Arc;

use metricboard_domain::error::StorageError;
use metricboard_domain::session::SessionToken;

/// Persists a single session token under a fixed key.
///
/// The stored token is the only source of truth for "is the user signed in";
/// nothing else about the session is kept between re-initializations.
pub trait TokenStore {
    /// Read the stored token, `None` when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be read.
    fn load(&self) -> Result<Option<SessionToken>, StorageError>;

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be written.
    fn save(&self, token: &SessionToken) -> Result<(), StorageError>;

    /// Remove the stored token. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

impl<T: TokenStore> TokenStore for Rc<T> {
    fn load(&self) -> Result<Option<SessionToken>, StorageError> {
        (**self).load()
    }

    fn save(&self, token: &SessionToken) -> Result<(), StorageError> {
        (**self).save(token)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

impl<T: TokenStore> TokenStore for Arc<T> {
    fn load(&self) -> Result<Option<SessionToken>, StorageError> {
        (**self).load()
    }

    fn save(&self, token: &SessionToken) -> Result<(), StorageError> {
        (**self).save(token)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}
