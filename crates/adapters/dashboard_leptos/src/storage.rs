//! `TokenStore` backed by `localStorage`.

use metricboard_app::ports::TokenStore;
use metricboard_domain::error::StorageError;
use metricboard_domain::session::{SessionToken, TOKEN_STORAGE_KEY};

/// Keeps the session token under [`TOKEN_STORAGE_KEY`] so it survives reloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokenStore;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Result<Option<SessionToken>, StorageError> {
        let item = local_storage()?
            .get_item(TOKEN_STORAGE_KEY)
            .map_err(|_| StorageError::Unavailable)?;
        Ok(item.as_deref().and_then(SessionToken::parse))
    }

    fn save(&self, token: &SessionToken) -> Result<(), StorageError> {
        local_storage()?
            .set_item(TOKEN_STORAGE_KEY, token.as_str())
            .map_err(|_| StorageError::Unavailable)
    }

    fn clear(&self) -> Result<(), StorageError> {
        local_storage()?
            .remove_item(TOKEN_STORAGE_KEY)
            .map_err(|_| StorageError::Unavailable)
    }
}
