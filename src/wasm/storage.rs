//! LocalStoragePreferences: `window.localStorage` as the preference store

use crate::core::error::{KitError, KitResult};
use crate::storage::PreferenceStore;
use web_sys::Storage;

#[derive(Clone)]
pub struct LocalStoragePreferences {
    storage: Storage,
}

impl LocalStoragePreferences {
    pub fn open() -> KitResult<Self> {
        let window = web_sys::window().ok_or_else(|| KitError::Storage("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| KitError::Storage(format!("localStorage: {:?}", e)))?
            .ok_or_else(|| KitError::Storage("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn get(&self, key: &str) -> KitResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| KitError::Storage(format!("get {}: {:?}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> KitResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| KitError::Storage(format!("set {}: {:?}", key, e)))
    }

    fn remove(&self, key: &str) -> KitResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| KitError::Storage(format!("remove {}: {:?}", key, e)))
    }
}
