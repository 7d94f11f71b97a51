//! Preference store: remembers the last selected wallet id.
//!
//! Backends:
//! - `MemoryPreferences`: ephemeral, shared between clones
//! - `FilePreferences` (native): JSON file under `$WALLETKIT_HOME`
//! - `LocalStoragePreferences` (wasm): `window.localStorage`

use crate::core::error::KitResult;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[cfg(feature = "native")]
mod file;
#[cfg(feature = "native")]
pub use file::FilePreferences;

/// Key under which the last selected wallet id is stored
pub const SELECTED_WALLET_KEY: &str = "@StellarWalletsKit/selectedWalletId";

/// Minimal key-value persistence interface
pub trait PreferenceStore {
    fn get(&self, key: &str) -> KitResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> KitResult<()>;
    fn remove(&self, key: &str) -> KitResult<()>;
}

/// Typed access to the one preference the kit keeps
#[derive(Clone)]
pub struct Preferences {
    store: Rc<dyn PreferenceStore>,
}

impl Preferences {
    pub fn new(store: Rc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub fn memory() -> Self {
        Self::new(Rc::new(MemoryPreferences::new()))
    }

    pub fn last_wallet_id(&self) -> KitResult<Option<String>> {
        self.store.get(SELECTED_WALLET_KEY)
    }

    pub fn remember_wallet(&self, id: &str) -> KitResult<()> {
        self.store.set(SELECTED_WALLET_KEY, id)
    }

    pub fn forget_wallet(&self) -> KitResult<()> {
        self.store.remove(SELECTED_WALLET_KEY)
    }
}

// =============================================================================
// MEMORY BACKEND
// =============================================================================

#[derive(Clone, Default)]
pub struct MemoryPreferences {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> KitResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KitResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> KitResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clones_share_entries() {
        let store = MemoryPreferences::new();
        let prefs = Preferences::new(Rc::new(store.clone()));
        assert_eq!(prefs.last_wallet_id().unwrap(), None);

        prefs.remember_wallet("albedo").unwrap();
        assert_eq!(store.get(SELECTED_WALLET_KEY).unwrap().as_deref(), Some("albedo"));

        prefs.forget_wallet().unwrap();
        assert_eq!(prefs.last_wallet_id().unwrap(), None);
    }
}
