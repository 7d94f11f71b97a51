//! StellarWalletsKit: selects one adapter and forwards every call to it
//!
//! ```text
//! host ─► kit.set_wallet(id) ─► KitState + Preferences
//! host ─► kit.sign_transaction(..) ─► active ModuleInterface ─► wallet
//! UI   ─► kit.get_supported_wallets() ─► probe all adapters concurrently
//! ```

mod config;

pub use config::KitConfig;

use crate::core::error::{KitError, KitResult};
use crate::core::module::ModuleRef;
use crate::core::timeout::probe;
use crate::core::types::{
    AddressResult, GetAddressParams, Network, NetworkInfo, SignOptions, SignedAuthEntry, SignedMessage,
    SignedTransaction, SupportedWallet,
};
use crate::state::KitState;
use crate::storage::Preferences;
use futures::channel::mpsc;
use futures::future::join_all;
use std::cell::Cell;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct StellarWalletsKit {
    modules: Vec<ModuleRef>,
    state: KitState,
    network: Cell<Network>,
    preferences: Preferences,
    probe_timeout: Duration,
}

impl StellarWalletsKit {
    pub fn new(config: KitConfig) -> KitResult<Self> {
        let mut seen = HashSet::new();
        for module in &config.modules {
            if !seen.insert(module.id().to_string()) {
                return Err(KitError::DuplicateWalletId(module.id().to_string()));
            }
        }
        if let Some(id) = &config.selected_wallet_id {
            if !seen.contains(id) {
                return Err(KitError::UnknownWalletId(id.clone()));
            }
        }

        let preferences = match config.preferences {
            Some(store) => Preferences::new(store),
            None => Preferences::memory(),
        };

        debug!(modules = config.modules.len(), network = %config.network, "kit created");
        Ok(Self {
            modules: config.modules,
            state: KitState::new(config.selected_wallet_id),
            network: Cell::new(config.network),
            preferences,
            probe_timeout: config.probe_timeout,
        })
    }

    pub fn modules(&self) -> &[ModuleRef] {
        &self.modules
    }

    pub fn network(&self) -> Network {
        self.network.get()
    }

    pub fn set_network(&self, network: Network) {
        self.network.set(network);
    }

    /// Last id written to the preference store; read errors count as none
    pub fn last_used_wallet_id(&self) -> Option<String> {
        self.preferences.last_wallet_id().unwrap_or_else(|e| {
            warn!(error = %e, "could not read wallet preference");
            None
        })
    }

    pub fn selected_wallet_id(&self) -> Option<String> {
        self.state.selected()
    }

    pub fn watch_selection(&self) -> mpsc::UnboundedReceiver<Option<String>> {
        self.state.watch()
    }

    pub fn selected_module(&self) -> KitResult<ModuleRef> {
        let id = self.state.selected().ok_or(KitError::NoWalletSelected)?;
        self.find(&id).ok_or(KitError::UnknownWalletId(id))
    }

    fn find(&self, id: &str) -> Option<ModuleRef> {
        self.modules.iter().find(|m| m.id() == id).cloned()
    }

    // =========================================================================
    // LISTING & SELECTION
    // =========================================================================

    /// One entry per configured module, in declared order. Never fails.
    pub async fn get_supported_wallets(&self) -> Vec<SupportedWallet> {
        let limit = self.probe_timeout;
        let probes = self.modules.iter().map(|module| async move {
            let (available, wrapper) = futures::join!(
                probe(limit, module.is_available()),
                probe(limit, module.is_platform_wrapper()),
            );
            if !available {
                debug!(wallet = module.id(), "wallet not available");
            }
            SupportedWallet::from_descriptor(module.descriptor(), available, wrapper)
        });
        join_all(probes).await
    }

    pub async fn list_supported_wallets(&self) -> Vec<SupportedWallet> {
        self.get_supported_wallets().await
    }

    pub fn set_wallet(&self, id: &str) -> KitResult<()> {
        if self.find(id).is_none() {
            return Err(KitError::UnknownWalletId(id.to_string()));
        }
        self.state.select(id);
        if let Err(e) = self.preferences.remember_wallet(id) {
            warn!(wallet = id, error = %e, "could not persist wallet selection");
        }
        info!(wallet = id, "wallet selected");
        Ok(())
    }

    // =========================================================================
    // DELEGATED CALLS
    // =========================================================================

    pub async fn get_address(&self, params: GetAddressParams) -> KitResult<AddressResult> {
        let module = self.selected_module()?;
        debug!(wallet = module.id(), "get_address");
        module.get_address(params).await
    }

    pub async fn sign_transaction(&self, xdr: &str, opts: SignOptions) -> KitResult<SignedTransaction> {
        let module = self.selected_module()?;
        debug!(wallet = module.id(), "sign_transaction");
        module.sign_transaction(xdr, opts).await
    }

    pub async fn sign_auth_entry(&self, entry: &str, opts: SignOptions) -> KitResult<SignedAuthEntry> {
        let module = self.selected_module()?;
        debug!(wallet = module.id(), "sign_auth_entry");
        module.sign_auth_entry(entry, opts).await
    }

    pub async fn sign_message(&self, message: &str, opts: SignOptions) -> KitResult<SignedMessage> {
        let module = self.selected_module()?;
        debug!(wallet = module.id(), "sign_message");
        module.sign_message(message, opts).await
    }

    pub async fn get_network(&self) -> KitResult<NetworkInfo> {
        let module = self.selected_module()?;
        debug!(wallet = module.id(), "get_network");
        module.get_network().await
    }

    /// Adapter teardown, then selection and preference are cleared even if
    /// the adapter failed; its error is returned afterwards.
    pub async fn disconnect(&self) -> KitResult<()> {
        let module = self.selected_module()?;
        let result = module.disconnect().await;
        self.reset_selection();
        info!(wallet = module.id(), "wallet disconnected");
        result
    }

    /// Put back a selection and preference captured earlier, e.g. after a
    /// connect attempt that did not go through
    pub fn restore_selection(&self, selected: Option<String>, last_used: Option<String>) {
        match &selected {
            Some(id) => self.state.select(id.as_str()),
            None => self.state.clear(),
        }
        let result = match &last_used {
            Some(id) => self.preferences.remember_wallet(id),
            None => self.preferences.forget_wallet(),
        };
        if let Err(e) = result {
            warn!(error = %e, "could not restore wallet preference");
        }
        debug!(selected = ?selected, "selection restored");
    }

    /// Drop the selection and stored preference without calling the adapter
    pub fn reset_selection(&self) {
        self.state.clear();
        if let Err(e) = self.preferences.forget_wallet() {
            warn!(error = %e, "could not clear wallet preference");
        }
    }
}
