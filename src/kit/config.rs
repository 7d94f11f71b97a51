//! Kit configuration - built by the host application

use crate::core::module::ModuleRef;
use crate::core::timeout::PROBE_TIMEOUT;
use crate::core::types::Network;
use crate::storage::PreferenceStore;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone)]
pub struct KitConfig {
    pub network: Network,
    pub modules: Vec<ModuleRef>,
    pub selected_wallet_id: Option<String>,
    /// Defaults to an in-memory store
    pub preferences: Option<Rc<dyn PreferenceStore>>,
    pub probe_timeout: Duration,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            modules: Vec::new(),
            selected_wallet_id: None,
            preferences: None,
            probe_timeout: PROBE_TIMEOUT,
        }
    }
}

impl KitConfig {
    pub fn new(network: Network) -> Self { Self { network, ..Default::default() } }
    pub fn with_modules(mut self, modules: impl IntoIterator<Item = ModuleRef>) -> Self { self.modules.extend(modules); self }
    pub fn with_module(mut self, module: ModuleRef) -> Self { self.modules.push(module); self }
    pub fn with_selected_wallet(mut self, id: impl Into<String>) -> Self { self.selected_wallet_id = Some(id.into()); self }
    pub fn with_preferences(mut self, store: Rc<dyn PreferenceStore>) -> Self { self.preferences = Some(store); self }
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self { self.probe_timeout = timeout; self }
}
