//! Built-in browser adapters
//!
//! | id | Wallet | Injected global |
//! |----|--------|-----------------|
//! | freighter | Freighter | `freighterApi` |
//! | xbull | xBull | `xBullSDK` |
//! | albedo | Albedo | `albedo` |
//! | rabet | Rabet | `rabet` |
//! | hana | Hana Wallet | `hana.stellar` (SEP-43) |
//! | lobstr | LOBSTR | `lobstrSignerExtensionApi` (SEP-43) |

mod albedo;
mod freighter;
mod rabet;
mod sep43;
mod xbull;

pub use albedo::AlbedoModule;
pub use freighter::FreighterModule;
pub use rabet::RabetModule;
pub use sep43::InjectedSep43Module;
pub use xbull::XBullModule;

use crate::core::catalog::{self, HANA_ID, LOBSTR_ID};
use crate::core::error::{KitError, KitResult};
use crate::core::module::{ModuleInterface, ModuleRef};
use crate::core::registry::{ModuleFilter, ModuleRegistry};
use crate::core::types::{ModuleDescriptor, ModuleType};
use std::rc::Rc;

pub(crate) fn builtin_descriptor(id: &str, name: &str) -> ModuleDescriptor {
    catalog::descriptor(id).unwrap_or_else(|| ModuleDescriptor::new(id, name, ModuleType::HotWallet))
}

/// Every built-in adapter, in catalog order
pub fn builtin_registry() -> ModuleRegistry {
    let modules: Vec<ModuleRef> = vec![
        Rc::new(FreighterModule::new()),
        Rc::new(XBullModule::new()),
        Rc::new(AlbedoModule::new()),
        Rc::new(RabetModule::new()),
        Rc::new(InjectedSep43Module::new(builtin_descriptor(HANA_ID, "Hana Wallet"), "hana.stellar")),
        Rc::new(InjectedSep43Module::new(builtin_descriptor(LOBSTR_ID, "LOBSTR"), "lobstrSignerExtensionApi")),
    ];
    ModuleRegistry::new(modules)
}

pub fn all_modules(filter: Option<ModuleFilter<'_>>) -> Vec<ModuleRef> {
    builtin_registry().all_modules(filter)
}

pub fn sep43_modules(filter: Option<ModuleFilter<'_>>) -> Vec<ModuleRef> {
    builtin_registry().sep43_modules(filter)
}

/// Injected global for adapters that talk to `window.<path>`
pub(crate) fn injected(wallet: &dyn ModuleInterface, path: &str) -> KitResult<wasm_bindgen::JsValue> {
    super::bridge::global_path(path).ok_or_else(|| KitError::NotAvailable(wallet.descriptor().name.clone()))
}
