//! Stellar Wallets Kit: one interface for many Stellar wallets.
//!
//! # Architecture
//!
//! ```text
//! Host application
//!   │
//!   ├── StellarWalletsKit (dispatcher)
//!   │     ├── modules: Vec<Rc<dyn ModuleInterface>>   (fixed at construction)
//!   │     ├── KitState: selected wallet id            (observable)
//!   │     └── Preferences: last selected wallet id    (memory / file / localStorage)
//!   │
//!   ├── UI shell (state machines)
//!   │     ├── ModalController   open → select | close
//!   │     └── ButtonController  disconnected → modal → connected → disconnected
//!   │
//!   └── wasm (browser only)
//!         ├── injected wallet adapters (Freighter, xBull, Albedo, ...)
//!         ├── DOM button + modal
//!         └── JS export `StellarWalletsKit`
//! ```
//!
//! # Capability contract
//!
//! | Method | Result |
//! |--------|--------|
//! | `is_available` | `bool` within 500ms |
//! | `get_address` | `{address}` |
//! | `sign_transaction` | `{signedTxXdr, signerAddress?}` |
//! | `sign_auth_entry` | `{signedAuthEntry, signerAddress?}` |
//! | `sign_message` | `{signedMessage, signerAddress?}` |
//! | `get_network` | `{network, networkPassphrase}` |
//! | `disconnect` | `()` |
//!
//! # Features
//!
//! - `native` - tokio timer, file preferences, tracing subscriber, `walletkit` CLI
//! - `wasm` - browser adapters, localStorage, DOM button/modal, JS bindings
//!
//! # Usage
//!
//! ```ignore
//! use stellar_wallets_kit::{KitConfig, Network, StellarWalletsKit, SignOptions};
//!
//! let kit = StellarWalletsKit::new(
//!     KitConfig::new(Network::Testnet).with_modules(my_modules),
//! )?;
//!
//! let wallets = kit.get_supported_wallets().await;
//! kit.set_wallet(&wallets[0].id)?;
//! let signed = kit.sign_transaction(xdr, SignOptions::for_network(Network::Testnet)).await?;
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod core;
pub mod kit;
pub mod state;
pub mod storage;
pub mod ui;

// =============================================================================
// Native-only modules
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports
// =============================================================================
pub use crate::core::error::{parse_error, ErrorShape, KitError, KitResult};
pub use crate::core::module::{ModuleInterface, ModuleRef};
pub use crate::core::registry::{ModuleFilter, ModuleRegistry};
pub use crate::core::types::{
    AddressResult, GetAddressParams, ModuleDescriptor, ModuleType, Network, NetworkInfo, SignOptions,
    SignedAuthEntry, SignedMessage, SignedTransaction, SupportedWallet,
};
pub use kit::{KitConfig, StellarWalletsKit};
pub use state::{KitState, Observable};
pub use storage::{MemoryPreferences, PreferenceStore, Preferences, SELECTED_WALLET_KEY};
pub use ui::{ButtonController, ModalController};

#[cfg(feature = "native")]
pub use storage::FilePreferences;

#[cfg(feature = "wasm")]
pub use wasm::{JsWalletsKit, LocalStoragePreferences};
