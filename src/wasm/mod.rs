//! WASM module: the kit in the browser
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │     JsWalletsKit (JS: StellarWalletsKit)│
//! │  getSupportedWallets, setWallet, sign*  │
//! │  createButton, assignButtons, openModal │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │   dom: ButtonView / ModalView           │
//! │   driven by Button/ModalController      │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │   StellarWalletsKit (dispatcher)        │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │   modules: injected wallet adapters     │
//! │   bridge: Reflect calls + promises      │
//! └─────────────────────────────────────────┘
//! ```

mod bridge;
mod dom;
mod horizon;
mod kit;
pub mod modules;
mod storage;

pub use bridge::parse_js_error;
pub use horizon::HorizonBalance;
pub use kit::JsWalletsKit;
pub use storage::LocalStoragePreferences;

use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

pub(crate) use log;
