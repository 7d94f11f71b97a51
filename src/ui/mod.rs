//! UI shell reduced to its state machines.
//!
//! Rendering lives in `wasm::dom`; everything here is platform independent so
//! the transitions can be driven from tests.

pub mod balance;
pub mod button;
pub mod modal;
pub mod sort;
pub mod theme;

pub use balance::{parse_native_balance, BalanceSource};
pub use button::{ButtonCallbacks, ButtonController, ButtonOptions, ButtonPhase, ConnectEvent};
pub use modal::{ModalCallbacks, ModalController, ModalOptions, ModalPhase, ModalSelection};
pub use sort::sort_wallets;
pub use theme::Theme;

use crate::core::types::SupportedWallet;
use crate::kit::StellarWalletsKit;

/// Probe every wallet and order the result for display
pub async fn load_sorted_wallets(kit: &StellarWalletsKit) -> Vec<SupportedWallet> {
    let wallets = kit.get_supported_wallets().await;
    let last_used = kit.last_used_wallet_id();
    sort_wallets(wallets, last_used.as_deref())
}

/// `GABCDE...WXYZ` style label for the connected button
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 12 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_long_addresses_only() {
        assert_eq!(
            shorten_address("GBZXN7PIRZGNMHGA7MUUUF4GWPY5AYPV6LY4UV2GL6VJGIQRXFDNMADI"),
            "GBZXN7...MADI"
        );
        assert_eq!(shorten_address("GSHORT"), "GSHORT");
    }
}
