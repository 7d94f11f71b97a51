//! Listing order for the selection modal.
//!
//! Last-used wallet first, then available wallets, then declared order.
//! `sort_by_key` is stable, so ties keep configuration order.

use crate::core::types::SupportedWallet;

pub fn sort_wallets(mut wallets: Vec<SupportedWallet>, last_used: Option<&str>) -> Vec<SupportedWallet> {
    wallets.sort_by_key(|w| {
        let is_last_used = last_used.map(|id| id == w.id).unwrap_or(false);
        (!is_last_used, !w.is_available)
    });
    wallets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ModuleDescriptor, ModuleType};

    fn entry(id: &str, available: bool) -> SupportedWallet {
        SupportedWallet::from_descriptor(&ModuleDescriptor::new(id, id, ModuleType::HotWallet), available, false)
    }

    fn ids(wallets: &[SupportedWallet]) -> Vec<&str> {
        wallets.iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn available_before_unavailable_in_declared_order() {
        let sorted = sort_wallets(
            vec![entry("a", false), entry("b", true), entry("c", false), entry("d", true)],
            None,
        );
        assert_eq!(ids(&sorted), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn last_used_goes_first_even_when_unavailable() {
        let sorted = sort_wallets(vec![entry("a", true), entry("b", true), entry("c", false)], Some("c"));
        assert_eq!(ids(&sorted), vec!["c", "a", "b"]);
    }

    #[test]
    fn unknown_last_used_is_ignored() {
        let sorted = sort_wallets(vec![entry("a", false), entry("b", true)], Some("zzz"));
        assert_eq!(ids(&sorted), vec!["b", "a"]);
    }
}
