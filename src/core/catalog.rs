//! Built-in wallet catalog.
//!
//! Descriptors compile on every platform; the adapters that use them live in
//! `wasm::modules`.

use super::types::{ModuleDescriptor, ModuleType};
use serde::Serialize;

pub const FREIGHTER_ID: &str = "freighter";
pub const XBULL_ID: &str = "xbull";
pub const ALBEDO_ID: &str = "albedo";
pub const RABET_ID: &str = "rabet";
pub const HANA_ID: &str = "hana";
pub const LOBSTR_ID: &str = "lobstr";

/// Catalog row: descriptor plus whether the adapter stays within SEP-43
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub descriptor: ModuleDescriptor,
    pub sep43: bool,
}

struct Row {
    id: &'static str,
    name: &'static str,
    module_type: ModuleType,
    icon: &'static str,
    url: &'static str,
    sep43: bool,
}

const ROWS: &[Row] = &[
    Row {
        id: FREIGHTER_ID,
        name: "Freighter",
        module_type: ModuleType::HotWallet,
        icon: "https://stellar.creit.tech/wallet-icons/freighter.png",
        url: "https://freighter.app",
        sep43: true,
    },
    Row {
        id: XBULL_ID,
        name: "xBull",
        module_type: ModuleType::HotWallet,
        icon: "https://stellar.creit.tech/wallet-icons/xbull.png",
        url: "https://xbull.app",
        sep43: true,
    },
    Row {
        id: ALBEDO_ID,
        name: "Albedo",
        module_type: ModuleType::HotWallet,
        icon: "https://stellar.creit.tech/wallet-icons/albedo.png",
        url: "https://albedo.link",
        sep43: true,
    },
    Row {
        id: RABET_ID,
        name: "Rabet",
        module_type: ModuleType::HotWallet,
        icon: "https://stellar.creit.tech/wallet-icons/rabet.png",
        url: "https://rabet.io",
        sep43: true,
    },
    Row {
        id: HANA_ID,
        name: "Hana Wallet",
        module_type: ModuleType::HotWallet,
        icon: "https://stellar.creit.tech/wallet-icons/hana.png",
        url: "https://hanawallet.io",
        sep43: true,
    },
    Row {
        id: LOBSTR_ID,
        name: "LOBSTR",
        module_type: ModuleType::HotWallet,
        icon: "https://stellar.creit.tech/wallet-icons/lobstr.png",
        url: "https://lobstr.co",
        sep43: true,
    },
];

pub fn catalog() -> Vec<CatalogEntry> {
    ROWS.iter()
        .map(|r| CatalogEntry {
            descriptor: ModuleDescriptor::new(r.id, r.name, r.module_type)
                .with_icon(r.icon)
                .with_url(r.url),
            sep43: r.sep43,
        })
        .collect()
}

pub fn descriptor(id: &str) -> Option<ModuleDescriptor> {
    catalog().into_iter().find(|e| e.descriptor.id == id).map(|e| e.descriptor)
}

/// Whether a built-in adapter stays within SEP-43. Ids outside the catalog
/// are injected SEP-43 wallets.
pub fn is_sep43(id: &str) -> bool {
    ROWS.iter().find(|r| r.id == id).map(|r| r.sep43).unwrap_or(true)
}

pub fn ids() -> Vec<&'static str> {
    ROWS.iter().map(|r| r.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let ids = ids();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn descriptor_lookup() {
        let d = descriptor(FREIGHTER_ID).unwrap();
        assert_eq!(d.name, "Freighter");
        assert_eq!(d.url, "https://freighter.app");
        assert!(descriptor("missing").is_none());
    }

    #[test]
    fn sep43_flag_follows_the_catalog_row() {
        for entry in catalog() {
            assert_eq!(is_sep43(&entry.descriptor.id), entry.sep43);
        }
        assert!(is_sep43("some-injected-wallet"));
    }
}
