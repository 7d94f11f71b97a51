//! Value types shared by adapters, the kit and the UI shell.
//!
//! Payloads (transaction XDR, auth entries, messages) are opaque strings and
//! are never parsed here.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// NETWORK
// =============================================================================

pub const PUBLIC_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
pub const FUTURENET_PASSPHRASE: &str = "Test SDF Future Network ; October 2022";
pub const SANDBOX_PASSPHRASE: &str = "Local Sandbox Stellar Network ; September 2022";
pub const STANDALONE_PASSPHRASE: &str = "Standalone Network ; February 2017";

/// Stellar networks a kit can be configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Network {
    Public,
    #[default]
    Testnet,
    Futurenet,
    Sandbox,
    Standalone,
}

impl Network {
    pub const ALL: [Network; 5] = [
        Network::Public,
        Network::Testnet,
        Network::Futurenet,
        Network::Sandbox,
        Network::Standalone,
    ];

    pub fn passphrase(&self) -> &'static str {
        match self {
            Network::Public => PUBLIC_PASSPHRASE,
            Network::Testnet => TESTNET_PASSPHRASE,
            Network::Futurenet => FUTURENET_PASSPHRASE,
            Network::Sandbox => SANDBOX_PASSPHRASE,
            Network::Standalone => STANDALONE_PASSPHRASE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Public => "PUBLIC",
            Network::Testnet => "TESTNET",
            Network::Futurenet => "FUTURENET",
            Network::Sandbox => "SANDBOX",
            Network::Standalone => "STANDALONE",
        }
    }

    /// Default Horizon endpoint; local networks have none
    pub fn horizon_url(&self) -> Option<&'static str> {
        match self {
            Network::Public => Some("https://horizon.stellar.org"),
            Network::Testnet => Some("https://horizon-testnet.stellar.org"),
            Network::Futurenet => Some("https://horizon-futurenet.stellar.org"),
            Network::Sandbox | Network::Standalone => None,
        }
    }

    pub fn from_passphrase(passphrase: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.passphrase() == passphrase)
    }

    /// Accepts a network name ("testnet", "mainnet", ...) or a full passphrase
    pub fn from_str(value: &str) -> Option<Self> {
        if let Some(network) = Self::from_passphrase(value) {
            return Some(network);
        }
        match value.trim().to_ascii_lowercase().as_str() {
            "public" | "pubnet" | "mainnet" => Some(Network::Public),
            "testnet" | "test" => Some(Network::Testnet),
            "futurenet" => Some(Network::Futurenet),
            "sandbox" => Some(Network::Sandbox),
            "standalone" | "local" => Some(Network::Standalone),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// MODULE IDENTITY
// =============================================================================

/// Wallet category shown in the selection UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleType {
    HwWallet,
    HotWallet,
    BridgeWallet,
    AirGapedWallet,
}

/// Immutable identity of one adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    pub icon: String,
    pub url: String,
}

impl ModuleDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, module_type: ModuleType) -> Self {
        Self { id: id.into(), name: name.into(), module_type, icon: String::new(), url: String::new() }
    }
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self { self.icon = icon.into(); self }
    pub fn with_url(mut self, url: impl Into<String>) -> Self { self.url = url.into(); self }
}

// =============================================================================
// REQUESTS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAddressParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub skip_request_access: bool,
}

impl GetAddressParams {
    pub fn with_path(mut self, path: impl Into<String>) -> Self { self.path = Some(path.into()); self }
    pub fn skip_request_access(mut self) -> Self { self.skip_request_access = true; self }
}

/// Options for the three signing calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_passphrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl SignOptions {
    pub fn for_network(network: Network) -> Self {
        Self { network_passphrase: Some(network.passphrase().to_string()), ..Default::default() }
    }
    pub fn with_passphrase(mut self, p: impl Into<String>) -> Self { self.network_passphrase = Some(p.into()); self }
    pub fn with_address(mut self, a: impl Into<String>) -> Self { self.address = Some(a.into()); self }
    pub fn with_path(mut self, p: impl Into<String>) -> Self { self.path = Some(p.into()); self }
}

// =============================================================================
// RESULTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResult {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    pub signed_tx_xdr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedAuthEntry {
    pub signed_auth_entry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMessage {
    pub signed_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_address: Option<String>,
}

/// Network the wallet itself reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub network: String,
    pub network_passphrase: String,
}

/// One entry of a wallet listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedWallet {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    pub is_available: bool,
    pub is_platform_wrapper: bool,
    pub icon: String,
    pub url: String,
}

impl SupportedWallet {
    pub fn from_descriptor(d: &ModuleDescriptor, is_available: bool, is_platform_wrapper: bool) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            module_type: d.module_type,
            is_available,
            is_platform_wrapper,
            icon: d.icon.clone(),
            url: d.url.clone(),
        }
    }
}
