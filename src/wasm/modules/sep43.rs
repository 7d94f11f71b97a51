//! InjectedSep43Module: any wallet that injects a SEP-43 shaped object.
//!
//! Used for Hana and LOBSTR, and by hosts that register extra wallets from JS.

use super::injected;
use crate::core::catalog;
use crate::core::error::{KitError, KitResult};
use crate::core::module::ModuleInterface;
use crate::core::timeout::{probe, PROBE_TIMEOUT};
use crate::core::types::*;
use crate::wasm::bridge::{call, call_wallet, get_string, global_path, has_method, to_js, wallet_error};
use async_trait::async_trait;
use wasm_bindgen::JsValue;

pub struct InjectedSep43Module {
    descriptor: ModuleDescriptor,
    global: String,
}

impl InjectedSep43Module {
    /// `global` is a dotted path on `window`, e.g. `"hana.stellar"`
    pub fn new(descriptor: ModuleDescriptor, global: impl Into<String>) -> Self {
        Self { descriptor, global: global.into() }
    }

    fn wallet(&self) -> KitResult<JsValue> {
        injected(self, &self.global)
    }

    fn opts(opts: &SignOptions) -> KitResult<JsValue> {
        to_js(opts).map_err(wallet_error)
    }

    fn required(&self, res: &JsValue, field: &str) -> KitResult<String> {
        get_string(res, field)
            .ok_or_else(|| KitError::SigningFailed(format!("{} returned no {}", self.descriptor.name, field)))
    }
}

#[async_trait(?Send)]
impl ModuleInterface for InjectedSep43Module {
    fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    fn supports_sep43(&self) -> bool {
        catalog::is_sep43(self.id())
    }

    async fn is_available(&self) -> bool {
        probe(PROBE_TIMEOUT, async {
            let Some(wallet) = global_path(&self.global) else { return false };
            if !has_method(&wallet, "isConnected") {
                return true;
            }
            call(&wallet, "isConnected", &[]).await.map(|v| v.is_truthy()).unwrap_or(false)
        })
        .await
    }

    async fn is_platform_wrapper(&self) -> bool {
        probe(PROBE_TIMEOUT, async {
            let Some(wallet) = global_path(&self.global) else { return false };
            if !has_method(&wallet, "isPlatformWrapper") {
                return false;
            }
            call(&wallet, "isPlatformWrapper", &[]).await.map(|v| v.is_truthy()).unwrap_or(false)
        })
        .await
    }

    async fn get_address(&self, params: GetAddressParams) -> KitResult<AddressResult> {
        let wallet = self.wallet()?;
        let params = to_js(&params).map_err(wallet_error)?;
        let res = call_wallet(&wallet, "getAddress", &[params]).await?;
        let address = get_string(&res, "address")
            .ok_or_else(|| KitError::AccessDenied(format!("{} did not share an address", self.descriptor.name)))?;
        Ok(AddressResult { address })
    }

    async fn sign_transaction(&self, xdr: &str, opts: SignOptions) -> KitResult<SignedTransaction> {
        let wallet = self.wallet()?;
        let res = call_wallet(&wallet, "signTransaction", &[JsValue::from_str(xdr), Self::opts(&opts)?]).await?;
        Ok(SignedTransaction {
            signed_tx_xdr: self.required(&res, "signedTxXdr")?,
            signer_address: get_string(&res, "signerAddress"),
        })
    }

    async fn sign_auth_entry(&self, entry: &str, opts: SignOptions) -> KitResult<SignedAuthEntry> {
        let wallet = self.wallet()?;
        if !has_method(&wallet, "signAuthEntry") {
            return Err(KitError::unsupported(&self.descriptor.name, "signAuthEntry"));
        }
        let res = call_wallet(&wallet, "signAuthEntry", &[JsValue::from_str(entry), Self::opts(&opts)?]).await?;
        Ok(SignedAuthEntry {
            signed_auth_entry: self.required(&res, "signedAuthEntry")?,
            signer_address: get_string(&res, "signerAddress"),
        })
    }

    async fn sign_message(&self, message: &str, opts: SignOptions) -> KitResult<SignedMessage> {
        let wallet = self.wallet()?;
        if !has_method(&wallet, "signMessage") {
            return Err(KitError::unsupported(&self.descriptor.name, "signMessage"));
        }
        let res = call_wallet(&wallet, "signMessage", &[JsValue::from_str(message), Self::opts(&opts)?]).await?;
        Ok(SignedMessage {
            signed_message: self.required(&res, "signedMessage")?,
            signer_address: get_string(&res, "signerAddress"),
        })
    }

    async fn get_network(&self) -> KitResult<NetworkInfo> {
        let wallet = self.wallet()?;
        let res = call_wallet(&wallet, "getNetwork", &[]).await?;
        Ok(NetworkInfo {
            network: get_string(&res, "network").unwrap_or_default(),
            network_passphrase: self.required(&res, "networkPassphrase")?,
        })
    }

    async fn disconnect(&self) -> KitResult<()> {
        let Some(wallet) = global_path(&self.global) else { return Ok(()) };
        if has_method(&wallet, "disconnect") {
            call_wallet(&wallet, "disconnect", &[]).await?;
        }
        Ok(())
    }
}
