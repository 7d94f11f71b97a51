//! Freighter through the `freighterApi` bundle

use super::{builtin_descriptor, injected};
use crate::core::catalog::{self, FREIGHTER_ID};
use crate::core::error::{KitError, KitResult};
use crate::core::module::ModuleInterface;
use crate::core::timeout::{probe, PROBE_TIMEOUT};
use crate::core::types::*;
use crate::wasm::bridge::{call, call_wallet, get, get_string, global_path, object, opt_str};
use async_trait::async_trait;
use wasm_bindgen::JsValue;

const GLOBAL: &str = "freighterApi";

pub struct FreighterModule {
    descriptor: ModuleDescriptor,
}

impl FreighterModule {
    pub fn new() -> Self {
        Self { descriptor: builtin_descriptor(FREIGHTER_ID, "Freighter") }
    }

    fn api(&self) -> KitResult<JsValue> {
        injected(self, GLOBAL)
    }
}

impl Default for FreighterModule {
    fn default() -> Self {
        Self::new()
    }
}

fn sign_opts(opts: &SignOptions) -> JsValue {
    object(&[
        ("networkPassphrase", opt_str(opts.network_passphrase.as_deref())),
        ("address", opt_str(opts.address.as_deref())),
    ])
}

#[async_trait(?Send)]
impl ModuleInterface for FreighterModule {
    fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    fn supports_sep43(&self) -> bool {
        catalog::is_sep43(FREIGHTER_ID)
    }

    async fn is_available(&self) -> bool {
        probe(PROBE_TIMEOUT, async {
            let Some(api) = global_path(GLOBAL) else { return false };
            match call(&api, "isConnected", &[]).await {
                Ok(res) => get(&res, "isConnected")
                    .and_then(|v| v.as_bool())
                    .or_else(|| res.as_bool())
                    .unwrap_or(false),
                Err(_) => false,
            }
        })
        .await
    }

    async fn get_address(&self, params: GetAddressParams) -> KitResult<AddressResult> {
        let api = self.api()?;
        let method = if params.skip_request_access { "getAddress" } else { "requestAccess" };
        let res = call_wallet(&api, method, &[]).await?;
        let address = get_string(&res, "address")
            .ok_or_else(|| KitError::AccessDenied("Freighter did not share an address".into()))?;
        Ok(AddressResult { address })
    }

    async fn sign_transaction(&self, xdr: &str, opts: SignOptions) -> KitResult<SignedTransaction> {
        let api = self.api()?;
        let res = call_wallet(&api, "signTransaction", &[JsValue::from_str(xdr), sign_opts(&opts)]).await?;
        Ok(SignedTransaction {
            signed_tx_xdr: get_string(&res, "signedTxXdr")
                .ok_or_else(|| KitError::SigningFailed("Freighter returned no transaction".into()))?,
            signer_address: get_string(&res, "signerAddress"),
        })
    }

    async fn sign_auth_entry(&self, entry: &str, opts: SignOptions) -> KitResult<SignedAuthEntry> {
        let api = self.api()?;
        let res = call_wallet(&api, "signAuthEntry", &[JsValue::from_str(entry), sign_opts(&opts)]).await?;
        Ok(SignedAuthEntry {
            signed_auth_entry: get_string(&res, "signedAuthEntry")
                .ok_or_else(|| KitError::SigningFailed("Freighter returned no auth entry".into()))?,
            signer_address: get_string(&res, "signerAddress"),
        })
    }

    async fn sign_message(&self, message: &str, opts: SignOptions) -> KitResult<SignedMessage> {
        let api = self.api()?;
        let res = call_wallet(&api, "signMessage", &[JsValue::from_str(message), sign_opts(&opts)]).await?;
        Ok(SignedMessage {
            signed_message: get_string(&res, "signedMessage")
                .ok_or_else(|| KitError::SigningFailed("Freighter returned no signature".into()))?,
            signer_address: get_string(&res, "signerAddress"),
        })
    }

    async fn get_network(&self) -> KitResult<NetworkInfo> {
        let api = self.api()?;
        let res = call_wallet(&api, "getNetwork", &[]).await?;
        match (get_string(&res, "network"), get_string(&res, "networkPassphrase")) {
            (Some(network), Some(network_passphrase)) => Ok(NetworkInfo { network, network_passphrase }),
            _ => Err(KitError::NetworkError("Freighter did not report a network".into())),
        }
    }
}
