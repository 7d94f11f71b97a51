//! Albedo: hosted signer reached through the `albedo` link bundle.
//!
//! Albedo has no notion of a current network, so `get_network` is unsupported.

use super::{builtin_descriptor, injected};
use crate::core::catalog::{self, ALBEDO_ID};
use crate::core::error::{KitError, KitResult};
use crate::core::module::ModuleInterface;
use crate::core::types::*;
use crate::wasm::bridge::{call_wallet, get_string, global_path, object, opt_str};
use async_trait::async_trait;
use wasm_bindgen::JsValue;

const GLOBAL: &str = "albedo";

pub struct AlbedoModule {
    descriptor: ModuleDescriptor,
}

impl AlbedoModule {
    pub fn new() -> Self {
        Self { descriptor: builtin_descriptor(ALBEDO_ID, "Albedo") }
    }

    fn link(&self) -> KitResult<JsValue> {
        injected(self, GLOBAL)
    }
}

impl Default for AlbedoModule {
    fn default() -> Self {
        Self::new()
    }
}

/// Albedo names the two public networks; anything else goes as a passphrase
fn albedo_network(passphrase: Option<&str>) -> JsValue {
    match passphrase.and_then(Network::from_passphrase) {
        Some(Network::Public) => JsValue::from_str("public"),
        Some(Network::Testnet) => JsValue::from_str("testnet"),
        _ => opt_str(passphrase),
    }
}

#[async_trait(?Send)]
impl ModuleInterface for AlbedoModule {
    fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    fn supports_sep43(&self) -> bool {
        catalog::is_sep43(ALBEDO_ID)
    }

    async fn is_available(&self) -> bool {
        global_path(GLOBAL).is_some()
    }

    async fn get_address(&self, _params: GetAddressParams) -> KitResult<AddressResult> {
        let link = self.link()?;
        let res = call_wallet(&link, "publicKey", &[object(&[])]).await?;
        let address = get_string(&res, "pubkey")
            .ok_or_else(|| KitError::AccessDenied("Albedo did not share a public key".into()))?;
        Ok(AddressResult { address })
    }

    async fn sign_transaction(&self, xdr: &str, opts: SignOptions) -> KitResult<SignedTransaction> {
        let link = self.link()?;
        let intent = object(&[
            ("xdr", JsValue::from_str(xdr)),
            ("pubkey", opt_str(opts.address.as_deref())),
            ("network", albedo_network(opts.network_passphrase.as_deref())),
            ("submit", JsValue::FALSE),
        ]);
        let res = call_wallet(&link, "tx", &[intent]).await?;
        Ok(SignedTransaction {
            signed_tx_xdr: get_string(&res, "signed_envelope_xdr")
                .ok_or_else(|| KitError::SigningFailed("Albedo returned no envelope".into()))?,
            signer_address: get_string(&res, "pubkey"),
        })
    }

    async fn sign_auth_entry(&self, _entry: &str, _opts: SignOptions) -> KitResult<SignedAuthEntry> {
        Err(KitError::unsupported("Albedo", "signAuthEntry"))
    }

    async fn sign_message(&self, message: &str, opts: SignOptions) -> KitResult<SignedMessage> {
        let link = self.link()?;
        let intent = object(&[
            ("message", JsValue::from_str(message)),
            ("pubkey", opt_str(opts.address.as_deref())),
        ]);
        let res = call_wallet(&link, "message", &[intent]).await?;
        Ok(SignedMessage {
            signed_message: get_string(&res, "message_signature")
                .ok_or_else(|| KitError::SigningFailed("Albedo returned no signature".into()))?,
            signer_address: get_string(&res, "pubkey"),
        })
    }

    async fn get_network(&self) -> KitResult<NetworkInfo> {
        Err(KitError::unsupported("Albedo", "getNetwork"))
    }
}
