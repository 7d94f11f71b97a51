//! Rabet through the injected `rabet` object

use super::{builtin_descriptor, injected};
use crate::core::catalog::{self, RABET_ID};
use crate::core::error::{KitError, KitResult};
use crate::core::module::ModuleInterface;
use crate::core::types::*;
use crate::wasm::bridge::{call_wallet, get_string, global_path};
use async_trait::async_trait;
use wasm_bindgen::JsValue;

const GLOBAL: &str = "rabet";

pub struct RabetModule {
    descriptor: ModuleDescriptor,
}

impl RabetModule {
    pub fn new() -> Self {
        Self { descriptor: builtin_descriptor(RABET_ID, "Rabet") }
    }

    fn ext(&self) -> KitResult<JsValue> {
        injected(self, GLOBAL)
    }
}

impl Default for RabetModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl ModuleInterface for RabetModule {
    fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    fn supports_sep43(&self) -> bool {
        catalog::is_sep43(RABET_ID)
    }

    async fn is_available(&self) -> bool {
        global_path(GLOBAL).is_some()
    }

    async fn get_address(&self, _params: GetAddressParams) -> KitResult<AddressResult> {
        let ext = self.ext()?;
        let res = call_wallet(&ext, "connect", &[]).await?;
        let address = get_string(&res, "publicKey")
            .ok_or_else(|| KitError::AccessDenied("Rabet did not share a public key".into()))?;
        Ok(AddressResult { address })
    }

    async fn sign_transaction(&self, xdr: &str, opts: SignOptions) -> KitResult<SignedTransaction> {
        // Rabet only knows mainnet and testnet by name
        let network = match opts.network_passphrase.as_deref().map(Network::from_passphrase) {
            None | Some(Some(Network::Public)) => "mainnet",
            Some(Some(Network::Testnet)) => "testnet",
            Some(_) => {
                return Err(KitError::unsupported(
                    "Rabet",
                    &format!("network '{}'", opts.network_passphrase.as_deref().unwrap_or_default()),
                ))
            }
        };
        let ext = self.ext()?;
        let res = call_wallet(&ext, "sign", &[JsValue::from_str(xdr), JsValue::from_str(network)]).await?;
        Ok(SignedTransaction {
            signed_tx_xdr: get_string(&res, "xdr")
                .ok_or_else(|| KitError::SigningFailed("Rabet returned no transaction".into()))?,
            signer_address: opts.address,
        })
    }

    async fn sign_auth_entry(&self, _entry: &str, _opts: SignOptions) -> KitResult<SignedAuthEntry> {
        Err(KitError::unsupported("Rabet", "signAuthEntry"))
    }

    async fn sign_message(&self, _message: &str, _opts: SignOptions) -> KitResult<SignedMessage> {
        Err(KitError::unsupported("Rabet", "signMessage"))
    }

    async fn get_network(&self) -> KitResult<NetworkInfo> {
        Err(KitError::unsupported("Rabet", "getNetwork"))
    }
}
