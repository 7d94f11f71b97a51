//! xBull through the injected `xBullSDK`

use super::{builtin_descriptor, injected};
use crate::core::catalog::{self, XBULL_ID};
use crate::core::error::{KitError, KitResult};
use crate::core::module::ModuleInterface;
use crate::core::types::*;
use crate::wasm::bridge::{call_wallet, global_path, object, opt_str};
use async_trait::async_trait;
use wasm_bindgen::JsValue;

const GLOBAL: &str = "xBullSDK";

pub struct XBullModule {
    descriptor: ModuleDescriptor,
}

impl XBullModule {
    pub fn new() -> Self {
        Self { descriptor: builtin_descriptor(XBULL_ID, "xBull") }
    }

    fn sdk(&self) -> KitResult<JsValue> {
        injected(self, GLOBAL)
    }

    async fn connect(&self, sdk: &JsValue) -> KitResult<()> {
        let permissions = object(&[
            ("canRequestPublicKey", JsValue::TRUE),
            ("canRequestSign", JsValue::TRUE),
        ]);
        call_wallet(sdk, "connect", &[permissions]).await?;
        Ok(())
    }
}

impl Default for XBullModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl ModuleInterface for XBullModule {
    fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    fn supports_sep43(&self) -> bool {
        catalog::is_sep43(XBULL_ID)
    }

    async fn is_available(&self) -> bool {
        global_path(GLOBAL).is_some()
    }

    async fn get_address(&self, params: GetAddressParams) -> KitResult<AddressResult> {
        let sdk = self.sdk()?;
        if !params.skip_request_access {
            self.connect(&sdk).await?;
        }
        let address = call_wallet(&sdk, "getPublicKey", &[])
            .await?
            .as_string()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| KitError::AccessDenied("xBull did not share a public key".into()))?;
        Ok(AddressResult { address })
    }

    async fn sign_transaction(&self, xdr: &str, opts: SignOptions) -> KitResult<SignedTransaction> {
        let sdk = self.sdk()?;
        let params = object(&[
            ("network", opt_str(opts.network_passphrase.as_deref())),
            ("publicKey", opt_str(opts.address.as_deref())),
        ]);
        let signed = call_wallet(&sdk, "signXDR", &[JsValue::from_str(xdr), params])
            .await?
            .as_string()
            .ok_or_else(|| KitError::SigningFailed("xBull returned no transaction".into()))?;
        Ok(SignedTransaction { signed_tx_xdr: signed, signer_address: opts.address })
    }

    async fn sign_auth_entry(&self, _entry: &str, _opts: SignOptions) -> KitResult<SignedAuthEntry> {
        Err(KitError::unsupported("xBull", "signAuthEntry"))
    }

    async fn sign_message(&self, _message: &str, _opts: SignOptions) -> KitResult<SignedMessage> {
        Err(KitError::unsupported("xBull", "signMessage"))
    }

    async fn get_network(&self) -> KitResult<NetworkInfo> {
        Err(KitError::unsupported("xBull", "getNetwork"))
    }
}
