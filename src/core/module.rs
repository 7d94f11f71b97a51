//! ModuleInterface: the capability contract every wallet adapter satisfies
//!
//! ```text
//! Kit ──► ModuleInterface ──► wallet service (extension / hosted / bridge)
//! ```
//!
//! Calls run on a single-threaded event loop, so futures are `?Send`.

use async_trait::async_trait;
use std::rc::Rc;

use super::error::KitResult;
use super::types::{
    AddressResult, GetAddressParams, ModuleDescriptor, NetworkInfo, SignOptions, SignedAuthEntry,
    SignedMessage, SignedTransaction,
};

/// Shared handle to an adapter
pub type ModuleRef = Rc<dyn ModuleInterface>;

#[async_trait(?Send)]
pub trait ModuleInterface {
    fn descriptor(&self) -> &ModuleDescriptor;

    fn id(&self) -> &str {
        &self.descriptor().id
    }

    /// False for adapters that take extended (hardware/bridge) parameters
    fn supports_sep43(&self) -> bool {
        true
    }

    /// Cheap presence check. Must not prompt the user.
    async fn is_available(&self) -> bool;

    /// Whether the page runs inside this wallet's in-app browser
    async fn is_platform_wrapper(&self) -> bool {
        false
    }

    async fn get_address(&self, params: GetAddressParams) -> KitResult<AddressResult>;

    /// `xdr` is forwarded untouched
    async fn sign_transaction(&self, xdr: &str, opts: SignOptions) -> KitResult<SignedTransaction>;

    async fn sign_auth_entry(&self, entry: &str, opts: SignOptions) -> KitResult<SignedAuthEntry>;

    async fn sign_message(&self, message: &str, opts: SignOptions) -> KitResult<SignedMessage>;

    async fn get_network(&self) -> KitResult<NetworkInfo>;

    /// Tear down persistent connections; stateless adapters keep the default
    async fn disconnect(&self) -> KitResult<()> {
        Ok(())
    }
}
