//! Shared mock adapter for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use stellar_wallets_kit::core::types::*;
use stellar_wallets_kit::{KitConfig, KitError, KitResult, ModuleInterface, ModuleRef, StellarWalletsKit};

pub const ADDRESS_A: &str = "GBZXN7PIRZGNMHGA7MUUUF4GWPY5AYPV6LY4UV2GL6VJGIQRXFDNMADI";
pub const ADDRESS_B: &str = "GCKFBEIYV2U22IO2BJ4KVJOIP7XPWQGQFKKWXR6DOSJBV7STMAQSMTGG";

#[derive(Clone, Copy, PartialEq)]
pub enum Availability {
    Available,
    Missing,
    /// `is_available` never resolves
    Hangs,
}

pub struct MockModule {
    descriptor: ModuleDescriptor,
    availability: Availability,
    sep43: bool,
    platform_wrapper: bool,
    /// `is_platform_wrapper` never resolves
    wrapper_hangs: bool,
    address: String,
    failure: Option<KitError>,
    disconnect_failure: Option<KitError>,
    calls: RefCell<Vec<String>>,
}

impl MockModule {
    pub fn new(id: &str) -> Self {
        Self {
            descriptor: ModuleDescriptor::new(id, format!("Wallet {}", id.to_uppercase()), ModuleType::HotWallet)
                .with_url(format!("https://{}.example", id)),
            availability: Availability::Available,
            sep43: true,
            platform_wrapper: false,
            wrapper_hangs: false,
            address: ADDRESS_A.to_string(),
            failure: None,
            disconnect_failure: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn missing(mut self) -> Self { self.availability = Availability::Missing; self }
    pub fn hanging(mut self) -> Self { self.availability = Availability::Hangs; self }
    pub fn not_sep43(mut self) -> Self { self.sep43 = false; self }
    pub fn platform_wrapper(mut self) -> Self { self.platform_wrapper = true; self }
    pub fn hanging_wrapper_check(mut self) -> Self { self.wrapper_hangs = true; self }
    pub fn with_address(mut self, address: &str) -> Self { self.address = address.to_string(); self }
    /// Every delegated call fails with `error`
    pub fn failing(mut self, error: KitError) -> Self { self.failure = Some(error); self }
    pub fn failing_disconnect(mut self, error: KitError) -> Self { self.disconnect_failure = Some(error); self }

    pub fn shared(self) -> Rc<Self> {
        Rc::new(self)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: impl Into<String>) -> KitResult<()> {
        self.calls.borrow_mut().push(call.into());
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl ModuleInterface for MockModule {
    fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    fn supports_sep43(&self) -> bool {
        self.sep43
    }

    async fn is_available(&self) -> bool {
        match self.availability {
            Availability::Available => true,
            Availability::Missing => false,
            Availability::Hangs => futures::future::pending().await,
        }
    }

    async fn is_platform_wrapper(&self) -> bool {
        if self.wrapper_hangs {
            futures::future::pending::<()>().await;
        }
        self.platform_wrapper
    }

    async fn get_address(&self, params: GetAddressParams) -> KitResult<AddressResult> {
        let call = if params.skip_request_access { "get_address:skip" } else { "get_address" };
        self.record(call)?;
        Ok(AddressResult { address: self.address.clone() })
    }

    async fn sign_transaction(&self, xdr: &str, opts: SignOptions) -> KitResult<SignedTransaction> {
        self.record(format!("sign_transaction:{}", xdr))?;
        Ok(SignedTransaction {
            signed_tx_xdr: format!("signed({})", xdr),
            signer_address: Some(opts.address.unwrap_or_else(|| self.address.clone())),
        })
    }

    async fn sign_auth_entry(&self, entry: &str, _opts: SignOptions) -> KitResult<SignedAuthEntry> {
        self.record(format!("sign_auth_entry:{}", entry))?;
        Ok(SignedAuthEntry { signed_auth_entry: format!("signed({})", entry), signer_address: None })
    }

    async fn sign_message(&self, message: &str, _opts: SignOptions) -> KitResult<SignedMessage> {
        self.record(format!("sign_message:{}", message))?;
        Ok(SignedMessage { signed_message: format!("signed({})", message), signer_address: None })
    }

    async fn get_network(&self) -> KitResult<NetworkInfo> {
        self.record("get_network")?;
        Ok(NetworkInfo {
            network: Network::Testnet.as_str().to_string(),
            network_passphrase: Network::Testnet.passphrase().to_string(),
        })
    }

    async fn disconnect(&self) -> KitResult<()> {
        self.calls.borrow_mut().push("disconnect".into());
        match &self.disconnect_failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

pub fn as_module(module: &Rc<MockModule>) -> ModuleRef {
    module.clone()
}

/// Testnet kit over `modules` with a short probe timeout
pub fn kit_with(modules: &[Rc<MockModule>]) -> StellarWalletsKit {
    StellarWalletsKit::new(config_with(modules)).expect("kit")
}

pub fn config_with(modules: &[Rc<MockModule>]) -> KitConfig {
    KitConfig::new(Network::Testnet)
        .with_modules(modules.iter().map(as_module))
        .with_probe_timeout(Duration::from_millis(50))
}
