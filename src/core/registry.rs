//! ModuleRegistry: stateless selection helpers over a fixed adapter list

use super::module::{ModuleInterface, ModuleRef};

/// Predicate used to narrow a module list
pub type ModuleFilter<'a> = &'a dyn Fn(&dyn ModuleInterface) -> bool;

#[derive(Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleRef>,
}

impl ModuleRegistry {
    pub fn new(modules: impl IntoIterator<Item = ModuleRef>) -> Self {
        Self { modules: modules.into_iter().collect() }
    }

    /// Every module, optionally filtered
    pub fn all_modules(&self, filter: Option<ModuleFilter<'_>>) -> Vec<ModuleRef> {
        self.modules
            .iter()
            .filter(|m| match filter {
                Some(f) => f(&***m),
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Only modules restricted to the SEP-43 subset, optionally filtered further
    pub fn sep43_modules(&self, filter: Option<ModuleFilter<'_>>) -> Vec<ModuleRef> {
        let sep43 = |m: &dyn ModuleInterface| m.supports_sep43() && filter.map(|f| f(m)).unwrap_or(true);
        self.all_modules(Some(&sep43))
    }

    pub fn get(&self, id: &str) -> Option<ModuleRef> {
        self.modules.iter().find(|m| m.id() == id).cloned()
    }

    pub fn len(&self) -> usize { self.modules.len() }
    pub fn is_empty(&self) -> bool { self.modules.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::KitResult;
    use crate::core::types::*;
    use async_trait::async_trait;
    use std::rc::Rc;

    struct Stub {
        descriptor: ModuleDescriptor,
        sep43: bool,
    }

    fn stub(id: &str, module_type: ModuleType, sep43: bool) -> ModuleRef {
        Rc::new(Stub { descriptor: ModuleDescriptor::new(id, id.to_uppercase(), module_type), sep43 })
    }

    #[async_trait(?Send)]
    impl ModuleInterface for Stub {
        fn descriptor(&self) -> &ModuleDescriptor { &self.descriptor }
        fn supports_sep43(&self) -> bool { self.sep43 }
        async fn is_available(&self) -> bool { true }
        async fn get_address(&self, _: GetAddressParams) -> KitResult<AddressResult> {
            Ok(AddressResult { address: "GSTUB".into() })
        }
        async fn sign_transaction(&self, xdr: &str, _: SignOptions) -> KitResult<SignedTransaction> {
            Ok(SignedTransaction { signed_tx_xdr: xdr.into(), signer_address: None })
        }
        async fn sign_auth_entry(&self, entry: &str, _: SignOptions) -> KitResult<SignedAuthEntry> {
            Ok(SignedAuthEntry { signed_auth_entry: entry.into(), signer_address: None })
        }
        async fn sign_message(&self, message: &str, _: SignOptions) -> KitResult<SignedMessage> {
            Ok(SignedMessage { signed_message: message.into(), signer_address: None })
        }
        async fn get_network(&self) -> KitResult<NetworkInfo> {
            Ok(NetworkInfo { network: "TESTNET".into(), network_passphrase: TESTNET_PASSPHRASE.into() })
        }
    }

    fn registry() -> ModuleRegistry {
        ModuleRegistry::new(vec![
            stub("freighter", ModuleType::HotWallet, true),
            stub("ledger", ModuleType::HwWallet, false),
            stub("albedo", ModuleType::HotWallet, true),
            stub("bridge", ModuleType::BridgeWallet, false),
        ])
    }

    fn ids(modules: &[ModuleRef]) -> Vec<&str> {
        modules.iter().map(|m| m.id()).collect()
    }

    #[test]
    fn all_modules_keeps_declared_order() {
        let reg = registry();
        assert_eq!(ids(&reg.all_modules(None)), vec!["freighter", "ledger", "albedo", "bridge"]);

        let hot = |m: &dyn ModuleInterface| m.descriptor().module_type == ModuleType::HotWallet;
        assert_eq!(ids(&reg.all_modules(Some(&hot))), vec!["freighter", "albedo"]);
    }

    #[test]
    fn sep43_excludes_extended_modules() {
        let reg = registry();
        assert_eq!(ids(&reg.sep43_modules(None)), vec!["freighter", "albedo"]);

        let not_albedo = |m: &dyn ModuleInterface| m.id() != "albedo";
        assert_eq!(ids(&reg.sep43_modules(Some(&not_albedo))), vec!["freighter"]);
    }

    #[test]
    fn lookup_by_id() {
        let reg = registry();
        assert!(reg.get("ledger").is_some());
        assert!(reg.get("nope").is_none());
        assert_eq!(reg.len(), 4);
    }
}
