//! ModalController: wallet selection list without connect semantics.
//!
//! Backs `openModal`: the host receives the chosen entry and decides what to do.

use super::load_sorted_wallets;
use crate::core::error::{KitError, KitResult};
use crate::core::types::SupportedWallet;
use crate::kit::StellarWalletsKit;
use crate::state::Observable;
use std::rc::Rc;
use tracing::debug;

pub const DEFAULT_MODAL_TITLE: &str = "Connect a Wallet";
pub const DEFAULT_NOT_AVAILABLE_TEXT: &str = "Not available";

#[derive(Debug, Clone)]
pub struct ModalOptions {
    pub title: String,
    pub not_available_text: String,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self { title: DEFAULT_MODAL_TITLE.into(), not_available_text: DEFAULT_NOT_AVAILABLE_TEXT.into() }
    }
}

impl ModalOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self { self.title = title.into(); self }
    pub fn with_not_available_text(mut self, text: impl Into<String>) -> Self { self.not_available_text = text.into(); self }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalPhase {
    Closed,
    Loading,
    Open(Vec<SupportedWallet>),
}

/// Outcome of clicking an entry
#[derive(Debug, Clone, PartialEq)]
pub enum ModalSelection {
    Selected(SupportedWallet),
    /// Wallet is not installed; send the user to its homepage
    Install { id: String, url: String },
}

pub struct ModalCallbacks {
    pub on_wallet_selected: Box<dyn Fn(&SupportedWallet)>,
    pub on_closed: Option<Box<dyn Fn()>>,
}

impl ModalCallbacks {
    pub fn new(on_wallet_selected: impl Fn(&SupportedWallet) + 'static) -> Self {
        Self { on_wallet_selected: Box::new(on_wallet_selected), on_closed: None }
    }
    pub fn on_closed(mut self, f: impl Fn() + 'static) -> Self { self.on_closed = Some(Box::new(f)); self }
}

pub struct ModalController {
    kit: Rc<StellarWalletsKit>,
    options: ModalOptions,
    callbacks: ModalCallbacks,
    phase: Observable<ModalPhase>,
}

impl ModalController {
    pub fn new(kit: Rc<StellarWalletsKit>, options: ModalOptions, callbacks: ModalCallbacks) -> Self {
        Self { kit, options, callbacks, phase: Observable::new(ModalPhase::Closed) }
    }

    pub fn options(&self) -> &ModalOptions {
        &self.options
    }

    pub fn phase(&self) -> &Observable<ModalPhase> {
        &self.phase
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.phase.get(), ModalPhase::Closed)
    }

    /// List wallets in display order and show them
    pub async fn open(&self) -> Vec<SupportedWallet> {
        self.phase.set(ModalPhase::Loading);
        let wallets = load_sorted_wallets(&self.kit).await;
        self.phase.set(ModalPhase::Open(wallets.clone()));
        wallets
    }

    pub fn select(&self, id: &str) -> KitResult<ModalSelection> {
        let wallets = match self.phase.get() {
            ModalPhase::Open(wallets) => wallets,
            other => return Err(KitError::InvalidState(format!("cannot select a wallet while modal is {:?}", other))),
        };
        let wallet = wallets
            .into_iter()
            .find(|w| w.id == id)
            .ok_or_else(|| KitError::UnknownWalletId(id.to_string()))?;

        if !wallet.is_available {
            debug!(wallet = id, "selected wallet not installed");
            return Ok(ModalSelection::Install { id: wallet.id, url: wallet.url });
        }

        self.phase.set(ModalPhase::Closed);
        (self.callbacks.on_wallet_selected)(&wallet);
        Ok(ModalSelection::Selected(wallet))
    }

    /// Close without a selection
    pub fn close(&self) {
        if !self.is_open() {
            return;
        }
        self.phase.set(ModalPhase::Closed);
        if let Some(on_closed) = &self.callbacks.on_closed {
            on_closed();
        }
    }
}
