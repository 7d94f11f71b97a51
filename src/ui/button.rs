//! ButtonController: connect button state machine
//!
//! ```text
//! Disconnected ─open_modal─► ModalOpen ─select_wallet─► Connecting ─ok─► Connected
//!      ▲                        │                          │
//!      └──────close_modal───────┘◄─────────error───────────┘
//! Connected ─disconnect─► Disconnecting ─► Disconnected
//! ```

use super::balance::BalanceSource;
use super::{load_sorted_wallets, shorten_address};
use crate::core::error::{ErrorShape, KitError, KitResult};
use crate::core::types::{GetAddressParams, SupportedWallet};
use crate::kit::StellarWalletsKit;
use crate::state::Observable;
use std::rc::Rc;
use tracing::{info, warn};

pub const DEFAULT_BUTTON_TEXT: &str = "Connect";

#[derive(Debug, Clone, PartialEq)]
pub enum ButtonPhase {
    Disconnected,
    ModalOpen(Vec<SupportedWallet>),
    Connecting(String),
    Connected(String),
    Disconnecting,
}

#[derive(Debug, Clone, Default)]
pub struct ButtonOptions {
    pub button_text: Option<String>,
    /// Overrides the network's default Horizon endpoint for the balance badge
    pub horizon_url: Option<String>,
}

impl ButtonOptions {
    pub fn with_text(mut self, text: impl Into<String>) -> Self { self.button_text = Some(text.into()); self }
    pub fn with_horizon(mut self, url: impl Into<String>) -> Self { self.horizon_url = Some(url.into()); self }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectEvent {
    pub address: String,
    pub wallet_id: String,
}

pub struct ButtonCallbacks {
    pub on_connect: Box<dyn Fn(&ConnectEvent)>,
    pub on_disconnect: Box<dyn Fn()>,
    pub on_closed: Option<Box<dyn Fn()>>,
    pub on_error: Option<Box<dyn Fn(&ErrorShape)>>,
}

impl ButtonCallbacks {
    pub fn new(on_connect: impl Fn(&ConnectEvent) + 'static, on_disconnect: impl Fn() + 'static) -> Self {
        Self { on_connect: Box::new(on_connect), on_disconnect: Box::new(on_disconnect), on_closed: None, on_error: None }
    }
    pub fn on_closed(mut self, f: impl Fn() + 'static) -> Self { self.on_closed = Some(Box::new(f)); self }
    pub fn on_error(mut self, f: impl Fn(&ErrorShape) + 'static) -> Self { self.on_error = Some(Box::new(f)); self }
}

pub struct ButtonController {
    kit: Rc<StellarWalletsKit>,
    options: ButtonOptions,
    callbacks: ButtonCallbacks,
    balance_source: Option<Rc<dyn BalanceSource>>,
    phase: Observable<ButtonPhase>,
    address: Observable<Option<String>>,
    balance: Observable<Option<String>>,
}

impl ButtonController {
    pub fn new(kit: Rc<StellarWalletsKit>, options: ButtonOptions, callbacks: ButtonCallbacks) -> Self {
        Self {
            kit,
            options,
            callbacks,
            balance_source: None,
            phase: Observable::new(ButtonPhase::Disconnected),
            address: Observable::new(None),
            balance: Observable::new(None),
        }
    }

    pub fn with_balance_source(mut self, source: Rc<dyn BalanceSource>) -> Self {
        self.balance_source = Some(source);
        self
    }

    pub fn kit(&self) -> &Rc<StellarWalletsKit> { &self.kit }
    pub fn options(&self) -> &ButtonOptions { &self.options }
    pub fn phase(&self) -> &Observable<ButtonPhase> { &self.phase }
    pub fn address(&self) -> &Observable<Option<String>> { &self.address }
    pub fn balance(&self) -> &Observable<Option<String>> { &self.balance }

    /// Horizon endpoint for the balance badge, if any
    pub fn horizon_url(&self) -> Option<String> {
        self.options
            .horizon_url
            .clone()
            .or_else(|| self.kit.network().horizon_url().map(str::to_string))
    }

    /// Text the button shows in its current phase
    pub fn label(&self) -> String {
        match self.phase.get() {
            ButtonPhase::Connected(address) => shorten_address(&address),
            ButtonPhase::Connecting(_) => "Connecting...".into(),
            ButtonPhase::Disconnecting => "Disconnecting...".into(),
            _ => self.options.button_text.clone().unwrap_or_else(|| DEFAULT_BUTTON_TEXT.into()),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.phase.get(), ButtonPhase::Connected(_))
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    pub async fn open_modal(&self) -> KitResult<Vec<SupportedWallet>> {
        self.expect_phase(|p| matches!(p, ButtonPhase::Disconnected), "open the modal")?;
        self.phase.set(ButtonPhase::ModalOpen(Vec::new()));
        let wallets = load_sorted_wallets(&self.kit).await;
        self.phase.set(ButtonPhase::ModalOpen(wallets.clone()));
        Ok(wallets)
    }

    pub fn close_modal(&self) -> KitResult<()> {
        self.expect_phase(|p| matches!(p, ButtonPhase::ModalOpen(_)), "close the modal")?;
        self.phase.set(ButtonPhase::Disconnected);
        if let Some(on_closed) = &self.callbacks.on_closed {
            on_closed();
        }
        Ok(())
    }

    /// set_wallet + get_address. On failure the previous selection and
    /// preference are put back.
    pub async fn select_wallet(&self, id: &str) -> KitResult<String> {
        self.expect_phase(|p| matches!(p, ButtonPhase::ModalOpen(_)), "select a wallet")?;
        self.phase.set(ButtonPhase::Connecting(id.to_string()));

        let previous = (self.kit.selected_wallet_id(), self.kit.last_used_wallet_id());
        let result = match self.kit.set_wallet(id) {
            Ok(()) => {
                let found = self.kit.get_address(GetAddressParams::default()).await;
                if found.is_err() {
                    self.kit.restore_selection(previous.0, previous.1);
                }
                found
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(found) => {
                self.enter_connected(id, found.address.clone());
                self.load_balance().await;
                Ok(found.address)
            }
            Err(e) => {
                warn!(wallet = id, error = %e, "connect failed");
                self.phase.set(ButtonPhase::Disconnected);
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Reconnect silently when the kit already has a selected wallet
    pub async fn restore_session(&self) -> KitResult<Option<String>> {
        self.expect_phase(|p| matches!(p, ButtonPhase::Disconnected), "restore a session")?;
        let id = match self.kit.selected_wallet_id() {
            Some(id) => id,
            None => return Ok(None),
        };
        let found = self.kit.get_address(GetAddressParams::default().skip_request_access()).await?;
        self.enter_connected(&id, found.address.clone());
        self.load_balance().await;
        Ok(Some(found.address))
    }

    pub async fn disconnect(&self) -> KitResult<()> {
        self.expect_phase(|p| matches!(p, ButtonPhase::Connected(_)), "disconnect")?;
        self.phase.set(ButtonPhase::Disconnecting);

        let result = self.kit.disconnect().await;
        self.address.set(None);
        self.balance.set(None);
        self.phase.set(ButtonPhase::Disconnected);

        if let Err(e) = &result {
            self.report(e);
        }
        (self.callbacks.on_disconnect)();
        info!("button disconnected");
        result
    }

    /// Fetch the native balance for the connected address
    pub async fn refresh_balance(&self) -> KitResult<Option<String>> {
        let (source, address) = match (&self.balance_source, self.address.get()) {
            (Some(source), Some(address)) => (source.clone(), address),
            _ => return Ok(None),
        };
        let balance = source.native_balance(&address).await?;
        self.balance.set(balance.clone());
        Ok(balance)
    }

    /// Backs `removeButton`: disconnect unless told otherwise
    pub async fn teardown(&self, skip_disconnect: bool) -> KitResult<()> {
        if !skip_disconnect && self.is_connected() {
            self.disconnect().await?;
        }
        Ok(())
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn enter_connected(&self, id: &str, address: String) {
        self.address.set(Some(address.clone()));
        self.phase.set(ButtonPhase::Connected(address.clone()));
        info!(wallet = id, "button connected");
        (self.callbacks.on_connect)(&ConnectEvent { address, wallet_id: id.to_string() });
    }

    async fn load_balance(&self) {
        if let Err(e) = self.refresh_balance().await {
            warn!(error = %e, "balance lookup failed");
        }
    }

    fn report(&self, error: &KitError) {
        if let Some(on_error) = &self.callbacks.on_error {
            on_error(&error.to_shape());
        }
    }

    fn expect_phase(&self, ok: impl Fn(&ButtonPhase) -> bool, action: &str) -> KitResult<()> {
        let phase = self.phase.get();
        if ok(&phase) {
            Ok(())
        } else {
            Err(KitError::InvalidState(format!("cannot {} while {:?}", action, phase)))
        }
    }
}
