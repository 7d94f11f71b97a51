//! UI shell tests: modal and button state machines driven without a DOM

mod common;

use async_trait::async_trait;
use common::*;
use futures::StreamExt;
use std::cell::RefCell;
use std::rc::Rc;
use stellar_wallets_kit::core::types::Network;
use stellar_wallets_kit::ui::*;
use stellar_wallets_kit::{
    ErrorShape, KitError, KitResult, MemoryPreferences, PreferenceStore, StellarWalletsKit, SELECTED_WALLET_KEY,
};

struct FixedBalance(Option<&'static str>);

#[async_trait(?Send)]
impl BalanceSource for FixedBalance {
    async fn native_balance(&self, _address: &str) -> KitResult<Option<String>> {
        Ok(self.0.map(str::to_string))
    }
}

/// Everything the button callbacks saw, in order
#[derive(Default)]
struct Events {
    log: RefCell<Vec<String>>,
    errors: RefCell<Vec<ErrorShape>>,
}

impl Events {
    fn push(&self, event: impl Into<String>) {
        self.log.borrow_mut().push(event.into());
    }

    fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

fn button(kit: Rc<StellarWalletsKit>, events: &Rc<Events>) -> ButtonController {
    let (c, d, e, x) = (events.clone(), events.clone(), events.clone(), events.clone());
    let callbacks = ButtonCallbacks::new(
        move |ev: &ConnectEvent| c.push(format!("connect:{}:{}", ev.wallet_id, ev.address)),
        move || d.push("disconnect"),
    )
    .on_closed(move || x.push("closed"))
    .on_error(move |shape: &ErrorShape| e.errors.borrow_mut().push(shape.clone()));
    ButtonController::new(kit, ButtonOptions::default(), callbacks)
}

// =============================================================================
// MODAL
// =============================================================================

fn modal(kit: Rc<StellarWalletsKit>, picked: &Rc<RefCell<Vec<String>>>, closed: &Rc<RefCell<u32>>) -> ModalController {
    let picked = picked.clone();
    let closed = closed.clone();
    let callbacks = ModalCallbacks::new(move |w| picked.borrow_mut().push(w.id.clone()))
        .on_closed(move || *closed.borrow_mut() += 1);
    ModalController::new(kit, ModalOptions::default(), callbacks)
}

#[tokio::test]
async fn modal_lists_wallets_in_display_order() {
    let kit = Rc::new(kit_with(&[MockModule::new("a").missing().shared(), MockModule::new("b").shared()]));
    let (picked, closed) = (Rc::new(RefCell::new(Vec::new())), Rc::new(RefCell::new(0)));
    let modal = modal(kit, &picked, &closed);

    assert_eq!(modal.phase().get(), ModalPhase::Closed);
    let wallets = modal.open().await;

    assert_eq!(wallets.iter().map(|w| w.id.as_str()).collect::<Vec<_>>(), ["b", "a"]);
    assert_eq!(modal.phase().get(), ModalPhase::Open(wallets));
    assert_eq!(modal.options().title, "Connect a Wallet");
}

#[tokio::test]
async fn modal_selection_fires_callback_and_closes() {
    let kit = Rc::new(kit_with(&[MockModule::new("a").shared()]));
    let (picked, closed) = (Rc::new(RefCell::new(Vec::new())), Rc::new(RefCell::new(0)));
    let modal = modal(kit.clone(), &picked, &closed);

    modal.open().await;
    let selection = modal.select("a").unwrap();

    assert!(matches!(selection, ModalSelection::Selected(ref w) if w.id == "a"));
    assert_eq!(*picked.borrow(), ["a"]);
    assert!(!modal.is_open());
    assert_eq!(*closed.borrow(), 0);
    // the modal only reports; selecting is the host's call
    assert_eq!(kit.selected_wallet_id(), None);
}

#[tokio::test]
async fn unavailable_wallet_points_to_install_page() {
    let kit = Rc::new(kit_with(&[MockModule::new("gone").missing().shared()]));
    let (picked, closed) = (Rc::new(RefCell::new(Vec::new())), Rc::new(RefCell::new(0)));
    let modal = modal(kit, &picked, &closed);

    modal.open().await;
    let selection = modal.select("gone").unwrap();

    assert_eq!(selection, ModalSelection::Install { id: "gone".into(), url: "https://gone.example".into() });
    assert!(picked.borrow().is_empty());
    assert!(modal.is_open());
}

#[tokio::test]
async fn modal_rejects_selection_when_closed_or_unknown() {
    let kit = Rc::new(kit_with(&[MockModule::new("a").shared()]));
    let (picked, closed) = (Rc::new(RefCell::new(Vec::new())), Rc::new(RefCell::new(0)));
    let modal = modal(kit, &picked, &closed);

    assert!(matches!(modal.select("a"), Err(KitError::InvalidState(_))));
    modal.open().await;
    assert_eq!(modal.select("zzz"), Err(KitError::UnknownWalletId("zzz".into())));

    modal.close();
    modal.close();
    assert_eq!(*closed.borrow(), 1);
    assert_eq!(modal.phase().get(), ModalPhase::Closed);
}

// =============================================================================
// BUTTON
// =============================================================================

#[tokio::test]
async fn button_connects_through_the_modal() {
    let a = MockModule::new("a").shared();
    let kit = Rc::new(kit_with(&[a.clone()]));
    let events = Rc::new(Events::default());
    let button = button(kit.clone(), &events).with_balance_source(Rc::new(FixedBalance(Some("100.5000000"))));

    assert_eq!(button.label(), "Connect");
    let wallets = button.open_modal().await.unwrap();
    assert_eq!(button.phase().get(), ButtonPhase::ModalOpen(wallets));

    let address = button.select_wallet("a").await.unwrap();

    assert_eq!(address, ADDRESS_A);
    assert_eq!(button.phase().get(), ButtonPhase::Connected(ADDRESS_A.into()));
    assert_eq!(button.label(), "GBZXN7...MADI");
    assert_eq!(button.address().get().as_deref(), Some(ADDRESS_A));
    assert_eq!(button.balance().get().as_deref(), Some("100.5000000"));
    assert_eq!(kit.selected_wallet_id().as_deref(), Some("a"));
    assert_eq!(events.log(), [format!("connect:a:{}", ADDRESS_A)]);
    assert_eq!(a.calls(), ["get_address"]);
}

#[tokio::test]
async fn failed_connect_reports_and_leaves_nothing_selected() {
    let rejected = KitError::UserRejected("closed the popup".into());
    let kit = Rc::new(kit_with(&[MockModule::new("a").failing(rejected.clone()).shared()]));
    let events = Rc::new(Events::default());
    let button = button(kit.clone(), &events);

    button.open_modal().await.unwrap();
    assert_eq!(button.select_wallet("a").await, Err(rejected.clone()));

    assert_eq!(button.phase().get(), ButtonPhase::Disconnected);
    assert_eq!(kit.selected_wallet_id(), None);
    assert_eq!(*events.errors.borrow(), [rejected.to_shape()]);
    assert_eq!(events.errors.borrow()[0].code, -5);
    assert!(events.log().is_empty());
}

#[tokio::test]
async fn failed_connect_keeps_the_previous_wallet() {
    let rejected = KitError::UserRejected("closed the popup".into());
    let store = Rc::new(MemoryPreferences::new());
    let modules = [MockModule::new("a").failing(rejected.clone()).shared(), MockModule::new("b").shared()];
    let kit = Rc::new(StellarWalletsKit::new(config_with(&modules).with_preferences(store.clone())).unwrap());
    kit.set_wallet("b").unwrap();

    let events = Rc::new(Events::default());
    let button = button(kit.clone(), &events);
    button.open_modal().await.unwrap();
    assert_eq!(button.select_wallet("a").await, Err(rejected));

    assert_eq!(kit.selected_wallet_id().as_deref(), Some("b"));
    assert_eq!(store.get(SELECTED_WALLET_KEY).unwrap().as_deref(), Some("b"));

    let reopened = button.open_modal().await.unwrap();
    let ids: Vec<_> = reopened.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
}

#[tokio::test]
async fn unknown_wallet_in_connect_changes_nothing() {
    let store = Rc::new(MemoryPreferences::new());
    store.set(SELECTED_WALLET_KEY, "a").unwrap();
    let modules = [MockModule::new("a").shared()];
    let kit = Rc::new(StellarWalletsKit::new(config_with(&modules).with_preferences(store.clone())).unwrap());

    let events = Rc::new(Events::default());
    let button = button(kit.clone(), &events);
    button.open_modal().await.unwrap();
    assert_eq!(button.select_wallet("zzz").await, Err(KitError::UnknownWalletId("zzz".into())));

    assert_eq!(kit.selected_wallet_id(), None);
    assert_eq!(store.get(SELECTED_WALLET_KEY).unwrap().as_deref(), Some("a"));
    assert_eq!(button.phase().get(), ButtonPhase::Disconnected);
}

#[tokio::test]
async fn button_disconnect_resets_everything() {
    let kit = Rc::new(kit_with(&[MockModule::new("a").shared()]));
    let events = Rc::new(Events::default());
    let button = button(kit.clone(), &events).with_balance_source(Rc::new(FixedBalance(Some("1.0"))));

    button.open_modal().await.unwrap();
    button.select_wallet("a").await.unwrap();
    button.disconnect().await.unwrap();

    assert_eq!(button.phase().get(), ButtonPhase::Disconnected);
    assert_eq!(button.address().get(), None);
    assert_eq!(button.balance().get(), None);
    assert_eq!(kit.selected_wallet_id(), None);
    assert_eq!(events.log().last().map(String::as_str), Some("disconnect"));
}

#[tokio::test]
async fn adapter_disconnect_error_still_ends_disconnected() {
    let err = KitError::NetworkError("socket gone".into());
    let kit = Rc::new(kit_with(&[MockModule::new("a").failing_disconnect(err.clone()).shared()]));
    let events = Rc::new(Events::default());
    let button = button(kit, &events);

    button.open_modal().await.unwrap();
    button.select_wallet("a").await.unwrap();

    assert_eq!(button.disconnect().await, Err(err.clone()));
    assert_eq!(button.phase().get(), ButtonPhase::Disconnected);
    assert_eq!(*events.errors.borrow(), [err.to_shape()]);
    assert_eq!(events.log().last().map(String::as_str), Some("disconnect"));
}

#[tokio::test]
async fn closing_the_modal_fires_on_closed() {
    let kit = Rc::new(kit_with(&[MockModule::new("a").shared()]));
    let events = Rc::new(Events::default());
    let button = button(kit, &events);

    button.open_modal().await.unwrap();
    button.close_modal().unwrap();

    assert_eq!(button.phase().get(), ButtonPhase::Disconnected);
    assert_eq!(events.log(), ["closed"]);
}

#[tokio::test]
async fn invalid_transitions_are_rejected() {
    let kit = Rc::new(kit_with(&[MockModule::new("a").shared()]));
    let events = Rc::new(Events::default());
    let button = button(kit, &events);

    assert!(matches!(button.select_wallet("a").await, Err(KitError::InvalidState(_))));
    assert!(matches!(button.disconnect().await, Err(KitError::InvalidState(_))));
    assert!(matches!(button.close_modal(), Err(KitError::InvalidState(_))));

    button.open_modal().await.unwrap();
    assert!(matches!(button.open_modal().await, Err(KitError::InvalidState(_))));
    assert!(events.errors.borrow().is_empty());
}

#[tokio::test]
async fn phase_changes_are_streamed() {
    let kit = Rc::new(kit_with(&[MockModule::new("a").shared()]));
    let events = Rc::new(Events::default());
    let button = button(kit, &events);
    let mut phases = button.phase().watch();

    button.open_modal().await.unwrap();
    button.select_wallet("a").await.unwrap();

    assert_eq!(phases.next().await, Some(ButtonPhase::ModalOpen(Vec::new())));
    assert!(matches!(phases.next().await, Some(ButtonPhase::ModalOpen(ref w)) if w.len() == 1));
    assert_eq!(phases.next().await, Some(ButtonPhase::Connecting("a".into())));
    assert_eq!(phases.next().await, Some(ButtonPhase::Connected(ADDRESS_A.into())));
}

#[tokio::test]
async fn session_is_restored_without_prompting() {
    let a = MockModule::new("a").shared();
    let kit = StellarWalletsKit::new(config_with(&[a.clone()]).with_selected_wallet("a")).unwrap();
    let events = Rc::new(Events::default());
    let button = button(Rc::new(kit), &events);

    assert_eq!(button.restore_session().await.unwrap().as_deref(), Some(ADDRESS_A));
    assert!(button.is_connected());
    assert_eq!(a.calls(), ["get_address:skip"]);
}

#[tokio::test]
async fn nothing_to_restore_without_selection() {
    let kit = Rc::new(kit_with(&[MockModule::new("a").shared()]));
    let events = Rc::new(Events::default());
    let button = button(kit, &events);

    assert_eq!(button.restore_session().await, Ok(None));
    assert_eq!(button.phase().get(), ButtonPhase::Disconnected);
}

#[tokio::test]
async fn teardown_disconnects_unless_skipped() {
    let kit = Rc::new(kit_with(&[MockModule::new("a").shared()]));
    let events = Rc::new(Events::default());

    let kept = button(kit.clone(), &events);
    kept.open_modal().await.unwrap();
    kept.select_wallet("a").await.unwrap();
    kept.teardown(true).await.unwrap();
    assert!(kept.is_connected());
    assert_eq!(kit.selected_wallet_id().as_deref(), Some("a"));

    kept.teardown(false).await.unwrap();
    assert!(!kept.is_connected());
    assert_eq!(kit.selected_wallet_id(), None);
}

#[tokio::test]
async fn missing_account_has_no_balance() {
    let kit = Rc::new(kit_with(&[MockModule::new("a").shared()]));
    let events = Rc::new(Events::default());
    let button = button(kit, &events).with_balance_source(Rc::new(FixedBalance(None)));

    assert_eq!(button.refresh_balance().await, Ok(None));
    button.open_modal().await.unwrap();
    button.select_wallet("a").await.unwrap();
    assert_eq!(button.refresh_balance().await, Ok(None));
    assert_eq!(button.balance().get(), None);
}

#[test]
fn horizon_follows_option_then_network() {
    let kit = Rc::new(kit_with(&[]));
    let events = Rc::new(Events::default());

    let default = button(kit.clone(), &events);
    assert_eq!(default.horizon_url().as_deref(), Some("https://horizon-testnet.stellar.org"));

    kit.set_network(Network::Standalone);
    assert_eq!(default.horizon_url(), None);

    let callbacks = ButtonCallbacks::new(|_: &ConnectEvent| {}, || {});
    let custom = ButtonController::new(
        kit,
        ButtonOptions::default().with_horizon("http://localhost:8000").with_text("Sign in"),
        callbacks,
    );
    assert_eq!(custom.horizon_url().as_deref(), Some("http://localhost:8000"));
    assert_eq!(custom.label(), "Sign in");
}
