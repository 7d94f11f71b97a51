//! JsWalletsKit: the kit as the `StellarWalletsKit` JS class

use super::bridge::{error_to_js, get, object, to_js};
use super::dom::{close_later, open_url, ButtonView, Overlay};
use super::horizon::HorizonBalance;
use super::log;
use super::modules::{builtin_registry, InjectedSep43Module};
use super::storage::LocalStoragePreferences;
use crate::core::error::{KitError, KitResult};
use crate::core::module::ModuleRef;
use crate::core::types::*;
use crate::kit::{KitConfig, StellarWalletsKit};
use crate::storage::PreferenceStore;
use crate::ui::*;
use js_sys::Function;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

// =============================================================================
// CONSTRUCTOR PARAMS
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct KitParams {
    /// Name (`"testnet"`) or full passphrase
    network: String,
    #[serde(default)]
    modules: Option<ModuleSelection>,
    #[serde(default)]
    selected_wallet_id: Option<String>,
    #[serde(default)]
    theme: Theme,
    #[serde(default)]
    probe_timeout_ms: Option<u64>,
    /// Extra SEP-43 wallets found at `window.<global>`
    #[serde(default)]
    injected: Vec<InjectedWallet>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModuleSelection {
    /// `"all"` or `"sep43"`
    Preset(String),
    Ids(Vec<String>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InjectedWallet {
    id: String,
    name: String,
    global: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    url: String,
    #[serde(default, rename = "type")]
    module_type: Option<ModuleType>,
}

impl InjectedWallet {
    fn into_module(self) -> ModuleRef {
        let descriptor = ModuleDescriptor::new(self.id, self.name, self.module_type.unwrap_or(ModuleType::HotWallet))
            .with_icon(self.icon)
            .with_url(self.url);
        Rc::new(InjectedSep43Module::new(descriptor, self.global))
    }
}

fn parse_network(value: &str) -> KitResult<Network> {
    Network::from_str(value).ok_or_else(|| KitError::NetworkError(format!("unknown network '{}'", value)))
}

fn select_modules(selection: Option<ModuleSelection>) -> KitResult<Vec<ModuleRef>> {
    let registry = builtin_registry();
    match selection {
        None => Ok(registry.all_modules(None)),
        Some(ModuleSelection::Preset(preset)) => match preset.as_str() {
            "all" => Ok(registry.all_modules(None)),
            "sep43" => Ok(registry.sep43_modules(None)),
            other => Err(KitError::InvalidState(format!("unknown module preset '{}'", other))),
        },
        Some(ModuleSelection::Ids(ids)) => ids
            .iter()
            .map(|id| registry.get(id).ok_or_else(|| KitError::UnknownWalletId(id.clone())))
            .collect(),
    }
}

/// Undefined or null parse as the type's default
fn from_js<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn callback(params: &JsValue, name: &str) -> Option<Function> {
    get(params, name).and_then(|v| v.dyn_into::<Function>().ok())
}

fn required_callback(params: &JsValue, name: &str) -> Result<Function, JsValue> {
    callback(params, name).ok_or_else(|| JsValue::from_str(&format!("{} must be a function", name)))
}

fn param_string(params: &JsValue, name: &str) -> Option<String> {
    get(params, name).and_then(|v| v.as_string())
}

fn invoke(f: &Function, arg: &JsValue) {
    if let Err(e) = f.call1(&JsValue::NULL, arg) {
        log!("[StellarWalletsKit] callback threw: {:?}", e);
    }
}

fn js_err(e: KitError) -> JsValue {
    error_to_js(&e)
}

// =============================================================================
// JS CLASS
// =============================================================================

#[wasm_bindgen(js_name = "StellarWalletsKit")]
pub struct JsWalletsKit {
    kit: Rc<StellarWalletsKit>,
    theme: Theme,
    button: RefCell<Option<ButtonView>>,
    modal: Rc<RefCell<Option<Overlay>>>,
}

#[wasm_bindgen(js_class = "StellarWalletsKit")]
impl JsWalletsKit {
    #[wasm_bindgen(constructor)]
    pub fn new(params: JsValue) -> Result<JsWalletsKit, JsValue> {
        let params: KitParams =
            serde_wasm_bindgen::from_value(params).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let network = parse_network(&params.network).map_err(js_err)?;
        let mut modules = select_modules(params.modules).map_err(js_err)?;
        modules.extend(params.injected.into_iter().map(InjectedWallet::into_module));

        let mut config = KitConfig::new(network).with_modules(modules);
        if let Some(id) = params.selected_wallet_id {
            config = config.with_selected_wallet(id);
        }
        if let Some(ms) = params.probe_timeout_ms {
            config = config.with_probe_timeout(Duration::from_millis(ms));
        }
        match LocalStoragePreferences::open() {
            Ok(store) => config = config.with_preferences(Rc::new(store) as Rc<dyn PreferenceStore>),
            Err(e) => log!("[StellarWalletsKit] {}; preferences kept in memory", e),
        }

        let kit = StellarWalletsKit::new(config).map_err(js_err)?;
        log!("[StellarWalletsKit] ready on {}", network);
        Ok(Self {
            kit: Rc::new(kit),
            theme: params.theme,
            button: RefCell::new(None),
            modal: Rc::new(RefCell::new(None)),
        })
    }

    // =========================================================================
    // KIT
    // =========================================================================

    #[wasm_bindgen(js_name = "getSupportedWallets")]
    pub async fn get_supported_wallets(&self) -> Result<JsValue, JsValue> {
        let wallets = self.kit.get_supported_wallets().await;
        to_js(&wallets)
    }

    #[wasm_bindgen(js_name = "setWallet")]
    pub fn set_wallet(&self, id: &str) -> Result<(), JsValue> {
        self.kit.set_wallet(id).map_err(js_err)
    }

    #[wasm_bindgen(js_name = "setNetwork")]
    pub fn set_network(&self, network: &str) -> Result<(), JsValue> {
        self.kit.set_network(parse_network(network).map_err(js_err)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = "getAddress")]
    pub async fn get_address(&self, params: JsValue) -> Result<JsValue, JsValue> {
        let params: GetAddressParams = from_js(params)?;
        let kit = self.kit.clone();
        let result = kit.get_address(params).await.map_err(js_err)?;
        to_js(&result)
    }

    #[wasm_bindgen(js_name = "signTransaction")]
    pub async fn sign_transaction(&self, xdr: String, opts: JsValue) -> Result<JsValue, JsValue> {
        let opts: SignOptions = from_js(opts)?;
        let kit = self.kit.clone();
        let result = kit.sign_transaction(&xdr, opts).await.map_err(js_err)?;
        to_js(&result)
    }

    #[wasm_bindgen(js_name = "signAuthEntry")]
    pub async fn sign_auth_entry(&self, entry: String, opts: JsValue) -> Result<JsValue, JsValue> {
        let opts: SignOptions = from_js(opts)?;
        let kit = self.kit.clone();
        let result = kit.sign_auth_entry(&entry, opts).await.map_err(js_err)?;
        to_js(&result)
    }

    #[wasm_bindgen(js_name = "signMessage")]
    pub async fn sign_message(&self, message: String, opts: JsValue) -> Result<JsValue, JsValue> {
        let opts: SignOptions = from_js(opts)?;
        let kit = self.kit.clone();
        let result = kit.sign_message(&message, opts).await.map_err(js_err)?;
        to_js(&result)
    }

    #[wasm_bindgen(js_name = "getNetwork")]
    pub async fn get_network(&self) -> Result<JsValue, JsValue> {
        let kit = self.kit.clone();
        let result = kit.get_network().await.map_err(js_err)?;
        to_js(&result)
    }

    pub async fn disconnect(&self) -> Result<(), JsValue> {
        let kit = self.kit.clone();
        kit.disconnect().await.map_err(js_err)
    }

    // =========================================================================
    // BUTTONS & MODAL
    // =========================================================================

    /// `{container, onConnect, onDisconnect, onClosed?, onError?, horizonUrl?, buttonText?}`
    #[wasm_bindgen(js_name = "createButton")]
    pub fn create_button(&self, params: JsValue) -> Result<(), JsValue> {
        let container: Element = get(&params, "container")
            .and_then(|v| v.dyn_into().ok())
            .ok_or_else(|| JsValue::from_str("container must be an element"))?;

        let mut options = ButtonOptions::default();
        if let Some(text) = param_string(&params, "buttonText") {
            options = options.with_text(text);
        }
        if let Some(url) = param_string(&params, "horizonUrl") {
            options = options.with_horizon(url);
        }

        let controller = self.button_controller(&params, options)?;
        let view = ButtonView::create(&container, controller, self.theme.clone(), ModalOptions::default())?;
        self.install_button(view)
    }

    /// `{connectEl, disconnectEl?, onConnect, onDisconnect}`
    #[wasm_bindgen(js_name = "assignButtons")]
    pub fn assign_buttons(&self, params: JsValue) -> Result<(), JsValue> {
        let connect_el: HtmlElement = get(&params, "connectEl")
            .and_then(|v| v.dyn_into().ok())
            .ok_or_else(|| JsValue::from_str("connectEl must be an element"))?;
        let disconnect_el: Option<HtmlElement> = get(&params, "disconnectEl").and_then(|v| v.dyn_into().ok());

        let controller = self.button_controller(&params, ButtonOptions::default())?;
        let view = ButtonView::assign(
            &connect_el,
            disconnect_el.as_ref(),
            controller,
            self.theme.clone(),
            ModalOptions::default(),
        )?;
        self.install_button(view)
    }

    /// `{skipDisconnect?}`
    #[wasm_bindgen(js_name = "removeButton")]
    pub async fn remove_button(&self, params: JsValue) -> Result<(), JsValue> {
        let skip_disconnect = get(&params, "skipDisconnect").and_then(|v| v.as_bool()).unwrap_or(false);
        let view = self
            .button
            .borrow_mut()
            .take()
            .ok_or_else(|| js_err(KitError::InvalidState("no button to remove".into())))?;
        let controller = view.controller().clone();
        drop(view);
        controller.teardown(skip_disconnect).await.map_err(js_err)
    }

    /// `{onWalletSelected, onClosed?, modalTitle?, notAvailableText?}`
    #[wasm_bindgen(js_name = "openModal")]
    pub async fn open_modal(&self, params: JsValue) -> Result<(), JsValue> {
        if self.modal.borrow().is_some() {
            return Err(js_err(KitError::InvalidState("modal already open".into())));
        }

        let on_selected = required_callback(&params, "onWalletSelected")?;
        let mut callbacks = ModalCallbacks::new(move |wallet| match to_js(wallet) {
            Ok(value) => invoke(&on_selected, &value),
            Err(e) => log!("[StellarWalletsKit] {:?}", e),
        });
        if let Some(on_closed) = callback(&params, "onClosed") {
            callbacks = callbacks.on_closed(move || invoke(&on_closed, &JsValue::UNDEFINED));
        }

        let mut options = ModalOptions::default();
        if let Some(title) = param_string(&params, "modalTitle") {
            options = options.with_title(title);
        }
        if let Some(text) = param_string(&params, "notAvailableText") {
            options = options.with_not_available_text(text);
        }

        let controller = Rc::new(ModalController::new(self.kit.clone(), options.clone(), callbacks));
        let wallets = controller.open().await;

        let picker = controller.clone();
        let slot = Rc::downgrade(&self.modal);
        let on_pick: Rc<dyn Fn(&SupportedWallet)> = Rc::new(move |wallet: &SupportedWallet| {
            match picker.select(&wallet.id) {
                Ok(ModalSelection::Install { url, .. }) => open_url(&url),
                Ok(ModalSelection::Selected(_)) => close_later(slot.clone()),
                Err(e) => log!("[StellarWalletsKit] {}", e),
            }
        });
        let closer = controller.clone();
        let slot = Rc::downgrade(&self.modal);
        let on_close: Rc<dyn Fn()> = Rc::new(move || {
            closer.close();
            close_later(slot.clone());
        });

        let overlay = Overlay::wallet_list(&self.theme, &options, &wallets, on_pick, on_close)?;
        *self.modal.borrow_mut() = Some(overlay);
        Ok(())
    }
}

impl JsWalletsKit {
    fn button_controller(&self, params: &JsValue, options: ButtonOptions) -> Result<Rc<ButtonController>, JsValue> {
        if self.button.borrow().is_some() {
            return Err(js_err(KitError::InvalidState("a button is already mounted".into())));
        }

        let on_connect = required_callback(params, "onConnect")?;
        let on_disconnect = required_callback(params, "onDisconnect")?;
        let mut callbacks = ButtonCallbacks::new(
            move |event: &ConnectEvent| {
                let arg = object(&[
                    ("address", JsValue::from_str(&event.address)),
                    ("walletId", JsValue::from_str(&event.wallet_id)),
                ]);
                invoke(&on_connect, &arg);
            },
            move || invoke(&on_disconnect, &JsValue::UNDEFINED),
        );
        if let Some(on_closed) = callback(params, "onClosed") {
            callbacks = callbacks.on_closed(move || invoke(&on_closed, &JsValue::UNDEFINED));
        }
        if let Some(on_error) = callback(params, "onError") {
            callbacks = callbacks.on_error(move |shape| match to_js(shape) {
                Ok(value) => invoke(&on_error, &value),
                Err(e) => log!("[StellarWalletsKit] {:?}", e),
            });
        }

        let controller = ButtonController::new(self.kit.clone(), options, callbacks);
        let controller = match controller.horizon_url() {
            Some(url) => controller.with_balance_source(Rc::new(HorizonBalance::new(url))),
            None => controller,
        };
        Ok(Rc::new(controller))
    }

    /// Mount the view and reconnect a remembered wallet in the background
    fn install_button(&self, view: ButtonView) -> Result<(), JsValue> {
        let controller = view.controller().clone();
        *self.button.borrow_mut() = Some(view);

        if self.kit.selected_wallet_id().is_some() {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = controller.restore_session().await {
                    log!("[StellarWalletsKit] session not restored: {}", e);
                }
            });
        }
        Ok(())
    }
}
