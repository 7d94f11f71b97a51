//! DOM views driven by the UI controllers.
//!
//! Views hold `Weak` handles in their event closures; dropping a view detaches
//! its listeners and removes anything it added to the page.

use super::log;
use crate::core::types::SupportedWallet;
use crate::ui::{shorten_address, ButtonController, ButtonPhase, ModalOptions, Theme};
use futures::StreamExt;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, EventTarget, HtmlElement};

type Handler = Closure<dyn FnMut()>;

// =============================================================================
// HELPERS
// =============================================================================

pub(crate) fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn element(doc: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = doc.create_element(tag)?.dyn_into()?;
    el.set_class_name(class);
    Ok(el)
}

fn listen(target: &EventTarget, f: impl FnMut() + 'static) -> Result<Handler, JsValue> {
    let handler = Closure::<dyn FnMut()>::new(f);
    target.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    Ok(handler)
}

fn unlisten(target: &EventTarget, handler: &Handler) {
    let _ = target.remove_event_listener_with_callback("click", handler.as_ref().unchecked_ref());
}

pub(crate) fn apply_theme(el: &HtmlElement, theme: &Theme) -> Result<(), JsValue> {
    let style = el.style();
    for (name, value) in theme.css_variables() {
        style.set_property(&name, &value)?;
    }
    Ok(())
}

/// Install page for a wallet that is not present
pub(crate) fn open_url(url: &str) {
    if url.is_empty() {
        return;
    }
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url_and_target(url, "_blank");
    }
}

/// Drop an overlay after the current event handler has returned
pub(crate) fn close_later(slot: Weak<RefCell<Option<Overlay>>>) {
    spawn_local(async move {
        if let Some(slot) = slot.upgrade() {
            slot.borrow_mut().take();
        }
    });
}

// =============================================================================
// OVERLAY
// =============================================================================

/// Modal layer appended to `<body>`
pub(crate) struct Overlay {
    root: HtmlElement,
    handlers: Vec<(EventTarget, Handler)>,
}

impl Overlay {
    fn shell(theme: &Theme, title: &str, on_close: Rc<dyn Fn()>) -> Result<(Self, HtmlElement), JsValue> {
        let doc = document()?;
        let root = element(&doc, "div", "swk-overlay")?;
        apply_theme(&root, theme)?;

        let dialog = element(&doc, "div", "swk-dialog")?;
        let header = element(&doc, "div", "swk-dialog-header")?;
        let heading = element(&doc, "h3", "swk-dialog-title")?;
        heading.set_text_content(Some(title));
        let close = element(&doc, "button", "swk-dialog-close")?;
        close.set_text_content(Some("\u{00d7}"));
        header.append_child(&heading)?;
        header.append_child(&close)?;
        dialog.append_child(&header)?;
        root.append_child(&dialog)?;

        let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
        body.append_child(&root)?;

        let mut overlay = Self { root, handlers: Vec::new() };
        overlay.on(&close, move || on_close())?;
        Ok((overlay, dialog))
    }

    fn on(&mut self, target: &HtmlElement, f: impl FnMut() + 'static) -> Result<(), JsValue> {
        let handler = listen(target, f)?;
        self.handlers.push((target.clone().into(), handler));
        Ok(())
    }

    /// Wallet picker; unavailable entries carry the "not available" badge
    pub(crate) fn wallet_list(
        theme: &Theme,
        options: &ModalOptions,
        wallets: &[SupportedWallet],
        on_pick: Rc<dyn Fn(&SupportedWallet)>,
        on_close: Rc<dyn Fn()>,
    ) -> Result<Self, JsValue> {
        let (mut overlay, dialog) = Self::shell(theme, &options.title, on_close)?;
        let doc = document()?;
        let list = element(&doc, "ul", "swk-wallet-list")?;

        for wallet in wallets {
            let item = element(&doc, "li", "swk-wallet")?;
            if !wallet.is_available {
                item.class_list().add_1("swk-wallet-unavailable")?;
            }
            if !wallet.icon.is_empty() {
                let icon = element(&doc, "img", "swk-wallet-icon")?;
                icon.set_attribute("src", &wallet.icon)?;
                icon.set_attribute("alt", &wallet.name)?;
                item.append_child(&icon)?;
            }
            let name = element(&doc, "span", "swk-wallet-name")?;
            name.set_text_content(Some(&wallet.name));
            item.append_child(&name)?;
            if !wallet.is_available {
                let badge = element(&doc, "span", "swk-wallet-badge")?;
                badge.set_text_content(Some(&options.not_available_text));
                item.append_child(&badge)?;
            }
            list.append_child(&item)?;

            let picked = wallet.clone();
            let on_pick = on_pick.clone();
            overlay.on(&item, move || on_pick(&picked))?;
        }

        dialog.append_child(&list)?;
        Ok(overlay)
    }

    /// Connected account panel with a disconnect action
    pub(crate) fn profile(
        theme: &Theme,
        address: &str,
        balance: Option<String>,
        on_disconnect: Rc<dyn Fn()>,
        on_close: Rc<dyn Fn()>,
    ) -> Result<Self, JsValue> {
        let (mut overlay, dialog) = Self::shell(theme, &shorten_address(address), on_close)?;
        let doc = document()?;

        if let Some(balance) = balance {
            let line = element(&doc, "p", "swk-balance")?;
            line.set_text_content(Some(&format!("{} XLM", balance)));
            dialog.append_child(&line)?;
        }
        let full = element(&doc, "p", "swk-address")?;
        full.set_text_content(Some(address));
        dialog.append_child(&full)?;

        let button = element(&doc, "button", "swk-disconnect")?;
        button.set_text_content(Some("Disconnect"));
        dialog.append_child(&button)?;
        overlay.on(&button, move || on_disconnect())?;

        Ok(overlay)
    }
}

impl Drop for Overlay {
    fn drop(&mut self) {
        for (target, handler) in &self.handlers {
            unlisten(target, handler);
        }
        self.root.remove();
    }
}

// =============================================================================
// BUTTON
// =============================================================================

/// Connect button bound to a [`ButtonController`]
pub(crate) struct ButtonView {
    inner: Rc<ButtonViewInner>,
}

struct ButtonViewInner {
    controller: Rc<ButtonController>,
    theme: Theme,
    modal_options: ModalOptions,
    /// Created by `createButton`: relabelled on every phase and removed on drop
    owned: Option<HtmlElement>,
    overlay: Rc<RefCell<Option<Overlay>>>,
    handlers: RefCell<Vec<(EventTarget, Handler)>>,
}

impl ButtonView {
    /// `createButton`: a new `<button>` appended to `container`
    pub(crate) fn create(
        container: &Element,
        controller: Rc<ButtonController>,
        theme: Theme,
        modal_options: ModalOptions,
    ) -> Result<Self, JsValue> {
        let doc = document()?;
        let button = element(&doc, "button", "swk-button")?;
        apply_theme(&button, &theme)?;
        button.set_text_content(Some(&controller.label()));
        container.append_child(&button)?;

        let view = Self::bind(controller, theme, modal_options, Some(button.clone()));
        view.listen_toggle(&button)?;
        view.render_labels();
        Ok(view)
    }

    /// `assignButtons`: host-owned elements; text is left alone
    pub(crate) fn assign(
        connect_el: &HtmlElement,
        disconnect_el: Option<&HtmlElement>,
        controller: Rc<ButtonController>,
        theme: Theme,
        modal_options: ModalOptions,
    ) -> Result<Self, JsValue> {
        let view = Self::bind(controller, theme, modal_options, None);
        view.listen_toggle(connect_el)?;
        if let Some(el) = disconnect_el {
            let weak = Rc::downgrade(&view.inner);
            let handler = listen(el, move || {
                if let Some(inner) = weak.upgrade() {
                    spawn_local(async move {
                        let _ = inner.controller.disconnect().await;
                    });
                }
            })?;
            view.inner.handlers.borrow_mut().push((el.clone().into(), handler));
        }
        Ok(view)
    }

    pub(crate) fn controller(&self) -> &Rc<ButtonController> {
        &self.inner.controller
    }

    fn bind(controller: Rc<ButtonController>, theme: Theme, modal_options: ModalOptions, owned: Option<HtmlElement>) -> Self {
        Self {
            inner: Rc::new(ButtonViewInner {
                controller,
                theme,
                modal_options,
                owned,
                overlay: Rc::new(RefCell::new(None)),
                handlers: RefCell::new(Vec::new()),
            }),
        }
    }

    fn listen_toggle(&self, target: &HtmlElement) -> Result<(), JsValue> {
        let weak = Rc::downgrade(&self.inner);
        let handler = listen(target, move || {
            if let Some(inner) = weak.upgrade() {
                ButtonViewInner::toggle(inner);
            }
        })?;
        self.inner.handlers.borrow_mut().push((target.clone().into(), handler));
        Ok(())
    }

    /// Relabel on every phase change; ends once the controller is dropped
    fn render_labels(&self) {
        let mut phases = self.inner.controller.phase().watch();
        let weak = Rc::downgrade(&self.inner);
        spawn_local(async move {
            while phases.next().await.is_some() {
                let Some(inner) = weak.upgrade() else { break };
                if let Some(button) = &inner.owned {
                    button.set_text_content(Some(&inner.controller.label()));
                }
            }
        });
    }
}

impl ButtonViewInner {
    fn toggle(inner: Rc<Self>) {
        match inner.controller.phase().get() {
            ButtonPhase::Disconnected => spawn_local(async move { inner.show_wallets().await }),
            ButtonPhase::Connected(address) => {
                if let Err(e) = inner.show_profile(&address) {
                    log!("[StellarWalletsKit] profile: {:?}", e);
                }
            }
            _ => {}
        }
    }

    async fn show_wallets(self: Rc<Self>) {
        let wallets = match self.controller.open_modal().await {
            Ok(wallets) => wallets,
            Err(e) => {
                log!("[StellarWalletsKit] {}", e);
                return;
            }
        };

        let weak = Rc::downgrade(&self);
        let on_pick: Rc<dyn Fn(&SupportedWallet)> = Rc::new(move |wallet: &SupportedWallet| {
            if !wallet.is_available {
                open_url(&wallet.url);
                return;
            }
            let Some(inner) = weak.upgrade() else { return };
            let id = wallet.id.clone();
            spawn_local(async move {
                inner.overlay.borrow_mut().take();
                // failures already reach the host through onError
                let _ = inner.controller.select_wallet(&id).await;
            });
        });

        let weak = Rc::downgrade(&self);
        let on_close: Rc<dyn Fn()> = Rc::new(move || {
            let Some(inner) = weak.upgrade() else { return };
            let _ = inner.controller.close_modal();
            close_later(Rc::downgrade(&inner.overlay));
        });

        match Overlay::wallet_list(&self.theme, &self.modal_options, &wallets, on_pick, on_close) {
            Ok(overlay) => *self.overlay.borrow_mut() = Some(overlay),
            Err(e) => {
                log!("[StellarWalletsKit] modal: {:?}", e);
                let _ = self.controller.close_modal();
            }
        }
    }

    fn show_profile(self: &Rc<Self>, address: &str) -> Result<(), JsValue> {
        let weak = Rc::downgrade(self);
        let on_disconnect: Rc<dyn Fn()> = Rc::new(move || {
            let Some(inner) = weak.upgrade() else { return };
            spawn_local(async move {
                inner.overlay.borrow_mut().take();
                let _ = inner.controller.disconnect().await;
            });
        });
        let slot = Rc::downgrade(&self.overlay);
        let on_close: Rc<dyn Fn()> = Rc::new(move || close_later(slot.clone()));

        let balance = self.controller.balance().get();
        let overlay = Overlay::profile(&self.theme, address, balance, on_disconnect, on_close)?;
        *self.overlay.borrow_mut() = Some(overlay);
        Ok(())
    }
}

impl Drop for ButtonViewInner {
    fn drop(&mut self) {
        for (target, handler) in self.handlers.borrow().iter() {
            unlisten(target, handler);
        }
        if let Some(button) = &self.owned {
            button.remove();
        }
    }
}
