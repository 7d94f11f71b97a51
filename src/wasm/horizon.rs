//! HorizonBalance: native balance over `fetch`

use crate::core::error::{KitError, KitResult};
use crate::ui::balance::{account_url, parse_native_balance, BalanceSource};
use async_trait::async_trait;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

pub struct HorizonBalance {
    horizon_url: String,
}

impl HorizonBalance {
    pub fn new(horizon_url: impl Into<String>) -> Self {
        Self { horizon_url: horizon_url.into() }
    }
}

#[async_trait(?Send)]
impl BalanceSource for HorizonBalance {
    async fn native_balance(&self, address: &str) -> KitResult<Option<String>> {
        let url = account_url(&self.horizon_url, address);
        let net = |e: wasm_bindgen::JsValue| KitError::NetworkError(format!("{}: {:?}", url, e));

        let init = RequestInit::new();
        init.set_method("GET");
        init.set_mode(RequestMode::Cors);
        let request = Request::new_with_str_and_init(&url, &init).map_err(net)?;

        let window = web_sys::window().ok_or_else(|| KitError::NetworkError("no window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(net)?
            .dyn_into()
            .map_err(net)?;

        // Unfunded accounts are simply not there yet
        if response.status() == 404 {
            return Ok(None);
        }
        if !response.ok() {
            return Err(KitError::NetworkError(format!("{}: HTTP {}", url, response.status())));
        }

        let body = JsFuture::from(response.json().map_err(net)?).await.map_err(net)?;
        let account: Value = serde_wasm_bindgen::from_value(body)
            .map_err(|e| KitError::NetworkError(e.to_string()))?;
        Ok(parse_native_balance(&account))
    }
}
