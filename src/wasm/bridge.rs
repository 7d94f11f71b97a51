//! Calls into objects injected by wallet extensions and SDK bundles

use crate::core::error::{parse_error, ErrorShape, KitError, KitResult};
use js_sys::{Array, Function, Object, Promise, Reflect};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Resolve a dotted path on the global object, e.g. `"hana.stellar"`
pub(crate) fn global_path(path: &str) -> Option<JsValue> {
    let mut current: JsValue = js_sys::global().into();
    for segment in path.split('.') {
        current = get(&current, segment)?;
    }
    Some(current)
}

/// Property lookup that treats `undefined`/`null` as absent
pub(crate) fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

pub(crate) fn get_string(target: &JsValue, key: &str) -> Option<String> {
    get(target, key).and_then(|v| v.as_string()).filter(|s| !s.is_empty())
}

pub(crate) fn has_method(target: &JsValue, name: &str) -> bool {
    get(target, name).map(|v| v.is_function()).unwrap_or(false)
}

/// `target[name](...args)`, awaiting the result when it is a promise or thenable
pub(crate) async fn call(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("{} is not a function", name)))?;
    let js_args: Array = args.iter().collect();
    let value = method.apply(target, &js_args)?;
    JsFuture::from(Promise::resolve(&value)).await
}

/// Like [`call`] but maps rejections and `{ error }` results into `KitError`
pub(crate) async fn call_wallet(target: &JsValue, name: &str, args: &[JsValue]) -> KitResult<JsValue> {
    let value = call(target, name, args).await.map_err(wallet_error)?;
    if let Some(err) = get(&value, "error") {
        return Err(wallet_error(err));
    }
    Ok(value)
}

pub(crate) fn object(entries: &[(&str, JsValue)]) -> JsValue {
    let obj = Object::new();
    for (key, value) in entries {
        if !value.is_undefined() {
            let _ = Reflect::set(&obj, &JsValue::from_str(key), value);
        }
    }
    obj.into()
}

pub(crate) fn opt_str(value: Option<&str>) -> JsValue {
    value.map(JsValue::from_str).unwrap_or(JsValue::UNDEFINED)
}

pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Normalize a thrown or rejected JS value into `{code, message, ext}`
pub fn parse_js_error(value: &JsValue) -> ErrorShape {
    if let Some(s) = value.as_string() {
        return parse_error(&Value::String(s));
    }

    let mut json: Value = serde_wasm_bindgen::from_value(value.clone()).unwrap_or(Value::Null);
    // `Error.message` is not enumerable, so serde never sees it
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        let message: String = err.message().into();
        match json.as_object_mut() {
            Some(map) => {
                map.entry("message").or_insert(Value::String(message));
            }
            None => json = serde_json::json!({ "message": message }),
        }
    }
    parse_error(&json)
}

pub(crate) fn wallet_error(value: JsValue) -> KitError {
    KitError::Wallet(parse_js_error(&value))
}

/// Error value handed back to JS callers
pub(crate) fn error_to_js(error: &KitError) -> JsValue {
    to_js(&error.to_shape()).unwrap_or_else(|_| JsValue::from_str(&error.to_string()))
}
