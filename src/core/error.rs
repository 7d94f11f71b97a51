//! Error taxonomy and normalization into `{code, message, ext}`

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub type KitResult<T> = Result<T, KitError>;

pub const UNHANDLED_CODE: i64 = -1;
pub const UNHANDLED_MESSAGE: &str = "Unhandled error from the wallet";

/// Uniform error shape handed to host applications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorShape {
    pub code: i64,
    pub message: String,
    pub ext: Option<Value>,
}

impl ErrorShape {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), ext: None }
    }
}

impl fmt::Display for ErrorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KitError {
    /// Error raised by the wallet itself, already normalized
    #[error("{0}")]
    Wallet(ErrorShape),
    #[error("wallet '{0}' is not available")]
    NotAvailable(String),
    #[error("{wallet} does not support {operation}")]
    Unsupported { wallet: String, operation: String },
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("user rejected the request: {0}")]
    UserRejected(String),
    #[error("no wallet selected; call set_wallet first")]
    NoWalletSelected,
    #[error("unknown wallet id '{0}'")]
    UnknownWalletId(String),
    #[error("signing failed: {0}")]
    SigningFailed(String),
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("'{wallet}' did not answer within {millis}ms")]
    Timeout { wallet: String, millis: u64 },
    #[error("preference store: {0}")]
    Storage(String),
    #[error("wallet id '{0}' is configured twice")]
    DuplicateWalletId(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl KitError {
    pub fn unsupported(wallet: &str, operation: &str) -> Self {
        KitError::Unsupported { wallet: wallet.to_string(), operation: operation.to_string() }
    }

    pub fn code(&self) -> i64 {
        match self {
            KitError::Wallet(shape) => shape.code,
            KitError::NotAvailable(_) => -2,
            KitError::Unsupported { .. } => -3,
            KitError::AccessDenied(_) => -4,
            KitError::UserRejected(_) => -5,
            KitError::NoWalletSelected => -6,
            KitError::UnknownWalletId(_) => -7,
            KitError::SigningFailed(_) => -8,
            KitError::NetworkError(_) => -9,
            KitError::Timeout { .. } => -10,
            KitError::Storage(_) => -11,
            KitError::DuplicateWalletId(_) => -12,
            KitError::InvalidState(_) => -13,
        }
    }

    pub fn to_shape(&self) -> ErrorShape {
        match self {
            KitError::Wallet(shape) => shape.clone(),
            other => ErrorShape::new(other.code(), other.to_string()),
        }
    }
}

impl From<ErrorShape> for KitError {
    fn from(shape: ErrorShape) -> Self { KitError::Wallet(shape) }
}

impl From<serde_json::Error> for KitError {
    fn from(e: serde_json::Error) -> Self { KitError::Storage(e.to_string()) }
}

/// Normalize anything a wallet threw into an [`ErrorShape`].
///
/// Nested `error.{code,message,ext}` wins over top-level fields; a bare string
/// becomes the message. Missing pieces fall back to `-1`, the generic message
/// and `null`.
pub fn parse_error(value: &Value) -> ErrorShape {
    let nested = value.get("error").filter(|v| v.is_object());
    let pick = |field: &str| {
        nested
            .and_then(|e| e.get(field))
            .filter(|v| !v.is_null())
            .or_else(|| value.get(field).filter(|v| !v.is_null()))
    };

    let code = pick("code").and_then(code_from_value).unwrap_or(UNHANDLED_CODE);
    let message = pick("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .or_else(|| value.as_str().filter(|s| !s.is_empty()))
        .unwrap_or(UNHANDLED_MESSAGE)
        .to_string();
    let ext = pick("ext").cloned();

    ErrorShape { code, message, ext }
}

fn code_from_value(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_names(shape: &ErrorShape) -> Vec<String> {
        let value = serde_json::to_value(shape).unwrap();
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    #[test]
    fn plain_string_becomes_message() {
        let shape = parse_error(&json!("User declined access"));
        assert_eq!(shape.code, -1);
        assert_eq!(shape.message, "User declined access");
        assert_eq!(shape.ext, None);
        assert_eq!(field_names(&shape), vec!["code", "ext", "message"]);
    }

    #[test]
    fn structured_object_keeps_code_and_message() {
        let shape = parse_error(&json!({"code": -4, "message": "rejected", "ext": ["a"]}));
        assert_eq!(shape, ErrorShape { code: -4, message: "rejected".into(), ext: Some(json!(["a"])) });

        let nested = parse_error(&json!({"error": {"code": 4001, "message": "nested"}, "code": 1}));
        assert_eq!(nested.code, 4001);
        assert_eq!(nested.message, "nested");
    }

    #[test]
    fn unstructured_object_gets_defaults() {
        let shape = parse_error(&json!({"foo": "bar"}));
        assert_eq!(shape.code, UNHANDLED_CODE);
        assert_eq!(shape.message, UNHANDLED_MESSAGE);
        assert!(shape.ext.is_none());
        assert_eq!(field_names(&shape), vec!["code", "ext", "message"]);

        let null = parse_error(&Value::Null);
        assert_eq!(null.code, UNHANDLED_CODE);
    }

    #[test]
    fn string_codes_are_parsed() {
        assert_eq!(parse_error(&json!({"code": "-3"})).code, -3);
    }

    #[test]
    fn kit_errors_keep_stable_codes() {
        assert_eq!(KitError::NoWalletSelected.to_shape().code, -6);
        assert_eq!(KitError::UnknownWalletId("x".into()).code(), -7);
        let shape = ErrorShape::new(42, "from wallet");
        assert_eq!(KitError::from(shape.clone()).to_shape(), shape);
    }
}
