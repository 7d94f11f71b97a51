//! Native XLM balance for the connected account (button badge)

use crate::core::error::KitResult;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait(?Send)]
pub trait BalanceSource {
    /// `None` when the account does not exist on the network yet
    async fn native_balance(&self, address: &str) -> KitResult<Option<String>>;
}

/// Extract the native balance from a Horizon `/accounts/{id}` response
pub fn parse_native_balance(account: &Value) -> Option<String> {
    account
        .get("balances")?
        .as_array()?
        .iter()
        .find(|b| b.get("asset_type").and_then(Value::as_str) == Some("native"))
        .and_then(|b| b.get("balance"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub fn account_url(horizon_url: &str, address: &str) -> String {
    format!("{}/accounts/{}", horizon_url.trim_end_matches('/'), address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_native_entry() {
        let account = json!({
            "id": "GABC",
            "balances": [
                {"asset_type": "credit_alphanum4", "asset_code": "USDC", "balance": "5.0000000"},
                {"asset_type": "native", "balance": "100.5000000"}
            ]
        });
        assert_eq!(parse_native_balance(&account).as_deref(), Some("100.5000000"));
    }

    #[test]
    fn missing_balances_yield_none() {
        assert_eq!(parse_native_balance(&json!({"status": 404})), None);
        assert_eq!(parse_native_balance(&json!({"balances": []})), None);
    }

    #[test]
    fn account_url_trims_slash() {
        assert_eq!(
            account_url("https://horizon-testnet.stellar.org/", "GABC"),
            "https://horizon-testnet.stellar.org/accounts/GABC"
        );
    }
}
