//! Live USD price lookup for crypto-denominated donations, against the
//! Kraken public ticker.
//!
//! External collaborator only: the engine consumes the returned rate as an
//! ordinary input. No retry logic lives here; retry and backoff policy
//! belong to the caller.

use std::collections::HashMap;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

const KRAKEN_TICKER_URL: &str = "https://api.kraken.com/0/public/Ticker";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("global-income/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum RateFetchError {
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("ticker error: {0}")]
    Api(String),
    #[error("ticker response has no pair '{0}'")]
    MissingPair(String),
    #[error("unparseable price '{0}'")]
    BadPrice(String),
}

#[derive(Debug, Deserialize)]
struct TickerResponse {
    #[serde(default)]
    error: Vec<String>,
    #[serde(default)]
    result: HashMap<String, TickerPair>,
}

#[derive(Debug, Deserialize)]
struct TickerPair {
    /// Bid array: [price, whole lot volume, lot volume]
    b: Vec<String>,
}

/// Thin timeout-bounded client for the ticker endpoint.
#[derive(Debug, Clone)]
pub struct TickerClient {
    http: reqwest::Client,
    base_url: String,
}

impl TickerClient {
    pub fn new() -> Result<Self, RateFetchError> {
        Self::with_base_url(KRAKEN_TICKER_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, RateFetchError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base.to_string(),
        })
    }

    /// Current USD bid price for a coin symbol such as "BTC" or "ETH".
    pub async fn usd_rate(&self, coin: &str) -> Result<Decimal, RateFetchError> {
        let url = format!("{}?pair={}", self.base_url, request_pair(coin));
        tracing::debug!(coin, %url, "fetching ticker price");
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let body: TickerResponse = response.json().await?;
        price_from_response(&body, coin)
    }
}

/// Kraken trades BTC under its legacy XBT symbol.
fn kraken_symbol(coin: &str) -> &str {
    if coin == "BTC" {
        "XBT"
    } else {
        coin
    }
}

fn request_pair(coin: &str) -> String {
    format!("{}USD", kraken_symbol(coin))
}

/// Result keys carry Kraken's X…Z… asset-class prefixes, except USDC.
fn result_key(coin: &str) -> String {
    let symbol = kraken_symbol(coin);
    if symbol == "USDC" {
        "USDCUSD".to_string()
    } else {
        format!("X{symbol}ZUSD")
    }
}

fn price_from_response(response: &TickerResponse, coin: &str) -> Result<Decimal, RateFetchError> {
    if !response.error.is_empty() {
        return Err(RateFetchError::Api(response.error.join("; ")));
    }
    let key = result_key(coin);
    let pair = response
        .result
        .get(&key)
        .ok_or_else(|| RateFetchError::MissingPair(key.clone()))?;
    let price = pair.b.first().ok_or(RateFetchError::MissingPair(key))?;
    price
        .parse::<Decimal>()
        .map_err(|_| RateFetchError::BadPrice(price.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_request_pair_uses_legacy_btc_symbol() {
        assert_eq!(request_pair("BTC"), "XBTUSD");
        assert_eq!(request_pair("ETH"), "ETHUSD");
    }

    #[test]
    fn test_result_key_prefixes() {
        assert_eq!(result_key("BTC"), "XXBTZUSD");
        assert_eq!(result_key("ETH"), "XETHZUSD");
        assert_eq!(result_key("USDC"), "USDCUSD");
    }

    #[test]
    fn test_price_parsed_from_bid() {
        let body = r#"{
            "error": [],
            "result": {
                "XXBTZUSD": { "a": ["60012.40000", "1", "1.000"], "b": ["60012.30000", "1", "1.000"] }
            }
        }"#;
        let response: TickerResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            price_from_response(&response, "BTC").unwrap(),
            dec!(60012.30000)
        );
    }

    #[test]
    fn test_api_error_surfaces() {
        let body = r#"{ "error": ["EQuery:Unknown asset pair"], "result": {} }"#;
        let response: TickerResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            price_from_response(&response, "BTC"),
            Err(RateFetchError::Api(_))
        ));
    }

    #[test]
    fn test_missing_pair_surfaces() {
        let body = r#"{ "error": [], "result": {} }"#;
        let response: TickerResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            price_from_response(&response, "ETH"),
            Err(RateFetchError::MissingPair(_))
        ));
    }
}
