use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::HttpError;

/// A JSON object used as a request body. Keys keep their insertion order.
pub type JsonMap = serde_json::Map<String, Value>;

/// A single payee of a transfer, in atomic units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub address: String,
    pub amount: u64,
}

impl Destination {
    pub fn new(address: impl Into<String>, amount: u64) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDestinationError(String);

impl Display for ParseDestinationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid destination {:?}, expected address::amount", self.0)
    }
}

impl std::error::Error for ParseDestinationError {}

/// Parses `address::amount`.
impl FromStr for Destination {
    type Err = ParseDestinationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, amount) = s.rsplit_once("::").ok_or_else(|| ParseDestinationError(s.to_string()))?;
        if address.is_empty() {
            return Err(ParseDestinationError(s.to_string()));
        }
        let amount = amount.parse::<u64>().map_err(|_| ParseDestinationError(s.to_string()))?;
        Ok(Self::new(address, amount))
    }
}

/// Typed body for `/wallet/transfer`. Unset options are left out of the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub destinations: Vec<Destination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixin: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

impl TransferRequest {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self {
            destinations,
            payment_id: None,
            mixin: None,
            unlock_time: None,
            messages: None,
            ttl: None,
        }
    }

    pub fn with_payment_id(mut self, payment_id: impl Into<String>) -> Self {
        self.payment_id = Some(payment_id.into());
        self
    }

    pub fn with_mixin(mut self, mixin: u64) -> Self {
        self.mixin = Some(mixin);
        self
    }

    pub fn with_unlock_time(mut self, unlock_time: u64) -> Self {
        self.unlock_time = Some(unlock_time);
        self
    }

    pub fn with_messages(mut self, messages: Value) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Converts the request into the mapping sent to the gateway.
    pub fn to_body(&self) -> Result<JsonMap, HttpError> {
        match serde_json::to_value(self).map_err(HttpError::Encode)? {
            Value::Object(map) => Ok(map),
            other => Err(HttpError::Encode(serde::ser::Error::custom(format!(
                "expected a JSON object, got {}",
                other
            )))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_destination_parses_address_and_amount() {
        let dest: Destination = "fire1abc::250".parse().unwrap();
        assert_eq!(dest, Destination::new("fire1abc", 250));
    }

    #[test]
    fn test_destination_rejects_malformed_input() {
        assert!("fire1abc".parse::<Destination>().is_err());
        assert!("::250".parse::<Destination>().is_err());
        assert!("fire1abc::-1".parse::<Destination>().is_err());
        assert!("fire1abc::lots".parse::<Destination>().is_err());
    }

    #[test]
    fn test_body_omits_unset_options() {
        let body = TransferRequest::new(vec![Destination::new("fire1abc", 5)]).to_body().unwrap();

        assert_eq!(
            Value::Object(body),
            json!({"destinations": [{"address": "fire1abc", "amount": 5}]})
        );
    }

    #[test]
    fn test_body_keeps_field_order() {
        let body = TransferRequest::new(vec![Destination::new("fire1abc", 5)])
            .with_payment_id("deadbeef")
            .with_mixin(2)
            .with_ttl(60)
            .to_body()
            .unwrap();

        let keys: Vec<&str> = body.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["destinations", "payment_id", "mixin", "ttl"]);
    }
}
