use serde::{Deserialize, Serialize};

/// Envelope returned by `payment.json`. A usable response carries a freshly
/// minted forwarding address in `data`; the service answers without one when
/// no relay matched the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PaymentResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<PaymentData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PaymentData {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub bitcoin_address: Option<String>,
}

impl PaymentResponse {
    pub fn bitcoin_address(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.bitcoin_address.as_deref())
            .filter(|a| !a.is_empty())
    }
}

/// Envelope returned by `forward/{address}`, for both the success body and
/// the failure bodies that arrive with a non-2xx status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ForwardReply {
    #[serde(default)]
    pub status: Option<String>,
    /// Top-level message, used by `error` envelopes.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<ForwardData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ForwardData {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

impl ForwardReply {
    pub fn data_message(&self) -> &str {
        self.data.as_ref().map(|d| d.message.as_str()).unwrap_or("")
    }
}

/// One entry of the static country reference data (`static/data/cc.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Country {
    #[serde(default)]
    pub cc: String,
    #[serde(default)]
    pub name: String,
}
