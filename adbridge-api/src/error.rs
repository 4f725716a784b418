//! Error types for the bridge seam.
//!
//! Two distinct shapes live here. [`BridgeError`] is returned by the
//! fallible bridge operations themselves (`request_ad`, `show_ad`).
//! [`AdError`] is the normalized form of a raw failure payload delivered
//! over the `interstitialAdFailedToLoad` channel; the relay runs every raw
//! payload through [`AdError::from_error_data`] before handlers see it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors returned by fallible [`NativeAdBridge`](crate::NativeAdBridge) operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// An ad is already loaded and waiting to be shown.
    #[error("an ad is already loaded")]
    AlreadyLoaded,

    /// A previous `request_ad` has not completed yet.
    #[error("an ad request is already in flight")]
    RequestInFlight,

    /// `show_ad` was called before an ad finished loading.
    #[error("interstitial is not ready to be shown")]
    NotReady,

    /// The ad unit id was never configured.
    #[error("ad unit id has not been set")]
    MissingAdUnitId,

    /// The platform layer failed in a way it could only describe as text.
    #[error("native bridge call failed: {0}")]
    Native(String),
}

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Normalized ad failure, produced from a raw error payload.
///
/// The raw payload is an arbitrary JSON object from the platform layer. The
/// `message` field is promoted to a first-class string; every other field is
/// retained verbatim in `details` so nothing the network reported is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdError {
    /// Human-readable failure description.
    pub message: String,

    /// Remaining payload fields (error codes, domains, response info).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, Value>,
}

impl AdError {
    /// Create an error with a message and no extra details.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// Normalize a raw error payload into a structured error.
    ///
    /// Pure function: object payloads have their `message` field extracted
    /// (missing message yields an empty string) and everything else copied
    /// into `details`. A bare string payload becomes the message itself;
    /// any other payload is stringified.
    pub fn from_error_data(data: &Value) -> Self {
        match data {
            Value::Object(fields) => {
                let mut message = String::new();
                let mut details = BTreeMap::new();
                for (key, value) in fields {
                    if key == "message" {
                        message = match value {
                            Value::String(text) => text.clone(),
                            other => other.to_string(),
                        };
                    } else {
                        details.insert(key.clone(), value.clone());
                    }
                }
                Self { message, details }
            }
            Value::String(text) => Self::new(text.clone()),
            Value::Null => Self::new(""),
            other => Self::new(other.to_string()),
        }
    }

    /// Look up a retained payload field.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }
}

impl fmt::Display for AdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "ad failed to load")
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for AdError {}
