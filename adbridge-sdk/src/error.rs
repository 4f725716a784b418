use thiserror::Error;

/// Errors surfaced by the interstitial façade.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("bridge error: {0}")]
    Bridge(#[from] adbridge_api::BridgeError),
}

/// Result type for SDK operations.
pub type Result<T> = std::result::Result<T, SdkError>;
