//! # AdBridge API
//!
//! Typed seam to the platform-native advertising SDK bridge.
//!
//! This crate defines the contract between the application-facing SDK and
//! whatever platform layer actually loads and shows ads. The native side is
//! opaque: it may be a JNI shim, an FFI binding, or a test double. Everything
//! it can be asked to do is enumerated on the [`NativeAdBridge`] trait so the
//! forwarded surface stays auditable.
//!
//! It also owns the two data vocabularies shared across the workspace:
//!
//! - targeting values ([`Birthday`], [`Location`], [`TargetingData`])
//! - error shapes ([`BridgeError`] for failed bridge calls, [`AdError`] for
//!   normalized ad-load failure payloads)
//!
//! With the `test-support` feature enabled, [`RecordingBridge`] provides a
//! call-recording implementation for exact-forwarding assertions.

pub mod bridge;
pub mod error;
pub mod targeting;

pub use bridge::NativeAdBridge;
pub use error::{AdError, BridgeError, Result};
pub use targeting::{Birthday, Location, TargetingData};

#[cfg(any(test, feature = "test-support"))]
pub use bridge::{BridgeCall, RecordingBridge};
