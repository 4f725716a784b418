//! # AdBridge Events
//!
//! The broadcast primitive underneath the ad SDK: named channels delivering
//! JSON payloads to registered callbacks.
//!
//! The host environment normally supplies the transport, so the seam is the
//! object-safe [`EventEmitter`] trait: `add_listener(channel, callback)`
//! returning a [`ListenerHandle`] whose `remove()` reverses the
//! registration. [`InProcessEmitter`] is a complete in-process
//! implementation for single-process hosts, examples, and tests.
//!
//! ## Usage
//!
//! ```rust
//! use adbridge_events::{EventEmitter, InProcessEmitter};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let emitter = InProcessEmitter::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//!
//! let seen_in_listener = Arc::clone(&seen);
//! let handle = emitter.add_listener(
//!     "interstitialAdLoaded",
//!     Box::new(move |_payload| {
//!         seen_in_listener.fetch_add(1, Ordering::SeqCst);
//!     }),
//! );
//!
//! emitter.emit("interstitialAdLoaded", &serde_json::Value::Null);
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//!
//! handle.remove();
//! emitter.emit("interstitialAdLoaded", &serde_json::Value::Null);
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

pub mod emitter;
pub mod handle;

pub use emitter::{EventCallback, EventEmitter, InProcessEmitter};
pub use handle::{ListenerHandle, ListenerId};
