//! # AdBridge SDK
//!
//! Application-facing façade over a platform-native advertising bridge:
//! lifecycle event subscriptions plus ad-targeting configuration for
//! interstitial ad units.
//!
//! ```rust,ignore
//! use adbridge_sdk::{AdEvent, AdEventPayload, Interstitial};
//!
//! let ad = Interstitial::new(bridge, emitter);
//!
//! let loaded = ad.add_event_listener(AdEvent::AdLoaded, |_payload| {
//!     println!("interstitial ready");
//! });
//! let failed = ad.add_event_listener(AdEvent::AdFailedToLoad, |payload| {
//!     if let AdEventPayload::Error(error) = payload {
//!         eprintln!("load failed: {error}");
//!     }
//! });
//!
//! ad.set_ad_unit_id("ca-app-pub-0000000000000000/0000000000");
//! ad.request_ad()?;
//!
//! // Later, when the ad unit goes away:
//! loaded.remove();
//! failed.remove();
//! ```
//!
//! ## What this crate does
//!
//! - **Event relay**: maps the closed set of logical lifecycle events
//!   ([`AdEvent`]) onto the underlying broadcast channels, tracks every
//!   registration so it can be removed individually or in bulk, and
//!   normalizes the one payload that needs it (ad-load failures become
//!   structured [`AdError`]s before handlers run).
//! - **Targeting configurator**: validates and shapes targeting fields
//!   (birthday decomposition, the present/empty forwarding rules of
//!   [`TargetingData`]) and forwards them to the native layer.
//! - **Pass-through operations**: the enumerated ad-unit operations of the
//!   native bridge (`request_ad`, `show_ad`, `is_ready`, test device and
//!   ad unit configuration).
//!
//! Everything else (ad loading, rendering, the lifecycle state machine)
//! lives behind the [`NativeAdBridge`] seam and is out of scope here.
//!
//! ## Architecture
//!
//! ```text
//! adbridge-sdk     (façade: relay + configurator)
//!     ↓
//! adbridge-events  (broadcast primitive: channels → callbacks)
//!     ↓
//! adbridge-api     (typed seam to the native advertising layer)
//! ```

pub mod error;
pub mod event;
pub mod interstitial;
pub mod logging;
pub mod relay;

pub use error::{Result, SdkError};
pub use event::AdEvent;
pub use interstitial::{Interstitial, InterstitialConfig};
pub use relay::{AdEventPayload, EventRelay, Subscription, SubscriptionId};

// Re-export the seam types callers implement or construct.
pub use adbridge_api::{AdError, Birthday, BridgeError, Location, NativeAdBridge, TargetingData};
pub use adbridge_events::{EventEmitter, InProcessEmitter, ListenerHandle};

/// Prelude module for convenient imports
///
/// ```rust
/// use adbridge_sdk::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AdError, AdEvent, AdEventPayload, EventEmitter, InProcessEmitter, Interstitial,
        InterstitialConfig, NativeAdBridge, Result, SdkError, Subscription, SubscriptionId,
        TargetingData,
    };
}
