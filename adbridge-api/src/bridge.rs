//! The native capability seam.
//!
//! [`NativeAdBridge`] enumerates every operation the SDK may forward to the
//! platform-specific advertising layer. Keeping the surface on one trait,
//! rather than re-exporting whatever the platform module happens to expose,
//! makes the forwarded contract auditable and lets hosts substitute their
//! own implementation (JNI shim, FFI binding, test double).

use crate::error::BridgeError;
use crate::targeting::{Birthday, Location};

/// Operations the native advertising layer exposes to this SDK.
///
/// Configuration setters are fire-and-forget: they cannot fail observably,
/// and any platform-side failure surfaces later through the event channels.
/// `request_ad` and `show_ad` are fallible because the platform rejects
/// them in well-defined states (already loading, not ready).
pub trait NativeAdBridge: Send + Sync {
    /// Configure the ad unit this interstitial loads from.
    fn set_ad_unit_id(&self, ad_unit_id: &str);

    /// Register device ids that should receive test ads.
    fn set_test_devices(&self, device_ids: &[String]);

    /// Forward a structured birthday triple for targeting.
    fn set_birthday(&self, birthday: Birthday);

    /// Flag the ad request as child-directed (COPPA).
    fn set_child_directed(&self, child_directed: bool);

    /// Forward a content URL for contextual targeting.
    fn set_content_url(&self, content_url: &str);

    /// Forward a gender hint for targeting.
    fn set_gender(&self, gender: &str);

    /// Forward a location for targeting.
    fn set_location(&self, location: Location);

    /// Start loading an ad. Completion is reported through the
    /// `interstitialAdLoaded` / `interstitialAdFailedToLoad` channels.
    fn request_ad(&self) -> Result<(), BridgeError>;

    /// Present a loaded ad.
    fn show_ad(&self) -> Result<(), BridgeError>;

    /// Whether a loaded ad is waiting to be shown.
    fn is_ready(&self) -> bool;
}

#[cfg(any(test, feature = "test-support"))]
pub use recording::{BridgeCall, RecordingBridge};

#[cfg(any(test, feature = "test-support"))]
mod recording {
    use std::sync::atomic::{AtomicBool, Ordering};

    use parking_lot::Mutex;

    use super::NativeAdBridge;
    use crate::error::BridgeError;
    use crate::targeting::{Birthday, Location};

    /// One recorded call into the bridge, in arrival order.
    #[derive(Debug, Clone, PartialEq)]
    pub enum BridgeCall {
        SetAdUnitId(String),
        SetTestDevices(Vec<String>),
        SetBirthday(Birthday),
        SetChildDirected(bool),
        SetContentUrl(String),
        SetGender(String),
        SetLocation(Location),
        RequestAd,
        ShowAd,
    }

    /// Bridge implementation that records every call it receives.
    ///
    /// Used for exact-forwarding assertions: tests inspect [`calls`] to
    /// verify which operations reached the native layer, and in what order.
    ///
    /// [`calls`]: RecordingBridge::calls
    #[derive(Debug, Default)]
    pub struct RecordingBridge {
        calls: Mutex<Vec<BridgeCall>>,
        ready: AtomicBool,
        fail_request: AtomicBool,
    }

    impl RecordingBridge {
        pub fn new() -> Self {
            Self::default()
        }

        /// Snapshot of every call recorded so far.
        pub fn calls(&self) -> Vec<BridgeCall> {
            self.calls.lock().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }

        /// Mark an ad as loaded so `show_ad` succeeds.
        pub fn set_ready(&self, ready: bool) {
            self.ready.store(ready, Ordering::SeqCst);
        }

        /// Make subsequent `request_ad` calls fail with `RequestInFlight`.
        pub fn set_request_in_flight(&self, in_flight: bool) {
            self.fail_request.store(in_flight, Ordering::SeqCst);
        }

        fn record(&self, call: BridgeCall) {
            self.calls.lock().push(call);
        }
    }

    impl NativeAdBridge for RecordingBridge {
        fn set_ad_unit_id(&self, ad_unit_id: &str) {
            self.record(BridgeCall::SetAdUnitId(ad_unit_id.to_string()));
        }

        fn set_test_devices(&self, device_ids: &[String]) {
            self.record(BridgeCall::SetTestDevices(device_ids.to_vec()));
        }

        fn set_birthday(&self, birthday: Birthday) {
            self.record(BridgeCall::SetBirthday(birthday));
        }

        fn set_child_directed(&self, child_directed: bool) {
            self.record(BridgeCall::SetChildDirected(child_directed));
        }

        fn set_content_url(&self, content_url: &str) {
            self.record(BridgeCall::SetContentUrl(content_url.to_string()));
        }

        fn set_gender(&self, gender: &str) {
            self.record(BridgeCall::SetGender(gender.to_string()));
        }

        fn set_location(&self, location: Location) {
            self.record(BridgeCall::SetLocation(location));
        }

        fn request_ad(&self) -> Result<(), BridgeError> {
            if self.fail_request.load(Ordering::SeqCst) {
                return Err(BridgeError::RequestInFlight);
            }
            self.record(BridgeCall::RequestAd);
            Ok(())
        }

        fn show_ad(&self) -> Result<(), BridgeError> {
            if !self.ready.load(Ordering::SeqCst) {
                return Err(BridgeError::NotReady);
            }
            self.record(BridgeCall::ShowAd);
            Ok(())
        }

        fn is_ready(&self) -> bool {
            self.ready.load(Ordering::SeqCst)
        }
    }
}
