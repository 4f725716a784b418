//! The interstitial ad unit façade.

use std::sync::Arc;

use chrono::NaiveDate;

use adbridge_api::{Birthday, Location, NativeAdBridge, TargetingData};
use adbridge_events::EventEmitter;

use crate::error::Result;
use crate::event::AdEvent;
use crate::relay::{AdEventPayload, EventRelay, Subscription, SubscriptionId};

/// Configuration applied when constructing an [`Interstitial`].
#[derive(Debug, Clone, Default)]
pub struct InterstitialConfig {
    /// Ad unit to load from.
    /// Default: none; must be set before the first `request_ad`.
    pub ad_unit_id: Option<String>,

    /// Device ids that should receive test ads.
    /// Default: empty
    pub test_devices: Vec<String>,
}

/// An interstitial ad unit: lifecycle event relay plus targeting
/// configuration over the native bridge.
///
/// The façade owns two seams: the [`NativeAdBridge`] it forwards
/// configuration to, and the broadcast primitive its [`EventRelay`]
/// listens on. It performs no caching, retries, or state tracking of its
/// own; ad lifecycle state lives entirely in the native layer and is
/// observed through events.
///
/// # Example
///
/// ```rust,ignore
/// use adbridge_sdk::{AdEvent, Interstitial};
///
/// let ad = Interstitial::new(bridge, emitter);
/// let subscription = ad.add_event_listener(AdEvent::AdLoaded, |_payload| {
///     println!("ready to show");
/// });
///
/// ad.set_ad_unit_id("ca-app-pub-0000000000000000/0000000000");
/// ad.request_ad()?;
/// ```
pub struct Interstitial {
    bridge: Arc<dyn NativeAdBridge>,
    relay: EventRelay,
}

impl Interstitial {
    /// Create an interstitial over the given bridge and broadcast primitive.
    pub fn new(bridge: Arc<dyn NativeAdBridge>, emitter: Arc<dyn EventEmitter>) -> Self {
        Self {
            bridge,
            relay: EventRelay::new(emitter),
        }
    }

    /// Create an interstitial and apply `config` up front.
    pub fn with_config(
        bridge: Arc<dyn NativeAdBridge>,
        emitter: Arc<dyn EventEmitter>,
        config: InterstitialConfig,
    ) -> Self {
        let interstitial = Self::new(bridge, emitter);
        if let Some(ad_unit_id) = &config.ad_unit_id {
            interstitial.set_ad_unit_id(ad_unit_id);
        }
        if !config.test_devices.is_empty() {
            interstitial.set_test_devices(&config.test_devices);
        }
        interstitial
    }

    // ------------------------------------------------------------------
    // Event relay
    // ------------------------------------------------------------------

    /// Register `handler` for a lifecycle event.
    ///
    /// Returns a [`Subscription`] whose `remove()` releases exactly this
    /// registration.
    pub fn add_event_listener(
        &self,
        event: AdEvent,
        handler: impl Fn(AdEventPayload) + Send + Sync + 'static,
    ) -> Subscription {
        self.relay.subscribe(event, handler)
    }

    /// Register `handler` by logical event name (`"adLoaded"`, ...).
    ///
    /// Unknown names log a warning and return a no-op subscription.
    pub fn add_event_listener_named(
        &self,
        name: &str,
        handler: impl Fn(AdEventPayload) + Send + Sync + 'static,
    ) -> Subscription {
        self.relay.subscribe_named(name, handler)
    }

    /// Release one listener registration; unknown pairs are a no-op.
    pub fn remove_event_listener(&self, event: AdEvent, id: SubscriptionId) {
        self.relay.unsubscribe(event, id);
    }

    /// Release every listener registration.
    pub fn remove_all_listeners(&self) {
        self.relay.unsubscribe_all();
    }

    /// Number of active listener registrations.
    pub fn listener_count(&self) -> usize {
        self.relay.subscription_count()
    }

    // ------------------------------------------------------------------
    // Targeting configurator
    // ------------------------------------------------------------------

    /// Forward a birthday as a structured day/month/year triple
    /// (month 1-indexed).
    pub fn set_birthday(&self, birthday: NaiveDate) {
        self.bridge.set_birthday(Birthday::from_date(birthday));
    }

    /// Flag requests as child-directed.
    pub fn set_child_directed(&self, child_directed: bool) {
        self.bridge.set_child_directed(child_directed);
    }

    /// Forward a content URL verbatim, empty strings included.
    pub fn set_content_url(&self, content_url: &str) {
        self.bridge.set_content_url(content_url);
    }

    /// Forward a gender hint verbatim, empty strings included.
    pub fn set_gender(&self, gender: &str) {
        self.bridge.set_gender(gender);
    }

    /// Forward a location.
    pub fn set_location(&self, location: Location) {
        self.bridge.set_location(location);
    }

    /// Forward each present field of `data` through the corresponding
    /// setter.
    ///
    /// Empty-string `content_url` and `gender` values are skipped;
    /// `child_directed` is forwarded whenever present, including an
    /// explicit `false`. Callers relying on an empty content URL must use
    /// [`set_content_url`](Self::set_content_url) directly.
    pub fn set_targeting_data(&self, data: &TargetingData) {
        if let Some(birthday) = data.birthday {
            self.set_birthday(birthday);
        }
        if let Some(child_directed) = data.child_directed {
            self.set_child_directed(child_directed);
        }
        if let Some(content_url) = data.content_url.as_deref() {
            if !content_url.is_empty() {
                self.set_content_url(content_url);
            }
        }
        if let Some(gender) = data.gender.as_deref() {
            if !gender.is_empty() {
                self.set_gender(gender);
            }
        }
        if let Some(location) = data.location {
            self.set_location(location);
        }
    }

    // ------------------------------------------------------------------
    // Pass-through operations
    // ------------------------------------------------------------------

    /// Configure the ad unit id.
    pub fn set_ad_unit_id(&self, ad_unit_id: &str) {
        self.bridge.set_ad_unit_id(ad_unit_id);
    }

    /// Register device ids that receive test ads.
    pub fn set_test_devices(&self, device_ids: &[String]) {
        self.bridge.set_test_devices(device_ids);
    }

    /// Start loading an ad. The outcome arrives through
    /// [`AdEvent::AdLoaded`] or [`AdEvent::AdFailedToLoad`].
    pub fn request_ad(&self) -> Result<()> {
        self.bridge.request_ad()?;
        Ok(())
    }

    /// Present a loaded ad.
    pub fn show_ad(&self) -> Result<()> {
        self.bridge.show_ad()?;
        Ok(())
    }

    /// Whether a loaded ad is waiting to be shown.
    pub fn is_ready(&self) -> bool {
        self.bridge.is_ready()
    }
}
