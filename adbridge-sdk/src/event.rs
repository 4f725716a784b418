//! The closed set of interstitial lifecycle events.

use std::fmt;

/// Lifecycle events an interstitial ad unit can emit.
///
/// Each event maps 1:1 to an underlying broadcast channel; callers never
/// see the channel names. `AdFailedToLoad` is the one event whose payload
/// is transformed before delivery: the raw error payload is normalized
/// into an [`AdError`](adbridge_api::AdError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdEvent {
    /// An ad finished loading and is ready to show.
    AdLoaded,
    /// An ad request failed; the payload is the normalized error.
    AdFailedToLoad,
    /// The ad was presented full-screen.
    AdOpened,
    /// The user dismissed the ad.
    AdClosed,
    /// The ad click sent the user out of the application.
    AdLeftApplication,
}

impl AdEvent {
    /// Every recognized event, in declaration order.
    pub const ALL: [AdEvent; 5] = [
        AdEvent::AdLoaded,
        AdEvent::AdFailedToLoad,
        AdEvent::AdOpened,
        AdEvent::AdClosed,
        AdEvent::AdLeftApplication,
    ];

    /// Logical event name, as used by the string-based listener API.
    ///
    /// Names are camelCase for parity with the other platform SDKs.
    pub fn name(self) -> &'static str {
        match self {
            AdEvent::AdLoaded => "adLoaded",
            AdEvent::AdFailedToLoad => "adFailedToLoad",
            AdEvent::AdOpened => "adOpened",
            AdEvent::AdClosed => "adClosed",
            AdEvent::AdLeftApplication => "adLeftApplication",
        }
    }

    /// The broadcast channel this event is delivered on.
    pub fn channel(self) -> &'static str {
        match self {
            AdEvent::AdLoaded => "interstitialAdLoaded",
            AdEvent::AdFailedToLoad => "interstitialAdFailedToLoad",
            AdEvent::AdOpened => "interstitialAdOpened",
            AdEvent::AdClosed => "interstitialAdClosed",
            AdEvent::AdLeftApplication => "interstitialAdLeftApplication",
        }
    }

    /// Look up an event by its logical name.
    pub fn from_name(name: &str) -> Option<AdEvent> {
        AdEvent::ALL.into_iter().find(|event| event.name() == name)
    }

    /// Whether the raw channel payload is normalized before delivery.
    pub fn normalizes_payload(self) -> bool {
        matches!(self, AdEvent::AdFailedToLoad)
    }
}

impl fmt::Display for AdEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
