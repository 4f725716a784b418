//! Interstitial lifecycle walkthrough against an in-process emitter and a
//! logging stand-in for the native bridge.
//!
//! Run with:
//! ```sh
//! cargo run --example ad_lifecycle
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use adbridge_sdk::logging::{init_logging, LoggingMode};
use adbridge_sdk::{
    AdEvent, AdEventPayload, Birthday, BridgeError, InProcessEmitter, Interstitial,
    InterstitialConfig, Location, NativeAdBridge, TargetingData,
};

/// Bridge stand-in that logs every call instead of talking to a platform.
struct LoggingBridge;

impl NativeAdBridge for LoggingBridge {
    fn set_ad_unit_id(&self, ad_unit_id: &str) {
        println!("bridge <- set_ad_unit_id({ad_unit_id})");
    }

    fn set_test_devices(&self, device_ids: &[String]) {
        println!("bridge <- set_test_devices({device_ids:?})");
    }

    fn set_birthday(&self, birthday: Birthday) {
        println!("bridge <- set_birthday({birthday:?})");
    }

    fn set_child_directed(&self, child_directed: bool) {
        println!("bridge <- set_child_directed({child_directed})");
    }

    fn set_content_url(&self, content_url: &str) {
        println!("bridge <- set_content_url({content_url})");
    }

    fn set_gender(&self, gender: &str) {
        println!("bridge <- set_gender({gender})");
    }

    fn set_location(&self, location: Location) {
        println!("bridge <- set_location({location:?})");
    }

    fn request_ad(&self) -> Result<(), BridgeError> {
        println!("bridge <- request_ad()");
        Ok(())
    }

    fn show_ad(&self) -> Result<(), BridgeError> {
        println!("bridge <- show_ad()");
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingMode::Development)?;

    let emitter = InProcessEmitter::new();
    let ad = Interstitial::with_config(
        Arc::new(LoggingBridge),
        Arc::new(emitter.clone()),
        InterstitialConfig {
            ad_unit_id: Some("ca-app-pub-3940256099942544/1033173712".to_string()),
            test_devices: vec!["EMULATOR".to_string()],
        },
    );

    let loaded = ad.add_event_listener(AdEvent::AdLoaded, |_payload| {
        println!("app   -> ad loaded, ready to show");
    });
    let failed = ad.add_event_listener(AdEvent::AdFailedToLoad, |payload| {
        if let AdEventPayload::Error(error) = payload {
            println!("app   -> ad failed to load: {error}");
        }
    });
    let closed = ad.add_event_listener(AdEvent::AdClosed, |_payload| {
        println!("app   -> ad dismissed, back to the app");
    });

    ad.set_targeting_data(&TargetingData {
        birthday: NaiveDate::from_ymd_opt(1990, 1, 15),
        child_directed: Some(false),
        content_url: Some("https://example.com/articles/42".to_string()),
        gender: None,
        location: Some(Location::new(37.42, -122.08)),
    });

    ad.request_ad()?;

    // A real platform would emit these from its ad network callbacks; here
    // we play both sides.
    emitter.emit("interstitialAdLoaded", &serde_json::Value::Null);
    ad.show_ad()?;
    emitter.emit("interstitialAdClosed", &serde_json::Value::Null);

    // One request that does not fill.
    ad.request_ad()?;
    emitter.emit(
        "interstitialAdFailedToLoad",
        &json!({ "message": "No fill", "code": 3 }),
    );

    loaded.remove();
    failed.remove();
    closed.remove();
    println!("listeners remaining: {}", ad.listener_count());

    Ok(())
}
