//! Event relay: listener bookkeeping between the application and the
//! broadcast primitive.
//!
//! The relay owns a registry of active registrations keyed by
//! `(event, subscription id)`. Keying by the composite pair means the same
//! handler subscribed to two different events yields two independent
//! registrations that are removed independently. The registry owns each
//! emitter handle's lifetime: registrations are released on explicit
//! removal, on `unsubscribe_all`, or when the relay itself is dropped.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde_json::Value;

use adbridge_api::AdError;
use adbridge_events::{EventEmitter, ListenerHandle};

use crate::event::AdEvent;

/// Payload delivered to an event handler.
#[derive(Debug, Clone)]
pub enum AdEventPayload {
    /// Raw channel payload, forwarded unchanged.
    Data(Value),
    /// Normalized failure; delivered only for [`AdEvent::AdFailedToLoad`].
    Error(AdError),
}

impl AdEventPayload {
    /// The normalized error, when this payload is one.
    pub fn as_error(&self) -> Option<&AdError> {
        match self {
            AdEventPayload::Error(error) => Some(error),
            AdEventPayload::Data(_) => None,
        }
    }
}

/// Unique identifier for a relay subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

struct RelayInner {
    emitter: Arc<dyn EventEmitter>,
    registrations: Mutex<HashMap<(AdEvent, SubscriptionId), ListenerHandle>>,
    next_id: AtomicU64,
}

impl RelayInner {
    fn release(&self, event: AdEvent, id: SubscriptionId) {
        let handle = self.registrations.lock().remove(&(event, id));
        match handle {
            Some(handle) => {
                handle.remove();
                tracing::debug!(%event, %id, "subscription removed");
            }
            None => {
                tracing::debug!(%event, %id, "no subscription to remove");
            }
        }
    }
}

impl Drop for RelayInner {
    fn drop(&mut self) {
        let registrations = self.registrations.get_mut();
        if !registrations.is_empty() {
            tracing::debug!(
                remaining = registrations.len(),
                "relay dropping, releasing outstanding subscriptions"
            );
        }
        for (_, handle) in registrations.drain() {
            handle.remove();
        }
    }
}

/// Relays lifecycle events from the broadcast primitive to application
/// handlers.
///
/// Instance-scoped: each relay tracks only its own registrations, and
/// releases all of them when dropped.
pub struct EventRelay {
    inner: Arc<RelayInner>,
}

impl EventRelay {
    pub fn new(emitter: Arc<dyn EventEmitter>) -> Self {
        Self {
            inner: Arc::new(RelayInner {
                emitter,
                registrations: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Register `handler` for `event`.
    ///
    /// The handler runs whenever the event's channel delivers a payload.
    /// For [`AdEvent::AdFailedToLoad`] the raw payload is first normalized
    /// into an [`AdError`]; every other event passes its payload through
    /// unchanged.
    pub fn subscribe(
        &self,
        event: AdEvent,
        handler: impl Fn(AdEventPayload) + Send + Sync + 'static,
    ) -> Subscription {
        let id = SubscriptionId::new(self.inner.next_id.fetch_add(1, Ordering::Relaxed));

        let handle = self.inner.emitter.add_listener(
            event.channel(),
            Box::new(move |payload: &Value| {
                if event.normalizes_payload() {
                    handler(AdEventPayload::Error(AdError::from_error_data(payload)));
                } else {
                    handler(AdEventPayload::Data(payload.clone()));
                }
            }),
        );

        let total = {
            let mut registrations = self.inner.registrations.lock();
            registrations.insert((event, id), handle);
            registrations.len()
        };
        tracing::debug!(%event, %id, total, "subscription added");

        Subscription {
            relay: Arc::downgrade(&self.inner),
            target: Some((event, id)),
        }
    }

    /// Register `handler` for a logical event name.
    ///
    /// Unknown names are non-fatal: a warning is logged, no registration is
    /// created, and the returned subscription's `remove()` is a no-op.
    pub fn subscribe_named(
        &self,
        name: &str,
        handler: impl Fn(AdEventPayload) + Send + Sync + 'static,
    ) -> Subscription {
        match AdEvent::from_name(name) {
            Some(event) => self.subscribe(event, handler),
            None => {
                tracing::warn!(event = name, "trying to subscribe to unknown event");
                Subscription::noop()
            }
        }
    }

    /// Release one registration. Unknown `(event, id)` pairs are a no-op.
    pub fn unsubscribe(&self, event: AdEvent, id: SubscriptionId) {
        self.inner.release(event, id);
    }

    /// Release every registration. Idempotent.
    pub fn unsubscribe_all(&self) {
        let drained: Vec<_> = {
            let mut registrations = self.inner.registrations.lock();
            registrations.drain().collect()
        };
        let released = drained.len();
        for ((_, _), handle) in drained {
            handle.remove();
        }
        if released > 0 {
            tracing::debug!(released, "all subscriptions removed");
        }
    }

    /// Number of active registrations.
    pub fn subscription_count(&self) -> usize {
        self.inner.registrations.lock().len()
    }
}

/// Handle to one relay registration.
///
/// `remove()` releases exactly the registration this subscription was
/// returned for, and is idempotent. Subscriptions returned for unknown
/// event names carry no registration and remove nothing.
pub struct Subscription {
    relay: Weak<RelayInner>,
    target: Option<(AdEvent, SubscriptionId)>,
}

impl Subscription {
    fn noop() -> Self {
        Self {
            relay: Weak::new(),
            target: None,
        }
    }

    /// Release this registration.
    pub fn remove(&self) {
        let Some((event, id)) = self.target else {
            return;
        };
        if let Some(inner) = self.relay.upgrade() {
            inner.release(event, id);
        }
    }

    /// The event this subscription was registered for, if any.
    pub fn event(&self) -> Option<AdEvent> {
        self.target.map(|(event, _)| event)
    }

    /// The registration id, if a registration was created.
    pub fn id(&self) -> Option<SubscriptionId> {
        self.target.map(|(_, id)| id)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event())
            .field("id", &self.id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbridge_events::InProcessEmitter;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    fn relay_over(emitter: &InProcessEmitter) -> EventRelay {
        EventRelay::new(Arc::new(emitter.clone()))
    }

    #[test]
    fn test_subscribe_registers_on_channel() {
        let emitter = InProcessEmitter::new();
        let relay = relay_over(&emitter);

        let subscription = relay.subscribe(AdEvent::AdLoaded, |_payload| {});

        assert_eq!(emitter.listener_count("interstitialAdLoaded"), 1);
        assert_eq!(relay.subscription_count(), 1);
        assert_eq!(subscription.event(), Some(AdEvent::AdLoaded));
        assert!(subscription.id().is_some());
    }

    #[test]
    fn test_handler_receives_raw_payload() {
        let emitter = InProcessEmitter::new();
        let relay = relay_over(&emitter);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_in_handler = Arc::clone(&seen);
        let _subscription = relay.subscribe(AdEvent::AdOpened, move |payload| {
            seen_in_handler.lock().push(payload);
        });

        emitter.emit("interstitialAdOpened", &json!({ "placement": "level-end" }));

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        match &seen[0] {
            AdEventPayload::Data(value) => {
                assert_eq!(value, &json!({ "placement": "level-end" }));
            }
            AdEventPayload::Error(_) => panic!("pass-through event must not normalize"),
        }
    }

    #[test]
    fn test_failure_payload_is_normalized() {
        let emitter = InProcessEmitter::new();
        let relay = relay_over(&emitter);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_in_handler = Arc::clone(&seen);
        let _subscription = relay.subscribe(AdEvent::AdFailedToLoad, move |payload| {
            seen_in_handler.lock().push(payload);
        });

        emitter.emit(
            "interstitialAdFailedToLoad",
            &json!({ "message": "No fill", "code": 3 }),
        );

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        let error = seen[0].as_error().expect("failure payload must normalize");
        assert_eq!(error.message, "No fill");
        assert_eq!(error.detail("code"), Some(&json!(3)));
    }

    #[test]
    fn test_subscribe_named_unknown_warns_and_noops() {
        let emitter = InProcessEmitter::new();
        let relay = relay_over(&emitter);

        let subscription = relay.subscribe_named("adRewarded", |_payload| {});

        assert_eq!(relay.subscription_count(), 0);
        assert_eq!(emitter.total_listeners(), 0);
        assert!(subscription.event().is_none());
        assert!(subscription.id().is_none());

        // remove on the no-op disposable stays a no-op
        subscription.remove();
        subscription.remove();
        assert_eq!(relay.subscription_count(), 0);
    }

    #[test]
    fn test_unsubscribe_releases_exactly_one() {
        let emitter = InProcessEmitter::new();
        let relay = relay_over(&emitter);

        let first = relay.subscribe(AdEvent::AdClosed, |_payload| {});
        let _second = relay.subscribe(AdEvent::AdClosed, |_payload| {});
        assert_eq!(emitter.listener_count("interstitialAdClosed"), 2);

        relay.unsubscribe(AdEvent::AdClosed, first.id().unwrap());

        assert_eq!(relay.subscription_count(), 1);
        assert_eq!(emitter.listener_count("interstitialAdClosed"), 1);
    }

    #[test]
    fn test_unsubscribe_unknown_id_is_noop() {
        let emitter = InProcessEmitter::new();
        let relay = relay_over(&emitter);

        let _subscription = relay.subscribe(AdEvent::AdLoaded, |_payload| {});
        relay.unsubscribe(AdEvent::AdLoaded, SubscriptionId::new(999));

        assert_eq!(relay.subscription_count(), 1);
    }

    #[test]
    fn test_unsubscribe_requires_matching_event() {
        let emitter = InProcessEmitter::new();
        let relay = relay_over(&emitter);

        let subscription = relay.subscribe(AdEvent::AdLoaded, |_payload| {});

        // Same id under a different event is a different registry key.
        relay.unsubscribe(AdEvent::AdClosed, subscription.id().unwrap());
        assert_eq!(relay.subscription_count(), 1);

        relay.unsubscribe(AdEvent::AdLoaded, subscription.id().unwrap());
        assert_eq!(relay.subscription_count(), 0);
    }

    #[test]
    fn test_subscription_remove_is_idempotent() {
        let emitter = InProcessEmitter::new();
        let relay = relay_over(&emitter);
        let count = Arc::new(AtomicUsize::new(0));

        let count_in_handler = Arc::clone(&count);
        let subscription = relay.subscribe(AdEvent::AdLoaded, move |_payload| {
            count_in_handler.fetch_add(1, Ordering::SeqCst);
        });

        subscription.remove();
        subscription.remove();

        assert_eq!(relay.subscription_count(), 0);
        emitter.emit("interstitialAdLoaded", &Value::Null);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_same_handler_two_events_is_two_registrations() {
        let emitter = InProcessEmitter::new();
        let relay = relay_over(&emitter);
        let count = Arc::new(AtomicUsize::new(0));

        let handler = {
            let count = Arc::clone(&count);
            Arc::new(move |_payload: AdEventPayload| {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };

        let loaded = {
            let handler = Arc::clone(&handler);
            relay.subscribe(AdEvent::AdLoaded, move |payload| handler(payload))
        };
        let _closed = {
            let handler = Arc::clone(&handler);
            relay.subscribe(AdEvent::AdClosed, move |payload| handler(payload))
        };
        assert_eq!(relay.subscription_count(), 2);

        loaded.remove();
        emitter.emit("interstitialAdLoaded", &Value::Null);
        emitter.emit("interstitialAdClosed", &Value::Null);

        // Only the AdClosed registration is still delivering.
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_all_is_idempotent() {
        let emitter = InProcessEmitter::new();
        let relay = relay_over(&emitter);

        for event in AdEvent::ALL {
            relay.subscribe(event, |_payload| {});
        }
        assert_eq!(relay.subscription_count(), 5);
        assert_eq!(emitter.total_listeners(), 5);

        relay.unsubscribe_all();
        assert_eq!(relay.subscription_count(), 0);
        assert_eq!(emitter.total_listeners(), 0);

        relay.unsubscribe_all();
        assert_eq!(relay.subscription_count(), 0);
    }

    #[test]
    fn test_drop_releases_registrations() {
        let emitter = InProcessEmitter::new();

        {
            let relay = relay_over(&emitter);
            relay.subscribe(AdEvent::AdLoaded, |_payload| {});
            relay.subscribe(AdEvent::AdFailedToLoad, |_payload| {});
            assert_eq!(emitter.total_listeners(), 2);
        }

        assert_eq!(emitter.total_listeners(), 0);
    }

    #[test]
    fn test_subscription_remove_after_relay_drop() {
        let emitter = InProcessEmitter::new();
        let subscription = {
            let relay = relay_over(&emitter);
            relay.subscribe(AdEvent::AdLoaded, |_payload| {})
        };

        // The relay is gone; remove() must not panic.
        subscription.remove();
        assert_eq!(emitter.total_listeners(), 0);
    }
}
