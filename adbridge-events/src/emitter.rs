//! The publish/subscribe seam and its in-process implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::handle::{ListenerHandle, ListenerId};

/// Callback invoked with each payload delivered on a channel.
pub type EventCallback = Box<dyn Fn(&Value) + Send + Sync>;

/// Host-provided publish/subscribe mechanism.
///
/// Implementations deliver named events with a JSON payload to registered
/// callbacks. Registration order between channels is not specified;
/// delivery within a channel happens on whatever thread the implementation
/// publishes from.
pub trait EventEmitter: Send + Sync {
    /// Register `callback` on `channel`.
    ///
    /// The returned handle reverses the registration when removed; the
    /// caller owns the handle's lifetime.
    fn add_listener(&self, channel: &str, callback: EventCallback) -> ListenerHandle;
}

type ListenerTable = HashMap<ListenerId, Arc<EventCallback>>;

struct EmitterInner {
    channels: RwLock<HashMap<String, ListenerTable>>,
    next_id: AtomicU64,
}

/// In-process [`EventEmitter`] for single-process hosts and tests.
///
/// Listeners are stored per channel; [`emit`](InProcessEmitter::emit)
/// snapshots the channel's callbacks and invokes them outside the lock, so
/// a callback may itself add or remove listeners.
#[derive(Clone)]
pub struct InProcessEmitter {
    inner: Arc<EmitterInner>,
}

impl InProcessEmitter {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(EmitterInner {
                channels: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Deliver `payload` to every listener on `channel`.
    ///
    /// Returns the number of callbacks invoked.
    pub fn emit(&self, channel: &str, payload: &Value) -> usize {
        let callbacks: Vec<Arc<EventCallback>> = {
            let channels = self.inner.channels.read();
            match channels.get(channel) {
                Some(listeners) => listeners.values().cloned().collect(),
                None => Vec::new(),
            }
        };

        for callback in &callbacks {
            callback(payload);
        }

        tracing::trace!(channel, delivered = callbacks.len(), "emitted event");
        callbacks.len()
    }

    /// Number of listeners currently registered on `channel`.
    pub fn listener_count(&self, channel: &str) -> usize {
        self.inner
            .channels
            .read()
            .get(channel)
            .map_or(0, ListenerTable::len)
    }

    /// Total listeners across all channels.
    pub fn total_listeners(&self) -> usize {
        self.inner.channels.read().values().map(ListenerTable::len).sum()
    }
}

impl Default for InProcessEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventEmitter for InProcessEmitter {
    fn add_listener(&self, channel: &str, callback: EventCallback) -> ListenerHandle {
        let id = ListenerId::new(self.inner.next_id.fetch_add(1, Ordering::Relaxed));

        self.inner
            .channels
            .write()
            .entry(channel.to_string())
            .or_default()
            .insert(id, Arc::new(callback));

        tracing::debug!(channel, %id, "listener registered");

        let inner = Arc::clone(&self.inner);
        let channel = channel.to_string();
        ListenerHandle::new(move || {
            let mut channels = inner.channels.write();
            if let Some(listeners) = channels.get_mut(&channel) {
                listeners.remove(&id);
                if listeners.is_empty() {
                    channels.remove(&channel);
                }
                tracing::debug!(channel = %channel, %id, "listener removed");
            }
        })
    }
}
