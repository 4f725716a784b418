//! Listener identifiers and removal handles.

use std::fmt;

use parking_lot::Mutex;

/// Unique identifier for a listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Create a new ListenerId with the given value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

type Remover = Box<dyn FnOnce() + Send>;

/// Handle to an active listener registration.
///
/// Owns the one-shot closure that reverses the registration. `remove()` is
/// idempotent: the first call runs the remover, every later call is a
/// silent no-op. Dropping the handle without calling `remove()` leaves the
/// registration in place; the registry that stored the handle owns its
/// lifetime.
pub struct ListenerHandle {
    remover: Mutex<Option<Remover>>,
}

impl ListenerHandle {
    /// Wrap a removal closure.
    pub fn new(remover: impl FnOnce() + Send + 'static) -> Self {
        Self {
            remover: Mutex::new(Some(Box::new(remover))),
        }
    }

    /// A handle that was never backed by a registration. `remove()` does
    /// nothing.
    pub fn noop() -> Self {
        Self {
            remover: Mutex::new(None),
        }
    }

    /// Reverse the registration. Safe to call any number of times.
    pub fn remove(&self) {
        if let Some(remover) = self.remover.lock().take() {
            remover();
        }
    }

    /// Whether the registration has not been removed yet.
    ///
    /// Always `false` for [`noop`](Self::noop) handles.
    pub fn is_active(&self) -> bool {
        self.remover.lock().is_some()
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("active", &self.is_active())
            .finish()
    }
}
