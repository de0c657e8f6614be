//! Multicast event dispatch.
//!
//! An [`EventDispatcher<E>`] maintains a set of listeners for a single event
//! type and fires each event synchronously to every listener, in the calling
//! thread, before returning. There is no queueing: the framework drives all
//! dispatch from a single toolkit thread and listeners observe events in
//! exactly the order they were fired.
//!
//! # Key Types
//!
//! - [`EventDispatcher<E>`] - The multicast listener list
//! - [`ListenerId`] - Handle returned by [`EventDispatcher::connect`]
//! - [`ScopedListener`] - RAII guard that disconnects when dropped
//!
//! # Example
//!
//! ```
//! use cairn_core::EventDispatcher;
//!
//! let resized = EventDispatcher::<(u32, u32)>::new();
//! let id = resized.connect(|&(w, h)| {
//!     println!("resized to {w}x{h}");
//! });
//! resized.fire(&(640, 480));
//! resized.disconnect(id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a registered listener.
    ///
    /// Use this ID to remove a specific listener via
    /// [`EventDispatcher::disconnect`]. The ID remains valid until the
    /// listener is disconnected or the dispatcher is dropped.
    pub struct ListenerId;
}

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// A multicast listener list for one event type.
///
/// Listeners are invoked synchronously by [`fire`](Self::fire) in
/// registration order. The dispatcher can be temporarily muted with
/// [`set_blocked`](Self::set_blocked), which is useful while pushing a batch
/// of state changes that would otherwise cascade.
pub struct EventDispatcher<E> {
    listeners: Mutex<SlotMap<ListenerId, Listener<E>>>,
    blocked: AtomicBool,
}

impl<E> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventDispatcher<E> {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Register a listener. Returns an ID for later disconnection.
    pub fn connect<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.listeners.lock().insert(Arc::new(listener))
    }

    /// Remove a listener by ID.
    ///
    /// Returns `true` if the listener was found and removed.
    pub fn disconnect(&self, id: ListenerId) -> bool {
        self.listeners.lock().remove(id).is_some()
    }

    /// Remove all listeners.
    pub fn disconnect_all(&self) {
        self.listeners.lock().clear();
    }

    /// The number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Mute or unmute the dispatcher.
    ///
    /// While blocked, [`fire`](Self::fire) does nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether the dispatcher is currently muted.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Fire an event to every registered listener.
    ///
    /// Listeners registered at the time of the call are invoked in the
    /// calling thread before this method returns.
    pub fn fire(&self, event: &E) {
        if self.is_blocked() {
            tracing::trace!(target: "cairn_core::dispatch", "dispatcher blocked, dropping event");
            return;
        }

        // Snapshot the listener list so a listener that connects or
        // disconnects during dispatch does not deadlock on the lock.
        let snapshot: Vec<Listener<E>> = self.listeners.lock().values().cloned().collect();
        tracing::trace!(target: "cairn_core::dispatch", listener_count = snapshot.len(), "firing event");
        for listener in snapshot {
            listener(event);
        }
    }

    /// Register a listener bound to a guard that disconnects on drop.
    ///
    /// The guard holds a weak reference, so it is safe for the dispatcher
    /// to be dropped before the guard.
    pub fn connect_scoped<F>(self: &Arc<Self>, listener: F) -> ScopedListener<E>
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = self.connect(listener);
        ScopedListener {
            dispatcher: Arc::downgrade(self),
            id,
        }
    }
}

/// RAII guard for a listener registration.
///
/// Dropping the guard disconnects the listener, which keeps listener
/// lifetimes tied to the receiver's scope.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use cairn_core::EventDispatcher;
///
/// let dispatcher = Arc::new(EventDispatcher::<i32>::new());
/// let hits = Arc::new(AtomicU32::new(0));
/// {
///     let hits = hits.clone();
///     let _guard = dispatcher.connect_scoped(move |_| {
///         hits.fetch_add(1, Ordering::SeqCst);
///     });
///     dispatcher.fire(&1);
/// }
/// dispatcher.fire(&2); // guard dropped, listener gone
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct ScopedListener<E> {
    dispatcher: Weak<EventDispatcher<E>>,
    id: ListenerId,
}

impl<E> ScopedListener<E> {
    /// The ID of the guarded listener.
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl<E> Drop for ScopedListener<E> {
    fn drop(&mut self) {
        if let Some(dispatcher) = self.dispatcher.upgrade() {
            let _ = dispatcher.disconnect(self.id);
        }
    }
}
