use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{trace, warn};

/// Priority used by [`Hooks::on`].
pub const DEFAULT_PRIORITY: i32 = 10;

/// Marker trait for types that can be emitted through [`Hooks`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

/// Handle returned on registration, used to remove a listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Arc<dyn Fn(&dyn Any) + Send + Sync>;

struct Listener {
    id: ListenerId,
    priority: i32,
    callback: Callback,
}

/// A thread-safe registry of lifecycle listeners, keyed by event [`TypeId`].
///
/// Cloning is cheap and clones share the same listeners.
#[derive(Clone, Default)]
pub struct Hooks {
    listeners: Arc<RwLock<FxHashMap<TypeId, Vec<Listener>>>>,
    next_id: Arc<AtomicU64>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.read();
        f.debug_struct("Hooks")
            .field("events", &listeners.len())
            .field("listeners", &listeners.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl Hooks {
    /// Creates an empty hook registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for events of type `E` at [`DEFAULT_PRIORITY`].
    pub fn on<E, F>(&self, listener: F) -> ListenerId
    where
        E: Event,
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.on_with_priority(DEFAULT_PRIORITY, listener)
    }

    /// Registers `listener` for events of type `E`.
    ///
    /// Lower priorities run first. Listeners sharing a priority run in the order
    /// they were registered.
    pub fn on_with_priority<E, F>(&self, priority: i32, listener: F) -> ListenerId
    where
        E: Event,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let callback: Callback = Arc::new(move |event: &dyn Any| {
            if let Some(event) = event.downcast_ref::<E>() {
                listener(event);
            } else {
                warn!(event = std::any::type_name::<E>(), "Listener skipped: event type mismatch");
            }
        });

        let mut listeners = self.listeners.write();
        let slot = listeners.entry(TypeId::of::<E>()).or_default();
        let at = slot.partition_point(|l| l.priority <= priority);
        slot.insert(at, Listener { id, priority, callback });

        trace!(event = std::any::type_name::<E>(), priority, "Listener registered");
        id
    }

    /// Removes a listener previously registered for `E`.
    ///
    /// Returns `false` when no such listener exists.
    pub fn off<E: Event>(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let Some(slot) = listeners.get_mut(&TypeId::of::<E>()) else {
            return false;
        };

        let before = slot.len();
        slot.retain(|l| l.id != id);
        let removed = slot.len() != before;
        if slot.is_empty() {
            listeners.remove(&TypeId::of::<E>());
        }
        removed
    }

    /// Runs every listener registered for `E` and returns how many ran.
    ///
    /// Listeners are snapshotted before dispatch, so hooks added or removed by a
    /// listener take effect from the next emit.
    pub fn emit<E: Event>(&self, event: &E) -> usize {
        let callbacks: Vec<Callback> = {
            let listeners = self.listeners.read();
            listeners
                .get(&TypeId::of::<E>())
                .map(|slot| slot.iter().map(|l| Arc::clone(&l.callback)).collect())
                .unwrap_or_default()
        };

        if callbacks.is_empty() {
            trace!(event = std::any::type_name::<E>(), "Event emitted with no listeners");
            return 0;
        }

        for callback in &callbacks {
            callback(event);
        }

        trace!(event = std::any::type_name::<E>(), count = callbacks.len(), "Event dispatched");
        callbacks.len()
    }

    /// Number of listeners registered for `E`.
    #[must_use]
    pub fn count<E: Event>(&self) -> usize {
        self.listeners.read().get(&TypeId::of::<E>()).map_or(0, Vec::len)
    }

    /// Whether at least one listener is registered for `E`.
    #[must_use]
    pub fn has<E: Event>(&self) -> bool {
        self.count::<E>() > 0
    }

    /// Drops every listener. Returns the number of event types that were cleared.
    pub fn clear(&self) -> usize {
        let mut listeners = self.listeners.write();
        let count = listeners.len();
        listeners.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Debug)]
    struct Render(u32);

    #[test]
    fn priorities_order_listeners() {
        let hooks = Hooks::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for (priority, tag) in [(20, "late"), (5, "early"), (10, "default-a"), (10, "default-b")] {
            let seen = Arc::clone(&seen);
            hooks.on_with_priority(priority, move |_: &Render| seen.lock().push(tag));
        }

        assert_eq!(hooks.emit(&Render(1)), 4);
        assert_eq!(*seen.lock(), vec!["early", "default-a", "default-b", "late"]);
    }

    #[test]
    fn off_removes_only_the_given_listener() {
        let hooks = Hooks::new();
        let first = hooks.on(|_: &Render| {});
        let _second = hooks.on(|_: &Render| {});

        assert!(hooks.off::<Render>(first));
        assert!(!hooks.off::<Render>(first));
        assert_eq!(hooks.count::<Render>(), 1);
    }

    #[test]
    fn listener_may_register_during_emit() {
        let hooks = Hooks::new();
        let inner = hooks.clone();
        hooks.on(move |_: &Render| {
            inner.on(|_: &Render| {});
        });

        assert_eq!(hooks.emit(&Render(0)), 1);
        assert_eq!(hooks.count::<Render>(), 2);
    }
}
