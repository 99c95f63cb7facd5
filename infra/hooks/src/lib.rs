//! # Hooks
//!
//! Synchronous, type-keyed lifecycle hooks. A host emits an event (for example
//! [`EnqueueAssets`] once per page render) and every listener registered for that
//! event type runs in priority order before `emit` returns.
//!
//! * **Type-Safe**: Events are identified by their Rust type.
//! * **Ordered**: Lower priority runs first; equal priorities run in registration order.
//! * **Re-entrant**: Listeners may register or remove hooks while an event is being emitted.
//!
//! # Example
//!
//! ```rust
//! use fontloom_hooks::{EnqueueAssets, Hooks};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let hooks = Hooks::new();
//! let renders = Arc::new(AtomicUsize::new(0));
//!
//! let counter = Arc::clone(&renders);
//! hooks.on(move |_: &EnqueueAssets| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! assert_eq!(hooks.emit(&EnqueueAssets), 1);
//! assert_eq!(renders.load(Ordering::SeqCst), 1);
//! ```

mod hooks;
mod lifecycle;

pub use hooks::{DEFAULT_PRIORITY, Event, Hooks, ListenerId};
pub use lifecycle::EnqueueAssets;
