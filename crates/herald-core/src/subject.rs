#![forbid(unsafe_code)]

//! Observable value with an id-keyed, weak-reference listener registry.
//!
//! # Design
//!
//! [`Subject<T, K>`] wraps a value of type `T` in shared, reference-counted
//! storage (`Rc<RefCell<..>>`) next to an insertion-ordered list of
//! `(id, Weak<dyn Listener<T>>)` entries. Every mutation notifies all live
//! listeners in registration order. The subject never owns a listener:
//! whoever created the `Rc` decides how long it lives.
//!
//! # Invariants
//!
//! 1. No two entries share an id.
//! 2. Listeners are notified in registration order. A replaced entry keeps
//!    its original slot.
//! 3. An expired entry (listener dropped without `unregister`) is skipped
//!    silently and stays in the registry until `unregister`, `prune_expired`,
//!    or a pass with `prune_expired_on_notify` removes it.
//! 4. `version` increments by exactly one per mutation.
//!
//! # Re-entrancy
//!
//! No `RefCell` borrow is held while callbacks run, so a listener may read
//! the subject, register or unregister, or even call `set_value` again. A
//! nested `set_value` runs its whole pass before control returns to the
//! outer pass, which keeps delivering the value it started with. Entries
//! registered during a pass are not part of that pass; entries unregistered
//! during a pass still get that pass's value. There is no guard against
//! unbounded recursion: a listener that unconditionally sets the value it is
//! notified about will overflow the stack.
//!
//! # Performance
//!
//! | Operation      | Complexity                  |
//! |----------------|-----------------------------|
//! | `current_value`| O(1) + clone                |
//! | `set_value`    | O(L) where L = entries      |
//! | `register`     | O(L) (duplicate scan)       |
//! | `unregister`   | O(L)                        |

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace_span};

use crate::config::{DuplicatePolicy, RegistryConfig};
use crate::listener::Listener;

type ListenerWeak<T> = Weak<dyn Listener<T>>;

/// Result of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Registration {
    /// A new entry was appended.
    Added,
    /// The id was taken and the policy kept the existing entry.
    Skipped,
    /// The id was taken and the new listener replaced the old one in place.
    Replaced,
}

impl Registration {
    /// Whether the supplied listener is now the one stored under the id.
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

struct Entry<T, K> {
    id: K,
    listener: ListenerWeak<T>,
}

struct SubjectInner<T, K> {
    value: T,
    version: u64,
    config: RegistryConfig,
    entries: Vec<Entry<T, K>>,
}

impl<T, K: PartialEq> SubjectInner<T, K> {
    fn position<Q>(&self, id: &Q) -> Option<usize>
    where
        K: std::borrow::Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries
            .iter()
            .position(|e| <K as std::borrow::Borrow<Q>>::borrow(&e.id) == id)
    }
}

/// A shared value whose mutations are broadcast to registered listeners.
///
/// Cloning a `Subject` creates a new handle to the **same** state: both
/// handles see the same value, version, and listeners.
///
/// `K` is the registration id type. It defaults to `String`; any small
/// `Eq + Clone` key (integers, newtypes) works.
pub struct Subject<T, K = String> {
    inner: Rc<RefCell<SubjectInner<T, K>>>,
}

impl<T, K> Clone for Subject<T, K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug, K: fmt::Debug> fmt::Debug for Subject<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Subject")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field(
                "ids",
                &inner.entries.iter().map(|e| &e.id).collect::<Vec<_>>(),
            )
            .field("config", &inner.config)
            .finish()
    }
}

impl<T, K> Subject<T, K>
where
    T: Clone + 'static,
    K: PartialEq + Clone + fmt::Debug + 'static,
{
    /// Create a subject with the given initial value and default config.
    ///
    /// The initial version is 0 and no listeners are registered.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::with_config(value, RegistryConfig::default())
    }

    /// Create a subject with an explicit registry configuration.
    #[must_use]
    pub fn with_config(value: T, config: RegistryConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectInner {
                value,
                version: 0,
                config,
                entries: Vec::new(),
            })),
        }
    }

    /// The configuration this subject was built with.
    #[must_use]
    pub fn config(&self) -> RegistryConfig {
        self.inner.borrow().config.clone()
    }

    /// Register `listener` under `id`.
    ///
    /// Only a `Weak` handle is stored. If `id` is already present the
    /// configured [`DuplicatePolicy`] decides: `KeepFirst` leaves the
    /// registry untouched, `Replace` swaps the listener in place.
    pub fn register<L>(&self, listener: &Rc<L>, id: impl Into<K>) -> Registration
    where
        L: Listener<T> + 'static,
    {
        let weak = Rc::downgrade(listener);
        let weak: ListenerWeak<T> = weak;
        self.insert(weak, id.into())
    }

    /// Register `listener` under `id` and, if it became active, notify it
    /// immediately with the current value.
    ///
    /// Only the newly registered listener is notified; the others are not.
    pub fn register_and_notify<L>(&self, listener: &Rc<L>, id: impl Into<K>) -> Registration
    where
        L: Listener<T> + 'static,
    {
        let outcome = self.register(listener, id);
        if outcome.is_active() {
            let value = self.current_value();
            listener.on_value_changed(&value);
        }
        outcome
    }

    /// Register a closure under `id` and return a guard that owns it.
    ///
    /// Dropping the [`Subscription`] expires the entry: the callback is not
    /// called again, though the id stays registered until `unregister` or
    /// pruning removes it.
    pub fn subscribe<F>(&self, id: impl Into<K>, callback: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let strong: Rc<F> = Rc::new(callback);
        let registration = self.register(&strong, id);
        Subscription {
            registration,
            _guard: Box::new(strong),
        }
    }

    fn insert(&self, listener: ListenerWeak<T>, id: K) -> Registration {
        let mut inner = self.inner.borrow_mut();
        match inner.position(&id) {
            None => {
                debug!(?id, "listener registered");
                inner.entries.push(Entry { id, listener });
                Registration::Added
            }
            Some(idx) => match inner.config.duplicate_policy {
                DuplicatePolicy::KeepFirst => {
                    debug!(?id, "duplicate registration ignored");
                    Registration::Skipped
                }
                DuplicatePolicy::Replace => {
                    debug!(?id, "listener replaced");
                    inner.entries[idx].listener = listener;
                    Registration::Replaced
                }
            },
        }
    }

    /// Remove the entry registered under `id`.
    ///
    /// Returns `false` if there was no such entry; that is not an error.
    pub fn unregister<Q>(&self, id: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: PartialEq + fmt::Debug + ?Sized,
    {
        let mut inner = self.inner.borrow_mut();
        match inner.position(id) {
            Some(idx) => {
                inner.entries.remove(idx);
                debug!(?id, "listener unregistered");
                true
            }
            None => false,
        }
    }

    /// Replace the value and notify every live listener with it.
    ///
    /// Notification happens even if the new value equals the old one; use
    /// [`set_if_changed`](Self::set_if_changed) to skip no-op writes.
    pub fn set_value(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Modify the value in place, then notify as [`set_value`](Self::set_value).
    ///
    /// The closure must not touch this subject; it runs under the borrow.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut inner = self.inner.borrow_mut();
            f(&mut inner.value);
            inner.version += 1;
        }
        self.notify();
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn current_value(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    ///
    /// The closure must not touch this subject; it runs under the borrow.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of mutations so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Whether an entry exists under `id` (live or expired).
    #[must_use]
    pub fn contains<Q>(&self, id: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.inner.borrow().position(id).is_some()
    }

    /// Number of entries, including expired ones not yet removed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Number of entries whose listener is still alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.listener.strong_count() > 0)
            .count()
    }

    /// Registered ids in notification order.
    #[must_use]
    pub fn ids(&self) -> Vec<K> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|e| e.id.clone())
            .collect()
    }

    /// Drop every entry whose listener has been destroyed.
    ///
    /// Returns how many entries were removed.
    pub fn prune_expired(&self) -> usize {
        let removed = prune(&mut self.inner.borrow_mut().entries);
        if removed > 0 {
            debug!(removed, "expired listeners pruned");
        }
        removed
    }

    /// Deliver the current value to every live listener.
    fn notify(&self) {
        // Snapshot value and weak handles so no borrow is held during callbacks.
        // Each handle is upgraded only right before its call.
        let (value, listeners, version) = {
            let mut inner = self.inner.borrow_mut();
            if inner.config.prune_expired_on_notify {
                let removed = prune(&mut inner.entries);
                if removed > 0 {
                    debug!(removed, "expired listeners pruned");
                }
            }
            let listeners: Vec<ListenerWeak<T>> = inner
                .entries
                .iter()
                .map(|e| Weak::clone(&e.listener))
                .collect();
            (inner.value.clone(), listeners, inner.version)
        };

        let _span = trace_span!("notify", version, listeners = listeners.len()).entered();
        for weak in &listeners {
            if let Some(listener) = weak.upgrade() {
                listener.on_value_changed(&value);
            }
        }
    }
}

impl<T, K> Subject<T, K>
where
    T: Clone + PartialEq + 'static,
    K: PartialEq + Clone + fmt::Debug + 'static,
{
    /// Set the value only if it differs from the current one.
    ///
    /// Returns `true` if the value changed and listeners were notified.
    pub fn set_if_changed(&self, value: T) -> bool {
        if self.inner.borrow().value == value {
            return false;
        }
        self.set_value(value);
        true
    }
}

impl<T, K> Default for Subject<T, K>
where
    T: Clone + Default + 'static,
    K: PartialEq + Clone + fmt::Debug + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

fn prune<T, K>(entries: &mut Vec<Entry<T, K>>) -> usize {
    let before = entries.len();
    entries.retain(|e| e.listener.strong_count() > 0);
    before - entries.len()
}

/// RAII guard for a closure registered with [`Subject::subscribe`].
///
/// The guard owns the only strong reference to the callback. Dropping it
/// makes the subject's `Weak` entry fail to upgrade on the next pass.
pub struct Subscription {
    registration: Registration,
    /// Type-erased `Rc<F>` keeping the callback alive.
    _guard: Box<dyn std::any::Any>,
}

impl Subscription {
    /// How the registration went. A `Skipped` subscription is never called.
    #[must_use]
    pub fn registration(&self) -> Registration {
        self.registration
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("registration", &self.registration)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
