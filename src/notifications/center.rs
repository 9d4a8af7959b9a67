//! Notification Center
//!
//! The shared, string-keyed broadcast registry that typed notifiers delegate
//! to. It knows nothing about vocabularies: it only matches registrations on
//! [`NotificationKey`] and calls them back synchronously.
//!
//! # Delivery order
//!
//! Callbacks for a key are invoked in an unspecified order. Callers must not
//! depend on registration order, even though the current table happens to
//! preserve it.
//!
//! # Thread safety
//!
//! The registration table sits behind a `parking_lot::RwLock`. Callbacks run
//! on the posting thread after the lock is released, against a snapshot of
//! the registrations that matched, so a callback may register, remove or post
//! without deadlocking. Removals made during a post apply to later posts.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock, Weak};
use log::{debug, log_enabled, trace, Level};
use parking_lot::RwLock;

use crate::notifications::key::NotificationKey;
use crate::notifications::observer::{Observer, ObserverId};
use crate::notifications::payload::{Notification, Origin, UserInfo};

static SHARED_CENTER: OnceLock<NotificationCenter> = OnceLock::new();

/// Notification center settings
#[derive(Debug, Clone, Default)]
pub struct CenterConfig {
    /// Emit a trace line for every callback invocation
    pub trace_delivery: bool,
}

/// Type-erased binding of an observer to its callback
trait Dispatch: Send + Sync {
    /// Invoke the callback; false when the observer has been dropped
    fn dispatch(&self, notification: &Notification) -> bool;

    fn is_alive(&self) -> bool;
}

struct BoundCallback<O, F> {
    observer: Weak<O>,
    callback: F,
}

impl<O, F> Dispatch for BoundCallback<O, F>
where
    O: Observer,
    F: Fn(&O, &Notification) + Send + Sync + 'static,
{
    fn dispatch(&self, notification: &Notification) -> bool {
        match self.observer.upgrade() {
            Some(observer) => {
                (self.callback)(&observer, notification);
                true
            }
            None => false,
        }
    }

    fn is_alive(&self) -> bool {
        self.observer.strong_count() > 0
    }
}

#[derive(Clone)]
struct Registration {
    observer_id: ObserverId,
    observer_name: Arc<str>,
    dispatch: Arc<dyn Dispatch>,
}

#[derive(Default)]
struct CenterState {
    registrations: HashMap<NotificationKey, Vec<Registration>>,
    shut_down: bool,
}

/// Process-scoped broadcast registry
pub struct NotificationCenter {
    state: RwLock<CenterState>,
    config: CenterConfig,
}

impl NotificationCenter {
    /// Create an isolated center
    pub fn new() -> Self {
        Self::with_config(CenterConfig::default())
    }

    pub fn with_config(config: CenterConfig) -> Self {
        Self {
            state: RwLock::new(CenterState::default()),
            config,
        }
    }

    /// The process-wide center, created on first use
    pub fn shared() -> &'static NotificationCenter {
        SHARED_CENTER.get_or_init(NotificationCenter::new)
    }

    /// Install the configuration for the process-wide center.
    ///
    /// Returns false if the shared center was already created.
    pub fn init_shared(config: CenterConfig) -> bool {
        SHARED_CENTER.set(NotificationCenter::with_config(config)).is_ok()
    }

    pub fn config(&self) -> &CenterConfig {
        &self.config
    }

    /// Register `callback` for `observer` under `key`.
    ///
    /// Registering the same pair again adds a second registration, so the
    /// callback then runs twice per post. Only a weak reference to the
    /// observer is kept. A dropped observer is never called back, but its
    /// entries stay in the table until a removal of all its keys, an
    /// `unregister(_, None)` by any observer, or [`sweep`](Self::sweep).
    pub fn register<O, F>(&self, key: NotificationKey, observer: &Arc<O>, callback: F)
    where
        O: Observer,
        F: Fn(&O, &Notification) + Send + Sync + 'static,
    {
        let registration = Registration {
            observer_id: observer.observer_id(),
            observer_name: Arc::from(observer.observer_name()),
            dispatch: Arc::new(BoundCallback {
                observer: Arc::downgrade(observer),
                callback,
            }),
        };

        let mut state = self.state.write();
        if state.shut_down {
            debug!("Ignoring registration for '{}' after shutdown", key);
            return;
        }

        debug!("Registered '{}' for '{}'", registration.observer_name, key);
        state.registrations.entry(key).or_default().push(registration);
    }

    /// Invoke every live callback registered under `key`.
    ///
    /// Returns the number of callbacks invoked.
    pub fn deliver(&self, key: &NotificationKey, origin: Option<Origin>, user_info: Option<UserInfo>) -> usize {
        let targets = {
            let state = self.state.read();
            if state.shut_down {
                debug!("Dropping '{}' posted after shutdown", key);
                return 0;
            }
            match state.registrations.get(key) {
                Some(registrations) => registrations.clone(),
                None => Vec::new(),
            }
        };

        if targets.is_empty() {
            trace!("No observers for '{}'", key);
            return 0;
        }

        let notification = Notification::new(key.clone(), origin, user_info);
        let trace_each = self.config.trace_delivery && log_enabled!(Level::Trace);

        let mut delivered = 0;
        for target in &targets {
            if target.dispatch.dispatch(&notification) {
                delivered += 1;
                if trace_each {
                    trace!("Delivered '{}' to '{}'", key, target.observer_name);
                }
            } else if trace_each {
                trace!("Skipped dropped observer '{}' for '{}'", target.observer_name, key);
            }
        }

        debug!("Posted '{}' to {} of {} registrations", key, delivered, targets.len());
        delivered
    }

    /// Remove registrations of `observer_id`, for one key or for every key.
    ///
    /// Removing every key also reclaims entries of dropped observers. The
    /// return value counts only `observer_id`'s registrations; zero is not
    /// an error.
    pub fn unregister(&self, observer_id: ObserverId, key: Option<&NotificationKey>) -> usize {
        let mut state = self.state.write();
        if state.shut_down {
            debug!("Ignoring removal of '{}' after shutdown", observer_id);
            return 0;
        }

        let removed = match key {
            Some(key) => {
                let removed = state
                    .registrations
                    .get_mut(key)
                    .map(|registrations| retain_counting(registrations, |r| r.observer_id != observer_id))
                    .unwrap_or(0);
                if state.registrations.get(key).is_some_and(Vec::is_empty) {
                    state.registrations.remove(key);
                }
                removed
            }
            None => {
                let mut removed = 0;
                let mut swept = 0;
                for registrations in state.registrations.values_mut() {
                    removed += retain_counting(registrations, |r| r.observer_id != observer_id);
                    swept += retain_counting(registrations, |r| r.dispatch.is_alive());
                }
                state.registrations.retain(|_, registrations| !registrations.is_empty());
                if swept > 0 {
                    debug!("Swept {} registration(s) of dropped observers", swept);
                }
                removed
            }
        };

        match key {
            Some(key) => debug!("Removed {} registration(s) of '{}' for '{}'", removed, observer_id, key),
            None => debug!("Removed {} registration(s) of '{}' for all keys", removed, observer_id),
        }
        removed
    }

    /// Drop registrations whose observer no longer exists.
    ///
    /// Dead observers are never called back even without sweeping; this
    /// only reclaims their table entries.
    pub fn sweep(&self) -> usize {
        let mut state = self.state.write();
        let mut removed = 0;
        for registrations in state.registrations.values_mut() {
            removed += retain_counting(registrations, |r| r.dispatch.is_alive());
        }
        state.registrations.retain(|_, registrations| !registrations.is_empty());

        if removed > 0 {
            debug!("Swept {} registration(s) of dropped observers", removed);
        }
        removed
    }

    /// Number of distinct live observers registered under `key`
    pub fn observer_count(&self, key: &NotificationKey) -> usize {
        let state = self.state.read();
        let Some(registrations) = state.registrations.get(key) else {
            return 0;
        };
        registrations
            .iter()
            .filter(|r| r.dispatch.is_alive())
            .map(|r| r.observer_id)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of live registrations under `key`; an observer added twice counts twice
    pub fn live_registration_count(&self, key: &NotificationKey) -> usize {
        self.state
            .read()
            .registrations
            .get(key)
            .map_or(0, |registrations| registrations.iter().filter(|r| r.dispatch.is_alive()).count())
    }

    /// Total number of registrations, including those of dropped observers
    pub fn registration_count(&self) -> usize {
        self.state.read().registrations.values().map(Vec::len).sum()
    }

    /// Keys that currently have at least one registration, sorted
    pub fn keys(&self) -> Vec<NotificationKey> {
        let mut keys: Vec<_> = self.state.read().registrations.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Tear the center down; later operations become no-ops
    pub fn shutdown(&self) {
        let mut state = self.state.write();
        let count: usize = state.registrations.values().map(Vec::len).sum();
        state.registrations.clear();
        state.shut_down = true;
        debug!("Notification center shut down ({} registrations removed)", count);
    }

    pub fn is_shut_down(&self) -> bool {
        self.state.read().shut_down
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

/// `Vec::retain` that reports how many elements were removed
fn retain_counting<T>(items: &mut Vec<T>, keep: impl FnMut(&T) -> bool) -> usize {
    let before = items.len();
    items.retain(keep);
    before - items.len()
}
