//! Observers for injection events.
//!
//! Hooks let an application trace what the container does during injection
//! passes: which objects are injected, which transients are created and which
//! members are left unresolved.

use std::sync::Arc;
use std::time::Duration;

use crate::key::Key;
use crate::report::Diagnostic;

/// Observer trait for injection events.
///
/// Observer calls are made synchronously during a pass, so implementations
/// should stay lightweight.
///
/// # Examples
///
/// ```
/// use ferrous_inject::{Container, DiObserver, Diagnostic, Key, Lifetime, Slot};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Missing {
///     seen: Mutex<Vec<String>>,
/// }
///
/// impl DiObserver for Missing {
///     fn injecting(&self, _key: &Key) {}
///     fn injected(&self, _key: &Key, _duration: Duration) {}
///     fn unresolved(&self, diagnostic: &Diagnostic) {
///         self.seen.lock().unwrap().push(diagnostic.dependency.to_string());
///     }
/// }
///
/// #[derive(Default)]
/// struct Engine;
/// #[derive(Default)]
/// struct Car {
///     engine: Slot<Engine>,
/// }
///
/// let observer = Arc::new(Missing::default());
/// let mut container = Container::new();
/// container.add_observer(observer.clone());
/// container.bind_type::<Car>(Lifetime::Singleton).unwrap();
/// container.members::<Car>().slot("engine", |c| &c.engine);
/// container.inject_all().unwrap();
///
/// assert_eq!(observer.seen.lock().unwrap().len(), 1);
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before the members of an object are injected.
    ///
    /// `key` is the concrete type of the object.
    fn injecting(&self, key: &Key);

    /// Called after all members of an object were processed.
    fn injected(&self, key: &Key, duration: Duration);

    /// Called when a transient factory produced a new object.
    fn transient_created(&self, key: &Key) {
        let _ = key;
    }

    /// Called for every member that could not be injected.
    fn unresolved(&self, diagnostic: &Diagnostic) {
        let _ = diagnostic;
    }
}

/// Collection of observers notified by the container.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn injecting(&self, key: &Key) {
        for observer in &self.observers {
            observer.injecting(key);
        }
    }

    pub(crate) fn injected(&self, key: &Key, duration: Duration) {
        for observer in &self.observers {
            observer.injected(key, duration);
        }
    }

    pub(crate) fn transient_created(&self, key: &Key) {
        for observer in &self.observers {
            observer.transient_created(key);
        }
    }

    pub(crate) fn unresolved(&self, diagnostic: &Diagnostic) {
        for observer in &self.observers {
            observer.unresolved(diagnostic);
        }
    }
}

/// Observer that forwards every event to `tracing`.
///
/// Injection events are emitted at `trace`, transient creation at `debug`
/// and unresolved members at `warn`.
///
/// ```
/// use ferrous_inject::{Container, LoggingObserver};
/// use std::sync::Arc;
///
/// let mut container = Container::new();
/// container.add_observer(Arc::new(LoggingObserver::with_prefix("[app]")));
/// ```
#[derive(Debug, Clone)]
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    pub fn new() -> Self {
        Self {
            prefix: "[DI]".to_string(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn injecting(&self, key: &Key) {
        tracing::trace!(prefix = %self.prefix, target_type = key.display_name(), "injecting");
    }

    fn injected(&self, key: &Key, duration: Duration) {
        tracing::trace!(
            prefix = %self.prefix,
            target_type = key.display_name(),
            elapsed_us = duration.as_micros() as u64,
            "injected"
        );
    }

    fn transient_created(&self, key: &Key) {
        tracing::debug!(prefix = %self.prefix, key = key.display_name(), "transient created");
    }

    fn unresolved(&self, diagnostic: &Diagnostic) {
        tracing::warn!(prefix = %self.prefix, "unresolved dependency: {}", diagnostic);
    }
}
