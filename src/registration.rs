//! Binding storage: singleton instances and transient factories.

use std::any::Any;
use std::sync::Arc;

use crate::internal::sync::{Map, Set};
use crate::key::Key;

// Type-erased Arc for storage
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// Produces a fresh, not yet injected, transient instance.
pub(crate) type Factory = Arc<dyn Fn() -> Instance + Send + Sync>;

/// Downcasts a stored handle back to `Arc<D>`.
///
/// Every handle is stored as `Arc<Arc<D>>` erased to `AnyArc`, which lets
/// sized types and trait objects share one representation.
#[inline]
pub(crate) fn downcast_handle<D>(value: &AnyArc) -> Option<Arc<D>>
where
    D: ?Sized + Send + Sync + 'static,
{
    value.downcast_ref::<Arc<D>>().cloned()
}

/// The concrete object behind a binding, which is what gets injected.
#[derive(Clone)]
pub(crate) struct Target {
    pub(crate) object: AnyArc,
    pub(crate) concrete: Key,
}

impl Target {
    pub(crate) fn new<C: Send + Sync + 'static>(object: Arc<C>) -> Self {
        Self {
            object,
            concrete: Key::of::<C>(),
        }
    }

    /// Allocation address; identical for every handle to the same object.
    #[inline]
    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.object) as *const () as usize
    }
}

/// A value as handed to consumers plus the concrete object to inject.
#[derive(Clone)]
pub(crate) struct Instance {
    /// `Arc<Arc<D>>` where `D` is the bound key type
    pub(crate) value: AnyArc,
    pub(crate) target: Target,
}

impl Instance {
    /// Instance bound under its own concrete type.
    pub(crate) fn concrete<C: Send + Sync + 'static>(object: Arc<C>) -> Self {
        Self::with_handle(object.clone(), object)
    }

    /// Instance bound under `I`, backed by concrete `C`.
    pub(crate) fn with_handle<I, C>(handle: Arc<I>, object: Arc<C>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        C: Send + Sync + 'static,
    {
        Self {
            value: Arc::new(handle),
            target: Target::new(object),
        }
    }
}

pub(crate) struct SingletonEntry {
    pub(crate) instance: Instance,
    /// Registration order, used to make bulk injection deterministic
    pub(crate) seq: u64,
}

pub(crate) struct FactoryEntry {
    pub(crate) produce: Factory,
    pub(crate) implementation: &'static str,
}

/// Result of a registry lookup, singleton first.
pub(crate) enum Lookup<'a> {
    Singleton(&'a Instance),
    Factory(&'a FactoryEntry),
    Missing,
}

/// Registry holding both binding maps.
///
/// A key lives in at most one of the two maps at a time; inserting into one
/// removes it from the other.
#[derive(Default)]
pub(crate) struct Registry {
    singletons: Map<Key, SingletonEntry>,
    factories: Map<Key, FactoryEntry>,
    unique: Set<Key>,
    next_seq: u64,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stores a singleton, returning true when it replaced a previous binding.
    pub(crate) fn insert_singleton(&mut self, key: Key, instance: Instance) -> bool {
        let replaced_factory = self.factories.remove(&key).is_some();
        let seq = self.next_seq;
        self.next_seq += 1;
        let replaced = self
            .singletons
            .insert(key, SingletonEntry { instance, seq })
            .is_some();
        replaced || replaced_factory
    }

    /// Stores a factory, returning true when it replaced a previous binding.
    pub(crate) fn insert_factory(&mut self, key: Key, entry: FactoryEntry) -> bool {
        let replaced_singleton = self.singletons.remove(&key).is_some();
        let replaced = self.factories.insert(key, entry).is_some();
        replaced || replaced_singleton
    }

    #[inline]
    pub(crate) fn lookup(&self, key: &Key) -> Lookup<'_> {
        if let Some(entry) = self.singletons.get(key) {
            return Lookup::Singleton(&entry.instance);
        }
        match self.factories.get(key) {
            Some(factory) => Lookup::Factory(factory),
            None => Lookup::Missing,
        }
    }

    #[inline]
    pub(crate) fn contains_key(&self, key: &Key) -> bool {
        self.singletons.contains_key(key) || self.factories.contains_key(key)
    }

    /// All singletons in registration order.
    pub(crate) fn singletons(&self) -> Vec<(&Key, &Instance)> {
        let mut entries: Vec<_> = self.singletons.iter().collect();
        entries.sort_by_key(|(_, entry)| entry.seq);
        entries
            .into_iter()
            .map(|(key, entry)| (key, &entry.instance))
            .collect()
    }

    pub(crate) fn factories(&self) -> impl Iterator<Item = (&Key, &FactoryEntry)> {
        self.factories.iter()
    }

    pub(crate) fn mark_unique(&mut self, key: Key) {
        self.unique.insert(key);
    }

    #[inline]
    pub(crate) fn is_unique(&self, key: &Key) -> bool {
        self.unique.contains(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.singletons.len() + self.factories.len()
    }
}
