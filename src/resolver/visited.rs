use std::sync::Arc;

use crate::internal::sync::Map;
use crate::registration::{AnyArc, Target};

/// Objects already injected, keyed by identity.
///
/// Identity is the allocation address, so an object bound under several keys
/// is one entry. The set holds a strong handle to every entry: an address
/// cannot be reused by a new allocation while the set remembers it. A set may
/// be shared across passes to continue injection without touching objects
/// twice.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, Lifetime, VisitedSet};
///
/// #[derive(Default)]
/// struct Inventory;
///
/// let mut container = Container::new();
/// container.bind_type::<Inventory>(Lifetime::Singleton).unwrap();
///
/// let mut visited = VisitedSet::new();
/// container.inject_all_with(&mut visited).unwrap();
///
/// let inventory = container.lookup::<Inventory>().unwrap();
/// assert!(visited.contains(&inventory));
/// ```
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    entries: Map<usize, AnyArc>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the object behind `object` was already visited.
    pub fn contains<T: ?Sized>(&self, object: &Arc<T>) -> bool {
        self.entries.contains_key(&identity_of(object))
    }

    /// Marks the object as visited so later passes skip it.
    ///
    /// Returns false if it was already marked.
    pub fn mark<T>(&mut self, object: &Arc<T>) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let identity = identity_of(object);
        if self.entries.contains_key(&identity) {
            return false;
        }
        self.entries.insert(identity, Arc::new(object.clone()));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets every entry and releases the handles held for them.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub(crate) fn contains_target(&self, target: &Target) -> bool {
        self.entries.contains_key(&target.identity())
    }

    #[inline]
    pub(crate) fn insert_target(&mut self, target: &Target) -> bool {
        let identity = target.identity();
        if self.entries.contains_key(&identity) {
            return false;
        }
        self.entries.insert(identity, target.object.clone());
        true
    }

    /// Drops an entry whose injection was aborted.
    #[inline]
    pub(crate) fn remove_target(&mut self, target: &Target) {
        self.entries.remove(&target.identity());
    }
}

// Thin pointer, so a trait object handle maps to its concrete allocation
#[inline]
fn identity_of<T: ?Sized>(object: &Arc<T>) -> usize {
    Arc::as_ptr(object) as *const () as usize
}
