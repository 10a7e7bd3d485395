//! Ready-made injectable field cell.

use std::fmt;
use std::sync::Arc;

use crate::internal::sync::{self, RwLock};

/// A field that the container fills during injection.
///
/// Objects held by the container are shared behind `Arc`, so an injectable
/// field needs interior mutability. `Slot<T>` starts empty (its default
/// value) and stays empty when the dependency cannot be resolved.
///
/// `T` may be a trait object, which is how interface dependencies are
/// declared.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::Slot;
/// use std::sync::Arc;
///
/// let slot: Slot<String> = Slot::default();
/// assert!(slot.is_empty());
///
/// slot.set(Arc::new("ready".to_string()));
/// assert_eq!(slot.get().as_deref().map(String::as_str), Some("ready"));
/// ```
pub struct Slot<T: ?Sized> {
    value: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized> Slot<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self { value: RwLock::new(None) }
    }

    /// Returns the injected value, if any.
    pub fn get(&self) -> Option<Arc<T>> {
        sync::read(&self.value).clone()
    }

    /// Replaces the current value.
    pub fn set(&self, value: Arc<T>) {
        *sync::write(&self.value) = Some(value);
    }

    /// Empties the slot, returning the previous value.
    pub fn take(&self) -> Option<Arc<T>> {
        sync::write(&self.value).take()
    }

    pub fn is_set(&self) -> bool {
        sync::read(&self.value).is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.is_set()
    }
}

impl<T: ?Sized> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("type", &std::any::type_name::<T>())
            .field("set", &self.is_set())
            .finish()
    }
}
