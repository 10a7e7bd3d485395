//! Lock and hash map aliases switched by the `parking-lot`, `ahash` and
//! `smallvec` features.

#[cfg(feature = "ahash")]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

#[cfg(feature = "ahash")]
pub(crate) type Set<K> = std::collections::HashSet<K, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
pub(crate) type Set<K> = std::collections::HashSet<K>;

/// Argument buffer for method injection; most methods take few parameters.
#[cfg(feature = "smallvec")]
pub(crate) type ArgList<T> = smallvec::SmallVec<[T; 4]>;
#[cfg(not(feature = "smallvec"))]
pub(crate) type ArgList<T> = Vec<T>;

#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
#[cfg(not(feature = "parking-lot"))]
pub(crate) use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(feature = "parking-lot")]
#[inline]
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read()
}

#[cfg(not(feature = "parking-lot"))]
#[inline]
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    // A poisoned slot still holds a valid Option; keep serving it
    lock.read().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(feature = "parking-lot")]
#[inline]
pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write()
}

#[cfg(not(feature = "parking-lot"))]
#[inline]
pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(std::sync::PoisonError::into_inner)
}
