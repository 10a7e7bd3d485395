use std::fmt;
use std::sync::Arc;

use crate::internal::sync::ArgList;
use crate::key::Key;
use crate::registration::{downcast_handle, AnyArc};
use crate::report::UnresolvedReason;

struct ArgEntry {
    key: Key,
    outcome: Result<AnyArc, UnresolvedReason>,
}

/// Per-parameter outcome of [`Container::resolve_all`](crate::Container::resolve_all).
///
/// Same length and order as the requested keys. Every entry is either a
/// resolved value or the reason it could not be resolved.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, Key};
///
/// struct Missing;
///
/// let mut container = Container::new();
/// container.bind_instance(3u32).unwrap();
///
/// let args = container
///     .resolve_all(&[Key::of::<u32>(), Key::of::<Missing>()])
///     .unwrap();
/// assert_eq!(args.len(), 2);
/// assert_eq!(args.get::<u32>(0).as_deref(), Some(&3));
/// assert!(!args.is_resolved(1));
/// assert!(!args.is_complete());
/// ```
#[derive(Default)]
pub struct ResolvedArgs {
    entries: ArgList<ArgEntry>,
}

impl ResolvedArgs {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: ArgList::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, key: Key, outcome: Result<AnyArc, UnresolvedReason>) {
        self.entries.push(ArgEntry { key, outcome });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every parameter resolved.
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.outcome.is_ok())
    }

    pub fn is_resolved(&self, index: usize) -> bool {
        self.entries
            .get(index)
            .map_or(false, |e| e.outcome.is_ok())
    }

    /// The value at `index`, if it resolved and is a `D`.
    pub fn get<D>(&self, index: usize) -> Option<Arc<D>>
    where
        D: ?Sized + Send + Sync + 'static,
    {
        match &self.entries.get(index)?.outcome {
            Ok(value) => downcast_handle::<D>(value),
            Err(_) => None,
        }
    }

    /// Unresolved parameters as `(index, key, reason)`.
    pub fn missing(&self) -> impl Iterator<Item = (usize, &Key, &UnresolvedReason)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, e)| match &e.outcome {
                Ok(_) => None,
                Err(reason) => Some((index, &e.key, reason)),
            })
    }

    /// Resolved values in order, or `None` unless all resolved.
    pub(crate) fn values(&self) -> Option<ArgList<AnyArc>> {
        self.entries
            .iter()
            .map(|e| e.outcome.as_ref().ok().cloned())
            .collect()
    }
}

impl fmt::Debug for ResolvedArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for entry in self.entries.iter() {
            match &entry.outcome {
                Ok(_) => list.entry(&format_args!("{}: resolved", entry.key.short_name())),
                Err(reason) => list.entry(&format_args!("{}: {}", entry.key.short_name(), reason)),
            };
        }
        list.finish()
    }
}
