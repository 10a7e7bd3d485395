//! Binding lifetime definitions.

/// Lifetimes controlling how a key yields instances
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, Lifetime};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Clock;
/// #[derive(Default)]
/// struct Ticket;
///
/// let mut container = Container::new();
/// container.bind_type::<Clock>(Lifetime::Singleton).unwrap();
/// container.bind_type::<Ticket>(Lifetime::Transient).unwrap();
///
/// // Singleton: the same instance on every lookup
/// let a = container.lookup::<Clock>().unwrap();
/// let b = container.lookup::<Clock>().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// // Transient: a fresh instance on every lookup
/// let x = container.lookup::<Ticket>().unwrap();
/// let y = container.lookup::<Ticket>().unwrap();
/// assert!(!Arc::ptr_eq(&x, &y));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub enum Lifetime {
    /// Single instance per container, reused for every resolution
    ///
    /// Singletons are constructed eagerly at bind time (or supplied by the
    /// caller) and injected during the first pass that touches them.
    #[default]
    Singleton,
    /// New instance per resolution, never cached
    ///
    /// Every resolution runs the factory and injects the fresh instance
    /// before handing it to the consumer.
    Transient,
}

impl std::fmt::Display for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lifetime::Singleton => f.write_str("singleton"),
            Lifetime::Transient => f.write_str("transient"),
        }
    }
}
