//! Binding key types for the dependency injection container.

use std::any::TypeId;

/// Key for binding storage and lookup.
///
/// A key is the identity of a type: concrete structs, primitives and
/// unsized trait objects (`dyn Trait`) all have one. Interface bindings are
/// stored under the key of the trait object, concrete bindings under the key
/// of the struct itself.
///
/// Equality and hashing only look at the [`TypeId`]; the type name is
/// carried along for diagnostics.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Key, key_of_type};
///
/// trait Logger: Send + Sync {}
///
/// let a = key_of_type::<String>();
/// let b = Key::of::<String>();
/// assert_eq!(a, b);
/// assert_eq!(a.display_name(), "alloc::string::String");
///
/// let logger = Key::of::<dyn Logger>();
/// assert!(logger.display_name().contains("Logger"));
/// assert_ne!(logger, a);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Key {
    id: TypeId,
    name: &'static str,
}

impl Key {
    /// Key for any `'static` type, sized or not.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Get the type name for display
    ///
    /// Returns the `std::any::type_name` result captured when the key was
    /// created.
    #[inline]
    pub fn display_name(&self) -> &'static str {
        self.name
    }

    /// Short type name without module path, used in log lines.
    ///
    /// ```rust
    /// use ferrous_inject::Key;
    ///
    /// struct Chest;
    /// assert_eq!(Key::of::<Chest>().short_name(), "Chest");
    /// assert_eq!(Key::of::<Vec<String>>().short_name(), "Vec<String>");
    /// ```
    pub fn short_name(&self) -> String {
        short_type_name(self.name)
    }

    /// The underlying [`TypeId`].
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.id
    }
}

// TypeId-only comparison, the name is informational
impl PartialEq for Key {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Key {}

impl std::hash::Hash for Key {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

// Helper function for creating type keys
#[inline(always)]
pub fn key_of_type<T: ?Sized + 'static>() -> Key {
    Key::of::<T>()
}

/// Strips module paths from every path segment of a type name.
fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        match ch {
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';' => {
                out.push_str(last_segment(&segment));
                segment.clear();
                out.push(ch);
            }
            _ => segment.push(ch),
        }
    }
    out.push_str(last_segment(&segment));
    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
