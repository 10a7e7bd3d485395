//! Binding descriptors for introspection and diagnostics.

use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::report::MemberKind;

/// Describes one binding of a container.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{implements, Container, Lifetime};
///
/// trait Sword: Send + Sync {}
///
/// #[derive(Default)]
/// struct Longsword;
/// impl Sword for Longsword {}
/// implements!(Longsword => dyn Sword);
///
/// let mut container = Container::new();
/// container.bind_instance(42u32).unwrap();
/// container.bind_interface::<dyn Sword, Longsword>(Lifetime::Transient).unwrap();
///
/// let descriptors = container.descriptors();
/// assert_eq!(descriptors.len(), 2);
///
/// let sword = descriptors.iter().find(|d| d.type_name().contains("Sword")).unwrap();
/// assert_eq!(sword.lifetime, Lifetime::Transient);
/// assert!(sword.implementation.ends_with("Longsword"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDescriptor {
    /// Key the binding is registered under
    pub key: Key,
    pub lifetime: Lifetime,
    /// Type name of the concrete object behind the binding
    pub implementation: &'static str,
}

impl BindingDescriptor {
    /// Name of the bound key type.
    pub fn type_name(&self) -> &'static str {
        self.key.display_name()
    }

    /// True when the key differs from the implementation, i.e. an interface binding.
    pub fn is_interface(&self) -> bool {
        self.key.display_name() != self.implementation
    }
}

/// Describes one declared injectable member of a consumer type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: &'static str,
    pub kind: MemberKind,
    /// Dependency keys: one for a field, every parameter for a method
    pub dependencies: Vec<Key>,
}
