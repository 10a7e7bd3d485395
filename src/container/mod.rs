//! Container module for dependency injection.
//!
//! This module contains the [`Container`] type: the registry of bindings
//! together with the declared injectable members of consumer types and the
//! options governing injection passes.

use std::sync::Arc;

use crate::config::{ContainerOptions, RebindPolicy};
use crate::descriptors::{BindingDescriptor, MemberDescriptor};
use crate::members::{InjectionPlan, Injectable, MemberTable, Members};
use crate::observer::{DiObserver, Observers};
use crate::registration::{downcast_handle, FactoryEntry, Instance, Lookup, Registry};
use crate::resolver::{Pass, Resolution, VisitedSet};
use crate::upcast::Implements;
use crate::{DiError, DiResult, Key, Lifetime};

/// Runtime dependency injection container.
///
/// Binding requires `&mut Container`; lookup and injection work on a shared
/// reference, so a fully composed container can be handed around freely.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, Lifetime, Slot};
///
/// #[derive(Default)]
/// struct Database;
///
/// #[derive(Default)]
/// struct UserService {
///     db: Slot<Database>,
/// }
///
/// let mut container = Container::new();
/// container.bind_type::<Database>(Lifetime::Singleton).unwrap();
/// container.bind_type::<UserService>(Lifetime::Singleton).unwrap();
/// container.members::<UserService>().slot("db", |s| &s.db);
///
/// let report = container.inject_all().unwrap();
/// assert!(report.is_complete());
/// assert!(container.lookup::<UserService>().unwrap().db.is_set());
/// ```
pub struct Container {
    pub(crate) registry: Registry,
    pub(crate) plans: MemberTable,
    pub(crate) observers: Observers,
    pub(crate) options: ContainerOptions,
}

impl Container {
    /// Creates an empty container with default options.
    pub fn new() -> Self {
        Self::with_options(ContainerOptions::default())
    }

    /// Creates an empty container with the given options.
    pub fn with_options(options: ContainerOptions) -> Self {
        Self {
            registry: Registry::new(),
            plans: MemberTable::new(),
            observers: Observers::new(),
            options,
        }
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    /// Adds an observer notified during every injection pass.
    pub fn add_observer(&mut self, observer: Arc<dyn DiObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    // ----- Instance Bindings -----

    /// Binds an already constructed object as the singleton for its type.
    ///
    /// The object is neither constructed nor injected at bind time; it is
    /// injected by the first pass that touches it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_inject::Container;
    /// use std::sync::Arc;
    ///
    /// struct Config { url: String }
    ///
    /// let mut container = Container::new();
    /// container.bind_instance(Config { url: "postgres://localhost".into() }).unwrap();
    ///
    /// let a = container.lookup::<Config>().unwrap();
    /// let b = container.lookup::<Config>().unwrap();
    /// assert!(Arc::ptr_eq(&a, &b));
    /// assert_eq!(a.url, "postgres://localhost");
    /// ```
    pub fn bind_instance<T>(&mut self, value: T) -> DiResult<&mut Self>
    where
        T: Send + Sync + 'static,
    {
        self.bind_shared(Arc::new(value))
    }

    /// Binds an object the caller keeps a handle to.
    ///
    /// The lookup returns the very same allocation.
    pub fn bind_shared<T>(&mut self, object: Arc<T>) -> DiResult<&mut Self>
    where
        T: Send + Sync + 'static,
    {
        let key = Key::of::<T>();
        self.check_bind(&key, Lifetime::Singleton)?;
        let replaced = self.registry.insert_singleton(key, Instance::concrete(object));
        tracing::debug!(key = key.display_name(), replaced, "bound instance");
        Ok(self)
    }

    /// Binds an existing object under the interface `I`.
    ///
    /// Binding the same object under its own type as well shares one
    /// identity, so it is injected only once per pass.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_inject::{implements, Container};
    /// use std::sync::Arc;
    ///
    /// trait Storage: Send + Sync {
    ///     fn name(&self) -> &str;
    /// }
    ///
    /// struct Disk;
    /// impl Storage for Disk {
    ///     fn name(&self) -> &str { "disk" }
    /// }
    /// implements!(Disk => dyn Storage);
    ///
    /// let disk = Arc::new(Disk);
    /// let mut container = Container::new();
    /// container.bind_shared(disk.clone()).unwrap();
    /// container.bind_shared_as::<dyn Storage, _>(disk).unwrap();
    ///
    /// assert_eq!(container.lookup::<dyn Storage>().unwrap().name(), "disk");
    /// ```
    pub fn bind_shared_as<I, C>(&mut self, object: Arc<C>) -> DiResult<&mut Self>
    where
        I: ?Sized + Send + Sync + 'static,
        C: Implements<I> + Send + Sync + 'static,
    {
        let key = Key::of::<I>();
        self.check_bind(&key, Lifetime::Singleton)?;
        let handle = object.clone().into_interface();
        let replaced = self
            .registry
            .insert_singleton(key, Instance::with_handle(handle, object));
        tracing::debug!(
            key = key.display_name(),
            implementation = std::any::type_name::<C>(),
            replaced,
            "bound instance as interface"
        );
        Ok(self)
    }

    // ----- Type Bindings -----

    /// Binds `T` with the given lifetime, constructing it with `Default`.
    ///
    /// A singleton is constructed immediately (but injected later); a
    /// transient is constructed and injected on every resolution.
    pub fn bind_type<T>(&mut self, lifetime: Lifetime) -> DiResult<&mut Self>
    where
        T: Default + Send + Sync + 'static,
    {
        self.bind_type_with(lifetime, T::default)
    }

    /// Binds `T` with the given lifetime and an explicit constructor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_inject::{Container, Lifetime};
    ///
    /// struct Port(u16);
    ///
    /// let mut container = Container::new();
    /// container.bind_type_with(Lifetime::Transient, || Port(8080)).unwrap();
    /// assert_eq!(container.lookup::<Port>().unwrap().0, 8080);
    /// ```
    pub fn bind_type_with<T, F>(&mut self, lifetime: Lifetime, ctor: F) -> DiResult<&mut Self>
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let key = Key::of::<T>();
        self.check_bind(&key, lifetime)?;
        let replaced = match lifetime {
            Lifetime::Singleton => self
                .registry
                .insert_singleton(key, Instance::concrete(Arc::new(ctor()))),
            Lifetime::Transient => self.registry.insert_factory(
                key,
                FactoryEntry {
                    produce: Arc::new(move || Instance::concrete(Arc::new(ctor()))),
                    implementation: std::any::type_name::<T>(),
                },
            ),
        };
        tracing::debug!(key = key.display_name(), %lifetime, replaced, "bound type");
        Ok(self)
    }

    /// Binds the interface `I` to the implementation `C`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_inject::{implements, Container, Lifetime};
    ///
    /// trait Weapon: Send + Sync {
    ///     fn damage(&self) -> u32;
    /// }
    ///
    /// #[derive(Default)]
    /// struct Sword;
    /// impl Weapon for Sword {
    ///     fn damage(&self) -> u32 { 7 }
    /// }
    /// implements!(Sword => dyn Weapon);
    ///
    /// let mut container = Container::new();
    /// container.bind_interface::<dyn Weapon, Sword>(Lifetime::Singleton).unwrap();
    /// assert_eq!(container.lookup::<dyn Weapon>().unwrap().damage(), 7);
    /// ```
    pub fn bind_interface<I, C>(&mut self, lifetime: Lifetime) -> DiResult<&mut Self>
    where
        I: ?Sized + Send + Sync + 'static,
        C: Implements<I> + Default + Send + Sync + 'static,
    {
        self.bind_interface_with::<I, C, _>(lifetime, C::default)
    }

    /// Binds the interface `I` to `C` built by an explicit constructor.
    pub fn bind_interface_with<I, C, F>(
        &mut self,
        lifetime: Lifetime,
        ctor: F,
    ) -> DiResult<&mut Self>
    where
        I: ?Sized + Send + Sync + 'static,
        C: Implements<I> + Send + Sync + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        let key = Key::of::<I>();
        self.check_bind(&key, lifetime)?;
        let make = move || {
            let object = Arc::new(ctor());
            Instance::with_handle(object.clone().into_interface(), object)
        };
        let replaced = match lifetime {
            Lifetime::Singleton => self.registry.insert_singleton(key, make()),
            Lifetime::Transient => self.registry.insert_factory(
                key,
                FactoryEntry {
                    produce: Arc::new(make),
                    implementation: std::any::type_name::<C>(),
                },
            ),
        };
        tracing::debug!(
            key = key.display_name(),
            implementation = std::any::type_name::<C>(),
            %lifetime,
            replaced,
            "bound interface"
        );
        Ok(self)
    }

    /// Restricts `T` to a single singleton binding.
    ///
    /// After this call a second binding of `T` fails with
    /// [`DiError::DuplicateConstruction`], and binding it transient fails
    /// with [`DiError::WrongLifetime`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_inject::{Container, DiError, Lifetime};
    ///
    /// #[derive(Default)]
    /// struct Player;
    ///
    /// let mut container = Container::new();
    /// container.require_unique::<Player>().unwrap();
    /// container.bind_type::<Player>(Lifetime::Singleton).unwrap();
    ///
    /// assert!(matches!(
    ///     container.bind_instance(Player),
    ///     Err(DiError::DuplicateConstruction(_))
    /// ));
    /// ```
    pub fn require_unique<T>(&mut self) -> DiResult<&mut Self>
    where
        T: ?Sized + 'static,
    {
        let key = Key::of::<T>();
        if let Lookup::Factory(_) = self.registry.lookup(&key) {
            return Err(DiError::WrongLifetime(key.display_name()));
        }
        self.registry.mark_unique(key);
        Ok(self)
    }

    fn check_bind(&self, key: &Key, lifetime: Lifetime) -> DiResult<()> {
        let bound = self.registry.contains_key(key);
        if self.registry.is_unique(key) {
            if lifetime == Lifetime::Transient {
                return Err(DiError::WrongLifetime(key.display_name()));
            }
            if bound {
                return Err(DiError::DuplicateConstruction(key.display_name()));
            }
        }
        if bound && self.options.rebind == RebindPolicy::Reject {
            return Err(DiError::DuplicateConstruction(key.display_name()));
        }
        Ok(())
    }

    // ----- Member Declarations -----

    /// Returns the builder for the injectable members of `T`.
    ///
    /// Declarations accumulate across calls and apply to every instance of
    /// the concrete type `T`, whatever key it is bound under.
    pub fn members<T>(&mut self) -> Members<'_, T>
    where
        T: Send + Sync + 'static,
    {
        Members::new(self.plans.plan_mut(Key::of::<T>()))
    }

    /// Registers the members `T` declares through [`Injectable`].
    ///
    /// Replaces any members previously declared for `T`.
    pub fn register_injectable<T: Injectable>(&mut self) -> &mut Self {
        let plan = self.plans.plan_mut(Key::of::<T>());
        *plan = InjectionPlan::default();
        T::declare(&mut Members::new(plan));
        self
    }

    // ----- Lookup -----

    /// Returns the object bound under `D`, if any.
    ///
    /// A singleton is returned as stored. A transient binding yields a new
    /// object, injected in a fresh pass before it is returned. Never fails:
    /// anything that would be an error is `None`.
    pub fn lookup<D>(&self) -> Option<Arc<D>>
    where
        D: ?Sized + Send + Sync + 'static,
    {
        self.resolve::<D>().ok()
    }

    /// Like [`lookup`](Self::lookup) but reports why nothing was returned.
    pub fn resolve<D>(&self) -> DiResult<Arc<D>>
    where
        D: ?Sized + Send + Sync + 'static,
    {
        let key = Key::of::<D>();
        let value = match self.registry.lookup(&key) {
            Lookup::Singleton(instance) => instance.value.clone(),
            Lookup::Factory(entry) => {
                let mut visited = VisitedSet::new();
                let mut pass = Pass::new(self, &mut visited);
                match pass.produce(&key, entry)? {
                    Resolution::Found(value) => value,
                    Resolution::Missing(_) => return Err(DiError::NotFound(key.display_name())),
                }
            }
            Lookup::Missing => return Err(DiError::NotFound(key.display_name())),
        };
        downcast_handle::<D>(&value).ok_or(DiError::TypeMismatch(key.display_name()))
    }

    // ----- Introspection -----

    /// Returns true if `T` has a binding of either lifetime.
    pub fn is_bound<T: ?Sized + 'static>(&self) -> bool {
        self.registry.contains_key(&Key::of::<T>())
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    /// Describes every binding: singletons in registration order, then
    /// transients sorted by key name.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        let singletons = self
            .registry
            .singletons()
            .into_iter()
            .map(|(key, instance)| BindingDescriptor {
                key: *key,
                lifetime: Lifetime::Singleton,
                implementation: instance.target.concrete.display_name(),
            });

        let mut transients: Vec<BindingDescriptor> = self
            .registry
            .factories()
            .map(|(key, entry)| BindingDescriptor {
                key: *key,
                lifetime: Lifetime::Transient,
                implementation: entry.implementation,
            })
            .collect();
        transients.sort_by_key(|d| d.key.display_name());

        singletons.chain(transients).collect()
    }

    /// Describes the members declared for the concrete type `T`, in
    /// injection order.
    pub fn member_descriptors<T: 'static>(&self) -> Vec<MemberDescriptor> {
        self.plans
            .plan(&Key::of::<T>())
            .map(|plan| {
                plan.describe()
                    .map(|(name, kind, dependencies)| MemberDescriptor {
                        name,
                        kind,
                        dependencies,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Human-readable dump of bindings and member declarations.
    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let _ = writeln!(out, "Bindings ({}):", self.len());
        for descriptor in self.descriptors() {
            let _ = writeln!(
                out,
                "  {} [{}] -> {}",
                descriptor.key.short_name(),
                descriptor.lifetime,
                descriptor.implementation
            );
        }

        let mut plans: Vec<_> = self.plans.iter().filter(|(_, plan)| !plan.is_empty()).collect();
        plans.sort_by_key(|(key, _)| key.display_name());
        let _ = writeln!(out, "Members ({}):", plans.len());
        for (key, plan) in plans {
            let _ = writeln!(out, "  {}", key.short_name());
            for (name, kind, dependencies) in plan.describe() {
                let names: Vec<String> = dependencies.iter().map(Key::short_name).collect();
                let _ = writeln!(out, "    {:?} {}({})", kind, name, names.join(", "));
            }
        }
        out
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.len())
            .field("options", &self.options)
            .finish()
    }
}
