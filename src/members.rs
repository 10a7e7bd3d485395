//! Injectable member declarations.
//!
//! Rust has no runtime reflection, so the members a consumer type wants
//! injected are declared once, at registration time, through [`Members`].
//! The container keeps one [`InjectionPlan`] per concrete type and replays
//! it for every instance of that type.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::internal::sync::Map;
use crate::key::Key;
use crate::registration::{downcast_handle, AnyArc};
use crate::report::MemberKind;
use crate::slot::Slot;

pub(crate) type AssignFn = Arc<dyn Fn(&AnyArc, &AnyArc) -> bool + Send + Sync>;
pub(crate) type InvokeFn = Arc<dyn Fn(&AnyArc, &[AnyArc]) -> bool + Send + Sync>;

pub(crate) struct FieldMember {
    pub(crate) name: &'static str,
    pub(crate) dependency: Key,
    pub(crate) assign: AssignFn,
}

pub(crate) struct MethodMember {
    pub(crate) name: &'static str,
    pub(crate) params: Vec<Key>,
    pub(crate) invoke: InvokeFn,
}

/// Declared members of one concrete type, fields before methods.
#[derive(Default)]
pub(crate) struct InjectionPlan {
    pub(crate) fields: Vec<FieldMember>,
    pub(crate) methods: Vec<MethodMember>,
}

impl InjectionPlan {
    pub(crate) fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.methods.is_empty()
    }

    /// `(name, kind, dependency keys)` for every member in injection order.
    pub(crate) fn describe(
        &self,
    ) -> impl Iterator<Item = (&'static str, MemberKind, Vec<Key>)> + '_ {
        let fields = self
            .fields
            .iter()
            .map(|f| (f.name, MemberKind::Field, vec![f.dependency]));
        let methods = self
            .methods
            .iter()
            .map(|m| (m.name, MemberKind::Method, m.params.clone()));
        fields.chain(methods)
    }
}

/// Member plans keyed by concrete type.
#[derive(Default)]
pub(crate) struct MemberTable {
    plans: Map<Key, InjectionPlan>,
}

impl MemberTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn plan(&self, concrete: &Key) -> Option<&InjectionPlan> {
        self.plans.get(concrete)
    }

    pub(crate) fn plan_mut(&mut self, concrete: Key) -> &mut InjectionPlan {
        self.plans.entry(concrete).or_default()
    }

    #[cfg(feature = "diagnostics")]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Key, &InjectionPlan)> {
        self.plans.iter()
    }
}

/// Builder for the injectable members of `T`.
///
/// Obtained from [`Container::members`](crate::Container::members). Each call
/// appends a member; fields are always injected before methods, each group
/// in declaration order.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, Lifetime, Slot};
/// use std::sync::{Arc, Mutex};
///
/// #[derive(Default)]
/// struct Chest;
///
/// #[derive(Default)]
/// struct Player {
///     chest: Slot<Chest>,
///     opened: Mutex<u32>,
/// }
///
/// let mut container = Container::new();
/// container.bind_type::<Chest>(Lifetime::Singleton).unwrap();
/// container.bind_type::<Player>(Lifetime::Singleton).unwrap();
/// container
///     .members::<Player>()
///     .slot("chest", |p| &p.chest)
///     .method("open", |p: &Player, _chest: Arc<Chest>| {
///         *p.opened.lock().unwrap() += 1;
///     });
///
/// container.inject_all().unwrap();
/// let player = container.lookup::<Player>().unwrap();
/// assert!(player.chest.is_set());
/// assert_eq!(*player.opened.lock().unwrap(), 1);
/// ```
pub struct Members<'a, T> {
    plan: &'a mut InjectionPlan,
    _marker: PhantomData<fn(&T)>,
}

impl<'a, T> Members<'a, T>
where
    T: Send + Sync + 'static,
{
    pub(crate) fn new(plan: &'a mut InjectionPlan) -> Self {
        Self {
            plan,
            _marker: PhantomData,
        }
    }

    /// Declares a field of dependency type `D`, assigned through a setter.
    ///
    /// The setter is the only access the container has to the field, so the
    /// consumer type itself needs no container-specific code.
    pub fn field<D, F>(&mut self, name: &'static str, setter: F) -> &mut Self
    where
        D: ?Sized + Send + Sync + 'static,
        F: Fn(&T, Arc<D>) + Send + Sync + 'static,
    {
        let assign: AssignFn = Arc::new(move |target: &AnyArc, value: &AnyArc| {
            match (target.downcast_ref::<T>(), downcast_handle::<D>(value)) {
                (Some(target), Some(value)) => {
                    setter(target, value);
                    true
                }
                _ => false,
            }
        });
        self.plan.fields.push(FieldMember {
            name,
            dependency: Key::of::<D>(),
            assign,
        });
        self
    }

    /// Declares a [`Slot`] field of dependency type `D`.
    pub fn slot<D, F>(&mut self, name: &'static str, accessor: F) -> &mut Self
    where
        D: ?Sized + Send + Sync + 'static,
        F: Fn(&T) -> &Slot<D> + Send + Sync + 'static,
    {
        self.field::<D, _>(name, move |target: &T, value: Arc<D>| accessor(target).set(value))
    }

    /// Declares a method whose parameters are all resolved from the container.
    ///
    /// The method is a closure taking `&T` followed by up to eight `Arc<_>`
    /// parameters. It runs only when every parameter resolves.
    pub fn method<Args, F>(&mut self, name: &'static str, method: F) -> &mut Self
    where
        F: InjectMethod<T, Args>,
    {
        let invoke: InvokeFn = Arc::new(move |target: &AnyArc, args: &[AnyArc]| {
            match target.downcast_ref::<T>() {
                Some(target) => method.invoke(target, args),
                None => false,
            }
        });
        self.plan.methods.push(MethodMember {
            name,
            params: <F as InjectMethod<T, Args>>::params(),
            invoke,
        });
        self
    }
}

/// A closure usable as an injected method of `T`.
///
/// Implemented for `Fn(&T, Arc<P1>, .., Arc<Pn>)` with up to eight
/// parameters; `Args` is the tuple `(Arc<P1>, .., Arc<Pn>)`.
pub trait InjectMethod<T, Args>: Send + Sync + 'static {
    /// Keys of the parameters, in call order.
    #[doc(hidden)]
    fn params() -> Vec<Key>;

    /// Calls the method with type-erased arguments; false on a type mismatch.
    #[doc(hidden)]
    fn invoke(&self, target: &T, args: &[Arc<dyn Any + Send + Sync>]) -> bool;
}

macro_rules! define_inject_method ({ $($param:ident)* } => {
    impl<T, Func, $($param,)*> InjectMethod<T, ($(Arc<$param>,)*)> for Func
    where
        T: 'static,
        Func: Fn(&T $(, Arc<$param>)*) + Send + Sync + 'static,
        $($param: ?Sized + Send + Sync + 'static,)*
    {
        #[inline]
        fn params() -> Vec<Key> {
            vec![$(Key::of::<$param>()),*]
        }

        #[inline]
        #[allow(non_snake_case, unused_mut, unused_variables)]
        fn invoke(&self, target: &T, args: &[Arc<dyn Any + Send + Sync>]) -> bool {
            let mut args = args.iter();
            $(
                let $param = match args.next().and_then(downcast_handle::<$param>) {
                    Some(value) => value,
                    None => return false,
                };
            )*
            (self)(target $(, $param)*);
            true
        }
    }
});

define_inject_method! {}
define_inject_method! { T1 }
define_inject_method! { T1 T2 }
define_inject_method! { T1 T2 T3 }
define_inject_method! { T1 T2 T3 T4 }
define_inject_method! { T1 T2 T3 T4 T5 }
define_inject_method! { T1 T2 T3 T4 T5 T6 }
define_inject_method! { T1 T2 T3 T4 T5 T6 T7 }
define_inject_method! { T1 T2 T3 T4 T5 T6 T7 T8 }

/// Types that declare their own injectable members.
///
/// An alternative to building the member list at the composition root: the
/// type lists its members once and is registered with
/// [`Container::register_injectable`](crate::Container::register_injectable).
///
/// ```rust
/// use ferrous_inject::{Container, Injectable, Lifetime, Members, Slot};
///
/// #[derive(Default)]
/// struct Config;
///
/// #[derive(Default)]
/// struct Server {
///     config: Slot<Config>,
/// }
///
/// impl Injectable for Server {
///     fn declare(members: &mut Members<'_, Self>) {
///         members.slot("config", |s| &s.config);
///     }
/// }
///
/// let mut container = Container::new();
/// container.register_injectable::<Server>();
/// container.bind_type::<Config>(Lifetime::Singleton).unwrap();
/// container.bind_type::<Server>(Lifetime::Singleton).unwrap();
/// container.inject_all().unwrap();
///
/// assert!(container.lookup::<Server>().unwrap().config.is_set());
/// ```
pub trait Injectable: Send + Sync + Sized + 'static {
    fn declare(members: &mut Members<'_, Self>);
}
