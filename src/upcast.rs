//! Interface conversion for interface bindings.

use std::sync::Arc;

/// Declares that `Self` can be handed out as the interface `I`.
///
/// Rust cannot coerce `Arc<C>` to `Arc<dyn Trait>` generically, so
/// [`Container::bind_interface`](crate::Container::bind_interface) needs this
/// conversion spelled out once per implementation. The [`implements!`]
/// macro writes it for you.
///
/// ```rust
/// use ferrous_inject::{implements, Implements};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> String { "hello".into() }
/// }
///
/// implements!(English => dyn Greeter);
///
/// let greeter: Arc<dyn Greeter> = Arc::new(English).into_interface();
/// assert_eq!(greeter.greet(), "hello");
/// ```
pub trait Implements<I: ?Sized> {
    fn into_interface(self: Arc<Self>) -> Arc<I>;
}

/// Implements [`Implements`] for a concrete type and one or more interfaces.
#[macro_export]
macro_rules! implements {
    ($concrete:ty => $($interface:ty),+ $(,)?) => {
        $(
            impl $crate::Implements<$interface> for $concrete {
                #[inline]
                fn into_interface(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$interface> {
                    self
                }
            }
        )+
    };
}
