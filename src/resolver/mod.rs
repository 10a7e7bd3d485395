//! Resolver module for dependency injection.
//!
//! Injection walks the members declared for an object's concrete type:
//! fields first, then methods. Every dependency is looked up in the
//! container; singletons reached this way are injected depth-first the first
//! time they are touched, transients are created and injected on the spot.

mod args;
mod pass;
mod visited;

pub use args::ResolvedArgs;
pub use visited::VisitedSet;

pub(crate) use pass::{Pass, Resolution};

use std::sync::Arc;

use crate::container::Container;
use crate::key::Key;
use crate::registration::Target;
use crate::report::InjectionReport;
use crate::DiResult;

impl Container {
    /// Injects the declared members of `object` in a fresh pass.
    ///
    /// `object` does not need to be bound in the container. Dependencies it
    /// reaches are injected first, each singleton at most once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_inject::{Container, Slot};
    /// use std::sync::Arc;
    ///
    /// struct Logger;
    ///
    /// #[derive(Default)]
    /// struct Handler {
    ///     logger: Slot<Logger>,
    /// }
    ///
    /// let mut container = Container::new();
    /// container.bind_instance(Logger).unwrap();
    /// container.members::<Handler>().slot("logger", |h| &h.logger);
    ///
    /// let handler = Arc::new(Handler::default());
    /// let report = container.inject(&handler).unwrap();
    /// assert_eq!(report.fields_assigned, 1);
    /// assert!(handler.logger.is_set());
    /// ```
    pub fn inject<T>(&self, object: &Arc<T>) -> DiResult<InjectionReport>
    where
        T: Send + Sync + 'static,
    {
        let mut visited = VisitedSet::new();
        self.inject_with(object, &mut visited)
    }

    /// Injects `object` using a caller-owned visited set.
    ///
    /// Nothing happens if `object` was already visited. The set keeps every
    /// object it records alive until it is cleared or dropped. When a strict
    /// pass fails, the objects whose injection was cut short are removed from
    /// the set again, so retrying with it after fixing the bindings injects
    /// them.
    pub fn inject_with<T>(
        &self,
        object: &Arc<T>,
        visited: &mut VisitedSet,
    ) -> DiResult<InjectionReport>
    where
        T: Send + Sync + 'static,
    {
        let target = Target::new(object.clone());
        let mut pass = Pass::new(self, visited);
        pass.inject_root(&target)?;
        Ok(pass.finish())
    }

    /// Injects every bound singleton in registration order.
    ///
    /// An object already injected as the dependency of an earlier one is
    /// skipped, as is a second key bound to the same object.
    pub fn inject_all(&self) -> DiResult<InjectionReport> {
        let mut visited = VisitedSet::new();
        self.inject_all_with(&mut visited)
    }

    /// Like [`inject_all`](Self::inject_all), continuing from a caller-owned
    /// visited set.
    pub fn inject_all_with(&self, visited: &mut VisitedSet) -> DiResult<InjectionReport> {
        let singletons = self.registry.singletons();
        let mut pass = Pass::new(self, visited);
        for (_, instance) in singletons {
            pass.inject_root(&instance.target)?;
        }
        let report = pass.finish();
        tracing::debug!(
            injected = report.injected,
            fields = report.fields_assigned,
            methods = report.methods_invoked,
            unresolved = report.diagnostics.len(),
            "injection pass complete"
        );
        Ok(report)
    }

    /// Resolves a list of dependency keys, in order.
    ///
    /// Applies the same lookup and injection rules as field injection. A
    /// missing key is not an error here; it is recorded in the result.
    pub fn resolve_all(&self, keys: &[Key]) -> DiResult<ResolvedArgs> {
        let mut visited = VisitedSet::new();
        let mut pass = Pass::new(self, &mut visited);
        pass.resolve_args(keys)
    }
}
