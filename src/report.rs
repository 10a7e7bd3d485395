//! Structured results of injection passes.

use std::fmt;

use crate::error::{DiError, DiResult};

/// Which kind of member a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
pub enum MemberKind {
    Field,
    Method,
}

/// Why a dependency could not be supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
pub enum UnresolvedReason {
    /// Neither a singleton nor a factory is bound for the key
    NotRegistered,
    /// A transient factory was re-entered while its own product was being
    /// injected; carries the construction path ending with the repeated key
    TransientCycle(Vec<&'static str>),
    /// The nesting of injections exceeded the configured limit
    DepthExceeded(usize),
    /// The bound value is not of the type the member expects
    TypeMismatch,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::NotRegistered => f.write_str("not registered"),
            UnresolvedReason::TransientCycle(path) => {
                write!(f, "transient cycle: {}", path.join(" -> "))
            }
            UnresolvedReason::DepthExceeded(depth) => write!(f, "max depth {} exceeded", depth),
            UnresolvedReason::TypeMismatch => f.write_str("type mismatch"),
        }
    }
}

/// A member that could not be injected.
///
/// Names the unresolved dependency type and the consumer type, which is what
/// a composition root needs to fix the missing binding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
pub struct Diagnostic {
    /// Concrete type of the object being injected
    pub consumer: &'static str,
    /// Declared member name
    pub member: &'static str,
    pub kind: MemberKind,
    /// Type of the dependency that failed (first failing parameter for methods)
    pub dependency: &'static str,
    pub reason: UnresolvedReason,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            MemberKind::Field => "field",
            MemberKind::Method => "method",
        };
        write!(
            f,
            "{} in {} ({} `{}`: {})",
            self.dependency, self.consumer, kind, self.member, self.reason
        )
    }
}

/// Outcome of an injection pass.
///
/// Counts what the pass did and lists every member it had to leave alone.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, Lifetime, Slot};
///
/// #[derive(Default)]
/// struct Engine;
/// #[derive(Default)]
/// struct Car {
///     engine: Slot<Engine>,
/// }
///
/// let mut container = Container::new();
/// container.bind_type::<Car>(Lifetime::Singleton).unwrap();
/// container.members::<Car>().slot("engine", |car| &car.engine);
///
/// let report = container.inject_all().unwrap();
/// assert!(!report.is_complete());
/// assert_eq!(report.diagnostics.len(), 1);
/// assert!(report.diagnostics[0].dependency.ends_with("Engine"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
pub struct InjectionReport {
    /// Objects whose member table was processed
    pub injected: usize,
    pub fields_assigned: usize,
    pub methods_invoked: usize,
    pub transients_created: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl InjectionReport {
    /// True when no member was left unresolved.
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics reported for the given consumer type name suffix.
    pub fn diagnostics_for(&self, consumer: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.consumer.ends_with(consumer))
            .collect()
    }

    /// Converts a lenient report into a strict result: the first diagnostic,
    /// if any, becomes [`DiError::Unresolved`].
    pub fn into_result(self) -> DiResult<Self> {
        match self.diagnostics.first() {
            Some(first) => Err(DiError::Unresolved(first.clone())),
            None => Ok(self),
        }
    }

    /// Serializes the report to JSON.
    #[cfg(feature = "config")]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
