//! Error types for the dependency injection container.

use std::fmt;

use crate::report::Diagnostic;

/// Dependency injection errors
///
/// Bind-time misconfiguration is always reported as an error. Unresolved
/// dependencies only surface here when the container runs in
/// [`ResolutionMode::Strict`](crate::ResolutionMode::Strict); in lenient mode
/// they are collected in the [`InjectionReport`](crate::InjectionReport).
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, DiError};
///
/// struct Unbound;
///
/// let container = Container::new();
/// match container.resolve::<Unbound>() {
///     Err(DiError::NotFound(name)) => assert!(name.ends_with("Unbound")),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use ferrous_inject::DiError;
///
/// let duplicate = DiError::DuplicateConstruction("Player");
/// assert_eq!(duplicate.to_string(), "Only one instance of Player may be bound");
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// No binding for the requested key
    NotFound(&'static str),
    /// Type downcast failed
    TypeMismatch(&'static str),
    /// A second binding for a key that only admits one
    DuplicateConstruction(&'static str),
    /// Lifetime not allowed for this key (e.g. a unique type bound transient)
    WrongLifetime(&'static str),
    /// A member could not be injected while running in strict mode
    Unresolved(Diagnostic),
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::NotFound(name) => write!(f, "Binding not found: {}", name),
            DiError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
            DiError::DuplicateConstruction(name) => {
                write!(f, "Only one instance of {} may be bound", name)
            }
            DiError::WrongLifetime(msg) => write!(f, "Lifetime error: {}", msg),
            DiError::Unresolved(diagnostic) => write!(f, "Injection failed: {}", diagnostic),
        }
    }
}

impl std::error::Error for DiError {}

/// Result type for DI operations
///
/// A convenience alias for `Result<T, DiError>` used throughout ferrous-inject.
pub type DiResult<T> = Result<T, DiError>;
