//! Container configuration.
//!
//! Options are set with a fluent builder. With the `config` feature they can
//! also be loaded from JSON, e.g. as part of an application's settings file.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::internal::circular::MAX_DEPTH;
#[cfg(feature = "config")]
use crate::{DiError, DiResult};

/// How unresolved dependencies affect an injection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum ResolutionMode {
    /// Record a diagnostic, leave the member alone and keep going
    #[default]
    Lenient,
    /// Abort the pass on the first unresolved member
    Strict,
}

/// What happens when a key that is already bound is bound again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum RebindPolicy {
    /// Last write wins
    #[default]
    Overwrite,
    /// Fail with [`DiError::DuplicateConstruction`](crate::DiError::DuplicateConstruction)
    Reject,
}

/// Options for a [`Container`](crate::Container).
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Container, ContainerOptions, ResolutionMode, RebindPolicy};
///
/// let options = ContainerOptions::new()
///     .mode(ResolutionMode::Strict)
///     .rebind(RebindPolicy::Reject)
///     .max_depth(64);
///
/// let container = Container::with_options(options);
/// assert_eq!(container.options().mode, ResolutionMode::Strict);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerOptions {
    pub mode: ResolutionMode,
    pub rebind: RebindPolicy,
    /// Maximum nesting of injections within one pass
    pub max_depth: usize,
    /// Track transient keys under construction and report re-entry as a
    /// cycle. When off, only `max_depth` bounds transient recursion.
    pub detect_transient_cycles: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            mode: ResolutionMode::Lenient,
            rebind: RebindPolicy::Overwrite,
            max_depth: MAX_DEPTH,
            detect_transient_cycles: true,
        }
    }
}

impl ContainerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: ResolutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `mode(ResolutionMode::Strict)`.
    pub fn strict(self) -> Self {
        self.mode(ResolutionMode::Strict)
    }

    pub fn rebind(mut self, policy: RebindPolicy) -> Self {
        self.rebind = policy;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn detect_transient_cycles(mut self, enabled: bool) -> Self {
        self.detect_transient_cycles = enabled;
        self
    }

    /// Parses options from JSON. Missing fields keep their defaults.
    ///
    /// ```rust
    /// # #[cfg(feature = "config")]
    /// # {
    /// use ferrous_inject::{ContainerOptions, ResolutionMode};
    ///
    /// let options = ContainerOptions::from_json(r#"{ "mode": "strict" }"#).unwrap();
    /// assert_eq!(options.mode, ResolutionMode::Strict);
    /// assert!(options.detect_transient_cycles);
    /// # }
    /// ```
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> DiResult<Self> {
        serde_json::from_str(json).map_err(|_| DiError::TypeMismatch("ContainerOptions"))
    }

    #[cfg(feature = "config")]
    pub fn to_json(&self) -> DiResult<String> {
        serde_json::to_string(self).map_err(|_| DiError::TypeMismatch("ContainerOptions"))
    }
}
