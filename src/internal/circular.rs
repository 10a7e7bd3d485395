//! Transient construction tracking for cycle and depth detection.

use crate::key::Key;

pub(crate) const MAX_DEPTH: usize = 1024;

/// Why a construction could not be entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StackError {
    /// The key is already being constructed; carries the full path
    Circular(Vec<&'static str>),
    DepthExceeded(usize),
}

/// Stack of transient keys whose products are currently being injected,
/// plus the overall nesting depth of injections in the pass.
///
/// Owned by a single injection pass, so separate passes never share state.
#[derive(Debug)]
pub(crate) struct ConstructionStack {
    stack: Vec<Key>,
    depth: usize,
    max_depth: usize,
    detect_cycles: bool,
}

impl ConstructionStack {
    pub(crate) fn new(max_depth: usize, detect_cycles: bool) -> Self {
        Self {
            stack: Vec::new(),
            depth: 0,
            max_depth,
            detect_cycles,
        }
    }

    /// Enters the construction of a transient product for `key`.
    pub(crate) fn enter_transient(&mut self, key: Key) -> Result<(), StackError> {
        // Circular detection BEFORE pushing the new key
        if self.detect_cycles && self.stack.contains(&key) {
            let mut path: Vec<&'static str> =
                self.stack.iter().map(|k| k.display_name()).collect();
            path.push(key.display_name());
            return Err(StackError::Circular(path));
        }
        self.enter()?;
        self.stack.push(key);
        Ok(())
    }

    pub(crate) fn exit_transient(&mut self) {
        let popped = self.stack.pop();
        debug_assert!(popped.is_some());
        self.exit();
    }

    /// Enters one level of injection nesting.
    pub(crate) fn enter(&mut self) -> Result<(), StackError> {
        if self.depth >= self.max_depth {
            return Err(StackError::DepthExceeded(self.depth));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
