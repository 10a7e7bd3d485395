//! One injection pass over the object graph.

use std::time::Instant;

use crate::config::ResolutionMode;
use crate::container::Container;
use crate::internal::{ConstructionStack, StackError};
use crate::key::Key;
use crate::registration::{AnyArc, FactoryEntry, Lookup, Target};
use crate::report::{Diagnostic, InjectionReport, MemberKind, UnresolvedReason};
use crate::resolver::{ResolvedArgs, VisitedSet};
use crate::{DiError, DiResult};

/// Outcome of resolving one key.
pub(crate) enum Resolution {
    /// `Arc<Arc<D>>` handle for the requested key
    Found(AnyArc),
    Missing(UnresolvedReason),
}

fn stack_reason(err: StackError) -> UnresolvedReason {
    match err {
        StackError::Circular(path) => UnresolvedReason::TransientCycle(path),
        StackError::DepthExceeded(depth) => UnresolvedReason::DepthExceeded(depth),
    }
}

/// State of a single pass: the caller's visited set, the transient
/// construction stack and the report being built.
///
/// Every public injection entry point creates its own pass, so construction
/// stacks are never shared.
pub(crate) struct Pass<'c, 'v> {
    container: &'c Container,
    visited: &'v mut VisitedSet,
    stack: ConstructionStack,
    report: InjectionReport,
}

impl<'c, 'v> Pass<'c, 'v> {
    pub(crate) fn new(container: &'c Container, visited: &'v mut VisitedSet) -> Self {
        let options = &container.options;
        Self {
            container,
            visited,
            stack: ConstructionStack::new(options.max_depth, options.detect_transient_cycles),
            report: InjectionReport::default(),
        }
    }

    pub(crate) fn finish(self) -> InjectionReport {
        self.report
    }

    /// Injects a root object unless it was already visited.
    pub(crate) fn inject_root(&mut self, target: &Target) -> DiResult<()> {
        if self.visited.insert_target(target) {
            self.inject_guarded(target)?;
        }
        Ok(())
    }

    /// Injects an object that was just marked visited.
    ///
    /// An aborted injection unmarks it again, so a later pass with the same
    /// set retries the object instead of skipping it half-injected.
    fn inject_guarded(&mut self, target: &Target) -> DiResult<()> {
        let injected = self.inject_target(target);
        if injected.is_err() {
            self.visited.remove_target(target);
        }
        injected
    }

    /// Resolves `key` to a handle, injecting whatever it touches first.
    pub(crate) fn resolve_key(&mut self, key: &Key) -> DiResult<Resolution> {
        let container = self.container;
        match container.registry.lookup(key) {
            Lookup::Singleton(instance) => {
                if !self.visited.contains_target(&instance.target) {
                    if let Err(err) = self.stack.enter() {
                        return Ok(Resolution::Missing(stack_reason(err)));
                    }
                    // Marked before recursing so a cycle back to it terminates
                    self.visited.insert_target(&instance.target);
                    let injected = self.inject_guarded(&instance.target);
                    self.stack.exit();
                    injected?;
                }
                Ok(Resolution::Found(instance.value.clone()))
            }
            Lookup::Factory(entry) => self.produce(key, entry),
            Lookup::Missing => Ok(Resolution::Missing(UnresolvedReason::NotRegistered)),
        }
    }

    /// Creates a transient product and injects it before handing it out.
    pub(crate) fn produce(&mut self, key: &Key, entry: &FactoryEntry) -> DiResult<Resolution> {
        if let Err(err) = self.stack.enter_transient(*key) {
            return Ok(Resolution::Missing(stack_reason(err)));
        }
        let instance = (entry.produce)();
        self.report.transients_created += 1;
        tracing::trace!(
            key = key.display_name(),
            implementation = entry.implementation,
            "transient created"
        );
        self.container.observers.transient_created(key);

        let injected = self.inject_target(&instance.target);
        self.stack.exit_transient();
        injected?;
        Ok(Resolution::Found(instance.value))
    }

    /// Resolves every key in order, recording per-parameter outcomes.
    pub(crate) fn resolve_args(&mut self, params: &[Key]) -> DiResult<ResolvedArgs> {
        let mut args = ResolvedArgs::with_capacity(params.len());
        for key in params {
            let outcome = match self.resolve_key(key)? {
                Resolution::Found(value) => Ok(value),
                Resolution::Missing(reason) => Err(reason),
            };
            args.push(*key, outcome);
        }
        Ok(args)
    }

    /// Runs the declared members of one object: fields, then methods.
    pub(crate) fn inject_target(&mut self, target: &Target) -> DiResult<()> {
        let container = self.container;
        let plan = match container.plans.plan(&target.concrete) {
            Some(plan) if !plan.is_empty() => plan,
            _ => return Ok(()),
        };

        let observers = &container.observers;
        let started = observers.has_observers().then(Instant::now);
        observers.injecting(&target.concrete);

        for field in &plan.fields {
            match self.resolve_key(&field.dependency)? {
                Resolution::Found(value) => {
                    if (field.assign)(&target.object, &value) {
                        self.report.fields_assigned += 1;
                    } else {
                        self.unresolved(
                            target,
                            field.name,
                            MemberKind::Field,
                            &field.dependency,
                            UnresolvedReason::TypeMismatch,
                        )?;
                    }
                }
                Resolution::Missing(reason) => {
                    self.unresolved(
                        target,
                        field.name,
                        MemberKind::Field,
                        &field.dependency,
                        reason,
                    )?;
                }
            }
        }

        for method in &plan.methods {
            let args = self.resolve_args(&method.params)?;
            let failure = args.missing().next().map(|(_, key, reason)| (*key, reason.clone()));
            if let Some((key, reason)) = failure {
                self.unresolved(target, method.name, MemberKind::Method, &key, reason)?;
                continue;
            }

            let invoked = match args.values() {
                Some(values) => (method.invoke)(&target.object, &values[..]),
                None => false,
            };
            if invoked {
                self.report.methods_invoked += 1;
            } else {
                let dependency = method.params.first().copied().unwrap_or(target.concrete);
                self.unresolved(
                    target,
                    method.name,
                    MemberKind::Method,
                    &dependency,
                    UnresolvedReason::TypeMismatch,
                )?;
            }
        }

        self.report.injected += 1;
        if let Some(started) = started {
            observers.injected(&target.concrete, started.elapsed());
        }
        Ok(())
    }

    /// Reports a member left alone; fatal only in strict mode.
    fn unresolved(
        &mut self,
        target: &Target,
        member: &'static str,
        kind: MemberKind,
        dependency: &Key,
        reason: UnresolvedReason,
    ) -> DiResult<()> {
        let diagnostic = Diagnostic {
            consumer: target.concrete.display_name(),
            member,
            kind,
            dependency: dependency.display_name(),
            reason,
        };
        tracing::warn!(
            consumer = diagnostic.consumer,
            dependency = diagnostic.dependency,
            "unresolved dependency: {}",
            diagnostic
        );
        self.container.observers.unresolved(&diagnostic);

        match self.container.options.mode {
            ResolutionMode::Strict => Err(DiError::Unresolved(diagnostic)),
            ResolutionMode::Lenient => {
                self.report.diagnostics.push(diagnostic);
                Ok(())
            }
        }
    }
}
