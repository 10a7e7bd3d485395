/// Unit tests for DiError and DiResult types

use ferrous_inject::{DiError, DiResult, Diagnostic, MemberKind, UnresolvedReason};
use std::error::Error;

fn diagnostic(reason: UnresolvedReason) -> Diagnostic {
    Diagnostic {
        consumer: "game::Player",
        member: "equip",
        kind: MemberKind::Method,
        dependency: "game::Sword",
        reason,
    }
}

#[test]
fn test_error_display_not_found() {
    let error = DiError::NotFound("TestService");
    let display_str = format!("{}", error);
    assert_eq!(display_str, "Binding not found: TestService");
}

#[test]
fn test_error_display_type_mismatch() {
    let error = DiError::TypeMismatch("std::string::String");
    assert_eq!(error.to_string(), "Type mismatch for: std::string::String");
}

#[test]
fn test_error_display_duplicate_construction() {
    let error = DiError::DuplicateConstruction("game::Player");
    assert_eq!(error.to_string(), "Only one instance of game::Player may be bound");
}

#[test]
fn test_error_display_wrong_lifetime() {
    let error = DiError::WrongLifetime("game::Player");
    assert_eq!(error.to_string(), "Lifetime error: game::Player");
}

#[test]
fn test_error_display_unresolved() {
    let error = DiError::Unresolved(diagnostic(UnresolvedReason::NotRegistered));
    assert_eq!(
        error.to_string(),
        "Injection failed: game::Sword in game::Player (method `equip`: not registered)"
    );
}

#[test]
fn test_unresolved_reason_display() {
    assert_eq!(UnresolvedReason::NotRegistered.to_string(), "not registered");
    assert_eq!(UnresolvedReason::TypeMismatch.to_string(), "type mismatch");
    assert_eq!(
        UnresolvedReason::DepthExceeded(1024).to_string(),
        "max depth 1024 exceeded"
    );
    assert_eq!(
        UnresolvedReason::TransientCycle(vec!["A", "B", "A"]).to_string(),
        "transient cycle: A -> B -> A"
    );
}

#[test]
fn test_error_trait_implementation() {
    let error = DiError::NotFound("TestService");
    let error_trait: &dyn Error = &error;
    assert!(error_trait.source().is_none());
    assert_eq!(error_trait.to_string(), "Binding not found: TestService");
}

#[test]
fn test_error_clone_keeps_diagnostic() {
    let original = DiError::Unresolved(diagnostic(UnresolvedReason::TypeMismatch));
    match original.clone() {
        DiError::Unresolved(d) => assert_eq!(d, diagnostic(UnresolvedReason::TypeMismatch)),
        other => panic!("unexpected clone: {:?}", other),
    }
}

#[test]
fn test_di_result_alias() {
    fn lookup(ok: bool) -> DiResult<u32> {
        if ok {
            Ok(7)
        } else {
            Err(DiError::NotFound("u32"))
        }
    }

    assert_eq!(lookup(true).unwrap(), 7);
    assert!(matches!(lookup(false), Err(DiError::NotFound("u32"))));
}
