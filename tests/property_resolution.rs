/// Property-based tests for binding and injection
///
/// These tests verify that lifetime and injection behavior follow the same
/// rules regardless of the values and binding sequences used.

use ferrous_inject::{Container, Lifetime, Slot};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct ServiceA {
    value: String,
}

#[derive(Default)]
struct Dep;

#[derive(Default)]
struct Consumer {
    dep: Slot<Dep>,
    calls: Mutex<u32>,
}

// Property: a bound instance is returned unchanged and identity-stable
proptest! {
    #[test]
    fn bound_instance_identity_stable(service_value in "\\PC{0,50}", lookups in 1usize..8) {
        let mut container = Container::new();
        container.bind_instance(ServiceA { value: service_value.clone() }).unwrap();

        let first = container.lookup::<ServiceA>().unwrap();
        for _ in 0..lookups {
            let again = container.lookup::<ServiceA>().unwrap();
            prop_assert!(Arc::ptr_eq(&first, &again));
        }
        prop_assert_eq!(&first.value, &service_value);
    }
}

// Property: the last binding of a key decides its lifetime
proptest! {
    #[test]
    fn last_binding_decides_lifetime(sequence in prop::collection::vec(any::<bool>(), 1..10)) {
        let mut container = Container::new();
        for singleton in &sequence {
            let lifetime = if *singleton { Lifetime::Singleton } else { Lifetime::Transient };
            container.bind_type_with(lifetime, || 0u64).unwrap();
        }

        prop_assert_eq!(container.len(), 1);
        let a = container.lookup::<u64>().unwrap();
        let b = container.lookup::<u64>().unwrap();
        let expect_shared = *sequence.last().unwrap();
        prop_assert_eq!(Arc::ptr_eq(&a, &b), expect_shared);
    }
}

// Property: a method runs exactly when its dependency is bound, once per pass
proptest! {
    #[test]
    fn method_runs_iff_dependency_bound(bind_dep in any::<bool>(), passes in 1u32..5) {
        let mut container = Container::new();
        if bind_dep {
            container.bind_type::<Dep>(Lifetime::Singleton).unwrap();
        }
        container.bind_type::<Consumer>(Lifetime::Singleton).unwrap();
        container
            .members::<Consumer>()
            .slot("dep", |c| &c.dep)
            .method("run", |c: &Consumer, _dep: Arc<Dep>| *c.calls.lock().unwrap() += 1);

        let mut diagnostics = 0;
        for _ in 0..passes {
            diagnostics += container.inject_all().unwrap().diagnostics.len();
        }

        let consumer = container.lookup::<Consumer>().unwrap();
        let expected_calls = if bind_dep { passes } else { 0 };
        prop_assert_eq!(*consumer.calls.lock().unwrap(), expected_calls);
        prop_assert_eq!(consumer.dep.is_set(), bind_dep);
        // field and method each report once per pass
        let expected_diagnostics = if bind_dep { 0 } else { 2 * passes as usize };
        prop_assert_eq!(diagnostics, expected_diagnostics);
    }
}

// Property: a chain of singletons is fully injected by one pass in any
// registration order
proptest! {
    #[test]
    fn singleton_chain_any_order(order in Just(vec![0usize, 1, 2]).prop_shuffle()) {
        #[derive(Default)]
        struct First {
            next: Slot<Second>,
        }
        #[derive(Default)]
        struct Second {
            next: Slot<Third>,
        }
        #[derive(Default)]
        struct Third {
            next: Slot<First>,
        }

        let mut container = Container::new();
        for index in &order {
            match index {
                0 => container.bind_type::<First>(Lifetime::Singleton).unwrap(),
                1 => container.bind_type::<Second>(Lifetime::Singleton).unwrap(),
                _ => container.bind_type::<Third>(Lifetime::Singleton).unwrap(),
            };
        }
        container.members::<First>().slot("next", |n| &n.next);
        container.members::<Second>().slot("next", |n| &n.next);
        container.members::<Third>().slot("next", |n| &n.next);

        let report = container.inject_all().unwrap();
        prop_assert!(report.is_complete());
        prop_assert_eq!(report.injected, 3);
        prop_assert!(container.lookup::<First>().unwrap().next.is_set());
        prop_assert!(container.lookup::<Second>().unwrap().next.is_set());
        prop_assert!(container.lookup::<Third>().unwrap().next.is_set());
    }
}
