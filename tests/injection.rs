use ferrous_inject::{
    implements, Container, Lifetime, MemberKind, Slot, UnresolvedReason, VisitedSet,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Engine;

#[derive(Default)]
struct Wheels;

struct Unregistered;

#[derive(Default)]
struct Car {
    engine: Slot<Engine>,
    wheels: Slot<Wheels>,
    missing: Slot<Unregistered>,
    log: Mutex<Vec<&'static str>>,
}

fn car_container() -> Container {
    let mut container = Container::new();
    container.bind_type::<Engine>(Lifetime::Singleton).unwrap();
    container.bind_type::<Wheels>(Lifetime::Singleton).unwrap();
    container.bind_type::<Car>(Lifetime::Singleton).unwrap();
    container
        .members::<Car>()
        .slot("engine", |c| &c.engine)
        .slot("missing", |c| &c.missing)
        .slot("wheels", |c| &c.wheels);
    container
}

#[test]
fn test_missing_field_yields_one_diagnostic_and_continues() {
    let container = car_container();
    let report = container.inject_all().unwrap();

    let car = container.lookup::<Car>().unwrap();
    assert!(car.engine.is_set());
    assert!(car.wheels.is_set());
    assert!(car.missing.is_empty());

    assert_eq!(report.diagnostics.len(), 1);
    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.member, "missing");
    assert_eq!(diagnostic.kind, MemberKind::Field);
    assert_eq!(diagnostic.reason, UnresolvedReason::NotRegistered);
    assert!(diagnostic.dependency.ends_with("Unregistered"));
    assert!(diagnostic.consumer.ends_with("Car"));
    assert_eq!(report.fields_assigned, 2);
}

#[test]
fn test_fields_before_methods() {
    let mut container = car_container();
    container
        .members::<Car>()
        .method("start", |car: &Car, _engine: Arc<Engine>| {
            // fields are already in place when a method runs
            assert!(car.engine.is_set());
            car.log.lock().unwrap().push("start");
        });

    let report = container.inject_all().unwrap();
    let car = container.lookup::<Car>().unwrap();
    assert_eq!(*car.log.lock().unwrap(), vec!["start"]);
    assert_eq!(report.methods_invoked, 1);
}

#[test]
fn test_method_with_unresolved_parameter_is_not_invoked() {
    #[derive(Default)]
    struct Garage {
        parked: Mutex<u32>,
    }

    let mut container = Container::new();
    container.bind_type::<Engine>(Lifetime::Singleton).unwrap();
    container.bind_type::<Garage>(Lifetime::Singleton).unwrap();
    container.members::<Garage>().method(
        "park",
        |garage: &Garage, _engine: Arc<Engine>, _other: Arc<Unregistered>| {
            *garage.parked.lock().unwrap() += 1;
        },
    );

    let report = container.inject_all().unwrap();
    let garage = container.lookup::<Garage>().unwrap();
    assert_eq!(*garage.parked.lock().unwrap(), 0);
    assert_eq!(report.methods_invoked, 0);

    // one method-level diagnostic, naming the parameter that failed
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].kind, MemberKind::Method);
    assert_eq!(report.diagnostics[0].member, "park");
    assert!(report.diagnostics[0].dependency.ends_with("Unregistered"));
}

#[test]
fn test_custom_setter_field() {
    struct Name(&'static str);

    #[derive(Default)]
    struct Greeter {
        name: Mutex<Option<Arc<Name>>>,
    }

    let mut container = Container::new();
    container.bind_instance(Name("world")).unwrap();
    container.members::<Greeter>().field("name", |g: &Greeter, name: Arc<Name>| {
        *g.name.lock().unwrap() = Some(name);
    });

    let greeter = Arc::new(Greeter::default());
    container.inject(&greeter).unwrap();
    assert_eq!(greeter.name.lock().unwrap().as_ref().map(|n| n.0), Some("world"));
}

#[test]
fn test_interface_dependency_injected_through_slot() {
    trait Clock: Send + Sync {
        fn now(&self) -> u64;
    }

    #[derive(Default)]
    struct Fixed;
    impl Clock for Fixed {
        fn now(&self) -> u64 {
            1_000
        }
    }
    implements!(Fixed => dyn Clock);

    #[derive(Default)]
    struct Scheduler {
        clock: Slot<dyn Clock>,
    }

    let mut container = Container::new();
    container.bind_interface::<dyn Clock, Fixed>(Lifetime::Singleton).unwrap();
    container.members::<Scheduler>().slot("clock", |s| &s.clock);

    let scheduler = Arc::new(Scheduler::default());
    container.inject(&scheduler).unwrap();
    assert_eq!(scheduler.clock.get().unwrap().now(), 1_000);
}

#[test]
fn test_transient_dependency_is_injected_before_assignment() {
    #[derive(Default)]
    struct Session {
        engine: Slot<Engine>,
    }

    #[derive(Default)]
    struct Client {
        session: Slot<Session>,
    }

    let mut container = Container::new();
    container.bind_type::<Engine>(Lifetime::Singleton).unwrap();
    container.bind_type::<Session>(Lifetime::Transient).unwrap();
    container.members::<Session>().slot("engine", |s| &s.engine);
    container.members::<Client>().slot("session", |c| &c.session);

    let first = Arc::new(Client::default());
    let second = Arc::new(Client::default());
    let report = container.inject(&first).unwrap();
    container.inject(&second).unwrap();

    let a = first.session.get().unwrap();
    let b = second.session.get().unwrap();
    assert!(a.engine.is_set());
    assert!(!Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a.engine.get().unwrap(), &b.engine.get().unwrap()));
    assert_eq!(report.transients_created, 1);
}

#[test]
fn test_transient_lookup_is_injected() {
    #[derive(Default)]
    struct Request {
        engine: Slot<Engine>,
    }

    let mut container = Container::new();
    container.bind_type::<Engine>(Lifetime::Singleton).unwrap();
    container.bind_type::<Request>(Lifetime::Transient).unwrap();
    container.members::<Request>().slot("engine", |r| &r.engine);

    assert!(container.lookup::<Request>().unwrap().engine.is_set());
}

#[test]
fn test_singleton_injected_once_per_visited_set() {
    #[derive(Default)]
    struct Counter {
        calls: Mutex<u32>,
    }

    let mut container = Container::new();
    container.bind_type::<Engine>(Lifetime::Singleton).unwrap();
    container.bind_type::<Counter>(Lifetime::Singleton).unwrap();
    container
        .members::<Counter>()
        .method("touch", |c: &Counter, _e: Arc<Engine>| {
            *c.calls.lock().unwrap() += 1;
        });

    let mut visited = VisitedSet::new();
    container.inject_all_with(&mut visited).unwrap();
    let second = container.inject_all_with(&mut visited).unwrap();
    assert_eq!(second.injected, 0);

    let counter = container.lookup::<Counter>().unwrap();
    assert_eq!(*counter.calls.lock().unwrap(), 1);

    // a fresh pass starts over
    container.inject_all().unwrap();
    assert_eq!(*counter.calls.lock().unwrap(), 2);
}

#[test]
fn test_object_bound_under_two_keys_is_injected_once() {
    trait Part: Send + Sync {}

    #[derive(Default)]
    struct Bolt {
        engine: Slot<Engine>,
        hits: Mutex<u32>,
    }
    impl Part for Bolt {}
    implements!(Bolt => dyn Part);

    let bolt = Arc::new(Bolt::default());
    let mut container = Container::new();
    container.bind_type::<Engine>(Lifetime::Singleton).unwrap();
    container.bind_shared(bolt.clone()).unwrap();
    container.bind_shared_as::<dyn Part, _>(bolt.clone()).unwrap();
    container
        .members::<Bolt>()
        .slot("engine", |b| &b.engine)
        .method("hit", |b: &Bolt| *b.hits.lock().unwrap() += 1);

    let report = container.inject_all().unwrap();
    // Engine declares no members, the second key for Bolt is skipped
    assert_eq!(report.injected, 1);
    assert_eq!(*bolt.hits.lock().unwrap(), 1);
    assert!(bolt.engine.is_set());
}

#[test]
fn test_singletons_bound_after_pass_are_not_injected() {
    #[derive(Default)]
    struct Late {
        engine: Slot<Engine>,
    }

    let mut container = Container::new();
    container.bind_type::<Engine>(Lifetime::Singleton).unwrap();
    container.members::<Late>().slot("engine", |l| &l.engine);

    let mut visited = VisitedSet::new();
    container.inject_all_with(&mut visited).unwrap();

    container.bind_type::<Late>(Lifetime::Singleton).unwrap();
    assert!(container.lookup::<Late>().unwrap().engine.is_empty());

    container.inject_all_with(&mut visited).unwrap();
    assert!(container.lookup::<Late>().unwrap().engine.is_set());
}

#[test]
fn test_visited_set_survives_rebinding_and_fresh_allocations() {
    #[derive(Default)]
    struct First {
        engine: Slot<Engine>,
    }
    #[derive(Default)]
    struct Second {
        engine: Slot<Engine>,
    }

    let mut container = Container::new();
    container.bind_type::<Engine>(Lifetime::Singleton).unwrap();
    container.bind_type::<First>(Lifetime::Singleton).unwrap();
    container.members::<First>().slot("engine", |f| &f.engine);
    container.members::<Second>().slot("engine", |s| &s.engine);

    let mut visited = VisitedSet::new();
    container.inject_all_with(&mut visited).unwrap();

    // the replaced First is only held by the visited set now
    container.bind_type::<First>(Lifetime::Singleton).unwrap();
    container.bind_type::<Second>(Lifetime::Singleton).unwrap();
    let report = container.inject_all_with(&mut visited).unwrap();

    assert_eq!(report.injected, 2);
    assert!(container.lookup::<First>().unwrap().engine.is_set());
    assert!(container.lookup::<Second>().unwrap().engine.is_set());

    for _ in 0..32 {
        let root = Arc::new(First::default());
        let report = container.inject_with(&root, &mut visited).unwrap();
        assert_eq!(report.injected, 1);
        assert!(root.engine.is_set());
    }
}

#[test]
fn test_resolve_all_keeps_order_and_length() {
    use ferrous_inject::Key;

    let mut container = Container::new();
    container.bind_instance(7u8).unwrap();
    container.bind_instance("x".to_string()).unwrap();

    let args = container
        .resolve_all(&[Key::of::<String>(), Key::of::<Unregistered>(), Key::of::<u8>()])
        .unwrap();

    assert_eq!(args.len(), 3);
    assert_eq!(args.get::<String>(0).as_deref().map(String::as_str), Some("x"));
    assert!(!args.is_resolved(1));
    assert_eq!(args.get::<u8>(2).as_deref(), Some(&7));

    let missing: Vec<usize> = args.missing().map(|(index, _, _)| index).collect();
    assert_eq!(missing, vec![1]);
}
