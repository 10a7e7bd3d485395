/// Unit tests for binding and member descriptors

use ferrous_inject::{implements, Container, Key, Lifetime, MemberKind, Slot};
use std::sync::Arc;

trait Logger: Send + Sync {}

#[derive(Default)]
struct ConsoleLogger;
impl Logger for ConsoleLogger {}
implements!(ConsoleLogger => dyn Logger);

#[derive(Default)]
struct Database;

#[derive(Default)]
struct Repository {
    db: Slot<Database>,
}

#[test]
fn test_descriptors_list_every_binding() {
    let mut container = Container::new();
    container.bind_instance(5432u32).unwrap();
    container.bind_type::<Database>(Lifetime::Singleton).unwrap();
    container.bind_type::<Repository>(Lifetime::Transient).unwrap();
    container
        .bind_interface::<dyn Logger, ConsoleLogger>(Lifetime::Transient)
        .unwrap();

    let descriptors = container.descriptors();
    assert_eq!(descriptors.len(), 4);

    // singletons first, in registration order
    assert_eq!(descriptors[0].type_name(), "u32");
    assert!(descriptors[1].type_name().ends_with("Database"));
    assert!(descriptors[..2].iter().all(|d| d.lifetime == Lifetime::Singleton));
    assert!(descriptors[2..].iter().all(|d| d.lifetime == Lifetime::Transient));

    let logger = descriptors
        .iter()
        .find(|d| d.key == Key::of::<dyn Logger>())
        .unwrap();
    assert!(logger.is_interface());
    assert!(logger.implementation.ends_with("ConsoleLogger"));

    let repository = descriptors
        .iter()
        .find(|d| d.key == Key::of::<Repository>())
        .unwrap();
    assert!(!repository.is_interface());
}

#[test]
fn test_shared_interface_descriptor_names_concrete_type() {
    let mut container = Container::new();
    container
        .bind_shared_as::<dyn Logger, _>(Arc::new(ConsoleLogger))
        .unwrap();

    let descriptor = &container.descriptors()[0];
    assert_eq!(descriptor.lifetime, Lifetime::Singleton);
    assert!(descriptor.implementation.ends_with("ConsoleLogger"));
}

#[test]
fn test_member_descriptors_in_injection_order() {
    let mut container = Container::new();
    container
        .members::<Repository>()
        .method("warm", |_r: &Repository, _db: Arc<Database>, _log: Arc<dyn Logger>| {})
        .slot("db", |r| &r.db);

    let members = container.member_descriptors::<Repository>();
    assert_eq!(members.len(), 2);

    assert_eq!(members[0].name, "db");
    assert_eq!(members[0].kind, MemberKind::Field);
    assert_eq!(members[0].dependencies, vec![Key::of::<Database>()]);

    assert_eq!(members[1].name, "warm");
    assert_eq!(members[1].kind, MemberKind::Method);
    assert_eq!(
        members[1].dependencies,
        vec![Key::of::<Database>(), Key::of::<dyn Logger>()]
    );

    assert!(container.member_descriptors::<Database>().is_empty());
}

#[cfg(feature = "diagnostics")]
#[test]
fn test_debug_string_lists_bindings_and_members() {
    let mut container = Container::new();
    container.bind_type::<Database>(Lifetime::Singleton).unwrap();
    container.members::<Repository>().slot("db", |r| &r.db);

    let dump = container.to_debug_string();
    assert!(dump.contains("Bindings (1):"));
    assert!(dump.contains("Database [singleton]"));
    assert!(dump.contains("Repository"));
    assert!(dump.contains("Field db(Database)"));
}
