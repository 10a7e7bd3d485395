//! # ferrous-inject
//!
//! Minimal runtime dependency injection for Rust: bind objects by type, then
//! let the container fill the fields and call the methods your types declare
//! as injectable.
//!
//! ## Features
//!
//! - **Two lifetimes**: Singleton (one shared object) and Transient (a new,
//!   freshly injected object per resolution)
//! - **Interface bindings**: bind `dyn Trait` keys to concrete implementations
//! - **Field and method injection**: declared once per type, no reflection
//! - **Cycle safe**: singleton cycles terminate; transient cycles are reported
//! - **Diagnostics**: every unresolved member is reported with the consumer
//!   and dependency type names, leniently or as a hard error
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_inject::{implements, Container, Lifetime, Slot};
//! use std::sync::{Arc, Mutex};
//!
//! trait Item: Send + Sync {
//!     fn name(&self) -> &str;
//! }
//!
//! #[derive(Default)]
//! struct Sword;
//! impl Item for Sword {
//!     fn name(&self) -> &str { "sword" }
//! }
//! implements!(Sword => dyn Item);
//!
//! #[derive(Default)]
//! struct Chest {
//!     items: Mutex<Vec<String>>,
//! }
//!
//! #[derive(Default)]
//! struct Player {
//!     chest: Slot<Chest>,
//! }
//!
//! let mut container = Container::new();
//! container.bind_type::<Chest>(Lifetime::Singleton).unwrap();
//! container.bind_type::<Player>(Lifetime::Singleton).unwrap();
//! container.bind_interface::<dyn Item, Sword>(Lifetime::Transient).unwrap();
//!
//! container.members::<Player>().slot("chest", |p| &p.chest);
//! container
//!     .members::<Chest>()
//!     .method("stock", |chest: &Chest, item: Arc<dyn Item>| {
//!         chest.items.lock().unwrap().push(item.name().to_string());
//!     });
//!
//! let report = container.inject_all().unwrap();
//! assert!(report.is_complete());
//!
//! let player = container.lookup::<Player>().unwrap();
//! let chest = player.chest.get().unwrap();
//! assert_eq!(*chest.items.lock().unwrap(), vec!["sword".to_string()]);
//! ```
//!
//! ## Lifetimes
//!
//! - **Singleton**: constructed at bind time, injected by the first pass that
//!   touches it, then shared
//! - **Transient**: constructed and injected on every resolution
//!
//! ## Unresolved dependencies
//!
//! By default a member whose dependency is not bound is left untouched and a
//! [`Diagnostic`] is added to the [`InjectionReport`]. With
//! [`ResolutionMode::Strict`] the first one aborts the pass instead.
//!
//! ```rust
//! use ferrous_inject::{Container, ContainerOptions, DiError, Lifetime, Slot};
//!
//! struct Z;
//!
//! #[derive(Default)]
//! struct Q {
//!     z: Slot<Z>,
//! }
//!
//! let mut container = Container::with_options(ContainerOptions::new().strict());
//! container.bind_type::<Q>(Lifetime::Singleton).unwrap();
//! container.members::<Q>().slot("z", |q| &q.z);
//!
//! match container.inject_all() {
//!     Err(DiError::Unresolved(diagnostic)) => {
//!         assert!(diagnostic.consumer.ends_with("Q"));
//!         assert!(diagnostic.dependency.ends_with("Z"));
//!     }
//!     _ => unreachable!(),
//! }
//! ```

// Module declarations
pub mod config;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod key;
pub mod lifetime;
pub mod members;
pub mod observer;
pub mod report;
pub mod resolver;
pub mod slot;
pub mod upcast;

// Internal modules
mod internal;
mod registration;

// Re-exports
pub use config::{ContainerOptions, RebindPolicy, ResolutionMode};
pub use container::Container;
pub use descriptors::{BindingDescriptor, MemberDescriptor};
pub use error::{DiError, DiResult};
pub use key::{key_of_type, Key};
pub use lifetime::Lifetime;
pub use members::{InjectMethod, Injectable, Members};
pub use observer::{DiObserver, LoggingObserver};
pub use report::{Diagnostic, InjectionReport, MemberKind, UnresolvedReason};
pub use resolver::{ResolvedArgs, VisitedSet};
pub use slot::Slot;
pub use upcast::Implements;
