//! Composition root for a small game: a player is built by hand with some
//! starting equipment, a chest is bound as a singleton, and one injection
//! pass hands the chest's reward to the player.
//!
//! Run with `RUST_LOG=debug cargo run --example player_equipment` to see the
//! container's log lines.

use ferrous_inject::{
    implements, Container, Injectable, Lifetime, LoggingObserver, Members, Slot,
};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

trait Item: Send + Sync {
    fn describe(&self) -> String;
}

struct Weapon {
    name: &'static str,
    damage: u32,
}

impl Item for Weapon {
    fn describe(&self) -> String {
        format!("{} ({} dmg)", self.name, self.damage)
    }
}

struct Parachute {
    name: &'static str,
    opened: bool,
}

impl Item for Parachute {
    fn describe(&self) -> String {
        format!("{} (opened: {})", self.name, self.opened)
    }
}

struct RocketPack {
    name: &'static str,
    rockets: u32,
}

impl Item for RocketPack {
    fn describe(&self) -> String {
        format!("{} x{}", self.name, self.rockets)
    }
}

#[derive(Default)]
struct Equipment {
    items: Mutex<Vec<Arc<dyn Item>>>,
}

impl Equipment {
    fn add_item(&self, item: Arc<dyn Item>) {
        self.items.lock().unwrap().push(item);
    }

    fn count(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

struct Chest {
    reward: Arc<dyn Item>,
}

impl Default for Chest {
    fn default() -> Self {
        Self {
            reward: Arc::new(Weapon {
                name: "Machine gun",
                damage: 80,
            }),
        }
    }
}

impl Chest {
    fn take_reward(&self) -> Arc<dyn Item> {
        self.reward.clone()
    }
}

/// Something the player can be asked about without knowing the concrete type
trait Character: Send + Sync {
    fn summary(&self) -> String;
}

struct Player {
    health: u32,
    lives: u32,
    skills: Vec<String>,
    equipment: Equipment,
    companion: Slot<dyn Character>,
}

impl Player {
    fn give_item(&self, chest: Arc<Chest>) {
        self.equipment.add_item(chest.take_reward());
    }
}

impl Character for Player {
    fn summary(&self) -> String {
        format!(
            "health {} lives {} skills {:?} items {}",
            self.health,
            self.lives,
            self.skills,
            self.equipment.count()
        )
    }
}

implements!(Player => dyn Character);

impl Injectable for Player {
    fn declare(members: &mut Members<'_, Self>) {
        members
            .slot("companion", |p| &p.companion)
            .method("give_item", |player: &Player, chest: Arc<Chest>| player.give_item(chest));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let player = Arc::new(Player {
        health: 100,
        lives: 3,
        skills: vec!["skill 1".to_string()],
        equipment: Equipment::default(),
        companion: Slot::new(),
    });
    player.equipment.add_item(Arc::new(Weapon {
        name: "Shotgun",
        damage: 50,
    }));
    player.equipment.add_item(Arc::new(Parachute {
        name: "Parachute",
        opened: false,
    }));
    player.equipment.add_item(Arc::new(RocketPack {
        name: "Rockets",
        rockets: 3,
    }));

    let mut container = Container::new();
    container.add_observer(Arc::new(LoggingObserver::with_prefix("[game]")));
    container.register_injectable::<Player>();

    let bound = container
        .require_unique::<Player>()
        .and_then(|c| c.bind_type::<Chest>(Lifetime::Singleton))
        .and_then(|c| c.bind_shared(player.clone()))
        .map(|_| ());
    if let Err(err) = bound {
        eprintln!("composition failed: {}", err);
        return;
    }

    println!("Equipment before injection: {} items", player.equipment.count());

    match container.inject_all() {
        Ok(report) => {
            println!("Equipment after injection: {} items", player.equipment.count());
            for diagnostic in &report.diagnostics {
                println!("unresolved: {}", diagnostic);
            }
        }
        Err(err) => eprintln!("injection failed: {}", err),
    }

    for item in player.equipment.items.lock().unwrap().iter() {
        println!("  - {}", item.describe());
    }
    println!("{}", player.summary());
}
