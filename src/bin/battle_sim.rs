//! Run a single head-to-head match and print the outcome.
//!
//! Usage: `battle_sim [red_class] [blue_class] [seed]`
//! Unknown or missing classes fall back to crit vs tank.

use coliseo_engine::game::arena::{self, Team};
use coliseo_engine::game::{ClassKey, SimEvent};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let red = args
        .next()
        .as_deref()
        .and_then(ClassKey::parse)
        .unwrap_or(ClassKey::Crit);
    let blue = args
        .next()
        .as_deref()
        .and_then(ClassKey::parse)
        .unwrap_or(ClassKey::Tank);
    let seed: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let mut battle = arena::Arena::new(seed);
    battle.start_match(red, blue);

    while battle.combat_active {
        battle.fixed_step();
        for event in battle.drain_events() {
            match event {
                SimEvent::LevelUp { id, level } => {
                    tracing::info!(id, level, "level up");
                }
                SimEvent::SuddenDeathStarted => {
                    tracing::warn!("sudden death");
                }
                SimEvent::EntityDied {
                    id,
                    team,
                    level,
                    damage_dealt,
                } => {
                    tracing::info!(id, ?team, level, damage_dealt, "gladiator down");
                }
                _ => {}
            }
        }
        if battle.combat_duration >= arena::MAX_BATTLE_TICKS as f32 {
            break;
        }
    }

    let seconds = battle.combat_duration / 60.0;
    match battle.winner {
        Some(Team::Red) => println!("winner: red ({}) in {seconds:.1}s", red.key_name()),
        Some(Team::Blue) => println!("winner: blue ({}) in {seconds:.1}s", blue.key_name()),
        None => println!("draw after {seconds:.1}s"),
    }
    for e in &battle.entities {
        println!(
            "  {:?} {} lvl {} hp {:.0}/{:.0} dealt {:.0}",
            e.team,
            e.class.key_name(),
            e.level,
            e.hp.max(0.0),
            e.max_hp,
            e.damage_dealt
        );
    }
}
