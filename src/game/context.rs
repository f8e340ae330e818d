//! Explicit world context handed to every hook.
//!
//! Replaces ambient globals: anything a class module or damage hook may
//! touch outside its own gladiator flows through here.

use glam::Vec2;

use crate::game::events::{EffectQueue, MinionSpawn, ProjectileSpawn, SimEvent};
use crate::game::projectile::ProjectileKind;
use crate::random::RandomSource;
use crate::world::Grid;

pub struct WorldCtx<'a> {
    pub grid: &'a mut Grid,
    pub rng: &'a mut dyn RandomSource,
    /// Total scaled simulation time (seconds).
    pub elapsed: f32,
    pub effects: &'a mut EffectQueue,
}

impl WorldCtx<'_> {
    /// Queue a floating combat text.
    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, color: &'static str) {
        self.effects
            .texts
            .push(crate::game::events::FloatingText::new(pos, text, color));
    }

    /// Queue a simulation event.
    pub fn emit(&mut self, event: SimEvent) {
        self.effects.events.push(event);
    }

    /// Request a projectile spawn at end of tick.
    pub fn spawn_projectile(
        &mut self,
        kind: ProjectileKind,
        pos: Vec2,
        owner: u32,
        target: Option<Vec2>,
    ) {
        self.effects.projectile_spawns.push(ProjectileSpawn {
            kind,
            pos,
            owner,
            target,
        });
    }

    /// Request a summoner minion spawn at end of tick.
    pub fn spawn_minion(&mut self, owner: u32, initial: bool) {
        self.effects
            .minion_spawns
            .push(MinionSpawn { owner, initial });
    }
}
