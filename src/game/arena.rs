//! The arena: match lifecycle and the fixed-timestep simulation loop.
//!
//! `Arena` owns every world list. A host feeds it wall-clock timestamps
//! through [`Arena::frame`]; the accumulator drains into 60 Hz
//! [`Arena::fixed_step`] ticks, at most eight per frame so a stall never
//! spirals. Headless callers (tests, the balance harness) drive
//! `fixed_step` directly.
//!
//! Tick order is a contract: restart countdown, sudden death, entity
//! updates, deferred spawn flush, projectile updates, floating-text decay,
//! grid diffusion, corpse removal, end-of-combat check. Hooks request
//! spawns through the effect queue; nothing mutates the world lists while
//! they are being walked.

use glam::Vec2;
use serde::Serialize;

use crate::game::config::{
    ClassKey, RESTART_DELAY_FRAMES, STAGE_H, STAGE_W, SUDDEN_DEATH_FRAMES,
};
use crate::game::context::WorldCtx;
use crate::game::events::{EffectQueue, FloatingText, MinionSpawn, SimEvent};
use crate::game::gladiator::{self, Gladiator};
use crate::game::projectile::Projectile;
use crate::random::{RandomSource, SimpleRng};
use crate::time::Clock;
use crate::world::{CellKind, Grid};

/// Hard ceiling for headless battles; sudden death ends matches far
/// earlier, this only guards against a pathological stalemate.
pub const MAX_BATTLE_TICKS: u32 = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Blue,
}

/// Result of one headless battle, for the balance harness.
#[derive(Debug, Clone, Serialize)]
pub struct BattleOutcome {
    pub winner: Option<Team>,
    pub duration_frames: f32,
    pub red_damage: f32,
    pub blue_damage: f32,
    /// Remaining health fraction of the strongest surviving winner.
    pub winner_hp_pct: f32,
}

pub struct Arena {
    pub grid: Grid,
    pub entities: Vec<Gladiator>,
    pub projectiles: Vec<Projectile>,
    pub floating_texts: Vec<FloatingText>,
    pub clock: Clock,
    pub combat_active: bool,
    pub winner: Option<Team>,
    /// Simulated frames since the current match started.
    pub combat_duration: f32,

    events: Vec<SimEvent>,
    effects: EffectQueue,
    rng: SimpleRng,
    next_id: u32,
    accumulator: f32,
    restarting: bool,
    restart_pending: bool,
    restart_timer: f32,
    sudden_death_announced: bool,
}

impl Arena {
    pub fn new(seed: u32) -> Self {
        Self {
            grid: Grid::new(STAGE_W, STAGE_H),
            entities: Vec::new(),
            projectiles: Vec::new(),
            floating_texts: Vec::new(),
            clock: Clock::new(),
            combat_active: false,
            winner: None,
            combat_duration: 0.0,
            events: Vec::new(),
            effects: EffectQueue::default(),
            rng: SimpleRng::new(seed),
            next_id: 0,
            accumulator: 0.0,
            restarting: false,
            restart_pending: false,
            restart_timer: 0.0,
            sudden_death_announced: false,
        }
    }

    /// Reset the world and start a 1v1 match.
    pub fn start_match(&mut self, red: ClassKey, blue: ClassKey) {
        self.reset_world();
        let mid = STAGE_H as f32 / 2.0;
        self.spawn_gladiator(Vec2::new(50.0, mid), red, CellKind::Fire, Team::Red);
        self.spawn_gladiator(
            Vec2::new(STAGE_W as f32 - 50.0, mid),
            blue,
            CellKind::Water,
            Team::Blue,
        );
        self.begin_combat();
        tracing::info!(
            red = red.key_name(),
            blue = blue.key_name(),
            "match started"
        );
    }

    /// Reset the world and start a 2v2 match: `[red_a, red_b, blue_a, blue_b]`.
    pub fn start_match_2v2(&mut self, classes: [ClassKey; 4]) {
        self.reset_world();
        let y_hi = STAGE_H as f32 / 3.0;
        let y_lo = STAGE_H as f32 * 2.0 / 3.0;
        let right = STAGE_W as f32 - 50.0;
        self.spawn_gladiator(Vec2::new(50.0, y_hi), classes[0], CellKind::Fire, Team::Red);
        self.spawn_gladiator(Vec2::new(50.0, y_lo), classes[1], CellKind::Fire, Team::Red);
        self.spawn_gladiator(Vec2::new(right, y_hi), classes[2], CellKind::Water, Team::Blue);
        self.spawn_gladiator(Vec2::new(right, y_lo), classes[3], CellKind::Water, Team::Blue);
        self.begin_combat();
        tracing::info!(
            red_a = classes[0].key_name(),
            red_b = classes[1].key_name(),
            blue_a = classes[2].key_name(),
            blue_b = classes[3].key_name(),
            "2v2 match started"
        );
    }

    fn reset_world(&mut self) {
        self.grid.init_arena();
        self.entities.clear();
        self.projectiles.clear();
        self.floating_texts.clear();
        self.events.clear();
        self.effects = EffectQueue::default();
        self.combat_duration = 0.0;
        self.sudden_death_announced = false;
        self.winner = None;
        self.restarting = false;
        self.restart_pending = false;
        self.accumulator = 0.0;
        self.clock.reset();
    }

    fn begin_combat(&mut self) {
        self.combat_active = true;
        self.events.push(SimEvent::MatchStarted);
    }

    pub fn spawn_gladiator(
        &mut self,
        pos: Vec2,
        class: ClassKey,
        element: CellKind,
        team: Team,
    ) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let glad = Gladiator::new(id, pos, class, element, team, &mut self.rng);
        self.entities.push(glad);
        id
    }

    /// Host entry point: advance with a wall-clock timestamp (ms).
    pub fn frame(&mut self, now_ms: f64) {
        self.clock.advance_frame(now_ms);
        self.advance(self.clock.delta());
    }

    /// Drain `dt` seconds of simulation through the fixed accumulator.
    pub fn advance(&mut self, dt: f32) {
        use crate::time::{FIXED_TIMESTEP_S, MAX_FIXED_STEPS_PER_FRAME};
        let cap = FIXED_TIMESTEP_S * MAX_FIXED_STEPS_PER_FRAME as f32;
        self.accumulator = (self.accumulator + dt).min(cap);
        while self.accumulator >= FIXED_TIMESTEP_S {
            self.fixed_step();
            self.clock.advance_fixed_step();
            self.accumulator -= FIXED_TIMESTEP_S;
        }
    }

    /// One 60 Hz physics tick.
    pub fn fixed_step(&mut self) {
        if !self.combat_active {
            // World is frozen after a conclusion; only the restart
            // countdown and cosmetic text decay keep running.
            if self.restarting {
                self.restart_timer -= 1.0;
                if self.restart_timer <= 0.0 {
                    self.restarting = false;
                    self.restart_pending = true;
                }
            }
            for t in &mut self.floating_texts {
                t.update(1.0);
            }
            self.floating_texts.retain(|t| t.life > 0.0);
            return;
        }

        self.combat_duration += 1.0;
        let elapsed = self.combat_duration / 60.0;

        self.apply_sudden_death(elapsed);

        {
            let mut ctx = WorldCtx {
                grid: &mut self.grid,
                rng: &mut self.rng,
                elapsed,
                effects: &mut self.effects,
            };
            for idx in 0..self.entities.len() {
                if self.entities[idx].dead {
                    continue;
                }
                gladiator::update(idx, &mut self.entities, &mut ctx, 1.0);
            }
        }
        self.flush_effects();

        {
            let mut ctx = WorldCtx {
                grid: &mut self.grid,
                rng: &mut self.rng,
                elapsed,
                effects: &mut self.effects,
            };
            for p in self.projectiles.iter_mut() {
                p.update(&mut self.entities, &mut ctx);
            }
        }
        self.flush_effects();
        self.projectiles.retain(|p| !p.dead);

        for t in &mut self.floating_texts {
            t.update(1.0);
        }
        self.floating_texts.retain(|t| t.life > 0.0);

        self.grid.diffuse_particles(1.0, &mut self.rng);

        // Corpses stay in the list for the whole tick so indices held by
        // hooks never dangle; removal is the last mutation.
        self.entities.retain(|e| !e.dead);

        self.check_combat_end();
    }

    fn apply_sudden_death(&mut self, elapsed: f32) {
        if self.combat_duration < SUDDEN_DEATH_FRAMES {
            return;
        }
        if !self.sudden_death_announced {
            self.sudden_death_announced = true;
            self.events.push(SimEvent::SuddenDeathStarted);
            self.floating_texts.push(FloatingText::new(
                Vec2::new(STAGE_W as f32 / 2.0, STAGE_H as f32 / 2.0),
                "SUDDEN DEATH",
                "#ff0000",
            ));
            tracing::warn!(frames = self.combat_duration, "sudden death started");
        }
        let ramp = (self.combat_duration - SUDDEN_DEATH_FRAMES) / 30.0;
        let damage = 8.0 + ramp;
        let mut ctx = WorldCtx {
            grid: &mut self.grid,
            rng: &mut self.rng,
            elapsed,
            effects: &mut self.effects,
        };
        for e in self.entities.iter_mut() {
            if !e.dead {
                e.take_damage(damage, None, &mut ctx);
            }
        }
    }

    /// Move queued texts and events into the world lists and materialize
    /// deferred spawns.
    fn flush_effects(&mut self) {
        self.floating_texts.append(&mut self.effects.texts);
        self.events.append(&mut self.effects.events);

        let spawns: Vec<_> = self.effects.projectile_spawns.drain(..).collect();
        for s in spawns {
            if let Some(owner) = self.entities.iter().find(|e| e.id == s.owner && !e.dead) {
                self.projectiles
                    .push(Projectile::new(s.kind, s.pos, owner, s.target));
            }
        }

        let minions: Vec<_> = self.effects.minion_spawns.drain(..).collect();
        for m in minions {
            self.spawn_minion(m);
        }
    }

    fn spawn_minion(&mut self, request: MinionSpawn) {
        let Some(owner_idx) = self
            .entities
            .iter()
            .position(|e| e.id == request.owner && !e.dead)
        else {
            return;
        };
        let owner = self.entities[owner_idx].clone();

        let cap = 3 + owner.level / 3;
        let living_pets: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_minion && e.owner_id == Some(owner.id) && !e.dead)
            .map(|(i, _)| i)
            .collect();

        let offset = if request.initial {
            Vec2::new(-18.0, 0.0)
        } else {
            Vec2::new(self.rng.range(-15.0, 15.0), self.rng.range(-15.0, 15.0))
        };
        let pos = owner.pos + offset;

        if living_pets.len() as u32 >= cap {
            // At the cap: recycle the oldest living pet instead.
            if let Some(&pi) = living_pets.first() {
                let pet = &mut self.entities[pi];
                pet.pos = pos;
                pet.hp = pet.max_hp;
            }
            return;
        }

        let id = self.next_id;
        self.next_id += 1;
        let mut minion = Gladiator::new(id, pos, owner.class, owner.element, owner.team, &mut self.rng);
        minion.is_minion = true;
        minion.owner_id = Some(owner.id);
        minion.module_updates_disabled = true;
        minion.radius = (owner.radius * 0.6).floor().max(6.0);
        minion.max_hp = (owner.max_hp * 0.05).floor().max(1.0);
        minion.hp = minion.max_hp;
        minion.base_speed = owner.base_speed * 0.9;
        minion.level = owner.level.saturating_sub(1).max(1);
        self.entities.push(minion);
    }

    fn check_combat_end(&mut self) {
        let red = self.living_count(Team::Red);
        let blue = self.living_count(Team::Blue);
        if red > 0 && blue > 0 {
            return;
        }

        self.combat_active = false;
        self.winner = if red > 0 {
            Some(Team::Red)
        } else if blue > 0 {
            Some(Team::Blue)
        } else {
            None
        };
        self.restarting = true;
        self.restart_timer = RESTART_DELAY_FRAMES;
        self.events.push(SimEvent::MatchEnded {
            winner: self.winner,
            duration_frames: self.combat_duration,
        });
        match self.winner {
            Some(team) => tracing::info!(
                ?team,
                frames = self.combat_duration,
                "match ended"
            ),
            None => tracing::info!(frames = self.combat_duration, "match ended in a draw"),
        }
    }

    /// Living non-minion gladiators on a team; pets never hold a match open.
    fn living_count(&self, team: Team) -> usize {
        self.entities
            .iter()
            .filter(|e| !e.dead && !e.is_minion && e.team == team)
            .count()
    }

    /// True once after the post-match delay elapses; the host restarts.
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_pending)
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Run one headless battle to conclusion (or the tick ceiling).
pub fn run_battle(red: ClassKey, blue: ClassKey, seed: u32) -> BattleOutcome {
    let mut arena = Arena::new(seed);
    arena.start_match(red, blue);

    for _ in 0..MAX_BATTLE_TICKS {
        arena.fixed_step();
        if !arena.combat_active {
            break;
        }
    }

    let mut red_damage = 0.0;
    let mut blue_damage = 0.0;
    for event in arena.drain_events() {
        if let SimEvent::EntityDied {
            team, damage_dealt, ..
        } = event
        {
            match team {
                Team::Red => red_damage += damage_dealt,
                Team::Blue => blue_damage += damage_dealt,
            }
        }
    }
    for e in &arena.entities {
        match e.team {
            Team::Red => red_damage += e.damage_dealt,
            Team::Blue => blue_damage += e.damage_dealt,
        }
    }

    let winner_hp_pct = arena
        .winner
        .map(|team| {
            arena
                .entities
                .iter()
                .filter(|e| !e.dead && !e.is_minion && e.team == team)
                .map(|e| e.hp_percent())
                .fold(0.0, f32::max)
        })
        .unwrap_or(0.0);

    BattleOutcome {
        winner: arena.winner,
        duration_frames: arena.combat_duration,
        red_damage,
        blue_damage,
        winner_hp_pct,
    }
}
