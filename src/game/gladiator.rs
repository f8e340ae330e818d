//! The combat entity and its per-tick pipeline.
//!
//! A [`Gladiator`] is a plain struct: identity, vitals, kinematics, timers,
//! the owned movement [`Strategy`], and a [`ClassState`] tagged union for
//! ability bookkeeping. Behavior variation comes from the class module
//! looked up by key, never from subtyping.
//!
//! The per-tick update order is a contract (see [`update`]): state machine,
//! timers, throttled ability update, movement, ring-out, collisions and
//! combat, level-up check, invulnerability decay. Death only sets a flag;
//! the arena removes corpses at the end of the tick.

use glam::Vec2;

use crate::game::arena::Team;
use crate::game::classes::{DamageOutcome, module_for, pair_mut};
use crate::game::config::{
    ABILITY_UPDATE_INTERVAL, ATTACK_COOLDOWN_FRAMES, BASE_XP_TO_NEXT, ClassKey,
    DEFAULT_REPEL_FORCE, RING_OUT_LIMIT, STAGE_H, STAGE_W,
};
use crate::game::context::WorldCtx;
use crate::game::events::SimEvent;
use crate::game::movement::{self, Strategy, StrategySpec};
use crate::game::state::{ATTACK_STATE_FRAMES, CombatState};
use crate::random::RandomSource;
use crate::world::CellKind;

/// Collision radius shared by all archetypes (cells).
pub const GLADIATOR_RADIUS: f32 = 10.0;

/// Per-archetype ability state. One variant per class that needs any;
/// classes whose hooks are pure keep `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClassState {
    None,
    Crit { crit_chance: f32 },
    Speed { bounce_active: bool, bounces: u32, prev_pos: Vec2 },
    Spinner { combo: u32, last_attack: f32, initialized: bool },
    Tank { last_shield: f32 },
    Spike { reflect_dmg: f32 },
    Ninja { dodge_chance: f32 },
    Cube { slam_cooldown: f32, slam_windup: f32, slam_in_progress: bool },
    Star { energy: f32, prev_pos: Vec2 },
    Hex { regen_timer: f32 },
    Pyramid { turret: bool, ranged_cd: f32 },
    Bomber { trail_cd: f32, flee_timer: f32, defensive_bomb_cd: f32 },
    Summoner { summon_cd: f32, initial_spawned: bool },
    Lancer { lance_cd: f32, charging: bool },
    Berserker { rage: f32, stacks: u32, next_threshold: f32 },
    Archer { ranged_cd: f32, flee_timer: f32 },
    Poison { flee_timer: f32, last_tick: f32 },
    Illusion { decoy_timer: f32, decoy_active: bool, decoy_spawned: bool },
}

impl Default for ClassState {
    fn default() -> Self {
        ClassState::None
    }
}

#[derive(Debug, Clone)]
pub struct Gladiator {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub team: Team,
    pub class: ClassKey,
    /// Residue kind splattered on damage and death.
    pub element: CellKind,

    pub max_hp: f32,
    pub hp: f32,
    pub base_speed: f32,
    pub radius: f32,

    pub level: u32,
    pub xp: f32,
    pub xp_to_next: f32,
    pub damage_dealt: f32,

    /// Attack cooldown (frames).
    pub cooldown: f32,
    /// Lifetime (frames).
    pub age: f32,
    pub invulnerable: bool,
    pub invuln_timer: f32,
    pub dead: bool,

    /// Suppresses aggressive seeking for the current tick only.
    pub skip_seek: bool,
    /// Pull strength this entity exerts on its seek target (orb).
    pub seek_attractor: f32,

    pub poison_stacks: u32,
    pub poison_source: Option<u32>,

    pub is_minion: bool,
    pub owner_id: Option<u32>,
    pub module_updates_disabled: bool,
    ability_accumulator: f32,

    pub state: CombatState,
    pub time_in_state: f32,
    pub stun_timer: f32,

    pub strategy: Strategy,
    pub class_state: ClassState,
}

impl Gladiator {
    pub fn new(
        id: u32,
        pos: Vec2,
        class: ClassKey,
        element: CellKind,
        team: Team,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let stats = class.stats();
        let mut glad = Self {
            id,
            pos,
            vel: Vec2::new(
                rng.range(-0.5, 0.5) * stats.speed,
                rng.range(-0.5, 0.5) * stats.speed,
            ),
            team,
            class,
            element,
            max_hp: stats.max_hp,
            hp: stats.max_hp,
            base_speed: stats.speed,
            radius: GLADIATOR_RADIUS,
            level: 1,
            xp: 0.0,
            xp_to_next: BASE_XP_TO_NEXT,
            damage_dealt: 0.0,
            cooldown: 0.0,
            age: 0.0,
            invulnerable: false,
            invuln_timer: 0.0,
            dead: false,
            skip_seek: false,
            seek_attractor: 0.0,
            poison_stacks: 0,
            poison_source: None,
            is_minion: false,
            owner_id: None,
            module_updates_disabled: false,
            ability_accumulator: 0.0,
            state: CombatState::Idle,
            time_in_state: 0.0,
            stun_timer: 0.0,
            strategy: Strategy::default(),
            class_state: ClassState::None,
        };
        let module = module_for(class);
        if let Some(spec) = module.default_strategy() {
            glad.set_strategy(spec, rng);
        }
        module.on_init(&mut glad, rng);
        glad
    }

    pub fn hp_percent(&self) -> f32 {
        (self.hp / self.max_hp).clamp(0.0, 1.0)
    }

    pub fn in_turret_mode(&self) -> bool {
        matches!(self.class_state, ClassState::Pyramid { turret: true, .. })
    }

    /// Replace the movement strategy with a default-tuned one.
    pub fn set_strategy(&mut self, spec: StrategySpec, rng: &mut dyn RandomSource) {
        self.strategy = Strategy::from_spec(spec, self.pos, rng);
    }

    /// Switch strategies only if the requested kind differs.
    pub fn switch_strategy(&mut self, spec: StrategySpec, rng: &mut dyn RandomSource) {
        if self.strategy.spec() != spec {
            self.set_strategy(spec, rng);
        }
    }

    pub fn gain_xp(&mut self, amount: f32) {
        self.xp += amount;
    }

    /// Hold the gladiator in place; blocks movement and attacks until the
    /// timer elapses.
    pub fn apply_stun(&mut self, frames: f32) {
        self.stun_timer = frames;
        self.vel = Vec2::ZERO;
        self.transition(CombatState::Stunned);
    }

    /// Advance the combat state machine by one tick.
    pub fn update_state(&mut self, enemy_alive: bool, sim_speed: f32) {
        self.time_in_state += sim_speed;
        match self.state {
            CombatState::Idle => {
                if enemy_alive {
                    self.transition(CombatState::Moving);
                }
            }
            CombatState::Moving => {
                if !enemy_alive && self.vel.length() < 0.1 {
                    self.transition(CombatState::Idle);
                }
            }
            CombatState::Attacking => {
                if self.time_in_state > ATTACK_STATE_FRAMES {
                    self.transition(CombatState::Moving);
                }
            }
            CombatState::Stunned => {
                self.vel = Vec2::ZERO;
                self.stun_timer -= sim_speed;
                if self.stun_timer <= 0.0 {
                    self.stun_timer = 0.0;
                    self.transition(CombatState::Moving);
                }
            }
            CombatState::Dead => {}
        }
    }

    fn transition(&mut self, next: CombatState) {
        self.state = next;
        self.time_in_state = 0.0;
    }

    fn enter_attack_state(&mut self) {
        if self.state == CombatState::Moving {
            self.transition(CombatState::Attacking);
        }
    }

    /// Full incoming-damage pipeline: pre-hook (dodge), invulnerability
    /// gate, post-hook (reflect/scale), hp subtraction, residue splat.
    /// Returns the amount actually applied.
    pub fn take_damage(
        &mut self,
        amount: f32,
        mut attacker: Option<&mut Gladiator>,
        ctx: &mut WorldCtx<'_>,
    ) -> f32 {
        let module = module_for(self.class);
        let amount = module.on_damage_taken_pre(self, amount, ctx);

        if self.invulnerable {
            ctx.text(self.pos + Vec2::new(0.0, -5.0), "BLOCK", "#00ffff");
            self.gain_xp(30.0);
            return 0.0;
        }

        let amount = module.on_damage_taken(self, attacker.as_deref_mut(), amount, ctx);
        self.hp -= amount;

        // Residue splat on roughly half of all hits
        if ctx.rng.next_f32() > 0.5 {
            ctx.grid
                .set(self.pos.x.floor() as i32, self.pos.y.floor() as i32, self.element);
        }

        amount
    }

    pub fn level_up(&mut self, ctx: &mut WorldCtx<'_>) {
        self.level += 1;
        self.xp = 0.0;
        self.xp_to_next = (self.xp_to_next * 1.2).floor();

        // Growth preserves the current hp percentage
        let pct = self.hp / self.max_hp;
        self.max_hp *= 1.2;
        self.hp = self.max_hp * pct;

        module_for(self.class).on_level_up(self);

        ctx.grid.stamp_circle(
            self.pos.x.floor() as i32,
            self.pos.y.floor() as i32,
            15,
            CellKind::Empty,
        );
        ctx.text(self.pos + Vec2::new(0.0, -10.0), "LEVEL UP!", "#ffff00");
        ctx.emit(SimEvent::LevelUp {
            id: self.id,
            level: self.level,
        });
    }

    pub fn die(&mut self, ctx: &mut WorldCtx<'_>) {
        if self.dead {
            return;
        }
        ctx.grid.stamp_circle(
            self.pos.x.floor() as i32,
            self.pos.y.floor() as i32,
            (self.radius * 2.0) as i32,
            self.element,
        );
        self.dead = true;
        self.transition(CombatState::Dead);
        ctx.emit(SimEvent::EntityDied {
            id: self.id,
            team: self.team,
            level: self.level,
            damage_dealt: self.damage_dealt,
        });
    }
}

/// One fixed-tick update for the entity at `idx`.
pub fn update(idx: usize, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>, sim_speed: f32) {
    if entities[idx].hp <= 0.0 {
        entities[idx].die(ctx);
        return;
    }

    let enemy_alive = {
        let me = &entities[idx];
        entities
            .iter()
            .enumerate()
            .any(|(j, e)| j != idx && !e.dead && e.team != me.team)
    };
    entities[idx].update_state(enemy_alive, sim_speed);
    if entities[idx].state == CombatState::Stunned {
        return;
    }

    {
        let e = &mut entities[idx];
        e.age += sim_speed;
        if e.cooldown > 0.0 {
            e.cooldown = (e.cooldown - sim_speed).max(0.0);
        }
        e.ability_accumulator += sim_speed;
    }

    // Abilities run on an accumulator so they tick ~10x per second instead
    // of every frame, independent of the host frame rate.
    let module = module_for(entities[idx].class);
    if entities[idx].ability_accumulator >= ABILITY_UPDATE_INTERVAL {
        entities[idx].ability_accumulator -= ABILITY_UPDATE_INTERVAL;
        if !entities[idx].module_updates_disabled {
            module.update(idx, entities, ctx, ABILITY_UPDATE_INTERVAL);
        }
    }

    // A turret-mode pyramid neither moves nor can ring out.
    if !entities[idx].in_turret_mode() {
        movement::update(idx, entities, ctx.grid, sim_speed);

        let pos = entities[idx].pos;
        let out = pos.x < RING_OUT_LIMIT
            || pos.x > STAGE_W as f32 - RING_OUT_LIMIT
            || pos.y < RING_OUT_LIMIT
            || pos.y > STAGE_H as f32 - RING_OUT_LIMIT;
        if out {
            let handled = module.on_out_of_bounds(&mut entities[idx]);
            if !handled {
                entities[idx].die(ctx);
                return;
            }
        }
    }
    entities[idx].skip_seek = false;

    check_collisions(idx, entities, ctx);

    if entities[idx].xp >= entities[idx].xp_to_next {
        entities[idx].level_up(ctx);
    }

    let e = &mut entities[idx];
    if e.invuln_timer > 0.0 {
        e.invuln_timer -= sim_speed;
        e.invulnerable = true;
        if e.invuln_timer <= 0.0 {
            e.invuln_timer = 0.0;
            e.invulnerable = false;
        }
    }
}

/// Contact detection against every living opposing entity, followed by the
/// repulsion impulse. No friendly fire by construction.
fn check_collisions(idx: usize, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>) {
    let me_team = entities[idx].team;
    for j in 0..entities.len() {
        if j == idx || entities[j].dead || entities[j].team == me_team {
            continue;
        }
        let dist = entities[idx].pos.distance(entities[j].pos);
        if dist >= entities[idx].radius + entities[j].radius {
            continue;
        }

        let (me, other) = pair_mut(entities, idx, j);
        if me.cooldown <= 0.0 {
            handle_combat(me, other, ctx);
        }

        let module = module_for(me.class);
        let force = module
            .on_collision_repel(me, other, ctx)
            .unwrap_or(DEFAULT_REPEL_FORCE);
        let away = (me.pos - other.pos).normalize_or_zero();
        me.vel += away * force;
    }
}

/// One melee swing: base damage scaled by the attacker's module, the
/// defender's full damage pipeline, then bookkeeping and the attacker's
/// combat hook.
pub fn handle_combat(
    attacker: &mut Gladiator,
    defender: &mut Gladiator,
    ctx: &mut WorldCtx<'_>,
) {
    let module = module_for(attacker.class);

    let base = 5.0 + attacker.level as f32 * 2.0;
    let DamageOutcome { damage, is_crit } = module.modify_damage(attacker, base, ctx);

    let dealt = defender.take_damage(damage, Some(attacker), ctx);
    if dealt > 0.0 {
        attacker.damage_dealt += dealt;
        attacker.cooldown = ATTACK_COOLDOWN_FRAMES;

        if attacker.class.is_auto_attacker() {
            attacker.gain_xp(5.0 + attacker.level as f32);
        }

        let color = if is_crit { "#ff0000" } else { "#ffffff" };
        let label = if is_crit {
            format!("{}!", dealt.round() as i64)
        } else {
            format!("{}", dealt.round() as i64)
        };
        ctx.text(defender.pos + Vec2::new(0.0, -5.0), label, color);
        ctx.emit(SimEvent::DamageDealt {
            attacker: attacker.id,
            target: defender.id,
            amount: dealt,
            crit: is_crit,
        });
        attacker.enter_attack_state();
    }

    module.on_combat(attacker, defender, ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::EffectQueue;
    use crate::random::{ScriptedRng, SimpleRng};
    use crate::world::Grid;

    fn test_ctx<'a>(
        grid: &'a mut Grid,
        rng: &'a mut dyn RandomSource,
        effects: &'a mut EffectQueue,
    ) -> WorldCtx<'a> {
        WorldCtx {
            grid,
            rng,
            elapsed: 0.0,
            effects,
        }
    }

    fn glad(class: ClassKey, team: Team) -> Gladiator {
        let mut rng = SimpleRng::new(21);
        Gladiator::new(
            7,
            Vec2::new(150.0, 100.0),
            class,
            CellKind::Fire,
            team,
            &mut rng,
        )
    }

    #[test]
    fn test_level_up_preserves_hp_percentage() {
        let mut grid = Grid::new(STAGE_W, STAGE_H);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = test_ctx(&mut grid, &mut rng, &mut effects);

        let mut g = glad(ClassKey::Tank, Team::Red);
        g.hp = g.max_hp * 0.5;
        let old_max = g.max_hp;
        g.level_up(&mut ctx);

        assert_eq!(g.level, 2);
        assert_eq!(g.xp, 0.0);
        assert_eq!(g.xp_to_next, 120.0); // floor(100 * 1.2)
        assert!((g.max_hp - old_max * 1.2).abs() < 1e-3);
        assert!((g.hp_percent() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_invulnerable_blocks_damage_and_grants_xp() {
        let mut grid = Grid::new(STAGE_W, STAGE_H);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = test_ctx(&mut grid, &mut rng, &mut effects);

        let mut g = glad(ClassKey::Tank, Team::Red);
        g.invulnerable = true;
        let dealt = g.take_damage(50.0, None, &mut ctx);

        assert_eq!(dealt, 0.0);
        assert_eq!(g.hp, g.max_hp);
        assert_eq!(g.xp, 30.0);
        assert_eq!(effects.texts[0].text, "BLOCK");
    }

    #[test]
    fn test_damage_splats_element_residue() {
        let mut grid = Grid::new(STAGE_W, STAGE_H);
        // First roll 0.9 forces the splat branch
        let mut rng = ScriptedRng::new(&[0.9], 1);
        let mut effects = EffectQueue::default();
        let mut ctx = test_ctx(&mut grid, &mut rng, &mut effects);

        let mut g = glad(ClassKey::Tank, Team::Red);
        let dealt = g.take_damage(25.0, None, &mut ctx);
        assert_eq!(dealt, 25.0);
        assert_eq!(g.hp, g.max_hp - 25.0);
        drop(ctx);
        assert_eq!(grid.get(150, 100), CellKind::Fire);
    }

    #[test]
    fn test_melee_hit_sets_cooldown_and_awards_auto_attacker_xp() {
        let mut grid = Grid::new(STAGE_W, STAGE_H);
        let mut rng = ScriptedRng::new(&[0.99, 0.1], 1); // no crit, no splat
        let mut effects = EffectQueue::default();
        let mut ctx = test_ctx(&mut grid, &mut rng, &mut effects);

        let mut attacker = glad(ClassKey::Crit, Team::Red);
        let mut defender = glad(ClassKey::Tank, Team::Blue);
        attacker.state = CombatState::Moving;
        handle_combat(&mut attacker, &mut defender, &mut ctx);

        // Base damage at level 1 is 7
        assert_eq!(defender.hp, defender.max_hp - 7.0);
        assert_eq!(attacker.cooldown, ATTACK_COOLDOWN_FRAMES);
        assert_eq!(attacker.xp, 6.0); // 5 + level
        assert_eq!(attacker.damage_dealt, 7.0);
        assert_eq!(attacker.state, CombatState::Attacking);
    }

    #[test]
    fn test_no_friendly_fire_in_collisions() {
        let mut grid = Grid::new(STAGE_W, STAGE_H);
        grid.init_arena();
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = test_ctx(&mut grid, &mut rng, &mut effects);

        let mut entities = vec![glad(ClassKey::Tank, Team::Red), glad(ClassKey::Tank, Team::Red)];
        entities[1].pos = entities[0].pos + Vec2::new(5.0, 0.0);
        check_collisions(0, &mut entities, &mut ctx);

        assert_eq!(entities[0].hp, entities[0].max_hp);
        assert_eq!(entities[1].hp, entities[1].max_hp);
    }

    #[test]
    fn test_state_machine_idle_to_moving_to_attacking() {
        let mut g = glad(ClassKey::Tank, Team::Red);
        assert_eq!(g.state, CombatState::Idle);
        g.update_state(true, 1.0);
        assert_eq!(g.state, CombatState::Moving);

        g.enter_attack_state();
        assert_eq!(g.state, CombatState::Attacking);
        for _ in 0..20 {
            g.update_state(true, 1.0);
        }
        assert_eq!(g.state, CombatState::Moving);
    }

    #[test]
    fn test_stun_holds_then_releases() {
        let mut g = glad(ClassKey::Tank, Team::Red);
        g.vel = Vec2::new(2.0, 0.0);
        g.apply_stun(10.0);
        assert_eq!(g.state, CombatState::Stunned);
        assert_eq!(g.vel, Vec2::ZERO);
        for _ in 0..10 {
            g.update_state(true, 1.0);
        }
        assert_eq!(g.state, CombatState::Moving);
    }

    #[test]
    fn test_death_splats_and_is_terminal() {
        let mut grid = Grid::new(STAGE_W, STAGE_H);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = test_ctx(&mut grid, &mut rng, &mut effects);

        let mut g = glad(ClassKey::Tank, Team::Red);
        g.die(&mut ctx);
        assert!(g.dead);
        assert_eq!(g.state, CombatState::Dead);
        drop(ctx);
        // Splat radius is 2x the collision radius
        assert_eq!(grid.get(150, 100), CellKind::Fire);
        assert_eq!(grid.get(150 + 19, 100), CellKind::Fire);

        // Dying twice emits no second event
        let mut effects2 = EffectQueue::default();
        let mut rng2 = SimpleRng::new(1);
        let mut ctx2 = test_ctx(&mut grid, &mut rng2, &mut effects2);
        g.die(&mut ctx2);
        drop(ctx2);
        assert!(effects2.events.is_empty());
    }
}
