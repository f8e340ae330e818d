//! Class modules: the per-archetype behavior layer.
//!
//! Each of the nineteen archetypes is a stateless unit struct implementing
//! [`ClassModule`]. Every extension point defaults to a no-op, so a module
//! only spells out what it changes. Mutable per-gladiator ability state
//! lives in [`ClassState`] on the entity, never in the module.
//!
//! [`ClassState`]: crate::game::gladiator::ClassState

use crate::game::config::ClassKey;
use crate::game::context::WorldCtx;
use crate::game::gladiator::Gladiator;
use crate::game::movement::StrategySpec;
use crate::random::RandomSource;

mod archer;
mod berserker;
mod bomber;
mod crit;
mod cube;
mod hex;
mod illusion;
mod lancer;
mod ninja;
mod orb;
mod poison;
mod prism;
mod pyramid;
mod speed;
mod spike;
mod spinner;
mod star;
mod summoner;
mod tank;

/// Result of the attacker's damage modification hook.
#[derive(Debug, Clone, Copy)]
pub struct DamageOutcome {
    pub damage: f32,
    pub is_crit: bool,
}

impl DamageOutcome {
    pub fn plain(damage: f32) -> Self {
        Self {
            damage,
            is_crit: false,
        }
    }
}

/// Extension points a gladiator archetype can hook into. All methods have
/// no-op defaults; implementations override only what their class changes.
pub trait ClassModule: Sync {
    /// Set up ability state and the starting movement strategy.
    fn on_init(&self, _glad: &mut Gladiator, _rng: &mut dyn RandomSource) {}

    /// Throttled ability update (every 6 frames). `dt` is the accumulated
    /// frame count since the last call.
    fn update(&self, _idx: usize, _entities: &mut [Gladiator], _ctx: &mut WorldCtx<'_>, _dt: f32) {}

    /// Runs after a melee swing, whether or not damage landed.
    fn on_combat(
        &self,
        _attacker: &mut Gladiator,
        _defender: &mut Gladiator,
        _ctx: &mut WorldCtx<'_>,
    ) {
    }

    /// Scale or replace outgoing melee damage.
    fn modify_damage(
        &self,
        _glad: &mut Gladiator,
        damage: f32,
        _ctx: &mut WorldCtx<'_>,
    ) -> DamageOutcome {
        DamageOutcome::plain(damage)
    }

    /// Runs before the invulnerability gate; returning 0 is a full dodge.
    fn on_damage_taken_pre(
        &self,
        _glad: &mut Gladiator,
        amount: f32,
        _ctx: &mut WorldCtx<'_>,
    ) -> f32 {
        amount
    }

    /// Runs after the invulnerability gate; may scale damage or punish the
    /// attacker.
    fn on_damage_taken(
        &self,
        _glad: &mut Gladiator,
        _attacker: Option<&mut Gladiator>,
        amount: f32,
        _ctx: &mut WorldCtx<'_>,
    ) -> f32 {
        amount
    }

    /// Override the collision knockback force. `None` keeps the default.
    fn on_collision_repel(
        &self,
        _glad: &mut Gladiator,
        _other: &Gladiator,
        _ctx: &mut WorldCtx<'_>,
    ) -> Option<f32> {
        None
    }

    /// Runs after the movement pipeline bounced the gladiator off a wall.
    fn on_wall_bounce(&self, _glad: &mut Gladiator) {}

    /// Intercept a ring-out. Returning `true` means the class handled it
    /// and the gladiator survives.
    fn on_out_of_bounds(&self, _glad: &mut Gladiator) -> bool {
        false
    }

    fn on_level_up(&self, _glad: &mut Gladiator) {}

    /// Override the friction base applied by the movement pipeline.
    fn friction(&self, _glad: &Gladiator) -> Option<f32> {
        None
    }

    /// Starting movement strategy; `None` keeps the aggressive default.
    fn default_strategy(&self) -> Option<StrategySpec> {
        None
    }
}

/// Look up the behavior module for a class.
pub fn module_for(class: ClassKey) -> &'static dyn ClassModule {
    match class {
        ClassKey::Crit => &crit::Crit,
        ClassKey::Speed => &speed::Speed,
        ClassKey::Spinner => &spinner::Spinner,
        ClassKey::Tank => &tank::Tank,
        ClassKey::Spike => &spike::Spike,
        ClassKey::Ninja => &ninja::Ninja,
        ClassKey::Prism => &prism::Prism,
        ClassKey::Orb => &orb::Orb,
        ClassKey::Cube => &cube::Cube,
        ClassKey::Star => &star::Star,
        ClassKey::Hex => &hex::Hex,
        ClassKey::Pyramid => &pyramid::Pyramid,
        ClassKey::Bomber => &bomber::Bomber,
        ClassKey::Summoner => &summoner::Summoner,
        ClassKey::Lancer => &lancer::Lancer,
        ClassKey::Berserker => &berserker::Berserker,
        ClassKey::Archer => &archer::Archer,
        ClassKey::Poison => &poison::Poison,
        ClassKey::Illusion => &illusion::Illusion,
    }
}

/// Nearest living enemy of `entities[idx]`, by index and distance.
/// Ties resolve to the first (insertion order) entity at the minimum.
pub fn nearest_enemy(entities: &[Gladiator], idx: usize) -> Option<(usize, f32)> {
    let me = &entities[idx];
    let mut best: Option<(usize, f32)> = None;
    for (j, e) in entities.iter().enumerate() {
        if j == idx || e.dead || e.team == me.team {
            continue;
        }
        let d = me.pos.distance(e.pos);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((j, d));
        }
    }
    best
}

/// Disjoint mutable borrows of two entities. `a` and `b` must differ.
pub fn pair_mut(list: &mut [Gladiator], a: usize, b: usize) -> (&mut Gladiator, &mut Gladiator) {
    debug_assert_ne!(a, b);
    if a < b {
        let (lo, hi) = list.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = list.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::arena::Team;
    use crate::random::SimpleRng;
    use crate::world::CellKind;
    use glam::Vec2;

    fn glad(id: u32, pos: Vec2, class: ClassKey, team: Team) -> Gladiator {
        let mut rng = SimpleRng::new(11);
        Gladiator::new(id, pos, class, CellKind::Fire, team, &mut rng)
    }

    #[test]
    fn test_nearest_enemy_skips_dead_and_allies() {
        let mut entities = vec![
            glad(0, Vec2::new(100.0, 100.0), ClassKey::Tank, Team::Red),
            glad(1, Vec2::new(110.0, 100.0), ClassKey::Tank, Team::Red),
            glad(2, Vec2::new(120.0, 100.0), ClassKey::Tank, Team::Blue),
            glad(3, Vec2::new(200.0, 100.0), ClassKey::Tank, Team::Blue),
        ];
        entities[2].dead = true;
        let (idx, dist) = nearest_enemy(&entities, 0).unwrap();
        assert_eq!(idx, 3);
        assert!((dist - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_nearest_enemy_none_when_alone() {
        let entities = vec![glad(0, Vec2::new(100.0, 100.0), ClassKey::Tank, Team::Red)];
        assert!(nearest_enemy(&entities, 0).is_none());
    }

    #[test]
    fn test_pair_mut_returns_disjoint_borrows() {
        let mut entities = vec![
            glad(0, Vec2::new(100.0, 100.0), ClassKey::Tank, Team::Red),
            glad(1, Vec2::new(120.0, 100.0), ClassKey::Tank, Team::Blue),
        ];
        let (a, b) = pair_mut(&mut entities, 1, 0);
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 0);
        a.hp -= 10.0;
        b.hp -= 20.0;
        assert_eq!(entities[1].hp, entities[1].max_hp - 10.0);
        assert_eq!(entities[0].hp, entities[0].max_hp - 20.0);
    }

    #[test]
    fn test_every_class_resolves_to_a_module() {
        for key in ClassKey::ALL {
            // Default hooks must not panic on a fresh gladiator.
            let module = module_for(key);
            let g = glad(0, Vec2::new(150.0, 100.0), key, Team::Red);
            let _ = module.friction(&g);
        }
    }
}
