//! Projectiles: bombs, arrows, and decoys.
//!
//! Each projectile snapshots its owner's identity at spawn time so hits
//! resolve correctly even after the owner dies. Arrows use a swept
//! segment-vs-circle test between the previous and current position so
//! they cannot tunnel through a target in one tick.

use glam::Vec2;

use crate::game::arena::Team;
use crate::game::classes::pair_mut;
use crate::game::config::ClassKey;
use crate::game::context::WorldCtx;
use crate::game::gladiator::Gladiator;

const BOMB_AOE_RADIUS: f32 = 34.0;
const DECOY_PULL_RANGE: f32 = 100.0;
const DECOY_PULL_IMPULSE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    Bomb,
    Arrow,
    Decoy,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub prev: Vec2,
    pub vel: Vec2,
    pub owner_id: u32,
    pub owner_team: Team,
    pub owner_class: ClassKey,
    pub owner_level: u32,
    pub life: f32,
    pub max_life: f32,
    pub radius: f32,
    pub damage: f32,
    pub dead: bool,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, pos: Vec2, owner: &Gladiator, target: Option<Vec2>) -> Self {
        let dir = target
            .map(|t| (t - pos).normalize_or_zero())
            .unwrap_or(Vec2::ZERO);
        let level = owner.level as f32;
        let (life, radius, damage, vel) = match kind {
            ProjectileKind::Bomb => (60.0, 16.0, 24.0 + 8.0 * level, Vec2::ZERO),
            ProjectileKind::Arrow => (120.0, 3.0, 5.0 + 3.0 * level, dir * 4.0),
            ProjectileKind::Decoy => (180.0, 14.0, 0.0, Vec2::ZERO),
        };
        Self {
            kind,
            pos,
            prev: pos,
            vel,
            owner_id: owner.id,
            owner_team: owner.team,
            owner_class: owner.class,
            owner_level: owner.level,
            life,
            max_life: life,
            radius,
            damage,
            dead: false,
        }
    }

    /// One fixed tick: age, expire (bombs detonate), integrate, resolve
    /// contacts.
    pub fn update(&mut self, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>) {
        if self.dead {
            return;
        }
        self.prev = self.pos;
        self.life -= 1.0;
        if self.life <= 0.0 {
            if self.kind == ProjectileKind::Bomb {
                self.explode(entities, ctx);
            }
            self.dead = true;
            return;
        }
        self.pos += self.vel;

        match self.kind {
            ProjectileKind::Arrow => self.sweep_contacts(entities, ctx),
            ProjectileKind::Decoy => self.pull_enemies(entities),
            ProjectileKind::Bomb => {}
        }
    }

    fn explode(&self, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>) {
        // The blast also chips the wall ring.
        let r = BOMB_AOE_RADIUS as i32;
        let (cx, cy) = (self.pos.x.floor() as i32, self.pos.y.floor() as i32);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    ctx.grid.damage_wall(cx + dx, cy + dy, 2);
                }
            }
        }

        let owner_idx = self.owner_index(entities);
        for j in 0..entities.len() {
            if entities[j].dead || entities[j].team == self.owner_team {
                continue;
            }
            if entities[j].pos.distance(self.pos) > BOMB_AOE_RADIUS {
                continue;
            }
            let dealt = entities[j].take_damage(self.damage, None, ctx);
            if dealt > 0.0 {
                if let Some(oi) = owner_idx {
                    entities[oi].damage_dealt += dealt;
                }
                ctx.text(
                    entities[j].pos + Vec2::new(0.0, -5.0),
                    format!("{}", dealt.round() as i64),
                    "#ff8800",
                );
            }
        }
    }

    fn sweep_contacts(&mut self, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>) {
        let owner_idx = self.owner_index(entities);
        let ab = self.pos - self.prev;
        let ab_len_sq = ab.length_squared().max(1e-6);

        for j in 0..entities.len() {
            if entities[j].dead || entities[j].team == self.owner_team {
                continue;
            }
            let t = ((entities[j].pos - self.prev).dot(ab) / ab_len_sq).clamp(0.0, 1.0);
            let closest = self.prev + ab * t;
            if closest.distance(entities[j].pos) >= self.radius + entities[j].radius {
                continue;
            }

            let dealt = match owner_idx {
                Some(oi) if oi != j => {
                    let (target, owner) = pair_mut(entities, j, oi);
                    let dealt = target.take_damage(self.damage, Some(owner), ctx);
                    if dealt > 0.0 {
                        owner.damage_dealt += dealt;
                        if owner.class.is_auto_attacker() {
                            owner.gain_xp(5.0 + owner.level as f32);
                        }
                    }
                    dealt
                }
                _ => entities[j].take_damage(self.damage, None, ctx),
            };
            if dealt > 0.0 {
                ctx.text(
                    entities[j].pos + Vec2::new(0.0, -5.0),
                    format!("{}", dealt.round() as i64),
                    "#ffffff",
                );
            }
            self.dead = true;
            return;
        }
    }

    fn pull_enemies(&self, entities: &mut [Gladiator]) {
        for e in entities.iter_mut() {
            if e.dead || e.team == self.owner_team {
                continue;
            }
            if e.pos.distance(self.pos) < DECOY_PULL_RANGE {
                let pull = (self.pos - e.pos).normalize_or_zero();
                e.vel += pull * DECOY_PULL_IMPULSE;
            }
        }
    }

    fn owner_index(&self, entities: &[Gladiator]) -> Option<usize> {
        entities
            .iter()
            .position(|e| e.id == self.owner_id && !e.dead)
    }
}
