//! Gladiator combat state machine.
//!
//! A deliberately small FSM: states gate movement and attacking, the
//! transition logic lives in [`Gladiator::update_state`] so there is no
//! per-state object graph to keep alive.
//!
//! [`Gladiator::update_state`]: crate::game::gladiator::Gladiator::update_state

/// Frames an attack animation state lasts (0.3 s at 60 fps).
pub const ATTACK_STATE_FRAMES: f32 = 0.3 * 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatState {
    /// No living enemy present; friction winds the gladiator down.
    Idle,
    /// Seeking or fleeing under the movement strategy.
    Moving,
    /// Just landed a hit; reverts to `Moving` after a short window.
    Attacking,
    /// Held in place, cannot move or attack until the stun timer elapses.
    Stunned,
    /// Terminal.
    Dead,
}
