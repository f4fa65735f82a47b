//! Session state and core types
//!
//! Everything a presentation layer needs to render a session lives here.

use std::collections::BTreeSet;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Scene entity identifier (assigned by the scene collaborator)
pub type EntityId = u32;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created, never reset
    #[default]
    Idle,
    /// Accepting spawn ticks and fire input
    Running,
    /// Lives ran out; terminal until the next reset
    GameOver,
}

/// A flying box the player must hit before its lifetime runs out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: EntityId,
    pub position: Vec3,
    /// Lifetime granted at spawn (seconds)
    pub lifetime: f32,
    /// Seconds left before the target counts as a miss
    pub remaining: f32,
}

impl Target {
    pub fn new(id: EntityId, position: Vec3, lifetime: f32) -> Self {
        Self {
            id,
            position,
            lifetime,
            remaining: lifetime,
        }
    }

    /// Count down and report whether the target has run out
    ///
    /// Non-positive and NaN deltas leave the countdown untouched.
    pub fn countdown(&mut self, dt: f32) -> bool {
        if dt > 0.0 {
            self.remaining -= dt;
        }
        self.remaining <= 0.0
    }
}

/// A launched basketball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub origin: Vec3,
    pub impulse: Vec3,
}

/// Complete session state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Successful hits
    pub score: u64,
    /// Misses left before game over
    pub lives: u32,
    /// Basketballs left
    pub ammo: u32,
    /// Current phase
    pub phase: SessionPhase,
    /// Timers suspended (presentation surface hidden)
    pub paused: bool,
    /// Targets hit this session
    pub hits: u32,
    /// Targets expired this session
    pub misses: u32,
    /// Active targets (sorted by id)
    pub targets: Vec<Target>,
    /// Projectiles in flight (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Ids already settled this run (hit, expired or cleared)
    #[serde(default)]
    pub resolved: BTreeSet<EntityId>,
    /// Targets cleared by game over; still settled after the next reset
    #[serde(default)]
    pub cleared: Vec<EntityId>,
}

impl SessionState {
    /// Idle state: everything zeroed
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Running and not paused
    pub fn is_live(&self) -> bool {
        self.is_running() && !self.paused
    }

    /// Re-initialize counters for a fresh run
    pub fn reset(&mut self, lives: u32, ammo: u32) {
        self.score = 0;
        self.lives = lives;
        self.ammo = ammo;
        self.hits = 0;
        self.misses = 0;
        self.paused = false;

        // Late callbacks for leftover targets must not count in the new run
        let stale: Vec<EntityId> = self
            .targets
            .iter()
            .map(|t| t.id)
            .chain(self.cleared.drain(..))
            .collect();
        self.resolved.clear();
        self.resolved.extend(stale);

        self.targets.clear();
        self.projectiles.clear();
        self.phase = SessionPhase::Running;
    }

    /// Mark an id settled; false if it already was
    pub fn resolve(&mut self, id: EntityId) -> bool {
        self.resolved.insert(id)
    }

    pub fn target(&self, id: EntityId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn has_target(&self, id: EntityId) -> bool {
        self.target(id).is_some()
    }

    pub fn has_projectile(&self, id: EntityId) -> bool {
        self.projectiles.iter().any(|p| p.id == id)
    }

    /// Remove a target, returning it if it was active
    pub fn take_target(&mut self, id: EntityId) -> Option<Target> {
        let index = self.targets.iter().position(|t| t.id == id)?;
        Some(self.targets.remove(index))
    }

    /// Remove a projectile, returning it if it was in flight
    pub fn take_projectile(&mut self, id: EntityId) -> Option<Projectile> {
        let index = self.projectiles.iter().position(|p| p.id == id)?;
        Some(self.projectiles.remove(index))
    }

    /// Ensure entity lists are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.targets.sort_by_key(|t| t.id);
        self.projectiles.sort_by_key(|p| p.id);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            score: self.score,
            lives: self.lives,
            ammo: self.ammo,
            is_running: self.is_running(),
            paused: self.paused,
            phase: self.phase,
        }
    }
}

/// Counters handed to the presentation layer after each mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub score: u64,
    pub lives: u32,
    pub ammo: u32,
    pub is_running: bool,
    pub paused: bool,
    pub phase: SessionPhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = SessionState::new();
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!((state.score, state.lives, state.ammo), (0, 0, 0));
        assert!(!state.is_running());
    }

    #[test]
    fn test_reset_clears_entities() {
        let mut state = SessionState::new();
        state.targets.push(Target::new(4, Vec3::ZERO, 1.0));
        state.score = 9;
        state.reset(3, 30);
        assert!(state.targets.is_empty());
        assert_eq!(state.snapshot().score, 0);
        assert!(state.is_live());
    }

    #[test]
    fn test_target_countdown() {
        let mut target = Target::new(1, Vec3::ZERO, 0.5);
        assert!(!target.countdown(0.25));
        assert!(target.countdown(0.25));
    }

    #[test]
    fn test_nan_delta_does_not_poison_countdown() {
        let mut target = Target::new(1, Vec3::ZERO, 0.5);
        assert!(!target.countdown(f32::NAN));
        assert_eq!(target.remaining, 0.5);
        assert!(target.countdown(0.5));
    }

    #[test]
    fn test_reset_keeps_leftovers_settled() {
        let mut state = SessionState::new();
        state.targets.push(Target::new(4, Vec3::ZERO, 1.0));
        state.cleared.push(9);
        state.resolve(2);
        state.reset(3, 30);
        assert!(!state.resolve(4));
        assert!(!state.resolve(9));
        assert!(state.resolve(2));
        assert!(state.cleared.is_empty());
    }

    #[test]
    fn test_take_target_only_once() {
        let mut state = SessionState::new();
        state.targets.push(Target::new(2, Vec3::ZERO, 1.0));
        assert!(state.take_target(2).is_some());
        assert!(state.take_target(2).is_none());
    }
}
