//! Scene collaborator seam
//!
//! The 3D engine owns geometry, physics bodies and animation. The session
//! only asks it to spawn and remove things, and learns about collisions
//! through [`super::SessionController::on_collision`].

use glam::Vec3;

use super::pose::CameraPose;
use super::state::EntityId;

/// Operations the session needs from the 3D scene / physics engine
pub trait SceneCollaborator {
    /// Spawn a target at `position` that lives for `lifetime` seconds
    fn spawn_target(&mut self, position: Vec3, lifetime: f32) -> EntityId;

    /// Spawn a basketball at the camera and apply `impulse`
    fn spawn_projectile(&mut self, origin: &CameraPose, impulse: Vec3) -> EntityId;

    /// Remove an entity; unknown ids are ignored
    fn remove_entity(&mut self, id: EntityId);
}

/// A command received by [`RecordingScene`]
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    SpawnTarget {
        id: EntityId,
        position: Vec3,
        lifetime: f32,
    },
    SpawnProjectile {
        id: EntityId,
        origin: Vec3,
        impulse: Vec3,
    },
    Remove {
        id: EntityId,
    },
}

/// In-memory scene that assigns sequential ids and records every command
#[derive(Debug, Clone)]
pub struct RecordingScene {
    next_id: EntityId,
    live: Vec<EntityId>,
    pub commands: Vec<SceneCommand>,
}

impl Default for RecordingScene {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingScene {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            live: Vec::new(),
            commands: Vec::new(),
        }
    }

    fn allocate(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.live.push(id);
        id
    }

    /// Entities currently present in the scene
    pub fn live_entities(&self) -> &[EntityId] {
        &self.live
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.live.contains(&id)
    }

    /// Number of spawn commands of each kind: (targets, projectiles)
    pub fn spawn_counts(&self) -> (usize, usize) {
        self.commands.iter().fold((0, 0), |(t, p), c| match c {
            SceneCommand::SpawnTarget { .. } => (t + 1, p),
            SceneCommand::SpawnProjectile { .. } => (t, p + 1),
            SceneCommand::Remove { .. } => (t, p),
        })
    }
}

impl SceneCollaborator for RecordingScene {
    fn spawn_target(&mut self, position: Vec3, lifetime: f32) -> EntityId {
        let id = self.allocate();
        self.commands.push(SceneCommand::SpawnTarget {
            id,
            position,
            lifetime,
        });
        id
    }

    fn spawn_projectile(&mut self, origin: &CameraPose, impulse: Vec3) -> EntityId {
        let id = self.allocate();
        self.commands.push(SceneCommand::SpawnProjectile {
            id,
            origin: origin.position(),
            impulse,
        });
        id
    }

    fn remove_entity(&mut self, id: EntityId) {
        if let Some(index) = self.live.iter().position(|&e| e == id) {
            self.live.remove(index);
            self.commands.push(SceneCommand::Remove { id });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut scene = RecordingScene::new();
        let a = scene.spawn_target(Vec3::ZERO, 1.0);
        let b = scene.spawn_projectile(&CameraPose::IDENTITY, Vec3::NEG_Z);
        assert_eq!((a, b), (1, 2));
        assert_eq!(scene.spawn_counts(), (1, 1));
    }

    #[test]
    fn test_remove_unknown_is_ignored() {
        let mut scene = RecordingScene::new();
        let a = scene.spawn_target(Vec3::ZERO, 1.0);
        scene.remove_entity(a);
        scene.remove_entity(a);
        scene.remove_entity(99);
        assert!(scene.live_entities().is_empty());
        assert_eq!(scene.commands.len(), 2);
    }
}
