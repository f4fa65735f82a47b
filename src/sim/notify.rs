//! Session events and deferred notification delivery
//!
//! Mutations enqueue events; subscribers only see them when the host calls
//! [`Notifier::dispatch`] on its next main-loop turn. A subscriber therefore
//! never runs inside a state transition.

use std::collections::VecDeque;
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{EntityId, SessionSnapshot};

/// Why an entity left the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Target was hit by a basketball (or the basketball that hit it)
    Hit,
    /// Target lifetime ran out
    Expired,
    /// Cleared by game over or reset
    Cleared,
}

/// Events emitted by the session controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// Counters or phase changed
    StateChanged { snapshot: SessionSnapshot },
    /// A target was spawned
    TargetSpawned {
        id: EntityId,
        position: Vec3,
        lifetime: f32,
    },
    /// A basketball was launched
    ProjectileLaunched {
        id: EntityId,
        origin: Vec3,
        impulse: Vec3,
    },
    /// An entity was removed from the scene
    EntityRemoved { id: EntityId, reason: RemovalReason },
    /// Ammo refilled by the reload gesture
    AmmoRefilled { ammo: u32 },
    /// Hoop anchored on a vertical surface
    HoopPlaced { origin: Vec3 },
    /// Lives ran out
    GameOver { final_score: u64 },
}

type Subscriber = Box<dyn FnMut(&SessionEvent)>;

/// Queue of pending events plus the subscribers that receive them
#[derive(Default)]
pub struct Notifier {
    pending: VecDeque<SessionEvent>,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("pending", &self.pending.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for future dispatches
    pub fn subscribe(&mut self, subscriber: impl FnMut(&SessionEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Queue an event for the next dispatch
    pub fn emit(&mut self, event: SessionEvent) {
        self.pending.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Deliver queued events to every subscriber, in order
    ///
    /// Returns the number of events delivered.
    pub fn dispatch(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.pending.pop_front() {
            for subscriber in &mut self.subscribers {
                subscriber(&event);
            }
            delivered += 1;
        }
        delivered
    }

    /// Take queued events without notifying subscribers (for polling hosts)
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        self.pending.drain(..).collect()
    }
}
