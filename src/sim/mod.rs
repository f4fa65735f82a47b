//! Game session simulation
//!
//! All gameplay logic lives here. This module stays platform-free:
//! - Host-driven timers only (no sleeping, no threads)
//! - Injectable RNG
//! - Stable iteration order (by entity ID)
//! - Rendering, physics and tracking reached through plain data and traits

pub mod controller;
pub mod notify;
pub mod placement;
pub mod pose;
pub mod scene;
pub mod state;
pub mod timer;

pub use controller::{FrameInput, SessionController};
pub use notify::{Notifier, RemovalReason, SessionEvent};
pub use placement::{Placement, Surface, SurfaceAlignment, SurfaceHit, SurfaceId};
pub use pose::{CameraPose, WORLD_DOWN, points_at_reload_surface};
pub use scene::{RecordingScene, SceneCollaborator, SceneCommand};
pub use state::{EntityId, Projectile, SessionPhase, SessionSnapshot, SessionState, Target};
pub use timer::RepeatingTimer;
