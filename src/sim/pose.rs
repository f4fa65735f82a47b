//! Camera pose helpers
//!
//! The tracker reports the camera as a world transform. Its z column is the
//! axis the tracker calls "forward"; cameras look down the negative z axis,
//! so basketballs launch along `-z`.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// World-space downward direction
pub const WORLD_DOWN: Vec3 = Vec3::NEG_Y;

/// Camera pose reported by the AR tracker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub transform: Mat4,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CameraPose {
    pub const IDENTITY: Self = Self {
        transform: Mat4::IDENTITY,
    };

    pub fn new(transform: Mat4) -> Self {
        Self { transform }
    }

    /// Pose at `position` looking along `direction`
    pub fn looking(position: Vec3, direction: Vec3) -> Self {
        let target = position + direction;
        let up = if direction.normalize_or_zero().dot(Vec3::Y).abs() > 0.99 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        };
        // look_at_rh builds a view matrix; the pose is its inverse
        Self::new(Mat4::look_at_rh(position, target, up).inverse())
    }

    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    /// Tracker "forward" axis (the transform's z column)
    pub fn forward_axis(&self) -> Vec3 {
        self.transform.z_axis.truncate()
    }

    /// Direction a launched basketball travels
    pub fn launch_direction(&self) -> Vec3 {
        (-self.forward_axis()).normalize_or_zero()
    }

    /// Impulse for a launch of the given magnitude
    pub fn launch_impulse(&self, magnitude: f32) -> Vec3 {
        self.launch_direction() * magnitude
    }
}

/// Whether the camera points at the reload surface (steeply at the floor)
///
/// `forward` is the tracker's forward axis, not the view direction.
#[inline]
pub fn points_at_reload_surface(forward: Vec3, threshold: f32) -> bool {
    forward.dot(WORLD_DOWN) < threshold
}
