//! Hoop placement on a detected vertical surface
//!
//! Before the hoop exists, surface detection runs and a tap is a placement
//! attempt. Once the hoop is anchored, detection stops and taps shoot.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Tracker-assigned surface identifier
pub type SurfaceId = u64;

/// Orientation of a detected surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceAlignment {
    Horizontal,
    Vertical,
}

/// A plane reported by the AR tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub id: SurfaceId,
    pub alignment: SurfaceAlignment,
    /// Center relative to the surface anchor
    pub center: Vec3,
    /// Width (x) and height (z) of the plane
    pub extent: Vec2,
}

/// Result of hit-testing a screen tap against tracked surfaces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceHit {
    pub surface_id: SurfaceId,
    pub world_transform: Mat4,
}

/// Hoop placement state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    detection_enabled: bool,
    surfaces: Vec<Surface>,
    hoop: Option<Mat4>,
}

impl Default for Placement {
    fn default() -> Self {
        Self::new()
    }
}

impl Placement {
    pub fn new() -> Self {
        Self {
            detection_enabled: true,
            surfaces: Vec::new(),
            hoop: None,
        }
    }

    /// Whether the tracker should keep looking for planes
    pub fn detection_enabled(&self) -> bool {
        self.detection_enabled
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn is_hoop_placed(&self) -> bool {
        self.hoop.is_some()
    }

    /// Hoop world transform, once placed
    pub fn hoop_transform(&self) -> Option<Mat4> {
        self.hoop
    }

    /// Hoop origin in world space, once placed
    pub fn hoop_origin(&self) -> Option<Vec3> {
        self.hoop.map(|t| t.w_axis.truncate())
    }

    /// Track a newly detected surface (vertical surfaces only)
    pub fn surface_added(&mut self, surface: Surface) -> bool {
        if !self.detection_enabled || surface.alignment != SurfaceAlignment::Vertical {
            return false;
        }
        if self.surfaces.iter().any(|s| s.id == surface.id) {
            return self.surface_updated(surface);
        }
        log::debug!("Tracking vertical surface {} ({:?})", surface.id, surface.extent);
        self.surfaces.push(surface);
        true
    }

    /// Recenter/resize a tracked surface
    pub fn surface_updated(&mut self, surface: Surface) -> bool {
        if surface.alignment != SurfaceAlignment::Vertical {
            return false;
        }
        match self.surfaces.iter_mut().find(|s| s.id == surface.id) {
            Some(tracked) => {
                tracked.center = surface.center;
                tracked.extent = surface.extent;
                true
            }
            None => false,
        }
    }

    pub fn surface_removed(&mut self, id: SurfaceId) {
        self.surfaces.retain(|s| s.id != id);
    }

    /// Anchor the hoop where a tap hit a tracked vertical surface
    ///
    /// Returns the hoop transform when placement succeeded.
    pub fn place_hoop(&mut self, hit: &SurfaceHit) -> Option<Mat4> {
        if self.hoop.is_some() {
            return None;
        }
        if !self.surfaces.iter().any(|s| s.id == hit.surface_id) {
            return None;
        }

        // Stand the hoop up against the wall
        let transform = hit.world_transform * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2);
        self.hoop = Some(transform);
        self.detection_enabled = false;
        self.surfaces.clear();
        log::info!("Hoop placed at {:?}", transform.w_axis.truncate());
        Some(transform)
    }
}
