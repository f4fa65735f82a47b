//! Game session controller
//!
//! Owns the session counters and reacts to external events: spawn ticks,
//! target expiry, basketball/target collisions, fire input, the reload
//! gesture, pause/resume and reset. Invalid actions are silent no-ops.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::notify::{Notifier, RemovalReason, SessionEvent};
use super::placement::{Placement, Surface, SurfaceHit, SurfaceId};
use super::pose::{CameraPose, points_at_reload_surface};
use super::scene::SceneCollaborator;
use super::state::{EntityId, Projectile, SessionPhase, SessionSnapshot, SessionState, Target};
use super::timer::RepeatingTimer;
use crate::config::GameConfig;

/// Intents and tracker updates collected by the host for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Start a new run
    pub reset: bool,
    /// Pause toggle
    pub pause: bool,
    /// Latest camera pose from the tracker
    pub camera: Option<CameraPose>,
    /// Screen tap (with its surface hit-test result, if any)
    pub tap: Option<Option<SurfaceHit>>,
    /// Single shot (fire button press)
    pub fire: bool,
    /// Fire button hold started (`Some(true)`) or released (`Some(false)`)
    pub fire_hold: Option<bool>,
    /// Surfaces newly detected by the tracker
    pub surfaces_added: Vec<Surface>,
    /// Surfaces recentered/resized by the tracker
    pub surfaces_updated: Vec<Surface>,
    /// Surfaces the tracker stopped reporting
    pub surfaces_removed: Vec<SurfaceId>,
    /// Contact pairs reported by the physics engine
    pub collisions: Vec<(EntityId, EntityId)>,
    /// Basketballs the scene dropped (fell out of the world, etc.)
    pub projectiles_lost: Vec<EntityId>,
}

/// The game session controller
///
/// Generic over the scene collaborator and the random source so tests can
/// inject a recording scene and a seeded RNG.
#[derive(Debug)]
pub struct SessionController<S: SceneCollaborator, R: Rng = Pcg32> {
    config: GameConfig,
    state: SessionState,
    scene: S,
    rng: R,
    placement: Placement,
    notifier: Notifier,
    spawn_ticker: RepeatingTimer,
    fire_repeat: RepeatingTimer,
    fire_held: bool,
    last_pose: CameraPose,
}

impl<S: SceneCollaborator> SessionController<S, Pcg32> {
    /// Create an idle controller seeded from the config (or randomly)
    pub fn new(scene: S, config: GameConfig) -> Self {
        let seed = config.rng_seed.unwrap_or_else(rand::random);
        log::info!("Session RNG seed: {}", seed);
        Self::with_rng(scene, config, Pcg32::seed_from_u64(seed))
    }
}

impl<S: SceneCollaborator, R: Rng> SessionController<S, R> {
    /// Create an idle controller with an explicit random source
    pub fn with_rng(scene: S, config: GameConfig, rng: R) -> Self {
        let config = config.validated();
        Self {
            spawn_ticker: RepeatingTimer::new(config.spawn_period_secs),
            fire_repeat: RepeatingTimer::new(config.fire_repeat_secs),
            config,
            state: SessionState::new(),
            scene,
            rng,
            placement: Placement::new(),
            notifier: Notifier::new(),
            fire_held: false,
            last_pose: CameraPose::IDENTITY,
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn is_spawning(&self) -> bool {
        self.spawn_ticker.is_running()
    }

    pub fn is_fire_held(&self) -> bool {
        self.fire_held
    }

    /// Latest camera pose seen by [`Self::update`]
    pub fn last_pose(&self) -> CameraPose {
        self.last_pose
    }

    // === Notifications ===

    /// Register a presentation-layer subscriber
    pub fn subscribe(&mut self, subscriber: impl FnMut(&SessionEvent) + 'static) {
        self.notifier.subscribe(subscriber);
    }

    /// Deliver queued events; call once per host main-loop turn
    pub fn dispatch_notifications(&mut self) -> usize {
        self.notifier.dispatch()
    }

    /// Take queued events without invoking subscribers
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.notifier.drain()
    }

    fn notify_state(&mut self) {
        let snapshot = self.state.snapshot();
        self.notifier.emit(SessionEvent::StateChanged { snapshot });
    }

    fn remove_from_scene(&mut self, id: EntityId, reason: RemovalReason) {
        self.scene.remove_entity(id);
        self.notifier.emit(SessionEvent::EntityRemoved { id, reason });
    }

    // === Session lifecycle ===

    /// Start a fresh run from any phase
    pub fn reset(&mut self) {
        let leftovers: Vec<EntityId> = self
            .state
            .targets
            .iter()
            .map(|t| t.id)
            .chain(self.state.projectiles.iter().map(|p| p.id))
            .collect();
        for id in leftovers {
            self.remove_from_scene(id, RemovalReason::Cleared);
        }

        self.state
            .reset(self.config.starting_lives, self.config.ammo_capacity);
        self.spawn_ticker.start();
        self.fire_repeat.stop();
        self.fire_held = false;

        log::info!(
            "Session reset: lives={}, ammo={}",
            self.state.lives,
            self.state.ammo
        );
        self.notify_state();
    }

    /// Suspend spawn and fire timers without touching counters
    pub fn pause(&mut self) {
        if !self.state.is_running() || self.state.paused {
            return;
        }
        self.state.paused = true;
        self.spawn_ticker.stop();
        self.fire_repeat.stop();
        log::info!("Session paused");
        self.notify_state();
    }

    /// Restart timers after [`Self::pause`]
    pub fn resume(&mut self) {
        if !self.state.paused {
            return;
        }
        self.state.paused = false;
        if self.state.is_running() {
            self.spawn_ticker.start();
            if self.fire_held {
                self.fire_repeat.start();
            }
        }
        log::info!("Session resumed");
        self.notify_state();
    }

    fn game_over(&mut self) {
        self.state.phase = SessionPhase::GameOver;
        self.state.paused = false;
        self.spawn_ticker.stop();
        self.fire_repeat.stop();
        self.fire_held = false;

        let targets: Vec<EntityId> = self.state.targets.drain(..).map(|t| t.id).collect();
        for id in targets {
            self.state.cleared.push(id);
            self.remove_from_scene(id, RemovalReason::Cleared);
        }

        log::info!(
            "Game over: score={} (hits={}, misses={})",
            self.state.score,
            self.state.hits,
            self.state.misses
        );
        self.notify_state();
        self.notifier.emit(SessionEvent::GameOver {
            final_score: self.state.score,
        });
    }

    // === Targets ===

    fn spawn_origin(&self) -> Vec3 {
        self.placement
            .hoop_origin()
            .unwrap_or(Vec3::new(0.0, 0.0, self.config.spawn_depth))
    }

    /// Spawn one target with a random lifetime and position
    ///
    /// Returns `None` (and does nothing) unless the session is running.
    pub fn tick(&mut self) -> Option<EntityId> {
        if !self.state.is_running() {
            return None;
        }

        let lifetime_span = self.config.target_lifetime_secs;
        let lateral = self.config.spawn_lateral;
        let vertical = self.config.spawn_vertical;
        let lifetime = self.rng.random_range(lifetime_span.min..lifetime_span.max);
        let offset = Vec3::new(
            self.rng.random_range(lateral.min..lateral.max),
            self.rng.random_range(vertical.min..vertical.max),
            0.0,
        );
        let position = self.spawn_origin() + offset;

        let id = self.scene.spawn_target(position, lifetime);
        self.state.targets.push(Target::new(id, position, lifetime));
        self.state.normalize_order();

        log::debug!("Spawned target {} at {:?} for {:.2}s", id, position, lifetime);
        self.notifier.emit(SessionEvent::TargetSpawned {
            id,
            position,
            lifetime,
        });
        Some(id)
    }

    /// Drop a resolved entity from the scene unless it is a live basketball
    fn remove_resolved(&mut self, id: EntityId, reason: RemovalReason) {
        if self.state.take_target(id).is_some() || !self.state.has_projectile(id) {
            self.remove_from_scene(id, reason);
        }
    }

    /// A target's lifetime ran out without a hit
    ///
    /// Costs one life; the last life ends the session. A target already
    /// resolved this run (hit or expired) is ignored, so a hit and an
    /// expiry of the same target in one frame count only once.
    pub fn on_target_expired(&mut self, target: EntityId) -> bool {
        if !self.state.is_running() || !self.state.resolve(target) {
            return false;
        }

        self.state.lives = self.state.lives.saturating_sub(1);
        self.state.misses += 1;
        log::debug!("Target {} expired, lives={}", target, self.state.lives);
        self.remove_resolved(target, RemovalReason::Expired);

        if self.state.lives == 0 {
            self.game_over();
        } else {
            self.notify_state();
        }
        true
    }

    /// A basketball hit a target: score and remove both
    ///
    /// The second entity is only removed when it is a basketball or unknown;
    /// an active target passed as `projectile` stays in play.
    pub fn on_target_hit(&mut self, target: EntityId, projectile: EntityId) -> bool {
        if !self.state.is_running() || !self.state.resolve(target) {
            return false;
        }

        self.state.score += 1;
        self.state.hits += 1;
        log::debug!("Target {} hit by {}, score={}", target, projectile, self.state.score);
        self.remove_resolved(target, RemovalReason::Hit);

        let is_ball = self.state.take_projectile(projectile).is_some();
        if projectile != target && (is_ball || !self.state.has_target(projectile)) {
            self.remove_from_scene(projectile, RemovalReason::Hit);
        }
        self.notify_state();
        true
    }

    /// Physics contact callback; only target/basketball pairs count
    pub fn on_collision(&mut self, a: EntityId, b: EntityId) -> bool {
        if self.state.has_target(a) && self.state.has_projectile(b) {
            self.on_target_hit(a, b)
        } else if self.state.has_target(b) && self.state.has_projectile(a) {
            self.on_target_hit(b, a)
        } else {
            false
        }
    }

    /// Forget a basketball the scene no longer simulates
    pub fn on_projectile_lost(&mut self, projectile: EntityId) {
        if self.state.take_projectile(projectile).is_some() {
            self.remove_from_scene(projectile, RemovalReason::Cleared);
        }
    }

    // === Shooting ===

    /// Launch a basketball from the camera
    ///
    /// No-op unless the session is running with ammo left.
    pub fn on_fire(&mut self, pose: &CameraPose) -> Option<EntityId> {
        if !self.state.is_running() || self.state.ammo == 0 {
            return None;
        }

        self.state.ammo -= 1;
        let impulse = pose.launch_impulse(self.config.launch_impulse);
        let origin = pose.position();
        let id = self.scene.spawn_projectile(pose, impulse);
        self.state.projectiles.push(Projectile {
            id,
            origin,
            impulse,
        });
        self.state.normalize_order();

        log::debug!("Fired {} (ammo={})", id, self.state.ammo);
        self.notifier.emit(SessionEvent::ProjectileLaunched {
            id,
            origin,
            impulse,
        });
        self.notify_state();
        Some(id)
    }

    /// Start auto-fire; the first repeat lands one period after the press
    pub fn begin_fire_hold(&mut self) {
        if !self.state.is_running() || self.fire_held {
            return;
        }
        self.fire_held = true;
        if !self.state.paused {
            self.fire_repeat.start();
        }
    }

    /// Stop auto-fire; releasing an idle button is a no-op
    pub fn end_fire_hold(&mut self) {
        self.fire_held = false;
        self.fire_repeat.stop();
    }

    /// Tracker pose update; refills ammo when the camera points at the floor
    pub fn on_realign(&mut self, camera_forward: Vec3) -> bool {
        if !points_at_reload_surface(camera_forward, self.config.realign_threshold) {
            return false;
        }
        if self.state.ammo == self.config.ammo_capacity {
            return false;
        }

        self.state.ammo = self.config.ammo_capacity;
        log::debug!("Ammo refilled to {}", self.state.ammo);
        self.notifier.emit(SessionEvent::AmmoRefilled {
            ammo: self.state.ammo,
        });
        self.notify_state();
        true
    }

    // === Placement ===

    pub fn on_surface_added(&mut self, surface: Surface) -> bool {
        self.placement.surface_added(surface)
    }

    pub fn on_surface_updated(&mut self, surface: Surface) -> bool {
        self.placement.surface_updated(surface)
    }

    pub fn on_surface_removed(&mut self, id: SurfaceId) {
        self.placement.surface_removed(id);
    }

    /// Anchor the hoop; returns whether placement happened
    pub fn place_hoop(&mut self, hit: &SurfaceHit) -> bool {
        match self.placement.place_hoop(hit) {
            Some(transform) => {
                self.notifier.emit(SessionEvent::HoopPlaced {
                    origin: transform.w_axis.truncate(),
                });
                true
            }
            None => false,
        }
    }

    /// Screen tap: place the hoop first, shoot afterwards
    pub fn on_tap(&mut self, hit: Option<&SurfaceHit>, pose: &CameraPose) {
        if self.placement.is_hoop_placed() {
            self.on_fire(pose);
        } else if let Some(hit) = hit {
            self.place_hoop(hit);
        }
    }

    // === Frame update ===

    /// Apply one host frame: intents first, then timers
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        if input.reset {
            self.reset();
        }

        if input.pause {
            if self.state.paused {
                self.resume();
            } else {
                self.pause();
            }
        }

        if let Some(pose) = input.camera {
            self.last_pose = pose;
            self.on_realign(pose.forward_axis());
        }

        for surface in &input.surfaces_added {
            self.on_surface_added(surface.clone());
        }
        for surface in &input.surfaces_updated {
            self.on_surface_updated(surface.clone());
        }
        for &id in &input.surfaces_removed {
            self.on_surface_removed(id);
        }

        let pose = self.last_pose;
        if let Some(hit) = &input.tap {
            self.on_tap(hit.as_ref(), &pose);
        }
        if input.fire {
            self.on_fire(&pose);
        }
        match input.fire_hold {
            Some(true) => self.begin_fire_hold(),
            Some(false) => self.end_fire_hold(),
            None => {}
        }

        for &(a, b) in &input.collisions {
            self.on_collision(a, b);
        }
        for &id in &input.projectiles_lost {
            self.on_projectile_lost(id);
        }

        self.advance_timers(dt);
    }

    /// Advance target lifetimes, the spawn ticker and auto-fire
    fn advance_timers(&mut self, dt: f32) {
        if !self.state.is_live() {
            return;
        }

        let expired: Vec<EntityId> = self
            .state
            .targets
            .iter_mut()
            .filter_map(|t| t.countdown(dt).then_some(t.id))
            .collect();
        for id in expired {
            self.on_target_expired(id);
        }

        for _ in 0..self.spawn_ticker.advance(dt) {
            self.tick();
        }

        let pose = self.last_pose;
        for _ in 0..self.fire_repeat.advance(dt) {
            self.on_fire(&pose);
        }
    }
}
