//! AR Hoops - game-session core for an augmented-reality basketball game
//!
//! Core modules:
//! - `sim`: Session controller (score, lives, ammo, spawn timing, placement)
//! - `config`: Data-driven game constants
//! - `highscores`: Persistent leaderboard of final scores
//!
//! Rendering, physics and AR tracking live in the host shell. The shell
//! feeds camera poses, taps and collisions into [`sim::SessionController`]
//! and renders the [`sim::SessionEvent`]s it dispatches back.

pub mod config;
pub mod highscores;
pub mod sim;

pub use config::GameConfig;
pub use highscores::HighScores;

/// Game constants used as [`GameConfig`] defaults
pub mod consts {
    /// Lives granted by a reset
    pub const STARTING_LIVES: u32 = 3;
    /// Basketballs granted by a reset or a reload gesture
    pub const AMMO_CAPACITY: u32 = 30;

    /// Seconds between target spawns
    pub const SPAWN_PERIOD_SECS: f32 = 1.0;
    /// Target lifetime range in seconds (end exclusive)
    pub const TARGET_LIFETIME_SECS: (f32, f32) = (0.0, 5.0);

    /// Lateral spawn offset range (meters, end exclusive)
    pub const SPAWN_LATERAL: (f32, f32) = (-1.0, 1.0);
    /// Vertical spawn offset range (meters, end exclusive)
    pub const SPAWN_VERTICAL: (f32, f32) = (0.0, 1.5);
    /// Spawn depth along world z before a hoop is placed
    pub const SPAWN_DEPTH: f32 = -2.0;

    /// Impulse magnitude applied to a launched basketball
    pub const LAUNCH_IMPULSE: f32 = 100.0;
    /// Reload when dot(camera forward, world down) is below this
    pub const REALIGN_THRESHOLD: f32 = -0.9;
    /// Seconds between shots while the fire button is held
    pub const FIRE_REPEAT_SECS: f32 = 0.25;
}

/// Install the platform logger (env_logger on native, console on web)
///
/// Safe to call more than once; later calls are ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Install the platform logger (env_logger on native, console on web)
///
/// Safe to call more than once; later calls are ignored.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Current wall-clock time in Unix milliseconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Current wall-clock time in Unix milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> f64 {
    js_sys::Date::now()
}
