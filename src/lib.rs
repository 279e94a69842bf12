//! AstroLab - an endless dodge-the-meteorites arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, obstacles, collisions, particles, score)
//! - `session`: Run state machine facade used by the frame driver and UI
//! - `settings`: Data-driven tuning per form factor
//! - `persistence`: Best-score storage backends
//! - `platform`: Browser bindings (wasm32 only)

pub mod error;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use persistence::{MemoryStore, ScoreStore};
pub use session::{Session, Snapshot};
pub use settings::{FormFactor, Tuning};

/// Game configuration constants
pub mod consts {
    /// Nominal display refresh rate the per-tick constants are tuned for
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Duration of one nominal tick in milliseconds
    pub const TICK_MS: f64 = 1000.0 / TICKS_PER_SECOND as f64;

    /// Player vertical acceleration while thrust is held (negative = up-screen)
    pub const PLAYER_ACCEL_UP: f32 = -0.8;
    /// Player vertical acceleration without thrust
    pub const PLAYER_ACCEL_DOWN: f32 = 0.9;
    /// Player vertical speed limit (pixels/tick)
    pub const PLAYER_MAX_SPEED: f32 = 6.0;
    /// Drag multiplier applied to player velocity after clamping
    pub const PLAYER_DAMPING: f32 = 0.87;

    /// Base run speed; obstacle and distance speeds derive from it
    pub const BASE_SPEED: f32 = 20.0;
    /// Obstacle horizontal speed = BASE_SPEED * this
    pub const OBSTACLE_SPEED_FACTOR: f32 = 0.7;
    /// Distance meters per second = BASE_SPEED * this
    pub const DISTANCE_SPEED_FACTOR: f32 = 2.5;
    /// Obstacle vertical drift speed range (pixels/tick)
    pub const OBSTACLE_MIN_DRIFT: f32 = 1.0;
    pub const OBSTACLE_MAX_DRIFT: f32 = 3.0;
    /// Number of meteorite sprite variants
    pub const OBSTACLE_VARIANTS: u8 = 6;
    /// Ticks between obstacle spawns (~1/3 s at 60 Hz)
    pub const SPAWN_INTERVAL_TICKS: u32 = 20;

    /// Particles per collision burst
    pub const BURST_SIZE: usize = 30;
    /// Alpha lost by each particle per tick
    pub const PARTICLE_ALPHA_DECREMENT: f32 = 0.02;
    /// Particle radius range
    pub const PARTICLE_MIN_RADIUS: f32 = 2.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 5.0;
    /// Half-width of each particle velocity component range
    pub const PARTICLE_MAX_SPEED: f32 = 2.5;

    /// Background stars
    pub const STAR_COUNT: usize = 150;
    pub const STAR_MIN_RADIUS: f32 = 0.2;
    pub const STAR_MAX_RADIUS: f32 = 1.7;
    pub const STAR_MIN_SPEED: f32 = 0.2;
    pub const STAR_MAX_SPEED: f32 = 0.8;

    /// Engine flame pulse phase advance per running tick
    pub const FLAME_PULSE_STEP: f32 = 0.1;

    /// Viewports narrower than this are treated as compact (touch) devices
    pub const COMPACT_WIDTH_THRESHOLD: f32 = 768.0;
}

/// Linear interpolation between `lo` and `hi` by `t` in [0, 1)
#[inline]
pub fn lerp(lo: f32, hi: f32, t: f32) -> f32 {
    lo + (hi - lo) * t
}

/// Clamp a center coordinate so a body of `radius` stays inside `[0, extent]`.
///
/// If the extent is too small to hold the body, the body is centered.
#[inline]
pub fn clamp_to_extent(value: f32, radius: f32, extent: f32) -> f32 {
    let lo = radius;
    let hi = extent - radius;
    if hi < lo {
        extent / 2.0
    } else {
        value.clamp(lo, hi)
    }
}
