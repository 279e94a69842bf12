//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, driven by caller-supplied timestamps
//! - Seeded RNG only (one PCG stream per subsystem)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod motion;
pub mod obstacles;
pub mod particles;
pub mod score;
pub mod starfield;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{Circle, Disc, first_collision, is_colliding};
pub use motion::PlayerBody;
pub use obstacles::{Obstacle, ObstacleField, SpawnConfig};
pub use particles::{FIRE_PALETTE, Particle, ParticleSystem};
pub use score::{BASE_GRADE, GradeTier, ScoreRecord, distance, grade_for, share_text};
pub use starfield::{Star, Starfield};
pub use state::{GameEvent, GameState, RunState, Viewport};
pub use tick::{TickInput, tick};
