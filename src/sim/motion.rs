//! Vertical motion of the player rocket
//!
//! The rocket's x is fixed; thrust toggles between an upward and a downward
//! acceleration. Screen y grows downward, so `accel_up` is negative.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Circle;
use crate::clamp_to_extent;
use crate::settings::Tuning;

/// The player's rocket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Center; x never changes during a run
    pub pos: Vec2,
    pub radius: f32,
    /// Vertical velocity (pixels/tick, positive = down)
    pub velocity_y: f32,
    pub accel_up: f32,
    pub accel_down: f32,
    pub max_speed: f32,
}

impl PlayerBody {
    /// Create a player vertically centered in a viewport of `height`
    pub fn new(tuning: &Tuning, height: f32) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, clamp_to_extent(height / 2.0, tuning.player_radius, height)),
            radius: tuning.player_radius,
            velocity_y: 0.0,
            accel_up: tuning.accel_up,
            accel_down: tuning.accel_down,
            max_speed: tuning.max_speed,
        }
    }

    /// Integrate one tick of vertical motion.
    ///
    /// Velocity is accumulated, clamped to `max_speed`, then damped. After
    /// moving, y is clamped into `[radius, height - radius]`; hitting a bound
    /// cancels the velocity pushing past it (no bounce).
    pub fn integrate(&mut self, thrust: bool, height: f32, damping: f32) {
        self.velocity_y += if thrust { self.accel_up } else { self.accel_down };
        self.velocity_y = self.velocity_y.clamp(-self.max_speed, self.max_speed);
        self.velocity_y *= damping;

        let unclamped = self.pos.y + self.velocity_y;
        let clamped = clamp_to_extent(unclamped, self.radius, height);
        if clamped != unclamped {
            let pushing_out = (unclamped > clamped && self.velocity_y > 0.0)
                || (unclamped < clamped && self.velocity_y < 0.0);
            if pushing_out {
                self.velocity_y = 0.0;
            }
        }
        self.pos.y = clamped;
    }
}

impl Circle for PlayerBody {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}
