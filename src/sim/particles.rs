//! Explosion particles
//!
//! Purely visual: particles never collide and never touch the score.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Circle;
use crate::consts::*;
use crate::lerp;

/// Fire colors (0xRRGGBB) a burst picks from
pub const FIRE_PALETTE: [u32; 4] = [0xFFA500, 0xFF8C00, 0xFF4500, 0xFFD700];

/// Alpha at or below this counts as fully faded (absorbs f32 step error)
const ALPHA_EPSILON: f32 = 1e-4;

/// A single fading particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// 0xRRGGBB
    pub color: u32,
    /// 1 on spawn, strictly decreasing every tick
    pub alpha: f32,
}

impl Circle for Particle {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    alpha_decrement: f32,
    rng: Pcg32,
}

impl ParticleSystem {
    pub fn new(alpha_decrement: f32, rng: Pcg32) -> Self {
        Self {
            particles: Vec::new(),
            alpha_decrement,
            rng,
        }
    }

    /// Spawn `count` particles at `origin` with random size, color and velocity
    pub fn spawn_burst(&mut self, origin: Vec2, count: usize) {
        self.particles.reserve(count);
        for _ in 0..count {
            let radius = lerp(PARTICLE_MIN_RADIUS, PARTICLE_MAX_RADIUS, self.rng.random());
            let vel = Vec2::new(
                lerp(-PARTICLE_MAX_SPEED, PARTICLE_MAX_SPEED, self.rng.random()),
                lerp(-PARTICLE_MAX_SPEED, PARTICLE_MAX_SPEED, self.rng.random()),
            );
            let color = FIRE_PALETTE[self.rng.random_range(0..FIRE_PALETTE.len())];
            self.particles.push(Particle {
                pos: origin,
                vel,
                radius,
                color,
                alpha: 1.0,
            });
        }
    }

    /// Move and fade every particle, dropping the ones that faded out
    pub fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.alpha -= self.alpha_decrement;
            if particle.alpha <= ALPHA_EPSILON {
                particle.alpha = 0.0;
            }
        }
        self.particles.retain(|p| p.alpha > 0.0);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
