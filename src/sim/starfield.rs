//! Scrolling background stars (visual only)

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Viewport;
use crate::consts::*;
use crate::lerp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    rng: Pcg32,
}

impl Starfield {
    /// Scatter `count` stars over the viewport
    pub fn new(count: usize, viewport: &Viewport, mut rng: Pcg32) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random::<f32>() * viewport.width,
                    rng.random::<f32>() * viewport.height,
                ),
                radius: lerp(STAR_MIN_RADIUS, STAR_MAX_RADIUS, rng.random()),
                speed: lerp(STAR_MIN_SPEED, STAR_MAX_SPEED, rng.random()),
            })
            .collect();
        Self { stars, rng }
    }

    /// Scroll left; stars leaving the left edge re-enter on the right
    pub fn advance(&mut self, viewport: &Viewport) {
        for star in &mut self.stars {
            star.pos.x -= star.speed;
            if star.pos.x < 0.0 {
                star.pos.x = viewport.width;
                star.pos.y = self.rng.random::<f32>() * viewport.height;
            }
        }
    }

    /// Re-seat stars that fall outside a resized viewport
    pub fn fit(&mut self, viewport: &Viewport) {
        for star in &mut self.stars {
            if star.pos.x > viewport.width || star.pos.y > viewport.height {
                star.pos = Vec2::new(
                    self.rng.random::<f32>() * viewport.width,
                    self.rng.random::<f32>() * viewport.height,
                );
            }
        }
    }

    pub fn as_slice(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
