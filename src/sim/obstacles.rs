//! Meteorite field: spawning, drifting, bouncing and retirement

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Circle;
use super::state::Viewport;
use crate::consts::OBSTACLE_VARIANTS;
use crate::lerp;
use crate::settings::Tuning;

/// A meteorite scrolling right to left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub radius: f32,
    /// Leftward speed (pixels/tick)
    pub horizontal_speed: f32,
    /// -1 = drifting up-screen, +1 = drifting down-screen
    pub vertical_direction: i8,
    pub vertical_speed: f32,
    /// Sprite index, meaningless to the simulation
    pub variant: u8,
}

impl Obstacle {
    /// Move one tick, reflecting off the top and bottom edges
    pub fn advance(&mut self, height: f32) {
        self.pos.x -= self.horizontal_speed;
        self.pos.y += f32::from(self.vertical_direction) * self.vertical_speed;

        let lo = self.radius;
        let hi = height - self.radius;
        if hi < lo {
            self.pos.y = height / 2.0;
            return;
        }
        if self.pos.y < lo {
            self.pos.y = 2.0 * lo - self.pos.y;
            self.vertical_direction = 1;
        } else if self.pos.y > hi {
            self.pos.y = 2.0 * hi - self.pos.y;
            self.vertical_direction = -1;
        }
        // Drift larger than the free band can overshoot the mirror
        self.pos.y = self.pos.y.clamp(lo, hi);
    }

    /// Fully past the left edge
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.radius < 0.0
    }
}

impl Circle for Obstacle {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Spawn parameters, derived from [`Tuning`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub radius_base: f32,
    pub radius_extra: f32,
    pub min_drift: f32,
    pub max_drift: f32,
    pub horizontal_speed: f32,
    pub interval_ticks: u32,
    pub max_concurrent: usize,
}

impl From<&Tuning> for SpawnConfig {
    fn from(tuning: &Tuning) -> Self {
        Self {
            radius_base: tuning.obstacle_radius_base,
            radius_extra: tuning.obstacle_radius_extra,
            min_drift: tuning.obstacle_min_drift,
            max_drift: tuning.obstacle_max_drift,
            horizontal_speed: tuning.obstacle_speed(),
            interval_ticks: tuning.spawn_interval_ticks.max(1),
            max_concurrent: tuning.max_obstacles,
        }
    }
}

/// Owns every active obstacle
#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    config: SpawnConfig,
    rng: Pcg32,
}

impl ObstacleField {
    pub fn new(config: SpawnConfig, rng: Pcg32) -> Self {
        Self {
            obstacles: Vec::with_capacity(config.max_concurrent),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Whether the cadence calls for a spawn on this run tick
    #[inline]
    pub fn is_spawn_tick(&self, run_tick: u64) -> bool {
        run_tick % u64::from(self.config.interval_ticks) == 0
    }

    /// Whether another obstacle fits under the cap
    #[inline]
    pub fn has_room(&self) -> bool {
        self.obstacles.len() < self.config.max_concurrent
    }

    /// Spawn one obstacle just past the right edge, unless the field is full
    pub fn spawn(&mut self, viewport: &Viewport) -> Option<&Obstacle> {
        if !self.has_room() {
            return None;
        }
        let obstacle = self.roll_obstacle(viewport);
        log::debug!(
            "Spawned obstacle r={:.1} at y={:.1} ({} active)",
            obstacle.radius,
            obstacle.pos.y,
            self.obstacles.len() + 1
        );
        self.obstacles.push(obstacle);
        self.obstacles.last()
    }

    /// Add a specific obstacle, respecting the cap. Returns false if full.
    pub fn insert(&mut self, obstacle: Obstacle) -> bool {
        if !self.has_room() {
            return false;
        }
        self.obstacles.push(obstacle);
        true
    }

    fn roll_obstacle(&mut self, viewport: &Viewport) -> Obstacle {
        let cfg = self.config;
        let radius = lerp(cfg.radius_base, cfg.radius_base + cfg.radius_extra, self.rng.random())
            .min(viewport.height / 2.0);
        let y = lerp(radius, viewport.height - radius, self.rng.random());
        let vertical_direction = if self.rng.random_bool(0.5) { 1 } else { -1 };
        let vertical_speed = lerp(cfg.min_drift, cfg.max_drift, self.rng.random());
        let variant = self.rng.random_range(0..OBSTACLE_VARIANTS);

        Obstacle {
            pos: Vec2::new(viewport.width + radius, y),
            radius,
            horizontal_speed: cfg.horizontal_speed,
            vertical_direction,
            vertical_speed,
            variant,
        }
    }

    /// Advance every obstacle one tick, then drop the ones that left the screen
    pub fn advance(&mut self, viewport: &Viewport) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(viewport.height);
        }
        self.obstacles.retain(|o| !o.is_offscreen());
    }

    /// Bring frozen obstacles back inside a new viewport height.
    ///
    /// Obstacles too large for the new band are dropped.
    pub fn fit(&mut self, viewport: &Viewport) {
        let height = viewport.height;
        self.obstacles.retain(|o| 2.0 * o.radius <= height);
        for obstacle in &mut self.obstacles {
            obstacle.pos.y = obstacle.pos.y.clamp(obstacle.radius, height - obstacle.radius);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }
}

impl<'a> IntoIterator for &'a ObstacleField {
    type Item = &'a Obstacle;
    type IntoIter = std::slice::Iter<'a, Obstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.obstacles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FormFactor;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn viewport() -> Viewport {
        Viewport {
            width: 800.0,
            height: 600.0,
        }
    }

    fn field(seed: u64) -> ObstacleField {
        let tuning = Tuning::for_form_factor(FormFactor::Large);
        ObstacleField::new(SpawnConfig::from(&tuning), Pcg32::seed_from_u64(seed))
    }

    #[test]
    fn test_spawn_just_off_right_edge() {
        let mut field = field(7);
        let vp = viewport();
        let obstacle = field.spawn(&vp).expect("room to spawn").clone();

        assert_eq!(obstacle.pos.x, vp.width + obstacle.radius);
        assert!(obstacle.radius >= 25.0 && obstacle.radius < 40.0);
        assert!(obstacle.pos.y >= obstacle.radius);
        assert!(obstacle.pos.y <= vp.height - obstacle.radius);
        assert!(obstacle.vertical_direction == 1 || obstacle.vertical_direction == -1);
        assert!((obstacle.horizontal_speed - 14.0).abs() < 1e-5);
        assert!(obstacle.variant < OBSTACLE_VARIANTS);
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut field = field(1);
        let cap = field.config().max_concurrent;
        for _ in 0..cap {
            assert!(field.spawn(&viewport()).is_some());
        }
        assert!(field.spawn(&viewport()).is_none());
        assert_eq!(field.len(), cap);
    }

    #[test]
    fn test_spawn_cadence() {
        let field = field(1);
        assert!(field.is_spawn_tick(0));
        assert!(!field.is_spawn_tick(1));
        assert!(!field.is_spawn_tick(19));
        assert!(field.is_spawn_tick(20));
        assert!(field.is_spawn_tick(40));
    }

    #[test]
    fn test_obstacle_retired_right_after_leaving_screen() {
        let vp = viewport();
        let mut field = field(3);
        let radius = 25.0;
        field.insert(Obstacle {
            pos: Vec2::new(vp.width + radius, 300.0),
            radius,
            horizontal_speed: 14.0,
            vertical_direction: 1,
            vertical_speed: 0.0,
            variant: 0,
        });

        let mut ticks = 0;
        loop {
            let x = field.as_slice()[0].pos.x;
            let crosses = x - 14.0 + radius < 0.0;
            field.advance(&vp);
            ticks += 1;
            if crosses {
                assert!(field.is_empty(), "obstacle should retire on tick {ticks}");
                break;
            }
            assert_eq!(field.len(), 1, "obstacle retired early on tick {ticks}");
        }
        // (800 + 25 + 25) / 14 rounds up to 61 ticks
        assert_eq!(ticks, 61);
    }

    #[test]
    fn test_retirement_keeps_survivors_intact() {
        let vp = viewport();
        let mut field = field(3);
        for (i, x) in [-60.0, 400.0, -70.0, 500.0].into_iter().enumerate() {
            field.insert(Obstacle {
                pos: Vec2::new(x, 300.0),
                radius: 20.0,
                horizontal_speed: 14.0,
                vertical_direction: 1,
                vertical_speed: 0.0,
                variant: i as u8,
            });
        }
        field.advance(&vp);
        let variants: Vec<u8> = field.iter().map(|o| o.variant).collect();
        assert_eq!(variants, vec![1, 3]);
        assert_eq!(field.as_slice()[0].pos.x, 386.0);
        assert_eq!(field.as_slice()[1].pos.x, 486.0);
    }

    #[test]
    fn test_fit_clamps_and_drops_oversized() {
        let mut field = field(5);
        for (i, (y, radius)) in [(550.0, 30.0), (300.0, 120.0), (20.0, 20.0)].into_iter().enumerate() {
            field.insert(Obstacle {
                pos: Vec2::new(400.0, y),
                radius,
                horizontal_speed: 14.0,
                vertical_direction: 1,
                vertical_speed: 2.0,
                variant: i as u8,
            });
        }
        field.fit(&Viewport {
            width: 800.0,
            height: 200.0,
        });

        let variants: Vec<u8> = field.iter().map(|o| o.variant).collect();
        assert_eq!(variants, vec![0, 2]);
        assert_eq!(field.as_slice()[0].pos.y, 170.0);
        assert_eq!(field.as_slice()[1].pos.y, 20.0);
    }

    #[test]
    fn test_obstacle_reflects_off_edges() {
        let mut obstacle = Obstacle {
            pos: Vec2::new(400.0, 22.0),
            radius: 20.0,
            horizontal_speed: 14.0,
            vertical_direction: -1,
            vertical_speed: 3.0,
            variant: 0,
        };
        obstacle.advance(600.0);
        assert_eq!(obstacle.vertical_direction, 1);
        assert_eq!(obstacle.pos.y, 21.0);

        obstacle.pos.y = 579.0;
        obstacle.advance(600.0);
        assert_eq!(obstacle.vertical_direction, -1);
        assert_eq!(obstacle.pos.y, 578.0);
    }

    #[test]
    fn test_same_seed_same_field() {
        let vp = viewport();
        let mut a = field(42);
        let mut b = field(42);
        for _ in 0..5 {
            a.spawn(&vp);
            b.spawn(&vp);
        }
        assert_eq!(a.as_slice(), b.as_slice());
    }

    proptest! {
        #[test]
        fn prop_obstacles_stay_in_vertical_band(seed in any::<u64>(), height in 120.0f32..1200.0) {
            let vp = Viewport { width: 800.0, height };
            let mut field = field(seed);
            for tick in 0..200u64 {
                if field.is_spawn_tick(tick) {
                    field.spawn(&vp);
                }
                field.advance(&vp);
                for o in field.iter() {
                    prop_assert!(o.radius > 0.0);
                    prop_assert!(o.pos.y >= o.radius);
                    prop_assert!(o.pos.y <= height - o.radius);
                    prop_assert!(o.pos.x + o.radius >= 0.0);
                }
            }
        }
    }
}
