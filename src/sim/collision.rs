//! Circle-circle collision detection
//!
//! Every body in the game (rocket, meteorites, particles) is bounded by a
//! circle, so a single overlap test covers all gameplay collisions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Anything with a circular bounding volume
pub trait Circle {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// A bare circle, handy for queries that have no backing entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    pub center: Vec2,
    pub radius: f32,
}

impl Disc {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Circle for Disc {
    fn center(&self) -> Vec2 {
        self.center
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

/// True iff the circles overlap. Exact tangency is not a collision.
#[inline]
pub fn is_colliding<A, B>(a: &A, b: &B) -> bool
where
    A: Circle + ?Sized,
    B: Circle + ?Sized,
{
    a.center().distance(b.center()) < a.radius() + b.radius()
}

/// First body in `others` that overlaps `body`, if any
pub fn first_collision<'a, B, C>(body: &B, others: impl IntoIterator<Item = &'a C>) -> Option<&'a C>
where
    B: Circle + ?Sized,
    C: Circle + 'a,
{
    others.into_iter().find(|other| is_colliding(body, *other))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_concentric_circles_collide() {
        let player = Disc::new(Vec2::new(150.0, 300.0), 25.0);
        let obstacle = Disc::new(Vec2::new(150.0, 300.0), 25.0);
        assert!(is_colliding(&player, &obstacle));
    }

    #[test]
    fn test_distant_circles_miss() {
        let player = Disc::new(Vec2::new(150.0, 300.0), 25.0);
        let obstacle = Disc::new(Vec2::new(400.0, 300.0), 25.0);
        assert!(!is_colliding(&player, &obstacle));
    }

    #[test]
    fn test_tangent_circles_do_not_collide() {
        let a = Disc::new(Vec2::new(0.0, 0.0), 25.0);
        let b = Disc::new(Vec2::new(50.0, 0.0), 25.0);
        assert!(!is_colliding(&a, &b));

        let c = Disc::new(Vec2::new(49.9, 0.0), 25.0);
        assert!(is_colliding(&a, &c));
    }

    #[test]
    fn test_first_collision_finds_any_hit() {
        let player = Disc::new(Vec2::new(150.0, 300.0), 25.0);
        let field = [
            Disc::new(Vec2::new(600.0, 100.0), 30.0),
            Disc::new(Vec2::new(180.0, 310.0), 20.0),
            Disc::new(Vec2::new(160.0, 290.0), 20.0),
        ];
        let hit = first_collision(&player, &field).expect("should collide");
        assert_eq!(hit.center, Vec2::new(180.0, 310.0));

        assert!(first_collision(&player, &field[..1]).is_none());
        assert!(first_collision(&player, &[] as &[Disc]).is_none());
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0, ar in 0.1f32..100.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0, br in 0.1f32..100.0,
        ) {
            let a = Disc::new(Vec2::new(ax, ay), ar);
            let b = Disc::new(Vec2::new(bx, by), br);
            prop_assert_eq!(is_colliding(&a, &b), is_colliding(&b, &a));
        }
    }
}
