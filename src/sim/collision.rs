//! Collision detection and response for axis-aligned shapes
//!
//! Ball/brick contacts are resolved along the axis of least penetration:
//! the ball is pushed out through whichever side it overlaps least and the
//! matching velocity component is reflected.

use glam::Vec2;

use super::ball::Ball;
use super::rect::{Bounded, Rect};
use crate::consts::SEPARATION_GAP;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Outward normal of the side that was struck (axis-aligned unit vector)
    pub normal: Vec2,
    /// Overlap along the normal
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Find the side of `target` that `shape` overlaps least
///
/// Horizontal sides win ties against vertical ones.
pub fn rect_collision(shape: &Rect, target: &Rect) -> CollisionResult {
    if !shape.intersects(target) {
        return CollisionResult::miss();
    }

    let candidates = [
        (shape.right() - target.left(), Vec2::NEG_X),
        (target.right() - shape.left(), Vec2::X),
        (shape.bottom() - target.top(), Vec2::NEG_Y),
        (target.bottom() - shape.top(), Vec2::Y),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.0 < best.0 {
            best = *candidate;
        }
    }

    CollisionResult {
        hit: true,
        normal: best.1,
        penetration: best.0,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Push the ball out of `target` and bounce it
///
/// Returns the collision that was resolved, or a miss if they do not touch.
pub fn resolve_ball_rect(ball: &mut Ball, target: &Rect) -> CollisionResult {
    let result = rect_collision(&ball.bounds(), target);
    if !result.hit {
        return result;
    }

    let clearance = SEPARATION_GAP + ball.radius;
    if result.normal == Vec2::NEG_X {
        ball.pos.x = target.left() - clearance;
    } else if result.normal == Vec2::X {
        ball.pos.x = target.right() + clearance;
    } else if result.normal == Vec2::NEG_Y {
        ball.pos.y = target.top() - clearance;
    } else {
        ball.pos.y = target.bottom() + clearance;
    }
    ball.vel = reflect_velocity(ball.vel, result.normal);

    result
}
