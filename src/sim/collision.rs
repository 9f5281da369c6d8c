//! Collision detection for the rectangular arena
//!
//! Walls and paddles are axis-aligned, so contacts reduce to circle vs line
//! and circle vs AABB tests. Goal lines are triggers, not surfaces: they report
//! which side scored and never produce a normal.

use glam::DVec2;

use super::Side;
use super::paddle::Paddle;
use crate::consts::{ARENA_HALF_HEIGHT, ARENA_HALF_WIDTH};

/// What the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Wall,
    Paddle(Side),
}

/// Result of a collision check
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub kind: ContactKind,
    /// Point on the surface closest to the ball center
    pub point: DVec2,
    /// Surface normal pointing toward the ball, for reflection
    pub normal: DVec2,
    /// Overlap depth (for position correction)
    pub penetration: f64,
}

/// Playfield extents (origin at center)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub half_width: f64,
    pub half_height: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            half_width: ARENA_HALF_WIDTH,
            half_height: ARENA_HALF_HEIGHT,
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb {
    pub fn from_center_half(center: DVec2, half: DVec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn closest_point(&self, p: DVec2) -> DVec2 {
        p.clamp(self.min, self.max)
    }

    /// Check if circle intersects AABB
    pub fn intersects_circle(&self, center: DVec2, radius: f64) -> bool {
        (center - self.closest_point(center)).length_squared() <= radius * radius
    }
}

/// Check the ball against the top and bottom walls.
///
/// Only reports a contact when the ball is moving into the wall, so a ball
/// that was already turned around cannot be reflected twice.
pub fn ball_wall_collision(pos: DVec2, dir: DVec2, radius: f64, arena: &Arena) -> Option<Contact> {
    let top_gap = arena.half_height - (pos.y + radius);
    if top_gap <= 0.0 && dir.y > 0.0 {
        return Some(Contact {
            kind: ContactKind::Wall,
            point: DVec2::new(pos.x, arena.half_height),
            normal: DVec2::NEG_Y,
            penetration: -top_gap,
        });
    }

    let bottom_gap = (pos.y - radius) + arena.half_height;
    if bottom_gap <= 0.0 && dir.y < 0.0 {
        return Some(Contact {
            kind: ContactKind::Wall,
            point: DVec2::new(pos.x, -arena.half_height),
            normal: DVec2::Y,
            penetration: -bottom_gap,
        });
    }

    None
}

/// Check the ball against a paddle.
///
/// The paddle always answers with its face normal (toward the arena center)
/// and only when the ball is heading toward that face.
pub fn ball_paddle_collision(pos: DVec2, dir: DVec2, radius: f64, paddle: &Paddle) -> Option<Contact> {
    let normal = paddle.face_normal();
    if dir.dot(normal) >= 0.0 {
        return None;
    }
    // Already past the paddle's center line: let it go through to the goal
    if (pos.x - paddle.x()) * normal.x < 0.0 {
        return None;
    }

    let bounds = Aabb::from_center_half(
        paddle.center(),
        DVec2::new(paddle.half_width, paddle.half_height),
    );
    if !bounds.intersects_circle(pos, radius) {
        return None;
    }

    let face_x = paddle.x() + normal.x * paddle.half_width;
    let penetration = radius - (pos.x - face_x) * normal.x;
    Some(Contact {
        kind: ContactKind::Paddle(paddle.side),
        point: bounds.closest_point(pos),
        normal,
        penetration: penetration.max(0.0),
    })
}

/// Swept check for a ball that moved from `from` to `to` in one step.
///
/// Catches fast balls that end the step past the paddle without ever
/// overlapping it. The contact pushes the ball back to where its center met
/// the face plane.
pub fn ball_paddle_sweep(from: DVec2, to: DVec2, radius: f64, paddle: &Paddle) -> Option<Contact> {
    let normal = paddle.face_normal();
    let travel = to - from;
    if travel.dot(normal) >= 0.0 {
        return None;
    }

    // Plane the ball center touches when the ball meets the face
    let face_x = paddle.x() + normal.x * paddle.half_width;
    let plane_x = face_x + normal.x * radius;
    let before = (from.x - plane_x) * normal.x;
    let after = (to.x - plane_x) * normal.x;
    if before < 0.0 || after >= 0.0 {
        return None;
    }

    let t = before / (before - after);
    let hit = from + travel * t;
    if (hit.y - paddle.y()).abs() > paddle.half_height + radius {
        return None;
    }

    Some(Contact {
        kind: ContactKind::Paddle(paddle.side),
        point: DVec2::new(
            face_x,
            hit.y
                .clamp(paddle.y() - paddle.half_height, paddle.y() + paddle.half_height),
        ),
        normal,
        penetration: -after,
    })
}

/// Which side scored, if the ball center has crossed a goal line
pub fn goal_crossed(pos: DVec2, arena: &Arena) -> Option<Side> {
    let breached = if pos.x < -arena.half_width {
        Side::Left
    } else if pos.x > arena.half_width {
        Side::Right
    } else {
        return None;
    };
    Some(breached.opponent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::SimConfig;

    fn left_paddle() -> Paddle {
        Paddle::new(Side::Left, &SimConfig::default())
    }

    #[test]
    fn test_top_wall_contact() {
        let arena = Arena::default();
        let pos = DVec2::new(0.0, arena.half_height - 0.1);
        let contact = ball_wall_collision(pos, DVec2::new(0.6, 0.8), 0.2, &arena).unwrap();
        assert_eq!(contact.kind, ContactKind::Wall);
        assert_eq!(contact.normal, DVec2::NEG_Y);
        assert!((contact.penetration - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_bottom_wall_contact() {
        let arena = Arena::default();
        let pos = DVec2::new(1.0, -arena.half_height + 0.1);
        let contact = ball_wall_collision(pos, DVec2::new(0.6, -0.8), 0.2, &arena).unwrap();
        assert_eq!(contact.normal, DVec2::Y);
        assert_eq!(contact.point, DVec2::new(1.0, -arena.half_height));
    }

    #[test]
    fn test_wall_ignored_when_moving_away() {
        let arena = Arena::default();
        let pos = DVec2::new(0.0, arena.half_height - 0.1);
        assert!(ball_wall_collision(pos, DVec2::new(0.6, -0.8), 0.2, &arena).is_none());
    }

    #[test]
    fn test_paddle_contact_on_face() {
        let paddle = left_paddle();
        let face_x = paddle.x() + paddle.half_width;
        let pos = DVec2::new(face_x + 0.1, 0.3);

        let contact = ball_paddle_collision(pos, DVec2::NEG_X, 0.2, &paddle).unwrap();
        assert_eq!(contact.kind, ContactKind::Paddle(Side::Left));
        assert_eq!(contact.normal, DVec2::X);
        assert!((contact.penetration - 0.1).abs() < 1e-12);
        assert!((contact.point.x - face_x).abs() < 1e-12);
    }

    #[test]
    fn test_paddle_ignored_when_moving_away() {
        let paddle = left_paddle();
        let pos = DVec2::new(paddle.x() + paddle.half_width + 0.1, 0.0);
        assert!(ball_paddle_collision(pos, DVec2::X, 0.2, &paddle).is_none());
    }

    #[test]
    fn test_paddle_miss_above() {
        let paddle = left_paddle();
        let pos = DVec2::new(paddle.x() + paddle.half_width, paddle.half_height + 1.0);
        assert!(ball_paddle_collision(pos, DVec2::NEG_X, 0.2, &paddle).is_none());
    }

    #[test]
    fn test_paddle_ignored_once_ball_is_behind_it() {
        let paddle = left_paddle();
        let pos = DVec2::new(paddle.x() - 0.1, 0.0);
        assert!(ball_paddle_collision(pos, DVec2::NEG_X, 0.2, &paddle).is_none());
    }

    #[test]
    fn test_sweep_catches_ball_that_jumped_past_face() {
        let paddle = left_paddle();
        // 0.5 units of travel in one step, ending behind the paddle center
        let from = DVec2::new(-7.55, 0.0);
        let to = DVec2::new(-8.05, 0.0);
        assert!(ball_paddle_collision(to, DVec2::NEG_X, 0.2, &paddle).is_none());

        let contact = ball_paddle_sweep(from, to, 0.2, &paddle).unwrap();
        assert_eq!(contact.kind, ContactKind::Paddle(Side::Left));
        assert_eq!(contact.normal, DVec2::X);
        // Pushing back by the penetration puts the center on the face plane
        let resolved = to.x + contact.penetration;
        assert!((resolved - (paddle.x() + paddle.half_width + 0.2)).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_misses_above_paddle() {
        let paddle = left_paddle();
        let from = DVec2::new(-7.0, 2.5);
        let to = DVec2::new(-8.5, 2.5);
        assert!(ball_paddle_sweep(from, to, 0.2, &paddle).is_none());
    }

    #[test]
    fn test_sweep_ignores_ball_moving_away() {
        let paddle = left_paddle();
        let from = DVec2::new(-8.05, 0.0);
        let to = DVec2::new(-7.55, 0.0);
        assert!(ball_paddle_sweep(from, to, 0.2, &paddle).is_none());
    }

    #[test]
    fn test_goal_lines() {
        let arena = Arena::default();
        assert_eq!(goal_crossed(DVec2::new(-arena.half_width - 0.01, 0.0), &arena), Some(Side::Right));
        assert_eq!(goal_crossed(DVec2::new(arena.half_width + 0.01, 2.0), &arena), Some(Side::Left));
        assert_eq!(goal_crossed(DVec2::new(arena.half_width, 0.0), &arena), None);
    }
}
