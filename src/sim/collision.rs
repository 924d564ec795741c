//! Collision detection and response
//!
//! The ball is treated as its tight bounding square for brick tests and as a
//! center point for the paddle's horizontal span. Responses only ever negate a
//! velocity component and, for walls and paddle, snap the ball back into range.

use glam::Vec2;

use super::state::{Ball, BrickGrid, Paddle};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from a top-left corner and size
    pub fn from_rect(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Tight square around a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self {
            min: center - Vec2::splat(radius),
            max: center + Vec2::splat(radius),
        }
    }

    /// Overlap test; touching edges count as overlapping
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }
}

/// Which boundaries the ball touched during wall resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    /// Ball fell out of the bottom and was re-centered
    pub lost: bool,
}

impl WallContact {
    /// True if the ball bounced off any wall
    pub fn bounced(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Resolve the ball against the arena walls.
///
/// Checked left, right, top, then bottom. The bottom is not a wall: once the
/// ball's top edge is below the floor it is moved to `center` and keeps its
/// velocity.
pub fn resolve_walls(ball: &mut Ball, arena: Vec2, center: Vec2) -> WallContact {
    let mut contact = WallContact::default();

    if ball.pos.x - ball.radius < 0.0 {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = ball.radius;
        contact.left = true;
    }
    if ball.pos.x + ball.radius > arena.x {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = arena.x - ball.radius;
        contact.right = true;
    }
    if ball.pos.y - ball.radius < 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = ball.radius;
        contact.top = true;
    }
    if ball.pos.y - ball.radius > arena.y {
        ball.pos = center;
        contact.lost = true;
    }

    contact
}

/// Bounce the ball off the paddle's top. Only a descending ball whose center
/// lies within the paddle's horizontal span is affected.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    let within_span = ball.pos.x >= paddle.pos.x && ball.pos.x <= paddle.pos.x + paddle.size.x;

    if ball.pos.y + ball.radius >= paddle.pos.y && within_span && ball.vel.y > 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = paddle.pos.y - ball.radius;
        return true;
    }

    false
}

/// Destroy the first visible brick (storage order) overlapping the ball.
///
/// At most one brick per call. Only the vertical velocity flips and the ball
/// is not moved, so it may still overlap next tick.
pub fn resolve_bricks(ball: &mut Ball, bricks: &mut BrickGrid) -> Option<usize> {
    let ball_box = Aabb::around_circle(ball.pos, ball.radius);

    let (index, brick) = bricks
        .iter_mut()
        .enumerate()
        .find(|(_, b)| b.visible && Aabb::from_rect(b.pos, b.size).overlaps(&ball_box))?;

    brick.visible = false;
    ball.vel.y = -ball.vel.y;
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: Vec2 = Vec2::new(800.0, 600.0);
    const CENTER: Vec2 = Vec2::new(400.0, 300.0);

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            radius: 10.0,
        }
    }

    fn paddle_at(x: f32) -> Paddle {
        Paddle {
            pos: Vec2::new(x, 570.0),
            size: Vec2::new(100.0, 20.0),
            speed: 400.0,
        }
    }

    #[test]
    fn test_aabb_overlap_inclusive() {
        let a = Aabb::from_rect(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let touching = Aabb::from_rect(Vec2::new(10.0, 0.0), Vec2::new(5.0, 5.0));
        let apart = Aabb::from_rect(Vec2::new(10.5, 0.0), Vec2::new(5.0, 5.0));

        assert!(a.overlaps(&touching));
        assert!(touching.overlaps(&a));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_left_wall() {
        let mut ball = ball_at(5.0, 300.0, -200.0, 100.0);
        let contact = resolve_walls(&mut ball, ARENA, CENTER);

        assert!(contact.left);
        assert_eq!(ball.pos.x, 10.0);
        assert_eq!(ball.vel, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_right_wall() {
        let mut ball = ball_at(795.0, 300.0, 200.0, 100.0);
        let contact = resolve_walls(&mut ball, ARENA, CENTER);

        assert!(contact.right);
        assert_eq!(ball.pos.x, 790.0);
        assert_eq!(ball.vel.x, -200.0);
    }

    #[test]
    fn test_top_wall() {
        let mut ball = ball_at(400.0, 3.0, 200.0, -200.0);
        let contact = resolve_walls(&mut ball, ARENA, CENTER);

        assert!(contact.top);
        assert_eq!(ball.pos.y, 10.0);
        assert_eq!(ball.vel.y, 200.0);
    }

    #[test]
    fn test_corner_hits_both_walls() {
        let mut ball = ball_at(2.0, 2.0, -50.0, -60.0);
        let contact = resolve_walls(&mut ball, ARENA, CENTER);

        assert!(contact.left && contact.top);
        assert_eq!(ball.pos, Vec2::new(10.0, 10.0));
        assert_eq!(ball.vel, Vec2::new(50.0, 60.0));
    }

    #[test]
    fn test_exactly_touching_wall_is_not_a_hit() {
        let mut ball = ball_at(10.0, 10.0, -50.0, -50.0);
        let contact = resolve_walls(&mut ball, ARENA, CENTER);
        assert_eq!(contact, WallContact::default());
        assert_eq!(ball.vel, Vec2::new(-50.0, -50.0));
    }

    #[test]
    fn test_bottom_requires_full_exit() {
        // Bottom edge past the floor but top edge still inside
        let mut ball = ball_at(400.0, 605.0, 120.0, 200.0);
        let contact = resolve_walls(&mut ball, ARENA, CENTER);
        assert!(!contact.lost);
        assert_eq!(ball.pos.y, 605.0);

        // Top edge exactly on the floor is still not lost
        let mut ball = ball_at(400.0, 610.0, 120.0, 200.0);
        assert!(!resolve_walls(&mut ball, ARENA, CENTER).lost);

        let mut ball = ball_at(400.0, 610.5, 120.0, 200.0);
        let contact = resolve_walls(&mut ball, ARENA, CENTER);
        assert!(contact.lost);
        assert!(!contact.bounced());
        assert_eq!(ball.pos, CENTER);
        assert_eq!(ball.vel, Vec2::new(120.0, 200.0));
    }

    #[test]
    fn test_paddle_bounce() {
        let paddle = paddle_at(350.0);
        let mut ball = ball_at(400.0, 565.0, 150.0, 200.0);

        assert!(resolve_paddle(&mut ball, &paddle));
        assert_eq!(ball.vel, Vec2::new(150.0, -200.0));
        assert_eq!(ball.pos.y, 560.0);
    }

    #[test]
    fn test_paddle_edges_use_ball_center() {
        let paddle = paddle_at(350.0);

        let mut on_edge = ball_at(450.0, 565.0, 0.0, 200.0);
        assert!(resolve_paddle(&mut on_edge, &paddle));

        // Ball overlaps the paddle corner but its center is outside the span
        let mut past_edge = ball_at(455.0, 565.0, 0.0, 200.0);
        assert!(!resolve_paddle(&mut past_edge, &paddle));
        assert_eq!(past_edge.vel.y, 200.0);
    }

    #[test]
    fn test_paddle_ignores_rising_ball() {
        let paddle = paddle_at(350.0);
        let mut ball = ball_at(400.0, 575.0, 0.0, -200.0);

        assert!(!resolve_paddle(&mut ball, &paddle));
        assert_eq!(ball.vel.y, -200.0);
        assert_eq!(ball.pos.y, 575.0);
    }

    #[test]
    fn test_paddle_ignores_ball_above() {
        let paddle = paddle_at(350.0);
        let mut ball = ball_at(400.0, 559.0, 0.0, 200.0);
        assert!(!resolve_paddle(&mut ball, &paddle));
    }

    #[test]
    fn test_brick_hit_destroys_first_only() {
        let mut bricks = BrickGrid::new(5, 10).unwrap();
        // Straddles bricks 0 and 1 (gap between x=95 and x=105)
        let mut ball = ball_at(100.0, 60.0, 100.0, -200.0);

        assert_eq!(resolve_bricks(&mut ball, &mut bricks), Some(0));
        assert_eq!(ball.vel, Vec2::new(100.0, 200.0));
        assert_eq!(ball.pos, Vec2::new(100.0, 60.0));
        assert_eq!(bricks.visible_count(), 49);
        assert!(bricks.get(1).unwrap().visible);

        // Brick 0 is gone, so the same overlap now takes brick 1
        assert_eq!(resolve_bricks(&mut ball, &mut bricks), Some(1));
        assert_eq!(bricks.visible_count(), 48);
    }

    #[test]
    fn test_brick_miss() {
        let mut bricks = BrickGrid::new(5, 10).unwrap();
        let mut ball = ball_at(400.0, 300.0, 200.0, -200.0);

        assert_eq!(resolve_bricks(&mut ball, &mut bricks), None);
        assert_eq!(ball.vel.y, -200.0);
        assert_eq!(bricks.visible_count(), 50);
    }

    #[test]
    fn test_invisible_brick_is_inert() {
        let mut bricks = BrickGrid::new(1, 1).unwrap();
        let mut ball = ball_at(65.0, 60.0, 0.0, -200.0);

        assert_eq!(resolve_bricks(&mut ball, &mut bricks), Some(0));
        for _ in 0..3 {
            assert_eq!(resolve_bricks(&mut ball, &mut bricks), None);
        }
        assert!(!bricks.get(0).unwrap().visible);
        assert_eq!(ball.vel.y, 200.0);
    }
}
