//! Variable timestep simulation tick
//!
//! Advances paddle and ball by a measured delta time, then resolves walls,
//! paddle and bricks in that order.

use serde::{Deserialize, Serialize};

use super::collision::{WallContact, resolve_bricks, resolve_paddle, resolve_walls};
use super::state::{Ball, GameState, Paddle};

/// Held-key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
}

/// What happened during a tick. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub walls: WallContact,
    pub paddle_hit: bool,
    /// Index of the brick destroyed this tick
    pub brick_destroyed: Option<usize>,
}

impl TickEvents {
    pub fn ball_lost(&self) -> bool {
        self.walls.lost
    }
}

/// Move the paddle for held keys. Left and right are applied independently,
/// each followed by its own clamp.
pub fn update_paddle(paddle: &mut Paddle, input: &TickInput, dt: f32, arena_width: f32) {
    if input.move_left {
        paddle.pos.x -= paddle.speed * dt;
        if paddle.pos.x < 0.0 {
            paddle.pos.x = 0.0;
        }
    }
    if input.move_right {
        paddle.pos.x += paddle.speed * dt;
        let max_x = paddle.max_x(arena_width);
        if paddle.pos.x > max_x {
            paddle.pos.x = max_x;
        }
    }
}

/// Explicit Euler step. Fast balls can skip over thin obstacles.
#[inline]
pub fn integrate_ball(ball: &mut Ball, dt: f32) {
    ball.pos += ball.vel * dt;
}

/// Advance the game state by `dt` seconds
pub fn advance(state: &mut GameState, input: &TickInput, dt: f32) -> TickEvents {
    update_paddle(&mut state.paddle, input, dt, state.arena.x);
    integrate_ball(&mut state.ball, dt);

    let center = state.center();
    let walls = resolve_walls(&mut state.ball, state.arena, center);
    if walls.lost {
        log::debug!("Ball lost at tick {}, re-centered", state.time_ticks);
    }

    let paddle_hit = resolve_paddle(&mut state.ball, &state.paddle);

    let brick_destroyed = resolve_bricks(&mut state.ball, &mut state.bricks);
    if let Some(index) = brick_destroyed {
        log::debug!(
            "Brick {} destroyed, {} remaining",
            index,
            state.bricks.visible_count()
        );
    }

    state.time_ticks += 1;

    TickEvents {
        walls,
        paddle_hit,
        brick_destroyed,
    }
}
