//! Game state and entity types
//!
//! Entities are plain records. All behaviour lives in `collision` and `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::InitError;
use crate::settings::Difficulty;

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per second
    pub speed: f32,
}

impl Paddle {
    /// Centered horizontally, resting just above the arena floor
    pub fn new(arena: Vec2) -> Self {
        Self {
            pos: Vec2::new(
                (arena.x - PADDLE_WIDTH) / 2.0,
                arena.y - PADDLE_HEIGHT - PADDLE_FLOOR_GAP,
            ),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            speed: PADDLE_SPEED,
        }
    }

    /// Rightmost legal x for the paddle's left edge
    #[inline]
    pub fn max_x(&self, arena_width: f32) -> f32 {
        arena_width - self.size.x
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Pixels per second (signed)
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at the arena center, heading up and to the right
    pub fn new(arena: Vec2) -> Self {
        Self {
            pos: arena / 2.0,
            vel: Vec2::new(BALL_START_SPEED_X, BALL_START_SPEED_Y),
            radius: BALL_RADIUS,
        }
    }
}

/// A single brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub visible: bool,
}

/// Fixed-size, row-major brick storage. Indices are brick identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    columns: usize,
    bricks: Box<[Brick]>,
}

impl BrickGrid {
    /// Allocate and lay out a `rows` x `columns` grid, every brick visible
    pub fn new(rows: usize, columns: usize) -> Result<Self, InitError> {
        let requested = rows
            .checked_mul(columns)
            .ok_or(InitError::BrickGridTooLarge { rows, columns })?;

        let mut bricks = Vec::new();
        bricks
            .try_reserve_exact(requested)
            .map_err(|_| InitError::BrickAllocation { requested })?;

        for row in 0..rows {
            for col in 0..columns {
                bricks.push(Brick {
                    pos: Vec2::new(
                        col as f32 * (BRICK_WIDTH + BRICK_GAP_X) + BRICK_OFFSET_X,
                        row as f32 * (BRICK_HEIGHT + BRICK_GAP_Y) + BRICK_OFFSET_Y,
                    ),
                    size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
                    visible: true,
                });
            }
        }

        Ok(Self {
            columns,
            bricks: bricks.into_boxed_slice(),
        })
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.bricks.len().checked_div(self.columns).unwrap_or(0)
    }

    /// Row of the brick stored at `index`
    #[inline]
    pub fn row_of(&self, index: usize) -> usize {
        index.checked_div(self.columns).unwrap_or(0)
    }

    pub fn get(&self, index: usize) -> Option<&Brick> {
        self.bricks.get(index)
    }

    /// Bricks in storage order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    /// Visible bricks with their indices, in storage order
    pub fn visible(&self) -> impl Iterator<Item = (usize, &Brick)> {
        self.bricks.iter().enumerate().filter(|(_, b)| b.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Arena width and height
    pub arena: Vec2,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    /// Difficulty the speeds were scaled by
    pub difficulty: Difficulty,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Standard 800x600 arena with a 5x10 brick wall, speeds scaled once by
    /// the difficulty multiplier
    pub fn new(difficulty: Difficulty) -> Result<Self, InitError> {
        let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
        let bricks = BrickGrid::new(BRICK_ROWS, BRICK_COLUMNS)?;

        let mut paddle = Paddle::new(arena);
        let mut ball = Ball::new(arena);

        let multiplier = difficulty.multiplier();
        paddle.speed *= multiplier;
        ball.vel *= multiplier;

        log::info!(
            "New game: difficulty {} (x{}), {} bricks",
            difficulty.as_str(),
            multiplier,
            bricks.len()
        );

        Ok(Self {
            arena,
            paddle,
            ball,
            bricks,
            difficulty,
            time_ticks: 0,
        })
    }

    /// Arena center, where a lost ball reappears
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.arena / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let state = GameState::new(Difficulty::Medium).unwrap();

        assert_eq!(state.paddle.pos, Vec2::new(350.0, 570.0));
        assert_eq!(state.paddle.size, Vec2::new(100.0, 20.0));
        assert_eq!(state.paddle.speed, 400.0);

        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(200.0, -200.0));
        assert_eq!(state.ball.radius, 10.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_easy_difficulty_scales_speeds() {
        let state = GameState::new(Difficulty::from_selector("1")).unwrap();
        assert!((state.paddle.speed - 320.0).abs() < 1e-4);
        assert!((state.ball.vel.x - 160.0).abs() < 1e-4);
        assert!((state.ball.vel.y + 160.0).abs() < 1e-4);
    }

    #[test]
    fn test_hard_difficulty_scales_speeds() {
        let state = GameState::new(Difficulty::Hard).unwrap();
        assert!((state.paddle.speed - 480.0).abs() < 1e-3);
        assert!((state.ball.vel.x - 240.0).abs() < 1e-3);
        assert!((state.ball.vel.y + 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_brick_grid_layout() {
        let grid = BrickGrid::new(BRICK_ROWS, BRICK_COLUMNS).unwrap();
        assert_eq!(grid.len(), 50);
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.columns(), 10);
        assert_eq!(grid.visible_count(), 50);

        let first = grid.get(0).unwrap();
        assert_eq!(first.pos, Vec2::new(35.0, 50.0));
        assert_eq!(first.size, Vec2::new(60.0, 20.0));

        // Row 1, column 2
        let brick = grid.get(12).unwrap();
        assert_eq!(brick.pos, Vec2::new(175.0, 75.0));
        assert_eq!(grid.row_of(12), 1);

        let last = grid.get(49).unwrap();
        assert_eq!(last.pos, Vec2::new(665.0, 150.0));
        assert_eq!(grid.row_of(49), 4);
    }

    #[test]
    fn test_brick_grid_overflow_is_too_large_error() {
        let err = BrickGrid::new(usize::MAX, 2).unwrap_err();
        assert!(matches!(
            err,
            InitError::BrickGridTooLarge {
                rows: usize::MAX,
                columns: 2
            }
        ));
        assert_eq!(
            err.to_string(),
            format!("brick grid of {} x 2 is too large", usize::MAX)
        );
    }

    #[test]
    fn test_empty_grid() {
        let grid = BrickGrid::new(0, 10).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.visible().count(), 0);
    }
}
