//! Breakout - paddle, ball and a wall of bricks
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, per-tick advance)
//! - `game_loop`: Variable timestep driver with frame-rate governor
//! - `renderer`: Drawing collaborator trait, palette and terminal backend
//! - `platform`: Input collaborator trait and terminal keyboard backend
//! - `settings`: Difficulty selection and startup configuration
//! - `simulation`: Headless runs for soak testing

pub mod error;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod simulation;

pub use error::{InitError, RenderError};
pub use game_loop::{Clock, GameLoop, LoopState, ManualClock, SystemClock};
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels, origin top-left, y down)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Gap between the paddle's bottom edge and the arena floor
    pub const PADDLE_FLOOR_GAP: f32 = 10.0;
    /// Pixels per second, before the difficulty multiplier
    pub const PADDLE_SPEED: f32 = 400.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_SPEED_X: f32 = 200.0;
    pub const BALL_START_SPEED_Y: f32 = -200.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLUMNS: usize = 10;
    pub const BRICK_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_GAP_X: f32 = 10.0;
    pub const BRICK_GAP_Y: f32 = 5.0;
    pub const BRICK_OFFSET_X: f32 = 35.0;
    pub const BRICK_OFFSET_Y: f32 = 50.0;

    /// Frame-rate governor target (frames per second)
    pub const TARGET_FPS: u32 = 60;
}
