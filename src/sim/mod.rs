//! Simulation module
//!
//! All gameplay logic lives here. This module is pure:
//! - Time arrives as a measured delta, never read from a clock
//! - Stable iteration order (brick storage order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, WallContact, resolve_bricks, resolve_paddle, resolve_walls};
pub use state::{Ball, Brick, BrickGrid, GameState, Paddle};
pub use tick::{TickEvents, TickInput, advance, integrate_ball, update_paddle};
