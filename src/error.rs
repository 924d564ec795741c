//! Error types
//!
//! Two families: fatal startup failures that end the process with exit code 1,
//! and per-primitive render failures that are logged and skipped.

use std::fmt;
use std::io;

/// Failure while bringing the game up. Never produced once the loop runs.
#[derive(Debug)]
pub enum InitError {
    /// Terminal could not be switched into game mode (raw mode, alternate screen, size query)
    Terminal(io::Error),
    /// Brick storage could not be reserved
    BrickAllocation { requested: usize },
    /// Brick count does not fit in memory addressing
    BrickGridTooLarge { rows: usize, columns: usize },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::Terminal(e) => write!(f, "terminal initialization failed: {}", e),
            InitError::BrickAllocation { requested } => {
                write!(f, "failed to allocate memory for {} bricks", requested)
            }
            InitError::BrickGridTooLarge { rows, columns } => {
                write!(f, "brick grid of {} x {} is too large", rows, columns)
            }
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitError::Terminal(e) => Some(e),
            InitError::BrickAllocation { .. } | InitError::BrickGridTooLarge { .. } => None,
        }
    }
}

impl From<io::Error> for InitError {
    fn from(e: io::Error) -> Self {
        InitError::Terminal(e)
    }
}

/// Failure of a single drawing primitive
#[derive(Debug)]
pub enum RenderError {
    /// Writing the frame to the output failed
    Io(io::Error),
    /// Coordinates or extents were NaN or infinite
    InvalidGeometry(&'static str),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(e) => write!(f, "render output failed: {}", e),
            RenderError::InvalidGeometry(what) => write!(f, "invalid geometry for {}", what),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(e) => Some(e),
            RenderError::InvalidGeometry(_) => None,
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(e: io::Error) -> Self {
        RenderError::Io(e)
    }
}
