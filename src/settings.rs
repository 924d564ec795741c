//! Startup settings
//!
//! Difficulty is chosen once from the command line and baked into the initial
//! entity speeds; nothing here is re-read while the game runs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Map a numeric selector (1 = Easy, 2 = Medium, 3 = Hard).
    /// Anything else falls back to Medium.
    pub fn from_number(n: i64) -> Self {
        match n {
            1 => Difficulty::Easy,
            3 => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    /// Parse a selector argument the way `atoi` reads it: leading whitespace,
    /// optional sign, then as many digits as follow. Garbage reads as 0.
    pub fn from_selector(arg: &str) -> Self {
        let s = arg.trim_start();
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let mut value: i64 = 0;
        for b in digits.bytes().take_while(u8::is_ascii_digit) {
            value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
        }

        Self::from_number(if negative { -value } else { value })
    }

    /// Speed multiplier applied to paddle and ball at startup
    pub fn multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.2,
        }
    }
}

/// Startup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Frame-rate governor target
    pub target_fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            target_fps: TARGET_FPS,
        }
    }
}

impl Settings {
    /// Build settings from process arguments (program name already stripped).
    /// Only the first argument is consulted; an absent one means Medium.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let difficulty = args
            .into_iter()
            .next()
            .map(|arg| Difficulty::from_selector(arg.as_ref()))
            .unwrap_or_default();

        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Wall-clock budget per frame, in whole milliseconds
    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.target_fps.max(1)))
    }
}
