//! Platform abstraction layer
//!
//! Input is polled, never pushed: once per frame the loop asks whether quit
//! was requested and which movement keys are held.

pub mod terminal;

pub use terminal::{TerminalInput, TerminalSession};

use crate::sim::TickInput;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    MoveLeft,
    MoveRight,
}

/// Source of quit requests and held-key state
pub trait InputSource {
    /// Drain pending events without blocking. True if the player asked to quit.
    fn poll_quit_requested(&mut self) -> bool;
    fn is_key_held(&self, key: Key) -> bool;

    /// Snapshot of the keys the simulation cares about
    fn tick_input(&self) -> TickInput {
        TickInput {
            move_left: self.is_key_held(Key::MoveLeft),
            move_right: self.is_key_held(Key::MoveRight),
        }
    }
}

/// Replays a fixed per-frame script, then requests quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<TickInput>,
    cursor: usize,
    current: TickInput,
}

impl ScriptedInput {
    pub fn new(frames: Vec<TickInput>) -> Self {
        Self {
            frames,
            cursor: 0,
            current: TickInput::default(),
        }
    }

    /// Frames consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl InputSource for ScriptedInput {
    fn poll_quit_requested(&mut self) -> bool {
        match self.frames.get(self.cursor) {
            Some(&frame) => {
                self.current = frame;
                self.cursor += 1;
                false
            }
            None => true,
        }
    }

    fn is_key_held(&self, key: Key) -> bool {
        match key {
            Key::MoveLeft => self.current.move_left,
            Key::MoveRight => self.current.move_right,
        }
    }
}
