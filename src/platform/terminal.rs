//! Terminal platform backend
//!
//! `TerminalSession` owns the terminal mode for the lifetime of the game and
//! restores it on drop. `TerminalInput` turns crossterm key events into held
//! key state.

use std::io;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::style::ResetColor;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

use super::{InputSource, Key};
use crate::error::InitError;

/// How long a press counts as held when the terminal cannot report releases.
/// Long enough to bridge the keyboard's initial auto-repeat delay.
const PRESS_HOLD: Duration = Duration::from_millis(300);
/// Hold extension from each auto-repeat event
const REPEAT_HOLD: Duration = Duration::from_millis(80);

/// Raw mode + alternate screen + hidden cursor, undone on drop
pub struct TerminalSession {
    key_release_events: bool,
    size: (u16, u16),
}

impl TerminalSession {
    pub fn start() -> Result<Self, InitError> {
        terminal::enable_raw_mode()?;

        // From here on, drop restores whatever was changed
        let mut session = Self {
            key_release_events: false,
            size: (0, 0),
        };

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            session.key_release_events = true;
        }

        session.size = terminal::size()?;
        log::info!(
            "Terminal session started: {}x{} cells, key release events {}",
            session.size.0,
            session.size.1,
            if session.key_release_events { "on" } else { "off" }
        );

        Ok(session)
    }

    /// Terminal size in character cells (columns, rows)
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Whether the terminal reports key releases
    pub fn key_release_events(&self) -> bool {
        self.key_release_events
    }
}

/// Log a failed restore step and carry on with the rest. Returns whether
/// the step succeeded.
fn restore_step(what: &str, result: io::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to {}: {}", what, e);
            false
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.key_release_events {
            restore_step(
                "restore keyboard flags",
                execute!(stdout, PopKeyboardEnhancementFlags),
            );
        }
        restore_step(
            "leave alternate screen",
            execute!(stdout, ResetColor, Show, LeaveAlternateScreen),
        );
        restore_step("disable raw mode", terminal::disable_raw_mode());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hold {
    Released,
    UntilRelease,
    Until(Instant),
}

impl Hold {
    fn is_held_at(&self, now: Instant) -> bool {
        match *self {
            Hold::Released => false,
            Hold::UntilRelease => true,
            Hold::Until(deadline) => now < deadline,
        }
    }
}

/// Keyboard input read from the terminal event queue
pub struct TerminalInput {
    key_release_events: bool,
    left: Hold,
    right: Hold,
}

impl TerminalInput {
    /// `key_release_events`: the terminal reports releases, so held state
    /// can follow press/release exactly instead of timing out
    pub fn new(key_release_events: bool) -> Self {
        Self {
            key_release_events,
            left: Hold::Released,
            right: Hold::Released,
        }
    }

    fn slot(&mut self, key: Key) -> &mut Hold {
        match key {
            Key::MoveLeft => &mut self.left,
            Key::MoveRight => &mut self.right,
        }
    }

    fn other(key: Key) -> Key {
        match key {
            Key::MoveLeft => Key::MoveRight,
            Key::MoveRight => Key::MoveLeft,
        }
    }

    /// Apply one terminal event. Returns true if it asks to quit.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event
        else {
            return false;
        };

        let is_quit = matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
            || (*code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL));
        if is_quit && *kind != KeyEventKind::Release {
            return true;
        }

        let key = match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::MoveLeft,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::MoveRight,
            _ => return false,
        };

        let release_events = self.key_release_events;
        match kind {
            KeyEventKind::Release => *self.slot(key) = Hold::Released,
            KeyEventKind::Press if release_events => *self.slot(key) = Hold::UntilRelease,
            KeyEventKind::Repeat if release_events => {}
            KeyEventKind::Press => {
                // Terminals without release events repeat only the newest key
                *self.slot(Self::other(key)) = Hold::Released;
                *self.slot(key) = Hold::Until(now + PRESS_HOLD);
            }
            KeyEventKind::Repeat => {
                let deadline = now + REPEAT_HOLD;
                let slot = self.slot(key);
                *slot = match *slot {
                    Hold::Until(prev) if prev > deadline => Hold::Until(prev),
                    _ => Hold::Until(deadline),
                };
            }
        }

        false
    }

    pub fn is_held_at(&self, key: Key, now: Instant) -> bool {
        match key {
            Key::MoveLeft => self.left.is_held_at(now),
            Key::MoveRight => self.right.is_held_at(now),
        }
    }
}

impl InputSource for TerminalInput {
    fn poll_quit_requested(&mut self) -> bool {
        let mut quit = false;
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => match event::read() {
                    Ok(ev) => quit |= self.handle_event(&ev, Instant::now()),
                    Err(e) => {
                        log::warn!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => break,
                Err(e) => {
                    log::warn!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
        }
        quit
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.is_held_at(key, Instant::now())
    }
}
