//! Keystroke input handling using crossterm
//!
//! Features:
//! - Non-blocking keystroke capture
//! - Key to drill command mapping
//! - Ctrl+C / Escape graceful exit

use crate::fretboard::StringId;
use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Result as IoResult;
use std::time::Duration;

/// What a key press asks the drill to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start practice or skip to the next note
    Next,
    ShowAnswer,
    GotIt,
    MissedIt,
    ToggleString(StringId),
    SelectAllStrings,
    CycleDifficulty,
    ToggleAudio,
    ReplayNote,
    ResetScore,
    EndGame,
    NewGame,
}

/// Handles user input from terminal
pub struct InputHandler {
    /// Timeout for poll operations
    poll_timeout: Duration,
}

impl InputHandler {
    /// Create new input handler with default timeout (50ms keeps the countdown smooth)
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::from_millis(50),
        }
    }

    /// Enable raw mode for terminal input
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Disable raw mode and restore terminal
    pub fn disable_raw_mode() -> IoResult<()> {
        crossterm::terminal::disable_raw_mode()
    }

    /// Poll for a key press with timeout (non-blocking)
    /// Returns Some(KeyEvent) if key pressed, None if timeout
    pub fn read_key(&self) -> Result<Option<KeyEvent>, Box<dyn std::error::Error>> {
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                event::Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                    Ok(Some(key_event))
                }
                _ => Ok(None),
            }
        } else {
            Ok(None)
        }
    }

    /// Check if key event is an exit signal (Ctrl+C or Escape)
    pub fn is_exit(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Esc => true,
            _ => false,
        }
    }

    /// Map a key to a drill command
    pub fn command(key: &KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
        {
            return None;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Next),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'a' => Some(Command::ShowAnswer),
                'y' => Some(Command::GotIt),
                'n' => Some(Command::MissedIt),
                '0' => Some(Command::SelectAllStrings),
                'd' => Some(Command::CycleDifficulty),
                's' => Some(Command::ToggleAudio),
                'r' => Some(Command::ReplayNote),
                'x' => Some(Command::ResetScore),
                'e' => Some(Command::EndGame),
                'g' => Some(Command::NewGame),
                digit => digit
                    .to_digit(10)
                    .and_then(|d| StringId::new(d as u8))
                    .map(Command::ToggleString),
            },
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
