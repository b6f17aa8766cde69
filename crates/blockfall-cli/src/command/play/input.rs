use std::time::{Duration, Instant};

use blockfall_engine::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// How long a soft-drop key counts as held after its last press or repeat,
/// for terminals that never report key releases.
pub const RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

/// Action requested by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Game(InputEvent),
    TogglePause,
}

/// Turns terminal key events into game input.
///
/// Tracks whether the soft-drop key is held. When the terminal reports
/// release events the tracking is exact; otherwise the key is considered
/// released [`RELEASE_TIMEOUT`] after the last press, and terminal
/// auto-repeat presses keep it held.
#[derive(Debug, Clone)]
pub struct KeyboardState {
    release_events: bool,
    /// Last press or repeat of the soft-drop key while it is held.
    soft_drop_seen: Option<Instant>,
}

impl KeyboardState {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            soft_drop_seen: None,
        }
    }

    pub fn set_release_events(&mut self, release_events: bool) {
        self.release_events = release_events;
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_seen.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<KeyCommand> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            let ctrl_c = key.code == KeyCode::Char('c') && key.kind == KeyEventKind::Press;
            return ctrl_c.then_some(KeyCommand::Game(InputEvent::Quit));
        }

        match key.kind {
            KeyEventKind::Release => {
                if key.code == KeyCode::Down && self.soft_drop_seen.take().is_some() {
                    return Some(KeyCommand::Game(InputEvent::SoftDropRelease));
                }
                None
            }
            // Only reported together with release events.
            KeyEventKind::Repeat => {
                if key.code == KeyCode::Down && self.soft_drop_seen.is_some() {
                    self.soft_drop_seen = Some(now);
                }
                None
            }
            KeyEventKind::Press => self.handle_press(key.code, now),
        }
    }

    fn handle_press(&mut self, code: KeyCode, now: Instant) -> Option<KeyCommand> {
        let event = match code {
            KeyCode::Left => InputEvent::MoveLeft,
            KeyCode::Right => InputEvent::MoveRight,
            KeyCode::Up => InputEvent::Rotate,
            KeyCode::Down => {
                if self.soft_drop_seen.replace(now).is_some() {
                    return None;
                }
                InputEvent::SoftDropPress
            }
            KeyCode::Char('p' | 'P') => return Some(KeyCommand::TogglePause),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => InputEvent::Quit,
            _ => return None,
        };
        Some(KeyCommand::Game(event))
    }

    /// Synthesizes the soft-drop release once the key has been quiet for
    /// [`RELEASE_TIMEOUT`]. Does nothing when the terminal reports releases.
    pub fn poll_release(&mut self, now: Instant) -> Option<InputEvent> {
        if self.release_events {
            return None;
        }
        let seen = self.soft_drop_seen?;
        if now.saturating_duration_since(seen) < RELEASE_TIMEOUT {
            return None;
        }
        self.soft_drop_seen = None;
        Some(InputEvent::SoftDropRelease)
    }
}
