use std::{mem, time::Instant};

use blockfall_engine::{FrameClock, FrameInput, GameConfig, GameSession, InputEvent, PieceSeed};
use crossterm::event::{Event, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use ratatui_runtime::{App, Runtime};

use crate::{
    command::play::input::{KeyCommand, KeyboardState},
    ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

const PLAYING_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↑"], "Rotate"),
    (&["↓"], "Soft Drop (hold: Hard Drop)"),
    (&["P"], "Pause"),
    (&["Q", "Esc"], "Quit"),
];

const PAUSED_BINDINGS: &[KeyBinding] = &[(&["P"], "Resume"), (&["Q", "Esc"], "Quit")];

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    clock: FrameClock,
    keyboard: KeyboardState,
    /// Events received since the last frame.
    pending: Vec<InputEvent>,
    frame_rate: u32,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(config: GameConfig, seed: PieceSeed, frame_rate: u32) -> Self {
        Self {
            session: GameSession::new(config, seed),
            clock: FrameClock::new(),
            keyboard: KeyboardState::new(false),
            pending: vec![],
            frame_rate,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Paused play is a frozen game clock.
    fn is_paused(&self) -> bool {
        self.clock.is_frozen()
    }

    fn toggle_pause(&mut self) {
        self.clock.set_frozen(!self.is_paused());
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match self.keyboard.handle_key(key, now) {
            Some(KeyCommand::TogglePause) => self.toggle_pause(),
            // While paused only quitting and letting go of soft drop get through.
            Some(KeyCommand::Game(event))
                if !self.is_paused() || event.is_quit() || event.is_soft_drop_release() =>
            {
                self.pending.push(event);
            }
            Some(KeyCommand::Game(_)) | None => {}
        }
    }

    /// Runs one game frame at `now` with the events received since the last one.
    fn step(&mut self, now: Instant) {
        if let Some(release) = self.keyboard.poll_release(now) {
            self.pending.push(release);
        }
        let time = self.clock.tick_at(now);
        let input = FrameInput {
            events: mem::take(&mut self.pending),
            soft_drop_held: self.keyboard.soft_drop_held(),
        };
        let report = self.session.update(&input, time);
        if report.quit {
            self.is_exiting = true;
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_frame_rate(Some(f64::from(self.frame_rate)));
        runtime.enable_keyboard_enhancement();
        self.clock = FrameClock::new();
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_event() {
            self.handle_key(key, Instant::now());
        }
    }

    fn update(&mut self, runtime: &mut Runtime) {
        self.keyboard
            .set_release_events(runtime.key_release_events());
        self.step(Instant::now());
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.session).paused(self.is_paused());
        let bindings = if self.is_paused() {
            PAUSED_BINDINGS
        } else {
            PLAYING_BINDINGS
        };

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }
}
