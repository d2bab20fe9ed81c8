//! Single-trace player: state, keyboard handling and event loop

use crate::config::Speed;
use crate::step::{Step, Trace};
use crate::ui::panes::{self, Badge, CodeScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};

const SPACE_DEBOUNCE: Duration = Duration::from_millis(200);

/// The player application state
pub struct App {
    /// Runner display name, used as the code pane title
    pub title: String,

    pub pseudocode: &'static [&'static str],

    pub trace: Trace,

    /// Index of the step on screen
    pub cursor: usize,

    pub speed: Speed,

    pub code_scroll: CodeScrollState,
    pub state_scroll: usize,

    pub should_quit: bool,
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(
        title: impl Into<String>,
        pseudocode: &'static [&'static str],
        trace: Trace,
        speed: Speed,
    ) -> Self {
        let now = Instant::now();
        App {
            title: title.into(),
            pseudocode,
            trace,
            cursor: 0,
            speed,
            code_scroll: CodeScrollState::default(),
            state_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: now,
            last_space_press: now.checked_sub(SPACE_DEBOUNCE).unwrap_or(now),
        }
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.trace.get(self.cursor)
    }

    pub fn at_end(&self) -> bool {
        self.cursor + 1 >= self.trace.len()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= self.speed.tick_interval() {
                self.play_tick();
                self.last_play_time = Instant::now();
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// One autoplay advance; stops at the last step
    pub fn play_tick(&mut self) {
        if self.step_forward() {
            self.status_message = "Playing...".to_string();
        } else {
            self.is_playing = false;
            self.status_message = "Playback complete".to_string();
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(5)])
            .split(columns[1]);

        let step = self.trace.get(self.cursor);
        let code_line = step.map_or(0, |s| s.code_line as usize);

        panes::render_code_pane(
            frame,
            columns[0],
            &self.title,
            self.pseudocode,
            code_line,
            &mut self.code_scroll,
        );
        panes::render_state_pane(
            frame,
            right_rows[0],
            "State",
            step,
            crate::ui::theme::DEFAULT_THEME.border_focused,
            &mut self.state_scroll,
        );
        panes::render_narration_pane(frame, right_rows[1], step);

        let step_label = if self.trace.is_empty() {
            "Step 0/0".to_string()
        } else {
            format!("Step {}/{}", self.cursor + 1, self.trace.len())
        };
        let speed_label = format!("speed: {}", self.speed.label());
        panes::render_status_bar(
            frame,
            main_chunks[1],
            &step_label,
            &self.status_message,
            &[
                ("←/→", "step"),
                ("⎵", "play"),
                ("↵ / ⌫", "end/start"),
                ("s", speed_label.as_str()),
                ("q", "quit"),
            ],
            Badge::for_position(self.cursor, self.trace.len(), self.is_playing),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let stepped = (0..n).take_while(|_| self.step_forward()).count();
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.status_message = if self.step_backward() {
                    "Stepped backward".to_string()
                } else {
                    "Already at the first step".to_string()
                };
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.status_message = if self.step_forward() {
                    "Stepped forward".to_string()
                } else {
                    "Already at the last step".to_string()
                };
            }
            KeyCode::Up => {
                self.state_scroll = self.state_scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                self.state_scroll = self.state_scroll.saturating_add(1);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.speed = self.speed.next();
                self.status_message = format!("Speed: {}", self.speed.label());
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode, debounced against key repeat
                if self.last_space_press.elapsed() >= SPACE_DEBOUNCE {
                    self.last_space_press = Instant::now();
                    self.toggle_play();
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.cursor = self.trace.len().saturating_sub(1);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.cursor = 0;
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.is_playing = false;
            self.status_message = "Paused".to_string();
        } else if self.at_end() {
            self.status_message = "Already at the last step".to_string();
        } else {
            self.is_playing = true;
            let now = Instant::now();
            self.last_play_time = now.checked_sub(self.speed.tick_interval()).unwrap_or(now);
            self.status_message = "Playing...".to_string();
        }
    }

    /// Move one step forward. Returns false at the last step.
    pub fn step_forward(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Move one step back. Returns false at the first step.
    pub fn step_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn bubble_app() -> App {
        let registry = Registry::standard();
        let runner = registry.get("bubble-sort").unwrap();
        let trace = runner
            .generate(&runner.default_input(), &Default::default())
            .unwrap();
        App::new(runner.name(), runner.pseudocode(), trace, Speed::Normal)
    }

    #[test]
    fn test_arrow_keys_move_cursor_within_bounds() {
        let mut app = bubble_app();

        press(&mut app, KeyCode::Left);
        assert_eq!(app.cursor, 0);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.cursor, 2);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_digit_keys_step_multiple() {
        let mut app = bubble_app();
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.cursor, 5);
        assert_eq!(app.status_message, "Stepped forward 5 step(s)");
    }

    #[test]
    fn test_enter_and_backspace_jump() {
        let mut app = bubble_app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.cursor, app.trace.len() - 1);
        assert!(app.current_step().unwrap().is_terminal());

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.current_step().unwrap().kind, "init");
    }

    #[test]
    fn test_play_stops_at_end() {
        let mut app = bubble_app();
        app.toggle_play();
        assert!(app.is_playing);

        for _ in 0..app.trace.len() {
            app.play_tick();
        }
        assert!(!app.is_playing);
        assert!(app.at_end());
        assert_eq!(app.status_message, "Playback complete");
    }

    #[test]
    fn test_empty_trace_does_not_move() {
        let mut app = App::new("empty", &[], Trace::new(10), Speed::Fast);
        assert!(!app.step_forward());
        assert!(!app.step_backward());
        app.toggle_play();
        assert!(!app.is_playing);
        assert!(app.current_step().is_none());
    }

    #[test]
    fn test_q_quits() {
        let mut app = bubble_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
