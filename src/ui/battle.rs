//! Battle screen: two runners replayed side by side

use crate::battle::arena::{Arena, BattleSetup};
use crate::battle::{ExecutionState, Side, Winner};
use crate::config::Speed;
use crate::ui::panes::{self, Badge};
use crate::ui::theme::DEFAULT_THEME;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use std::io;
use std::time::{Duration, Instant};

pub struct BattleApp {
    pub arena: Arena,
    pub speed: Speed,
    pub last_tick: Instant,
    pub scroll_a: usize,
    pub scroll_b: usize,
    pub should_quit: bool,
    pub status_message: String,
}

impl BattleApp {
    pub fn new(arena: Arena, speed: Speed) -> Self {
        BattleApp {
            arena,
            speed,
            last_tick: Instant::now(),
            scroll_a: 0,
            scroll_b: 0,
            should_quit: false,
            status_message: String::from("Press space to start"),
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.last_tick.elapsed() >= self.speed.tick_interval() {
                self.on_tick();
                self.last_tick = Instant::now();
            }

            if event::poll(Duration::from_millis(20))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Timer callback
    pub fn on_tick(&mut self) {
        let engine = self.arena.engine_mut();
        if engine.tick() && engine.state() == ExecutionState::Finished {
            self.status_message = "Battle finished".to_string();
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                let engine = self.arena.engine_mut();
                engine.toggle();
                self.status_message = match engine.state() {
                    ExecutionState::Running => "Running...",
                    ExecutionState::Paused => "Paused",
                    ExecutionState::Finished => "Battle finished, press r to reset",
                    ExecutionState::Idle => "Nothing to run",
                }
                .to_string();
            }
            KeyCode::Right => {
                self.status_message = if self.arena.engine_mut().step() {
                    "Stepped".to_string()
                } else {
                    "Battle finished, press r to reset".to_string()
                };
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.arena.engine_mut().reset();
                self.scroll_a = 0;
                self.scroll_b = 0;
                self.status_message = "Reset".to_string();
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                let setup = BattleSetup {
                    seed: self.arena.setup().seed.wrapping_add(1),
                    ..self.arena.setup().clone()
                };
                self.status_message = match self.arena.reconfigure(setup) {
                    Ok(()) => format!("New data, seed {}", self.arena.setup().seed),
                    Err(err) => err.to_string(),
                };
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.speed = self.speed.next();
                self.status_message = format!("Speed: {}", self.speed.label());
            }
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_banner(frame, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let mut scroll_a = self.scroll_a;
        let mut scroll_b = self.scroll_b;
        self.render_side(frame, columns[0], Side::A, &mut scroll_a);
        self.render_side(frame, columns[1], Side::B, &mut scroll_b);
        self.scroll_a = scroll_a;
        self.scroll_b = scroll_b;

        let engine = self.arena.engine();
        let step_label = format!(
            "Tick {} · {}",
            engine.ticks(),
            engine.state().label()
        );
        let badge = match engine.state() {
            ExecutionState::Running => Badge::Playing,
            ExecutionState::Finished => Badge::End,
            ExecutionState::Idle => Badge::Start,
            ExecutionState::Paused => Badge::None,
        };
        let speed_label = format!("speed: {}", self.speed.label());
        panes::render_status_bar(
            frame,
            rows[2],
            &step_label,
            &self.status_message,
            &[
                ("⎵", "run/pause"),
                ("→", "step"),
                ("r", "reset"),
                ("n", "new data"),
                ("s", speed_label.as_str()),
                ("q", "quit"),
            ],
            badge,
        );
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect) {
        let setup = self.arena.setup();
        let engine = self.arena.engine();

        let (text, color) = match engine.winner() {
            Some(Winner::A) => (format!("🏆 {} wins!", setup.algo_a), DEFAULT_THEME.side_a),
            Some(Winner::B) => (format!("🏆 {} wins!", setup.algo_b), DEFAULT_THEME.side_b),
            Some(Winner::Tie) => ("It's a tie!".to_string(), DEFAULT_THEME.highlight),
            None => (
                format!("{} vs {}", setup.algo_a, setup.algo_b),
                DEFAULT_THEME.fg,
            ),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
            .title(format!(
                " size {} · {:?} · seed {} ",
                setup.size, setup.shape, setup.seed
            ));
        let banner = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(banner, area);
    }

    fn render_side(&self, frame: &mut Frame, area: Rect, side: Side, scroll: &mut usize) {
        let engine = self.arena.engine();
        let setup = self.arena.setup();
        let (name, color) = match side {
            Side::A => (setup.algo_a.as_str(), DEFAULT_THEME.side_a),
            Side::B => (setup.algo_b.as_str(), DEFAULT_THEME.side_b),
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(5),
            ])
            .split(area);

        let trace_len = engine.trace(side).len();
        let shown = if trace_len == 0 { 0 } else { engine.cursor(side) + 1 };
        let gauge_color: Color = if engine.winner() == Some(Winner::from(side)) {
            DEFAULT_THEME.success
        } else {
            color
        };
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(format!(" {} ", name)),
            )
            .gauge_style(Style::default().fg(gauge_color).bg(DEFAULT_THEME.current_line_bg))
            .ratio(engine.progress(side).clamp(0.0, 1.0))
            .label(format!("{}/{}", shown, trace_len));
        frame.render_widget(gauge, rows[0]);

        let step = engine.current_step(side);
        panes::render_state_pane(frame, rows[1], "State", step, color, scroll);
        panes::render_narration_pane(frame, rows[2], step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Limits;
    use crate::registry::Registry;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut BattleApp, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app() -> BattleApp {
        let arena =
            Arena::new(Registry::standard(), Limits::default(), BattleSetup::default()).unwrap();
        BattleApp::new(arena, Speed::Fast)
    }

    #[test]
    fn test_space_toggles_run_and_pause() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.arena.engine().state(), ExecutionState::Running);

        app.on_tick();
        assert_eq!(app.arena.engine().ticks(), 1);

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.arena.engine().state(), ExecutionState::Paused);
        app.on_tick();
        assert_eq!(app.arena.engine().ticks(), 1);
    }

    #[test]
    fn test_right_steps_and_r_resets() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.arena.engine().cursor(Side::A), 2);
        assert_eq!(app.arena.engine().state(), ExecutionState::Paused);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.arena.engine().cursor(Side::A), 0);
        assert_eq!(app.arena.engine().state(), ExecutionState::Idle);
    }

    #[test]
    fn test_new_data_bumps_seed() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.arena.setup().seed, 1);
        assert_eq!(app.status_message, "New data, seed 1");
    }
}
