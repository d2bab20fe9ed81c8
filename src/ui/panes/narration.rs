//! Narration pane: the current step's kind and description

use crate::step::Step;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render_narration_pane(frame: &mut Frame, area: Rect, step: Option<&Step>) {
    let block = Block::default()
        .title(" Narration ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let lines = match step {
        Some(step) => {
            let badge_bg = if step.is_terminal() {
                DEFAULT_THEME.success
            } else {
                DEFAULT_THEME.primary
            };
            vec![
                Line::from(vec![
                    Span::styled(
                        format!(" {} ", step.kind),
                        Style::default()
                            .bg(badge_bg)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  line {}", step.code_line),
                        Style::default().fg(DEFAULT_THEME.comment),
                    ),
                ]),
                Line::from(Span::styled(
                    step.description.clone(),
                    Style::default().fg(DEFAULT_THEME.fg),
                )),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Nothing to replay",
            Style::default().fg(DEFAULT_THEME.comment),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
