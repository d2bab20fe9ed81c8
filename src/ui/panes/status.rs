//! Status bar rendering with keybindings and state indicators

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// What the right-hand badge of the status bar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Playing,
    End,
    Start,
    None,
}

impl Badge {
    pub fn for_position(current: usize, total: usize, is_playing: bool) -> Self {
        if is_playing {
            Badge::Playing
        } else if total > 0 && current + 1 >= total {
            Badge::End
        } else if current == 0 {
            Badge::Start
        } else {
            Badge::None
        }
    }
}

/// Render the status bar at the bottom.
///
/// `keybinds` pairs a key label with its description.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    step_label: &str,
    message: &str,
    keybinds: &[(&str, &str)],
    badge: Badge,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left_spans = vec![
        Span::styled(
            format!(" {} ", step_label),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in keybinds.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(format!(" {} ", key), key_style));
        right_spans.push(Span::styled(format!(" {} ", desc), desc_style));
    }

    let badge_span = match badge {
        Badge::Playing => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
        Badge::End => Some((" END ", DEFAULT_THEME.error)),
        Badge::Start => Some((" START ", DEFAULT_THEME.success)),
        Badge::None => None,
    };
    if let Some((text, bg)) = badge_span {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_for_position() {
        assert_eq!(Badge::for_position(0, 10, false), Badge::Start);
        assert_eq!(Badge::for_position(4, 10, false), Badge::None);
        assert_eq!(Badge::for_position(9, 10, false), Badge::End);
        assert_eq!(Badge::for_position(9, 10, true), Badge::Playing);
        assert_eq!(Badge::for_position(0, 0, false), Badge::Start);
    }
}
