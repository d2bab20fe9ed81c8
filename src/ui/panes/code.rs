//! Pseudocode pane
//!
//! Shows a runner's pseudocode listing with the line of the current step
//! highlighted. The highlighted line is pinned to a target row so stepping
//! does not make the listing jump around.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const KEYWORDS: &[&str] = &[
    "procedure", "for", "to", "downto", "while", "if", "else", "then", "return", "and", "or",
    "not", "break", "swap", "function",
];

/// Keyword and number colouring for one pseudocode line
fn highlight_pseudocode(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut word = String::new();

    let flush = |word: &mut String, spans: &mut Vec<Span<'static>>| {
        if word.is_empty() {
            return;
        }
        let style = if KEYWORDS.contains(&word.as_str()) {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD)
        } else if word.chars().all(|c| c.is_ascii_digit()) {
            Style::default().fg(DEFAULT_THEME.number)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        spans.push(Span::styled(std::mem::take(word), style));
    };

    for c in line.chars() {
        if c.is_alphanumeric() || c == '_' {
            word.push(c);
            continue;
        }
        flush(&mut word, &mut spans);
        let style = match c {
            '(' | ')' | '[' | ']' | '{' | '}' => Style::default().fg(DEFAULT_THEME.primary),
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
    }
    flush(&mut word, &mut spans);

    Line::from(spans)
}

/// Scroll state for the code pane
#[derive(Debug, Default)]
pub struct CodeScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the pseudocode pane. `current_line` is 1-based; 0 highlights nothing.
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    pseudocode: &[&str],
    current_line: usize,
    scroll_state: &mut CodeScrollState,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let total_lines = pseudocode.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = if total_lines > visible_height {
            (current_line - 1)
                .saturating_sub(target_row)
                .min(total_lines - visible_height)
        } else {
            0
        };
    }

    let lines: Vec<Line> = pseudocode
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, text)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content = highlight_pseudocode(text);
            if is_current {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content.spans {
                    span.style = span.style.patch(bg);
                }
            }

            let marker = if is_current { "▶" } else { " " };
            let mut spans = vec![Span::styled(format!("{}{:3} ", marker, line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_split_from_identifiers() {
        let line = highlight_pseudocode("  for i = 0 to n");
        let words: Vec<String> = line
            .spans
            .iter()
            .map(|s| s.content.to_string())
            .filter(|w| !w.trim().is_empty())
            .collect();

        assert_eq!(words, vec!["for", "i", "=", "0", "to", "n"]);
        assert_eq!(line.spans[2].style.fg, Some(DEFAULT_THEME.keyword));
    }
}
