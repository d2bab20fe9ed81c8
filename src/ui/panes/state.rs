//! State pane: draws a step's payload
//!
//! Array-like payloads get bars, board-like payloads get grids. Everything
//! else falls back to the payload's pretty JSON.

use crate::runners::backtracking::{
    hanoi::{HanoiState, ROD_NAMES},
    knights_tour::TourState, maze::MazeState, nqueens::QueensState,
    sudoku::SudokuState,
};
use crate::runners::bellman_ford::BellmanFordState;
use crate::runners::greedy::{FractionalState, ItemStatus};
use crate::runners::searching::SearchState;
use crate::runners::sorting::ArrayState;
use crate::step::{Payload, Step};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const BAR_WIDTH: usize = 30;

fn plain(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(DEFAULT_THEME.fg))
}

fn colored(text: impl Into<String>, color: Color) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(color))
}

fn bold(text: impl Into<String>, color: Color) -> Span<'static> {
    Span::styled(
        text.into(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn bar(value: i64, max: i64) -> String {
    let len = if max <= 0 {
        0
    } else {
        (value.max(0) as usize * BAR_WIDTH).div_ceil(max as usize)
    };
    "█".repeat(len.max(1))
}

fn opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn array_lines(state: &ArrayState) -> Vec<Line<'static>> {
    let max = state.array.iter().copied().max().unwrap_or(0);
    let mut lines = vec![Line::from(vec![
        colored("depth ", DEFAULT_THEME.comment),
        plain(state.depth.to_string()),
        colored("  key ", DEFAULT_THEME.comment),
        plain(opt(state.key)),
        colored("  range ", DEFAULT_THEME.comment),
        plain(
            state
                .range
                .map_or_else(|| "-".to_string(), |(lo, hi)| format!("{}..={}", lo, hi)),
        ),
    ])];

    for (i, &value) in state.array.iter().enumerate() {
        let color = if state.pivot == Some(i) {
            DEFAULT_THEME.accent
        } else if state.written.contains(&i) {
            DEFAULT_THEME.error
        } else if state.compared.contains(&i) {
            DEFAULT_THEME.highlight
        } else if state.minimum == Some(i) {
            DEFAULT_THEME.secondary
        } else if state.sorted.contains(&i) {
            DEFAULT_THEME.success
        } else {
            DEFAULT_THEME.primary
        };
        let marker = if state.boundary == Some(i) { "|" } else { " " };
        lines.push(Line::from(vec![
            colored(format!("{:3}{}", i, marker), DEFAULT_THEME.comment),
            colored(bar(value, max), color),
            plain(format!(" {}", value)),
        ]));
    }

    if let Some(merge) = &state.merge {
        lines.push(Line::from(vec![
            colored("left  ", DEFAULT_THEME.comment),
            plain(format!("{:?}", merge.left)),
        ]));
        lines.push(Line::from(vec![
            colored("right ", DEFAULT_THEME.comment),
            plain(format!("{:?}", merge.right)),
        ]));
        lines.push(Line::from(vec![
            colored("out   ", DEFAULT_THEME.comment),
            plain(format!("{:?}", merge.output)),
        ]));
    }
    if state.left.is_some() || state.right.is_some() {
        let span = |side: Option<(usize, usize)>| {
            side.map_or_else(|| "-".to_string(), |(lo, hi)| format!("{}..={}", lo, hi))
        };
        lines.push(Line::from(vec![
            colored("left  ", DEFAULT_THEME.comment),
            plain(span(state.left)),
            colored("  right ", DEFAULT_THEME.comment),
            plain(span(state.right)),
        ]));
    }
    lines
}

fn search_lines(state: &SearchState) -> Vec<Line<'static>> {
    let max = state.array.iter().copied().max().unwrap_or(0);
    let mut lines = vec![Line::from(vec![
        colored("target ", DEFAULT_THEME.comment),
        bold(state.target.to_string(), DEFAULT_THEME.accent),
        colored("  low ", DEFAULT_THEME.comment),
        plain(opt(state.low)),
        colored("  high ", DEFAULT_THEME.comment),
        plain(opt(state.high)),
        colored("  mid ", DEFAULT_THEME.comment),
        plain(opt(state.mid)),
    ])];

    for (i, &value) in state.array.iter().enumerate() {
        let in_window = match (state.low, state.high) {
            (Some(low), Some(high)) => (low..=high).contains(&i),
            (Some(_), None) => false,
            _ => true,
        };
        let color = if state.found == Some(i) {
            DEFAULT_THEME.success
        } else if state.mid == Some(i) || state.current == Some(i) {
            DEFAULT_THEME.highlight
        } else if !in_window || state.checked.contains(&i) {
            DEFAULT_THEME.comment
        } else {
            DEFAULT_THEME.primary
        };
        lines.push(Line::from(vec![
            colored(format!("{:3} ", i), DEFAULT_THEME.comment),
            colored(bar(value, max), color),
            plain(format!(" {}", value)),
        ]));
    }
    lines
}

fn bellman_ford_lines(state: &BellmanFordState) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        colored("pass ", DEFAULT_THEME.comment),
        plain(state.pass.to_string()),
        colored("  source ", DEFAULT_THEME.comment),
        plain(state.source.to_string()),
    ])];

    for (v, distance) in state.distances.iter().enumerate() {
        lines.push(Line::from(vec![
            colored(format!("{:3} ", v), DEFAULT_THEME.comment),
            plain(format!(
                "{:>6}",
                distance.map_or_else(|| "∞".to_string(), |d| d.to_string())
            )),
            colored(
                format!("  via {}", opt(state.predecessors.get(v).copied().flatten())),
                DEFAULT_THEME.comment,
            ),
        ]));
    }

    lines.push(Line::from(""));
    for (i, edge) in state.edges.iter().enumerate() {
        let color = if state.negative_cycle_edge == Some(i) {
            DEFAULT_THEME.error
        } else if state.edge == Some(i) {
            DEFAULT_THEME.highlight
        } else {
            DEFAULT_THEME.fg
        };
        lines.push(Line::from(colored(
            format!("{} -> {}  w={}", edge.u, edge.v, edge.weight),
            color,
        )));
    }
    lines
}

fn hanoi_lines(state: &HanoiState) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = state
        .rods
        .iter()
        .enumerate()
        .map(|(rod, disks)| {
            let name = ROD_NAMES.get(rod).copied().unwrap_or("?");
            let color = if state.to_rod == Some(rod) {
                DEFAULT_THEME.success
            } else if state.from_rod == Some(rod) {
                DEFAULT_THEME.highlight
            } else {
                DEFAULT_THEME.primary
            };
            let disks: Vec<String> = disks.iter().map(|d| d.to_string()).collect();
            Line::from(vec![
                bold(format!("{} ", name), color),
                colored("┃ ", DEFAULT_THEME.comment),
                plain(disks.join(" ")),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(colored(
        format!("call stack (depth {})", state.recursion_depth),
        DEFAULT_THEME.comment,
    )));
    for frame in state.call_stack.iter().rev() {
        lines.push(Line::from(plain(format!(
            "  hanoi({}, {}, {}, {})",
            frame.n,
            ROD_NAMES.get(frame.from).copied().unwrap_or("?"),
            ROD_NAMES.get(frame.via).copied().unwrap_or("?"),
            ROD_NAMES.get(frame.to).copied().unwrap_or("?"),
        ))));
    }
    lines
}

/// One right-aligned text cell per square
fn grid_lines<F>(size: usize, cell: F) -> Vec<Line<'static>>
where
    F: Fn(usize, usize) -> (String, Color),
{
    (0..size)
        .map(|r| {
            let spans: Vec<Span> = (0..size)
                .map(|c| {
                    let (text, color) = cell(r, c);
                    colored(format!("{:>3}", text), color)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn queens_lines(state: &QueensState) -> Vec<Line<'static>> {
    let mut lines = grid_lines(state.n, |r, c| {
        let probing = state.row == Some(r) && state.col == Some(c);
        if state.queens.get(r).copied().flatten() == Some(c) {
            let color = if state.conflict == Some((r, c)) {
                DEFAULT_THEME.error
            } else {
                DEFAULT_THEME.success
            };
            ("Q".to_string(), color)
        } else if probing {
            let color = match state.valid {
                Some(false) => DEFAULT_THEME.error,
                _ => DEFAULT_THEME.highlight,
            };
            ("?".to_string(), color)
        } else {
            ("·".to_string(), DEFAULT_THEME.comment)
        }
    });
    lines.push(Line::from(colored(
        format!("attempts {}  depth {}", state.attempts, state.depth),
        DEFAULT_THEME.comment,
    )));
    lines
}

fn sudoku_lines(state: &SudokuState) -> Vec<Line<'static>> {
    let mut lines = grid_lines(state.board.len(), |r, c| {
        let digit = state.board[r][c];
        if state.cell == Some((r, c)) {
            let color = match state.valid {
                Some(false) => DEFAULT_THEME.error,
                _ => DEFAULT_THEME.highlight,
            };
            let shown = state.digit.unwrap_or(digit);
            (shown.to_string(), color)
        } else if digit == 0 {
            ("·".to_string(), DEFAULT_THEME.comment)
        } else if state.given[r][c] {
            (digit.to_string(), DEFAULT_THEME.fg)
        } else {
            (digit.to_string(), DEFAULT_THEME.success)
        }
    });
    if let Some(conflict) = state.conflict {
        lines.push(Line::from(colored(
            format!("conflict in {}", conflict.label()),
            DEFAULT_THEME.error,
        )));
    }
    lines
}

fn maze_lines(state: &MazeState) -> Vec<Line<'static>> {
    grid_lines(state.maze.len(), |r, c| {
        if state.position == (r, c) {
            ("@".to_string(), DEFAULT_THEME.accent)
        } else if state.candidate == Some((r, c)) {
            let color = match state.valid {
                Some(false) => DEFAULT_THEME.error,
                _ => DEFAULT_THEME.highlight,
            };
            ("?".to_string(), color)
        } else if state.path.contains(&(r, c)) {
            ("o".to_string(), DEFAULT_THEME.success)
        } else if state.maze[r][c] == 0 {
            ("█".to_string(), DEFAULT_THEME.comment)
        } else {
            ("·".to_string(), DEFAULT_THEME.fg)
        }
    })
}

fn tour_lines(state: &TourState) -> Vec<Line<'static>> {
    let mut lines = grid_lines(state.size, |r, c| {
        let visited = state.board[r][c];
        if state.position == (r, c) {
            (opt(visited), DEFAULT_THEME.accent)
        } else if state.candidate == Some((r, c)) {
            let color = match state.valid {
                Some(false) => DEFAULT_THEME.error,
                _ => DEFAULT_THEME.highlight,
            };
            ("?".to_string(), color)
        } else if state.stranded == Some((r, c)) {
            ("!".to_string(), DEFAULT_THEME.error)
        } else {
            match visited {
                Some(n) => (n.to_string(), DEFAULT_THEME.success),
                None => ("·".to_string(), DEFAULT_THEME.comment),
            }
        }
    });
    lines.push(Line::from(colored(
        format!("move {}  degree {}", state.move_number, opt(state.degree)),
        DEFAULT_THEME.comment,
    )));
    lines
}

fn fractional_lines(state: &FractionalState) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        colored("remaining ", DEFAULT_THEME.comment),
        plain(format!("{:.2}/{:.2}", state.remaining_capacity, state.capacity)),
        colored("  value ", DEFAULT_THEME.comment),
        bold(format!("{:.2}", state.total_value), DEFAULT_THEME.success),
    ])];
    for item in &state.items {
        let color = match item.status {
            ItemStatus::Full => DEFAULT_THEME.success,
            ItemStatus::Partial => DEFAULT_THEME.secondary,
            ItemStatus::Skipped => DEFAULT_THEME.comment,
            ItemStatus::Pending if state.current == Some(item.index) => DEFAULT_THEME.highlight,
            ItemStatus::Pending => DEFAULT_THEME.fg,
        };
        lines.push(Line::from(colored(
            format!(
                "#{} w={} v={} ratio={} take={:.0}%",
                item.index,
                item.weight,
                item.value,
                item.ratio.map_or_else(|| "-".to_string(), |r| format!("{:.2}", r)),
                item.fraction * 100.0
            ),
            color,
        )));
    }
    lines
}

fn json_lines(payload: &Payload) -> Vec<Line<'static>> {
    match serde_json::to_string_pretty(payload) {
        Ok(text) => text.lines().map(|l| Line::from(plain(l.to_string()))).collect(),
        Err(err) => vec![Line::from(colored(err.to_string(), DEFAULT_THEME.error))],
    }
}

/// Lines describing a payload
pub fn payload_lines(payload: &Payload) -> Vec<Line<'static>> {
    match payload {
        Payload::Array(state) => array_lines(state),
        Payload::Search(state) => search_lines(state),
        Payload::BellmanFord(state) => bellman_ford_lines(state),
        Payload::Hanoi(state) => hanoi_lines(state),
        Payload::Queens(state) => queens_lines(state),
        Payload::Sudoku(state) => sudoku_lines(state),
        Payload::Maze(state) => maze_lines(state),
        Payload::Tour(state) => tour_lines(state),
        Payload::Fractional(state) => fractional_lines(state),
        other => json_lines(other),
    }
}

/// Render the state pane for the current step
pub fn render_state_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    step: Option<&Step>,
    border_color: Color,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let lines = match step {
        Some(step) => payload_lines(&step.payload),
        None => vec![Line::from(colored("(no steps)", DEFAULT_THEME.comment))],
    };

    let visible_height = area.height.saturating_sub(2) as usize;
    *scroll = (*scroll).min(lines.len().saturating_sub(visible_height));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(*scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_to_max() {
        assert_eq!(bar(10, 10).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5, 10).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(0, 10).chars().count(), 1);
        assert_eq!(bar(-4, 0).chars().count(), 1);
    }

    #[test]
    fn test_array_payload_has_one_line_per_element() {
        let state = ArrayState {
            array: vec![3, 1, 2],
            compared: vec![0, 1],
            ..ArrayState::default()
        };
        let lines = payload_lines(&Payload::Array(state));

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].spans[1].style.fg, Some(DEFAULT_THEME.highlight));
        assert_eq!(lines[3].spans[1].style.fg, Some(DEFAULT_THEME.primary));
    }

    #[test]
    fn test_sudoku_conflict_is_named() {
        use crate::runners::backtracking::sudoku::Conflict;

        let state = SudokuState {
            cell: Some((0, 0)),
            digit: Some(5),
            valid: Some(false),
            conflict: Some(Conflict::Column),
            ..SudokuState::default()
        };
        let lines = payload_lines(&Payload::Sudoku(state));
        let last = lines.last().unwrap();

        assert_eq!(last.spans[0].content, "conflict in column");
        assert_eq!(last.spans[0].style.fg, Some(DEFAULT_THEME.error));
    }
}
