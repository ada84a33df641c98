//! Screen geometry and the status bar of the training viewer.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

/// Keys the viewer reacts to, as shown in the hint row.
pub const KEY_HINTS: [(&str, &str); 3] = [("Space", "pause"), ("+/-", "speed"), ("q", "quit")];

/// Narrowest play field before the info column starts giving up width.
const MIN_FIELD_WIDTH: u16 = 40;
const STATUS_HEIGHT: u16 = 2;

/// Where each part of the viewer goes inside the outer border.
///
/// ```text
/// ┌ Flappy NEAT ───────────────────┬ Info ──┐
/// │ field                          │        │
/// │ status: score, speed           │        │
/// │ key hints                      │        │
/// └────────────────────────────────┴────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerAreas {
    pub field: Rect,
    pub status: Rect,
    pub info: Rect,
}

impl ViewerAreas {
    /// Split the area inside the outer border. The info column shrinks, down
    /// to nothing, so the play field keeps at least `MIN_FIELD_WIDTH` columns.
    pub fn split(inner: Rect, info_width: u16) -> Self {
        let info_width = info_width.min(inner.width.saturating_sub(MIN_FIELD_WIDTH));

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(info_width)])
            .split(inner);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
            .split(columns[0]);

        Self {
            field: rows[0],
            status: rows[1],
            info: columns[1],
        }
    }
}

/// Playback speed as shown in the status bar.
pub fn speed_label(frame_delay: Duration, paused: bool) -> String {
    if paused {
        "paused".to_string()
    } else if frame_delay.is_zero() {
        "full speed".to_string()
    } else {
        format!("{} ms/frame", frame_delay.as_millis())
    }
}

pub fn key_hints() -> Line<'static> {
    let mut spans = Vec::with_capacity(KEY_HINTS.len() * 2);
    for (i, (key, action)) in KEY_HINTS.iter().enumerate() {
        let key = if i == 0 {
            key.to_string()
        } else {
            format!("  {}", key)
        };
        spans.push(Span::styled(key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Status row with `summary` on the left and the playback speed on the
/// right, then the key hints below it.
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    summary: &str,
    frame_delay: Duration,
    paused: bool,
) {
    if area.height == 0 {
        return;
    }
    let speed = speed_label(frame_delay, paused);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(speed.len() as u16 + 1)])
        .split(Rect { height: 1, ..area });

    frame.render_widget(
        Paragraph::new(summary).style(Style::default().fg(Color::Green)),
        top[0],
    );
    let speed_style = if paused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    frame.render_widget(
        Paragraph::new(speed)
            .style(speed_style)
            .alignment(Alignment::Right),
        top[1],
    );

    if area.height >= 2 {
        frame.render_widget(
            Paragraph::new(key_hints()).alignment(Alignment::Center),
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}
