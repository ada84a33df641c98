//! UI rendering for the training viewer.

use super::layout::{render_status, ViewerAreas};
use flappy_neat::episode::FrameSnapshot;
use flappy_neat::simulator::GenerationStats;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Duration;

/// Width of one ground stripe in world units.
const GROUND_STRIPE: f64 = 24.0;
const INFO_WIDTH: u16 = 24;

/// What the viewer knows between frames.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    pub generation: u32,
    pub generations: u32,
    pub snapshot: Option<FrameSnapshot>,
    pub history: Vec<GenerationStats>,
    pub paused: bool,
    /// Wait between frames, changed with `+`/`-`.
    pub frame_delay: Duration,
}

impl ViewerState {
    pub fn new(generations: u32, frame_delay: Duration) -> Self {
        Self {
            generations,
            frame_delay,
            ..Default::default()
        }
    }

    fn best_score(&self) -> u32 {
        let past = self.history.iter().map(|g| g.best_score).max().unwrap_or(0);
        let current = self.snapshot.as_ref().map_or(0, |s| s.score);
        past.max(current)
    }
}

/// One character cell of the play field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Sky,
    Pipe,
    Ground { light: bool },
    Bird { glyph: char, leader: bool, flap: bool },
}

/// Project a snapshot onto a `width` x `height` character grid.
pub fn rasterize(snapshot: &FrameSnapshot, width: usize, height: usize) -> Vec<Vec<Cell>> {
    let mut grid = vec![vec![Cell::Sky; width]; height];
    if width == 0 || height == 0 || snapshot.canvas_width <= 0.0 || snapshot.canvas_height <= 0.0 {
        return grid;
    }

    let x_scale = width as f64 / snapshot.canvas_width;
    let y_scale = height as f64 / snapshot.canvas_height;
    let ground = &snapshot.ground;

    for (row, cells) in grid.iter_mut().enumerate() {
        let game_y = (row as f64 + 0.5) / y_scale;
        for (col, cell) in cells.iter_mut().enumerate() {
            let game_x = (col as f64 + 0.5) / x_scale;

            if game_y >= ground.y {
                let phase = (game_x - ground.x1).rem_euclid(GROUND_STRIPE * 2.0);
                *cell = Cell::Ground {
                    light: phase < GROUND_STRIPE,
                };
                continue;
            }

            let in_pipe = snapshot.pipes.iter().any(|pipe| {
                game_x >= pipe.x
                    && game_x < pipe.x + pipe.width
                    && (game_y < pipe.gap_top || game_y >= pipe.gap_bottom)
            });
            if in_pipe {
                *cell = Cell::Pipe;
            }
        }
    }

    let leader = snapshot
        .birds
        .iter()
        .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
        .map(|b| b.agent);

    for bird in &snapshot.birds {
        let center_x = bird.x + snapshot.bird_width / 2.0;
        let center_y = bird.y + snapshot.bird_height / 2.0;
        if center_x < 0.0 || center_y < 0.0 {
            continue;
        }
        let col = (center_x * x_scale) as usize;
        let row = (center_y * y_scale) as usize;
        if row >= height || col >= width {
            continue;
        }

        let glyph = if bird.tilt <= -80.0 {
            '▼'
        } else if bird.tilt > 0.0 {
            '▲'
        } else {
            '►'
        };
        let is_leader = Some(bird.agent) == leader;
        // Keep the leader visible when birds overlap.
        if matches!(grid[row][col], Cell::Bird { leader: true, .. }) && !is_leader {
            continue;
        }
        grid[row][col] = Cell::Bird {
            glyph,
            leader: is_leader,
            flap: bird.wing_frame == 0,
        };
    }

    grid
}

/// Render the viewer scene.
pub fn render_flappy(frame: &mut Frame, area: Rect, state: &ViewerState) {
    frame.render_widget(Clear, area);
    let outer = Block::default()
        .title(" Flappy NEAT ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let areas = ViewerAreas::split(outer.inner(area), INFO_WIDTH);
    frame.render_widget(outer, area);

    match &state.snapshot {
        Some(snapshot) => render_play_area(frame, areas.field, snapshot),
        None => {
            let waiting = Paragraph::new("Spawning population...")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(waiting, areas.field);
        }
    }
    render_status(
        frame,
        areas.status,
        &status_summary(state),
        state.frame_delay,
        state.paused,
    );
    if areas.info.width > 0 {
        render_info_panel(frame, areas.info, state);
    }
}

/// Render the play field with pipes, ground and birds.
fn render_play_area(frame: &mut Frame, area: Rect, snapshot: &FrameSnapshot) {
    let grid = rasterize(snapshot, area.width as usize, area.height as usize);

    let lines: Vec<Line> = grid
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| match *cell {
                        Cell::Sky => Span::raw(" "),
                        Cell::Pipe => Span::styled("█", Style::default().fg(Color::Green)),
                        Cell::Ground { light } => Span::styled(
                            "▓",
                            Style::default().fg(if light {
                                Color::Yellow
                            } else {
                                Color::LightYellow
                            }),
                        ),
                        Cell::Bird {
                            glyph,
                            leader,
                            flap,
                        } => {
                            let mut style = Style::default().fg(if leader {
                                Color::LightRed
                            } else {
                                Color::Yellow
                            });
                            if flap || leader {
                                style = style.add_modifier(Modifier::BOLD);
                            }
                            Span::styled(glyph.to_string(), style)
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn status_summary(state: &ViewerState) -> String {
    match &state.snapshot {
        Some(snapshot) => format!(" Score: {}  Alive: {}", snapshot.score, snapshot.alive),
        None => " Waiting for first frame".to_string(),
    }
}

/// Render the info panel on the right.
fn render_info_panel(frame: &mut Frame, area: Rect, state: &ViewerState) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Generation: ", label),
            Span::styled(
                format!("{}/{}", state.generation + 1, state.generations),
                value,
            ),
        ]),
        Line::from(""),
    ];

    if let Some(snapshot) = &state.snapshot {
        lines.push(Line::from(vec![
            Span::styled(" Frame: ", label),
            Span::styled(snapshot.frame.to_string(), value),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Alive: ", label),
            Span::styled(snapshot.alive.to_string(), Style::default().fg(Color::Green)),
        ]));
        let leader = snapshot
            .birds
            .iter()
            .map(|b| b.fitness)
            .fold(f64::NEG_INFINITY, f64::max);
        if leader.is_finite() {
            lines.push(Line::from(vec![
                Span::styled(" Fitness: ", label),
                Span::styled(format!("{:.1}", leader), Style::default().fg(Color::Yellow)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Best score: ", label),
        Span::styled(state.best_score().to_string(), value),
    ]));

    if let Some(last) = state.history.last() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Last generation:", label)));
        lines.push(Line::from(format!("  best {:.1}", last.best_fitness)));
        lines.push(Line::from(format!("  mean {:.1}", last.mean_fitness)));
        lines.push(Line::from(format!("  frames {}", last.frames)));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
