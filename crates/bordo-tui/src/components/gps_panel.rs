//! GpsPanel — position readout plus a trail of recent random-walk steps.
//!
//! The trail is presentation-only state: the dashboard keeps just the
//! current coordinate, the panel remembers where it has been.

use std::collections::VecDeque;

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Line,
    widgets::canvas::{Canvas, Points},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::action::ComponentId;
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{self, C_ACCENT, C_CHROME, C_SECONDARY};

/// Steps of history kept. At one fix per 5 s this is ~5 minutes of drift.
const TRAIL_LEN: usize = 64;

/// Half-extent of the plotted window, degrees. Big enough that a full trail
/// of ±0.0005 steps stays inside.
const VIEW_HALF_DEG: f64 = 0.02;

pub struct GpsPanel {
    trail: VecDeque<(f64, f64)>,
}

impl GpsPanel {
    pub fn new() -> Self {
        Self {
            trail: VecDeque::with_capacity(TRAIL_LEN),
        }
    }
}

impl Component for GpsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Gps
    }

    fn tick(&mut self, state: &AppState) -> Vec<crate::action::Action> {
        let pos = state.dashboard.position;
        let point = (pos.longitude, pos.latitude);
        if self.trail.back() != Some(&point) {
            self.trail.push_back(point);
            while self.trail.len() > TRAIL_LEN {
                self.trail.pop_front();
            }
        }
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" GPS ")
            .border_style(theme::style_unfocused_border())
            .title_style(theme::style_chrome());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 3 || inner.width < 10 {
            return;
        }

        let pos = state.dashboard.position;
        let map_area = Rect {
            height: inner.height - 1,
            ..inner
        };

        // Window centred on the first trail point so movement is visible.
        let origin = self.trail.front().copied().unwrap_or((pos.longitude, pos.latitude));
        let trail: Vec<(f64, f64)> = self.trail.iter().copied().collect();
        let current = (pos.longitude, pos.latitude);

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([origin.0 - VIEW_HALF_DEG, origin.0 + VIEW_HALF_DEG])
            .y_bounds([origin.1 - VIEW_HALF_DEG, origin.1 + VIEW_HALF_DEG])
            .paint(move |ctx| {
                ctx.draw(&Points {
                    coords: &trail,
                    color: C_SECONDARY,
                });
                ctx.draw(&Points {
                    coords: &[current],
                    color: C_ACCENT,
                });
            });
        frame.render_widget(canvas, map_area);

        let fix = state.dashboard.fix_at.format("%H:%M:%S");
        let readout = format!("LAT {:.4}  LON {:.4}  @{fix}", pos.latitude, pos.longitude);
        let label_area = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };
        frame.render_widget(
            Paragraph::new(Line::styled(readout, Style::default().fg(C_CHROME))),
            label_area,
        );
    }
}
