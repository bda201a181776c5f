//! Visualizer — the fake audio-frequency bar display along the bottom.
//!
//! Bar heights come straight from the dashboard spectrum (random per frame,
//! not an FFT). When no sound is "transmitting" the panel shows the idle
//! horizontal scan lines instead.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::ComponentId;
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{viz_gradient, C_MUTED};

/// Partial vertical blocks, 1/8 through 8/8.
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub struct Visualizer;

impl Visualizer {
    pub fn new() -> Self {
        Self
    }

    fn draw_bars(frame: &mut Frame, area: Rect, spectrum: &[f32]) {
        if spectrum.is_empty() {
            return;
        }
        let width = area.width as usize;
        let height = area.height as usize;

        // Nearest-sample resample of the spectrum onto the panel width.
        let heights: Vec<f32> = (0..width)
            .map(|col| {
                let idx = col * spectrum.len() / width.max(1);
                spectrum[idx.min(spectrum.len() - 1)].clamp(0.0, 1.0)
            })
            .collect();

        let mut lines = Vec::with_capacity(height);
        for row in 0..height {
            // Eighths of a cell still above this row, counted from the bottom.
            let row_from_bottom = (height - 1 - row) as f32;
            let mut spans = Vec::with_capacity(width);
            for (col, &h) in heights.iter().enumerate() {
                let cell_eighths = ((h * height as f32 - row_from_bottom) * 8.0).round() as i32;
                let ch = if cell_eighths >= 8 {
                    '█'
                } else if cell_eighths >= 1 {
                    BLOCKS[(cell_eighths - 1) as usize]
                } else {
                    ' '
                };
                let color = viz_gradient(col as f32 / width.max(1) as f32);
                spans.push(Span::styled(ch.to_string(), Style::default().fg(color)));
            }
            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_idle(frame: &mut Frame, area: Rect) {
        let mut lines = Vec::with_capacity(area.height as usize);
        for row in 0..area.height {
            let line = if row % 2 == 0 {
                Line::styled("─".repeat(area.width as usize), Style::default().fg(C_MUTED))
            } else {
                Line::raw("")
            };
            lines.push(line);
        }
        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Component for Visualizer {
    fn id(&self) -> ComponentId {
        ComponentId::Visualizer
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        if state.dashboard.overlays.music {
            Self::draw_bars(frame, area, &state.dashboard.spectrum);
        } else {
            Self::draw_idle(frame, area);
        }
    }
}
