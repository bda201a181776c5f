//! Circular progress ring, drawn on a braille canvas.
//!
//! The arc starts at twelve o'clock and sweeps clockwise in proportion to
//! `fraction`; the remainder of the circle stays as a dim track. The value
//! readout is painted over the ring centre after the canvas.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::canvas::{Canvas, Points},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_RING_TRACK, C_SECONDARY};

/// Points plotted along the full circle. Dense enough that the braille
/// raster reads as a continuous stroke at typical panel sizes.
const CIRCLE_STEPS: usize = 240;
const RADIUS: f64 = 1.0;

pub fn draw_ring(
    frame: &mut Frame,
    area: Rect,
    fraction: f64,
    color: Color,
    value_text: String,
    caption: &str,
) {
    if area.width < 8 || area.height < 4 {
        return;
    }
    let fraction = fraction.clamp(0.0, 1.0);

    let track: Vec<(f64, f64)> = (0..CIRCLE_STEPS).map(point_on_circle).collect();
    let sweep_steps = (fraction * CIRCLE_STEPS as f64).round() as usize;
    let arc: Vec<(f64, f64)> = (0..sweep_steps).map(point_on_circle).collect();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        // Wider x range compensates for the 1:2 cell aspect ratio.
        .x_bounds([-1.9, 1.9])
        .y_bounds([-1.25, 1.25])
        .paint(move |ctx| {
            ctx.draw(&Points {
                coords: &track,
                color: C_RING_TRACK,
            });
            if !arc.is_empty() {
                ctx.draw(&Points {
                    coords: &arc,
                    color,
                });
            }
        });

    frame.render_widget(canvas, area);

    // Value in the ring centre, caption one row below. The rects are kept
    // as narrow as the text so the ring stroke around them survives.
    let mid = area.y + area.height / 2;
    if let Some(row) = centered_row(area, mid.saturating_sub(1), &value_text) {
        frame.render_widget(
            Paragraph::new(value_text.clone()).style(Style::default().fg(color)),
            row,
        );
    }
    if mid < area.y + area.height {
        if let Some(row) = centered_row(area, mid, caption) {
            frame.render_widget(
                Paragraph::new(caption).style(Style::default().fg(C_SECONDARY)),
                row,
            );
        }
    }
}

/// One-row rect at `y`, horizontally centered in `area`, as wide as `text`.
fn centered_row(area: Rect, y: u16, text: &str) -> Option<Rect> {
    let w = text.chars().count() as u16;
    if w == 0 || w > area.width {
        return None;
    }
    Some(Rect {
        x: area.x + (area.width - w) / 2,
        y,
        width: w,
        height: 1,
    })
}

/// Step `i` of the circle, starting at twelve o'clock, clockwise.
fn point_on_circle(i: usize) -> (f64, f64) {
    let theta = (i as f64 / CIRCLE_STEPS as f64) * std::f64::consts::TAU;
    (RADIUS * theta.sin(), RADIUS * theta.cos())
}
