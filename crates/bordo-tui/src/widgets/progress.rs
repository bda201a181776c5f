//! Smooth Unicode progress bar for the playback clock.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_ACCENT, C_MUTED, C_SECONDARY};

/// Render a smooth progress bar in `area` with `played / duration` labels.
pub fn draw_progress(frame: &mut Frame, area: Rect, played_secs: u32, duration_secs: u32) {
    if area.width < 12 || area.height == 0 {
        return;
    }

    let left_label = fmt_time(played_secs);
    let right_label = fmt_time(duration_secs);
    let label_w = (left_label.len() + right_label.len() + 2) as u16;
    let bar_w = area.width.saturating_sub(label_w).max(4) as usize;

    let progress = if duration_secs == 0 {
        0.0
    } else {
        (played_secs as f64 / duration_secs as f64).clamp(0.0, 1.0)
    };

    // Unicode smooth fill: 8 eighths per cell
    let eighths = (progress * bar_w as f64 * 8.0) as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

    let mut bar = String::with_capacity(bar_w + 4);
    for _ in 0..full_blocks {
        bar.push('█');
    }
    if full_blocks < bar_w {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..bar_w {
            bar.push(' ');
        }
    }

    let spans = vec![
        Span::styled(format!("{} ", left_label), Style::default().fg(C_SECONDARY)),
        Span::styled(bar, Style::default().fg(C_ACCENT)),
        Span::styled(format!(" {}", right_label), Style::default().fg(C_MUTED)),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn fmt_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(fmt_time(0), "0:00");
        assert_eq!(fmt_time(9), "0:09");
        assert_eq!(fmt_time(240), "4:00");
        assert_eq!(fmt_time(125), "2:05");
    }
}
