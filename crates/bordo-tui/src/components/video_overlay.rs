//! VideoOverlay — placeholder camera feed. There is no video ingestion;
//! the panel renders animated static so the overlay reads as "live".

use rand::Rng;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::action::ComponentId;
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{self, C_ACCENT, C_STATIC};

const STATIC_CHARS: [char; 4] = [' ', '░', '▒', '▓'];

pub struct VideoOverlay;

impl VideoOverlay {
    pub fn new() -> Self {
        Self
    }
}

impl Component for VideoOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::VideoOverlay
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if !state.dashboard.overlays.video {
            return;
        }

        // Centered window, roughly 60% × 50% of the screen.
        let w = (area.width as u32 * 3 / 5) as u16;
        let h = (area.height as u32 / 2) as u16;
        if w < 20 || h < 6 {
            return;
        }
        let overlay = Rect {
            x: area.x + (area.width - w) / 2,
            y: area.y + (area.height - h) / 2,
            width: w,
            height: h,
        };

        frame.render_widget(Clear, overlay);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" CAM 1 — LIVE ")
            .border_style(theme::style_focused_border())
            .title_style(Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        // Fresh noise every frame; the UI tick redraws while visible.
        let mut rng = rand::thread_rng();
        let mut lines = Vec::with_capacity(inner.height as usize);
        for _ in 0..inner.height {
            let row: String = (0..inner.width)
                .map(|_| STATIC_CHARS[rng.gen_range(0..STATIC_CHARS.len())])
                .collect();
            lines.push(Line::styled(row, Style::default().fg(C_STATIC)));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        // Caption over the noise.
        if inner.height >= 2 {
            let caption_area = Rect {
                x: inner.x,
                y: inner.y + inner.height / 2,
                width: inner.width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(Span::styled(
                    " NO SIGNAL — PLACEHOLDER FEED ",
                    Style::default().fg(C_ACCENT).add_modifier(Modifier::REVERSED),
                ))
                .alignment(Alignment::Center),
                caption_area,
            );
        }
    }
}
