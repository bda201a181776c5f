//! ResponseToast — the assistant's textual reply, shown for a bounded window.
//!
//! One message at a time: a newer reply replaces the old one and restarts
//! the 5-second display window.

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::theme::C_RESPONSE;

const DISPLAY_WINDOW: Duration = Duration::from_secs(5);

pub struct ResponseToast {
    message: Option<(String, Instant)>,
}

impl ResponseToast {
    pub fn new() -> Self {
        Self { message: None }
    }

    /// Show `text`, restarting the display window.
    pub fn show(&mut self, text: impl Into<String>) {
        self.message = Some((text.into(), Instant::now() + DISPLAY_WINDOW));
    }

    /// Drop the message once its window has elapsed. Call each UI tick.
    /// Returns true when the toast just expired (a redraw is due).
    pub fn tick(&mut self) -> bool {
        match &self.message {
            Some((_, expires)) if *expires <= Instant::now() => {
                self.message = None;
                true
            }
            _ => false,
        }
    }

    /// Render centered near the bottom of `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let Some((message, _)) = &self.message else {
            return;
        };
        if area.height < 2 {
            return;
        }

        let text = format!("« {} »", message);
        let w = (text.chars().count() as u16 + 2).min(area.width);
        let toast_area = Rect {
            x: area.x + (area.width.saturating_sub(w)) / 2,
            y: area.y + area.height - 2,
            width: w,
            height: 1,
        };
        frame.render_widget(Clear, toast_area);
        let paragraph = Paragraph::new(Line::from(vec![Span::styled(
            text,
            Style::default().fg(C_RESPONSE).add_modifier(Modifier::BOLD),
        )]));
        frame.render_widget(paragraph, toast_area);
    }
}

impl Default for ResponseToast {
    fn default() -> Self {
        Self::new()
    }
}
