//! MusicPlayerBar — bottom transport chrome for the simulated now-playing
//! track. Next track on the left, title/artist centered, clock + progress
//! on the right.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::action::ComponentId;
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{self, C_CHROME, C_SECONDARY};
use crate::widgets::progress::{draw_progress, fmt_time};

pub struct MusicPlayerBar;

impl MusicPlayerBar {
    pub fn new() -> Self {
        Self
    }
}

impl Component for MusicPlayerBar {
    fn id(&self) -> ComponentId {
        ComponentId::Music
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if !state.dashboard.overlays.music || area.height < 3 {
            return;
        }

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(theme::style_accent());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 4),
                Constraint::Ratio(2, 4),
                Constraint::Ratio(1, 4),
            ])
            .split(rows[0]);

        let clock = state.dashboard.clock;
        let next = &state.dashboard.next_track;
        let track = &state.dashboard.current_track;

        frame.render_widget(
            Paragraph::new(Line::styled(
                format!("next: {} — {}", next.title, next.artist),
                Style::default().fg(C_SECONDARY),
            )),
            columns[0],
        );
        frame.render_widget(
            Paragraph::new(Line::styled(
                format!("♪ {} — {}", track.title, track.artist),
                Style::default().fg(C_CHROME).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            columns[1],
        );
        frame.render_widget(
            Paragraph::new(Line::styled(
                format!("{} / {}", fmt_time(clock.played_secs), fmt_time(clock.duration_secs)),
                Style::default().fg(C_SECONDARY),
            ))
            .alignment(Alignment::Right),
            columns[2],
        );

        if rows.len() > 1 {
            draw_progress(frame, rows[1], clock.played_secs, clock.duration_secs);
        }
    }
}
