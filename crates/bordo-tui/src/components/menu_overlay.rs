//! MenuOverlay — the home menu: music, camera, lights, engine.
//!
//! Captures all keys while open. Selecting an item emits the matching
//! action and closes the menu.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::action::{Action, ComponentId, MenuFunction};
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{self, C_CHROME, C_MUTED, C_PRIMARY};

const ITEMS: [MenuFunction; 4] = [
    MenuFunction::Music,
    MenuFunction::Camera,
    MenuFunction::Lights,
    MenuFunction::Engine,
];

pub struct MenuOverlay {
    selected: usize,
}

impl MenuOverlay {
    pub fn new() -> Self {
        Self { selected: 0 }
    }
}

impl Component for MenuOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::MenuOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !state.dashboard.overlays.menu {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.checked_sub(1).unwrap_or(ITEMS.len() - 1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % ITEMS.len();
            }
            KeyCode::Enter => {
                return vec![Action::RunMenuFunction(ITEMS[self.selected]), Action::CloseMenu];
            }
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('q') => {
                return vec![Action::CloseMenu];
            }
            _ => {}
        }
        // Consume everything else while open.
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if !state.dashboard.overlays.menu {
            return;
        }

        let w = 30u16.min(area.width);
        let h = (ITEMS.len() as u16 + 4).min(area.height);
        if w < 14 || h < 5 {
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
            .title(" HOME ")
            .border_style(theme::style_focused_border())
            .title_style(theme::style_chrome());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let mut lines = vec![Line::raw("")];
        for (i, item) in ITEMS.iter().enumerate() {
            let marker = if i == self.selected { "▸ " } else { "  " };
            let style = if i == self.selected {
                Style::default().fg(C_CHROME).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_PRIMARY)
            };
            lines.push(Line::from(vec![
                Span::raw("   "),
                Span::styled(format!("{marker}{}", item.label()), style),
            ]));
        }
        lines.push(Line::styled(
            "   ↑↓ move · enter · esc",
            Style::default().fg(C_MUTED),
        ));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
