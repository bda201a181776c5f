//! Bottom status bar: input mode, key hints, backend link state, wall clock.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::AppState;
use crate::theme::{C_ACCENT, C_CHROME, C_MUTED, C_SECONDARY, C_TIER_CRITICAL, C_TIER_NOMINAL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.height == 0 {
        return;
    }

    let (mode_label, mode_color) = match state.input_mode {
        InputMode::Normal => (" NORMAL ", C_SECONDARY),
        InputMode::Command => (" COMMAND ", C_ACCENT),
    };

    let (link_label, link_color) = if state.simulate {
        (" SIM ", C_CHROME)
    } else if state.backend_up {
        (" LINK ", C_TIER_NOMINAL)
    } else {
        (" DOWN ", C_TIER_CRITICAL)
    };

    let clock = chrono::Local::now().format("%H:%M:%S").to_string();

    let hints = " /:command  m:voice  h:menu  v:video  p:player  e:engine  q:quit ";

    let left = vec![
        Span::styled(
            mode_label,
            Style::default().fg(mode_color).add_modifier(Modifier::REVERSED),
        ),
        Span::styled(hints, Style::default().fg(C_MUTED)),
    ];

    let right_text = format!("{link_label}·{clock} ");
    let left_w: usize = left.iter().map(|s| s.content.chars().count()).sum();
    let pad = (area.width as usize)
        .saturating_sub(left_w + right_text.chars().count());

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(
        link_label,
        Style::default().fg(link_color).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(format!("·{clock} "), Style::default().fg(C_SECONDARY)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
