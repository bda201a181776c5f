//! CommandInput — wraps tui-input for the free-text command line.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_CHROME, C_MUTED};

pub enum CommandAction {
    /// Enter pressed; carries the raw text (may be blank — the backend
    /// client treats blank as a no-op). The field is cleared either way.
    Submitted(String),
    Cancelled,
    None,
}

pub struct CommandInput {
    input: Input,
    active: bool,
}

impl CommandInput {
    pub fn new() -> Self {
        Self {
            input: Input::default(),
            active: false,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> CommandAction {
        match key.code {
            KeyCode::Esc => {
                self.input = Input::default();
                self.active = false;
                CommandAction::Cancelled
            }
            KeyCode::Enter => {
                let text = self.input.value().to_string();
                self.input = Input::default();
                self.active = false;
                CommandAction::Submitted(text)
            }
            _ => {
                self.input
                    .handle_event(&ratatui::crossterm::event::Event::Key(key));
                CommandAction::None
            }
        }
    }

    /// Render the prompt + current text into `area` (a one-row strip).
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(4) as usize);
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled("> say something…", Style::default().fg(C_MUTED))
        } else {
            // The scroll offset counts visual positions, not bytes; skipping
            // by chars keeps multibyte input off a byte boundary.
            let shown: String = value.chars().skip(scroll).collect();
            Span::styled(format!("> {shown}"), Style::default().fg(C_CHROME))
        };

        frame.render_widget(Paragraph::new(Line::from(vec![display])), area);

        if self.active {
            let cursor_x = area.x + 2 + (self.input.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(1)), area.y));
        }
    }
}

impl Default for CommandInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn type_chars(input: &mut CommandInput, text: &str) {
        for ch in text.chars() {
            input.handle_key(KeyEvent::from(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn scrolled_multibyte_input_renders_without_panic() {
        let mut input = CommandInput::new();
        input.activate();
        // Long enough to scroll in a 20-column strip, every char multibyte.
        type_chars(&mut input, &"é".repeat(41));

        let backend = TestBackend::new(20, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                input.draw(frame, area);
            })
            .unwrap();
    }

    #[test]
    fn submit_returns_raw_text_and_clears() {
        let mut input = CommandInput::new();
        input.activate();
        type_chars(&mut input, "ligar farol");

        match input.handle_key(KeyEvent::from(KeyCode::Enter)) {
            CommandAction::Submitted(text) => assert_eq!(text, "ligar farol"),
            _ => panic!("enter must submit"),
        }
        assert!(!input.is_active());
        assert!(input.input.value().is_empty());
    }
}
