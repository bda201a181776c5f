//! Component trait — the interface every dashboard panel implements.
//!
//! Design principles:
//! - Components are self-contained: they own their presentation state and
//!   render themselves from the shared snapshot.
//! - Components receive `AppState` read-only; they never mutate the
//!   dashboard directly.
//! - Components produce `Vec<Action>`; the App event-loop dispatches those.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;

pub trait Component {
    /// Which component is this?
    fn id(&self) -> ComponentId;

    /// Handle a key event. Only called while this component has the keys
    /// (overlays capture input while open).
    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Called each UI tick (~100ms) for expiries and animation bookkeeping.
    fn tick(&mut self, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Render the component into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState);
}
