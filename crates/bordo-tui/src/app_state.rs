//! AppState — shared read-only data passed to all components during render.
//!
//! Components read this; only the App event-loop writes to it.

use bordo_core::state::DashboardState;

use crate::widgets::status_bar::InputMode;

pub struct AppState {
    /// Latest committed dashboard snapshot.
    pub dashboard: DashboardState,
    /// True while `/motor` fetches are succeeding (always true in simulate
    /// mode — there is nothing to reach).
    pub backend_up: bool,
    /// Ring channels ramp locally instead of polling the backend.
    pub simulate: bool,
    pub input_mode: InputMode,
}

impl AppState {
    pub fn new(dashboard: DashboardState, simulate: bool) -> Self {
        Self {
            dashboard,
            backend_up: simulate,
            simulate,
            input_mode: InputMode::Normal,
        }
    }
}
