//! RingsPanel — the three sensor rings: coolant temperature, engine speed
//! proxy, fuel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
    Frame,
};

use bordo_core::state::{Channel, ChannelId};

use crate::action::ComponentId;
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{self, tier_color};
use crate::widgets::ring::draw_ring;

pub struct RingsPanel;

impl RingsPanel {
    pub fn new() -> Self {
        Self
    }

    /// Centre text + caption for one channel. Engine speed reads as
    /// "RPM ×100" — the backend sample is a crank angle, re-scaled, and
    /// full digits would suggest more precision than exists.
    fn readout(channel: &Channel) -> (String, &'static str) {
        match channel.id {
            ChannelId::EngineTemp => (format!("{:.0}{}", channel.reading.value, channel.unit), "ECT"),
            ChannelId::EngineRpm => (format!("{:.0}", channel.reading.value / 100.0), "RPM ×100"),
            ChannelId::Fuel => (format!("{:.0}{}", channel.reading.value, channel.unit), "FUEL"),
        }
    }
}

impl Component for RingsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Rings
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" TELEMETRY ")
            .border_style(theme::style_unfocused_border())
            .title_style(theme::style_chrome());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(inner);

        for (slot, channel) in state.dashboard.channels.iter().enumerate().take(3) {
            let fraction = if channel.max > 0.0 {
                channel.reading.value / channel.max
            } else {
                0.0
            };
            let (value_text, caption) = Self::readout(channel);
            draw_ring(
                frame,
                columns[slot],
                fraction,
                tier_color(channel.reading.tier),
                value_text,
                caption,
            );
        }
    }
}
