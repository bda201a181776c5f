//! Color palette and style constants for the cockpit TUI.
//!
//! Neon cockpit look: cyan chrome, magenta accents, and the four ring
//! tier colors.

use bordo_core::mapper::ColorTier;
use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(8, 8, 16);
pub const C_CHROME: Color = Color::Rgb(0, 255, 255);
pub const C_ACCENT: Color = Color::Rgb(255, 0, 255);
pub const C_PRIMARY: Color = Color::Rgb(210, 225, 230);
pub const C_SECONDARY: Color = Color::Rgb(110, 140, 150);
pub const C_MUTED: Color = Color::Rgb(60, 72, 84);
pub const C_PANEL_BORDER: Color = Color::Rgb(30, 70, 80);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(0, 255, 255);
pub const C_RING_TRACK: Color = Color::Rgb(40, 44, 52);
pub const C_RESPONSE: Color = Color::Rgb(255, 220, 120);
pub const C_VOICE: Color = Color::Rgb(255, 0, 255);
pub const C_STATIC: Color = Color::Rgb(130, 140, 150);

// Ring tier colors — the four bands of the value mapper.
pub const C_TIER_COOL: Color = Color::Rgb(0, 255, 255);
pub const C_TIER_NOMINAL: Color = Color::Rgb(0, 255, 0);
pub const C_TIER_ELEVATED: Color = Color::Rgb(255, 255, 0);
pub const C_TIER_CRITICAL: Color = Color::Rgb(255, 102, 0);

// Visualizer gradient endpoints (cyan → magenta → yellow, left to right).
pub const C_VIZ_LEFT: Color = Color::Rgb(0, 255, 255);
pub const C_VIZ_MID: Color = Color::Rgb(255, 0, 255);
pub const C_VIZ_RIGHT: Color = Color::Rgb(255, 255, 0);

pub fn tier_color(tier: ColorTier) -> Color {
    match tier {
        ColorTier::Cool => C_TIER_COOL,
        ColorTier::Nominal => C_TIER_NOMINAL,
        ColorTier::Elevated => C_TIER_ELEVATED,
        ColorTier::Critical => C_TIER_CRITICAL,
    }
}

/// Linear blend between two RGB colors. `t` is clamped to 0..=1.
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let ((ar, ag, ab), (br, bg, bb)) = match (a, b) {
        (Color::Rgb(ar, ag, ab), Color::Rgb(br, bg, bb)) => {
            ((ar as f32, ag as f32, ab as f32), (br as f32, bg as f32, bb as f32))
        }
        _ => return a,
    };
    Color::Rgb(
        (ar + (br - ar) * t).round() as u8,
        (ag + (bg - ag) * t).round() as u8,
        (ab + (bb - ab) * t).round() as u8,
    )
}

/// Gradient color for a visualizer bar at horizontal position 0..=1.
pub fn viz_gradient(position: f32) -> Color {
    if position < 0.5 {
        lerp_color(C_VIZ_LEFT, C_VIZ_MID, position * 2.0)
    } else {
        lerp_color(C_VIZ_MID, C_VIZ_RIGHT, (position - 0.5) * 2.0)
    }
}

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_chrome() -> Style {
    Style::default().fg(C_CHROME)
}

pub fn style_accent() -> Style {
    Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
