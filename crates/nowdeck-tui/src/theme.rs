//! Color palette and style constants for the deck.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(0, 0, 0);
pub const C_ACCENT: Color = Color::Rgb(255, 95, 95);
pub const C_PLAYING: Color = Color::Rgb(29, 185, 84); // Spotify green
pub const C_TRACK: Color = Color::Rgb(72, 72, 72);
pub const C_ERROR: Color = Color::Rgb(200, 40, 40);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SECONDARY: Color = Color::Rgb(170, 170, 180);
pub const C_PRIMARY: Color = Color::Rgb(235, 235, 240);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_title() -> Style {
    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_accent() -> Style {
    Style::default().fg(C_ACCENT)
}

pub fn style_playing() -> Style {
    Style::default().fg(C_PLAYING)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

/// White disc behind the play/pause glyph.
pub fn style_play_button() -> Style {
    Style::default()
        .bg(C_PRIMARY)
        .fg(C_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn style_error_screen() -> Style {
    Style::default().bg(C_ERROR).fg(C_PRIMARY)
}
