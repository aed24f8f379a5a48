//! Album artwork placeholder.
//!
//! The terminal can't show the JPEG, so the tile gets a colour derived from
//! the art URL: a new album visibly changes the tile, the same album never
//! does.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::{style_border, style_muted, C_BG, C_PRIMARY};

pub fn draw_art(frame: &mut Frame, area: Rect, art_url: &str) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style_border());

    if art_url.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let y = inner.y + inner.height / 2;
        frame.render_widget(
            Paragraph::new(Line::styled("no art", style_muted())).alignment(Alignment::Center),
            Rect {
                y,
                height: 1,
                ..inner
            },
        );
        return;
    }

    let tint = tint_for(art_url);
    let inner = block.inner(area);
    frame.render_widget(block.style(Style::default().bg(tint)), area);
    let y = inner.y + inner.height / 2;
    frame.render_widget(
        Paragraph::new(Line::styled("♪", Style::default().fg(C_PRIMARY).bg(tint)))
            .alignment(Alignment::Center),
        Rect {
            y,
            height: 1,
            ..inner
        },
    );
}

/// Stable, muted colour for a URL (FNV-1a over the bytes).
pub fn tint_for(url: &str) -> Color {
    if url.is_empty() {
        return C_BG;
    }
    let mut hash: u32 = 0x811c_9dc5;
    for b in url.bytes() {
        hash ^= b as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    // Keep each channel in 40..=167 so the glyph on top stays readable.
    let channel = |shift: u32| 40 + ((hash >> shift) & 0x7f) as u8;
    Color::Rgb(channel(0), channel(8), channel(16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_is_stable_per_url() {
        let a = tint_for("https://i.scdn.co/image/a");
        assert_eq!(a, tint_for("https://i.scdn.co/image/a"));
        assert_ne!(a, tint_for("https://i.scdn.co/image/b"));
        assert_eq!(tint_for(""), C_BG);
    }
}
