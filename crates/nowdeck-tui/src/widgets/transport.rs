//! Transport row: previous, play/pause, next, plus the shuffle and repeat
//! indicators under the skip buttons.

use nowdeck_proto::snapshot::RepeatMode;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::layout::transport_cells;
use crate::theme::{style_muted, style_play_button, style_playing, style_title};

pub fn draw_transport(
    frame: &mut Frame,
    area: Rect,
    is_playing: bool,
    shuffle: bool,
    repeat: RepeatMode,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let [prev, play, next] = transport_cells(area);
    let mid = area.height / 2;

    let glyph_row = |cell: Rect| Rect {
        y: cell.y + mid,
        height: 1,
        ..cell
    };

    frame.render_widget(
        Paragraph::new(Span::styled("⏮", style_title())).alignment(Alignment::Center),
        glyph_row(prev),
    );
    frame.render_widget(
        Paragraph::new(Span::styled("⏭", style_title())).alignment(Alignment::Center),
        glyph_row(next),
    );

    // The play/pause button is a solid block two cells wider than its glyph.
    let glyph = if is_playing { "⏸" } else { "▶" };
    let button_w = play.width.min(7);
    let button = Rect {
        x: play.x + (play.width - button_w) / 2,
        width: button_w,
        ..glyph_row(play)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(glyph, style_play_button()))
            .style(style_play_button())
            .alignment(Alignment::Center),
        button,
    );

    if area.height > mid + 1 {
        let last = area.y + area.height - 1;
        let shuffle_style = if shuffle { style_playing() } else { style_muted() };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("shuffle", shuffle_style)))
                .alignment(Alignment::Center),
            Rect {
                y: last,
                height: 1,
                ..prev
            },
        );

        let (label, style) = match repeat {
            RepeatMode::Off => ("repeat", style_muted()),
            RepeatMode::Context => ("repeat all", style_playing()),
            RepeatMode::Track => ("repeat one", style_playing()),
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(label, style))).alignment(Alignment::Center),
            Rect {
                y: last,
                height: 1,
                ..next
            },
        );
    }
}
