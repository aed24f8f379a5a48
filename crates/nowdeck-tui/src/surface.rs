//! Terminal render surface.
//!
//! Keeps its own copy of what each region currently shows and only replaces
//! the regions a change-set flags; every draw then paints the whole deck from
//! that copy.  ratatui's buffer diff means unflagged regions never produce
//! terminal output.

use nowdeck_core::change::{ChangeSet, Projection, RenderSurface};
use nowdeck_proto::snapshot::LikeStatus;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::warn;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::layout::{device_area, Regions};
use crate::theme::{
    style_accent, style_error_screen, style_muted, style_secondary, style_title, C_BG, C_PRIMARY,
};
use crate::widgets::{art_tile, progress_bar, transport};

pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    device: (u16, u16),
    shown: Projection,
    status: Option<Status>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Status {
    message: String,
    error: bool,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>, device: (u16, u16)) -> Self {
        Self {
            terminal,
            device,
            shown: Projection::default(),
            status: None,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Red full-screen message, for conditions the deck can't recover from.
    pub fn show_error(&mut self, message: &str) {
        self.status = Some(Status {
            message: message.to_string(),
            error: true,
        });
        self.draw();
    }

    fn draw(&mut self) {
        let device = self.device;
        let shown = &self.shown;
        let status = self.status.as_ref();
        if let Err(e) = self
            .terminal
            .draw(|frame| draw_deck(frame, device, shown, status))
        {
            warn!("surface: draw failed: {}", e);
        }
    }
}

impl<B: Backend> RenderSurface for TerminalSurface<B> {
    fn render(&mut self, changes: &ChangeSet, view: &Projection) {
        self.status = None;
        if changes.art {
            self.shown.art_url = view.art_url.clone();
        }
        if changes.text {
            self.shown.title = view.title.clone();
            self.shown.artist = view.artist.clone();
            self.shown.album = view.album.clone();
        }
        if changes.controls {
            self.shown.is_playing = view.is_playing;
            self.shown.shuffle = view.shuffle;
            self.shown.repeat = view.repeat;
        }
        if changes.like {
            self.shown.like = view.like;
        }
        if changes.progress {
            self.shown.progress_ms = view.progress_ms;
            self.shown.duration_ms = view.duration_ms;
        }
        self.draw();
    }

    fn show_status(&mut self, message: &str) {
        self.status = Some(Status {
            message: message.to_string(),
            error: false,
        });
        self.draw();
    }

    fn repaint(&mut self) {
        if let Err(e) = self.terminal.clear() {
            warn!("surface: clear failed: {}", e);
        }
        self.draw();
    }
}

fn draw_deck(frame: &mut Frame, device: (u16, u16), shown: &Projection, status: Option<&Status>) {
    let full = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(C_BG)), full);
    let area = device_area(full, device);

    if let Some(status) = status {
        draw_status(frame, area, status);
        return;
    }

    let regions = Regions::within(area);
    draw_header(frame, regions.header, shown.like);
    art_tile::draw_art(frame, regions.art, &shown.art_url);
    draw_text(frame, regions.text, shown);
    progress_bar::draw_progress(
        frame,
        regions.progress,
        shown.fraction(),
        shown.progress_ms,
        shown.duration_ms,
    );
    transport::draw_transport(
        frame,
        regions.controls,
        shown.is_playing,
        shown.shuffle,
        shown.repeat,
    );
}

fn draw_status(frame: &mut Frame, area: Rect, status: &Status) {
    let style = if status.error {
        style_error_screen()
    } else {
        Style::default().fg(C_PRIMARY).bg(C_BG)
    };
    frame.render_widget(Block::default().style(style), area);
    let y = area.y + area.height / 2;
    frame.render_widget(
        Paragraph::new(status.message.as_str())
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        Rect {
            y,
            height: area.height - (y - area.y),
            ..area
        },
    );
}

fn draw_header(frame: &mut Frame, area: Rect, like: LikeStatus) {
    let (glyph, label, style) = match like {
        LikeStatus::Liked => ("♥", " liked", style_accent()),
        LikeStatus::NotLiked => ("♡", "", style_secondary()),
        LikeStatus::Unknown => ("·", "", style_muted()),
    };
    let line = Line::from(vec![Span::styled(glyph, style), Span::styled(label, style)]);
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Right),
        Rect { height: 1, ..area },
    );
}

fn draw_text(frame: &mut Frame, area: Rect, shown: &Projection) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let width = area.width as usize;
    let mut lines = vec![
        Line::styled(fit(&shown.title, width), style_title()),
        Line::styled(fit(&shown.artist, width), style_secondary()),
    ];
    if !shown.album.is_empty() {
        lines.push(Line::default());
        lines.push(Line::styled(fit(&shown.album, width), style_muted()));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// Truncate to `width` display columns, ending in `…` when cut.
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn surface() -> TerminalSurface<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        TerminalSurface::new(terminal, (320, 240))
    }

    fn screen(surface: &mut TerminalSurface<TestBackend>) -> String {
        let buffer = surface.terminal_mut().backend().buffer().clone();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn view(title: &str) -> Projection {
        Projection {
            title: title.to_string(),
            artist: "Artist".to_string(),
            art_url: "https://art/1".to_string(),
            progress_ms: 30_000,
            duration_ms: 200_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_full_render_shows_track() {
        let mut s = surface();
        s.render(&ChangeSet::all(), &view("Song1"));
        let text = screen(&mut s);
        assert!(text.contains("Song1"));
        assert!(text.contains("Artist"));
        assert!(text.contains("▶"));
        assert!(text.contains("0:30"));
    }

    #[test]
    fn test_unflagged_regions_keep_old_content() {
        let mut s = surface();
        s.render(&ChangeSet::all(), &view("Song1"));

        let progress_only = ChangeSet {
            progress: true,
            ..ChangeSet::default()
        };
        let mut next = view("Song2");
        next.progress_ms = 45_000;
        s.render(&progress_only, &next);

        let text = screen(&mut s);
        assert!(text.contains("Song1"));
        assert!(!text.contains("Song2"));
        assert!(text.contains("0:45"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut s = surface();
        let v = view("Song1");
        s.render(&ChangeSet::all(), &v);
        let first = screen(&mut s);
        s.render(&ChangeSet::all(), &v);
        assert_eq!(screen(&mut s), first);
    }

    #[test]
    fn test_controls_and_like_indicators() {
        let mut s = surface();
        let mut v = view("Song1");
        s.render(&ChangeSet::all(), &v);
        assert!(!screen(&mut s).contains("⏸"));

        v.is_playing = true;
        v.like = LikeStatus::Liked;
        s.render(&(ChangeSet::controls() | ChangeSet::like()), &v);
        let text = screen(&mut s);
        assert!(text.contains("⏸"));
        assert!(text.contains("liked"));
    }

    #[test]
    fn test_status_until_next_render() {
        let mut s = surface();
        s.show_status("Connecting");
        assert!(screen(&mut s).contains("Connecting"));

        s.render(&ChangeSet::all(), &view("Song1"));
        let text = screen(&mut s);
        assert!(!text.contains("Connecting"));
        assert!(text.contains("Song1"));
    }

    #[test]
    fn test_repaint_keeps_error_screen() {
        let mut s = surface();
        s.show_error("No access token.");
        s.repaint();
        assert!(screen(&mut s).contains("No access token."));
    }

    #[test]
    fn test_repaint_after_resize_redraws_deck() {
        let mut s = surface();
        s.render(&ChangeSet::all(), &view("Song1"));
        s.terminal_mut().backend_mut().resize(100, 30);
        s.repaint();
        let text = screen(&mut s);
        assert!(text.contains("Song1"));
        assert!(text.contains("0:30"));
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("a longer title", 6), "a lon…");
        assert_eq!(fit("日本語のタイトル", 5), "日本…");
        assert_eq!(fit("anything", 0), "");
    }
}
