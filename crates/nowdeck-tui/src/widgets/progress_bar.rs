//! Smooth Unicode progress bar widget.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MUTED, C_PLAYING, C_SECONDARY, C_TRACK};

const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Render the track progress bar in `area`.
/// `fraction` is 0.0..=1.0; the labels are elapsed and total time.
pub fn draw_progress(
    frame: &mut Frame,
    area: Rect,
    fraction: f64,
    progress_ms: u64,
    duration_ms: u64,
) {
    if area.width < 4 || area.height == 0 {
        return;
    }

    let left_label = fmt_time(progress_ms);
    let right_label = fmt_time(duration_ms);
    let label_w = (left_label.len() + right_label.len() + 2) as u16;
    // Drop the labels on very narrow surfaces rather than the bar.
    let with_labels = area.width >= label_w + 8;
    let bar_w = if with_labels {
        area.width - label_w
    } else {
        area.width
    } as usize;

    let mut spans = Vec::new();
    if with_labels {
        spans.push(Span::styled(
            format!("{} ", left_label),
            Style::default().fg(C_SECONDARY),
        ));
    }
    spans.push(Span::styled(
        bar(fraction, bar_w),
        Style::default().fg(C_PLAYING).bg(C_TRACK),
    ));
    if with_labels {
        spans.push(Span::styled(
            format!(" {}", right_label),
            Style::default().fg(C_MUTED),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// `width` cells of eighth-block fill.
fn bar(fraction: f64, width: usize) -> String {
    let eighths = (fraction.clamp(0.0, 1.0) * width as f64 * 8.0) as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    let mut bar = String::with_capacity(width * 3);
    for _ in 0..full_blocks.min(width) {
        bar.push('█');
    }
    if full_blocks < width {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..width {
            bar.push(' ');
        }
    }
    bar
}

fn fmt_time(ms: u64) -> String {
    let s = ms / 1000;
    let h = s / 3600;
    let m = (s % 3600) / 60;
    let s = s % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_fill() {
        assert_eq!(bar(0.0, 4), "    ");
        assert_eq!(bar(1.0, 4), "████");
        assert_eq!(bar(0.5, 4), "██  ");
        assert_eq!(bar(0.5, 3).chars().count(), 3);
    }

    #[test]
    fn test_fmt_time() {
        assert_eq!(fmt_time(0), "0:00");
        assert_eq!(fmt_time(61_999), "1:01");
        assert_eq!(fmt_time(3_723_000), "1:02:03");
    }
}
