//! Device geometry in terminal cells.
//!
//! The deck is drawn into the largest rectangle of the terminal that keeps
//! the device's aspect ratio (cells are about twice as tall as wide).  The
//! same mapping is used in reverse to turn mouse clicks into surface
//! coordinates, so a click lands in the zone that is drawn under it.

use ratatui::layout::Rect;

/// Pixel grid the visual regions below are laid out on.  Scaled to the
/// configured device size.
const REF_W: u32 = 320;
const REF_H: u32 = 240;

/// Visual regions on the reference grid: (x, y, width, height).
const HEADER: (u32, u32, u32, u32) = (0, 0, 320, 30);
const ART: (u32, u32, u32, u32) = (10, 30, 150, 150);
const TEXT: (u32, u32, u32, u32) = (170, 30, 150, 150);
const PROGRESS: (u32, u32, u32, u32) = (0, 180, 320, 10);
const CONTROLS: (u32, u32, u32, u32) = (0, 190, 320, 50);

/// Horizontal split of the controls row: previous, play/pause, next.
pub const TRANSPORT_SPLITS: [u32; 2] = [110, 210];

/// Largest centred rectangle of `term` with the device's aspect ratio.
pub fn device_area(term: Rect, device: (u16, u16)) -> Rect {
    let (w, h) = (device.0.max(1) as u32, device.1.max(1) as u32);
    let rows = (term.height as u32).min(term.width as u32 * h / (2 * w));
    let cols = (term.width as u32).min(rows * 2 * w / h);
    let (cols, rows) = (cols as u16, rows as u16);
    Rect {
        x: term.x + (term.width - cols) / 2,
        y: term.y + (term.height - rows) / 2,
        width: cols,
        height: rows,
    }
}

/// Map a cell to surface coordinates at the centre of that cell.  `None`
/// outside the deck.
pub fn to_device(area: Rect, device: (u16, u16), col: u16, row: u16) -> Option<(u16, u16)> {
    if area.width == 0
        || area.height == 0
        || col < area.x
        || row < area.y
        || col >= area.x + area.width
        || row >= area.y + area.height
    {
        return None;
    }
    let dx = (col - area.x) as u32 * 2 + 1;
    let dy = (row - area.y) as u32 * 2 + 1;
    let x = dx * device.0 as u32 / (2 * area.width as u32);
    let y = dy * device.1 as u32 / (2 * area.height as u32);
    Some((x as u16, y as u16))
}

/// Cell rectangles for each drawable region of the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub art: Rect,
    pub text: Rect,
    pub progress: Rect,
    pub controls: Rect,
}

impl Regions {
    pub fn within(area: Rect) -> Self {
        Self {
            header: scale(area, HEADER),
            art: scale(area, ART),
            text: scale(area, TEXT),
            progress: scale(area, PROGRESS),
            controls: scale(area, CONTROLS),
        }
    }
}

/// Split the controls row at [`TRANSPORT_SPLITS`].
pub fn transport_cells(controls: Rect) -> [Rect; 3] {
    let [a, b] = TRANSPORT_SPLITS;
    [
        scale_x(controls, 0, a),
        scale_x(controls, a, b),
        scale_x(controls, b, REF_W),
    ]
}

fn scale(area: Rect, (x, y, w, h): (u32, u32, u32, u32)) -> Rect {
    let cx = |v: u32| (v * area.width as u32 / REF_W) as u16;
    let cy = |v: u32| (v * area.height as u32 / REF_H) as u16;
    let (x0, x1) = (cx(x), cx(x + w));
    let (y0, y1) = (cy(y), cy(y + h));
    Rect {
        x: area.x + x0,
        y: area.y + y0,
        width: x1 - x0,
        height: (y1 - y0).max(1).min(area.height.saturating_sub(y0)),
    }
}

fn scale_x(area: Rect, from: u32, to: u32) -> Rect {
    let cx = |v: u32| (v * area.width as u32 / REF_W) as u16;
    Rect {
        x: area.x + cx(from),
        width: cx(to) - cx(from),
        ..area
    }
}
