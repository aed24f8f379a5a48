//! Terminal events → deck events.
//!
//! Keys stand in for the three physical buttons; mouse clicks stand in for
//! touches and are mapped to surface coordinates through the same geometry
//! the surface draws with.

use nowdeck_core::controller::DeckEvent;
use nowdeck_proto::protocol::{ButtonId, InputEvent};
use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::layout::{device_area, to_device};

/// What the reader thread needs to translate events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    /// Surface size, for mapping clicks.
    pub device: (u16, u16),
    /// Where a keyboard "like" press touches.  `None` if no zone likes.
    pub like_tap: Option<(u16, u16)>,
}

pub struct InputTranslator {
    keys: KeyMap,
    terminal: Rect,
}

impl InputTranslator {
    pub fn new(keys: KeyMap, terminal: Rect) -> Self {
        Self { keys, terminal }
    }

    pub fn translate(&mut self, event: &Event) -> Option<DeckEvent> {
        match event {
            Event::Key(key) => self.key(key),
            Event::Mouse(mouse) => self.mouse(mouse),
            Event::Resize(width, height) => {
                self.terminal = Rect::new(0, 0, *width, *height);
                Some(DeckEvent::Repaint)
            }
            _ => None,
        }
    }

    fn key(&self, key: &KeyEvent) -> Option<DeckEvent> {
        // Edge-triggered: ignore repeats and releases.
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let button = |id| Some(DeckEvent::Input(InputEvent::Button(id)));
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(DeckEvent::Shutdown)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(DeckEvent::Shutdown),
            KeyCode::Char('a') | KeyCode::Left => button(ButtonId::A),
            KeyCode::Char('b') | KeyCode::Char(' ') => button(ButtonId::B),
            KeyCode::Char('c') | KeyCode::Right => button(ButtonId::C),
            KeyCode::Char('l') => self
                .keys
                .like_tap
                .map(|(x, y)| DeckEvent::Input(InputEvent::Touch { x, y })),
            KeyCode::Char('s') => Some(DeckEvent::ToggleShuffle),
            KeyCode::Char('r') => Some(DeckEvent::CycleRepeat),
            _ => None,
        }
    }

    fn mouse(&self, mouse: &MouseEvent) -> Option<DeckEvent> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let area = device_area(self.terminal, self.keys.device);
        let (x, y) = to_device(area, self.keys.device, mouse.column, mouse.row)?;
        Some(DeckEvent::Input(InputEvent::Touch { x, y }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> InputTranslator {
        InputTranslator::new(
            KeyMap {
                device: (320, 240),
                like_tap: Some((90, 90)),
            },
            Rect::new(0, 0, 80, 24),
        )
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_keys_stand_in_for_buttons() {
        let mut t = translator();
        let button = |id| Some(DeckEvent::Input(InputEvent::Button(id)));
        assert_eq!(t.translate(&press(KeyCode::Char('a'))), button(ButtonId::A));
        assert_eq!(t.translate(&press(KeyCode::Char(' '))), button(ButtonId::B));
        assert_eq!(t.translate(&press(KeyCode::Right)), button(ButtonId::C));
        assert_eq!(
            t.translate(&press(KeyCode::Char('l'))),
            Some(DeckEvent::Input(InputEvent::Touch { x: 90, y: 90 }))
        );
        assert_eq!(t.translate(&press(KeyCode::Char('s'))), Some(DeckEvent::ToggleShuffle));
        assert_eq!(t.translate(&press(KeyCode::Char('r'))), Some(DeckEvent::CycleRepeat));
        assert_eq!(t.translate(&press(KeyCode::Char('q'))), Some(DeckEvent::Shutdown));
        assert_eq!(t.translate(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut t = translator();
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(t.translate(&ev), Some(DeckEvent::Shutdown));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut t = translator();
        let mut key = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(t.translate(&Event::Key(key)), None);
    }

    #[test]
    fn test_clicks_become_touches() {
        let mut t = translator();
        // Deck occupies columns 8..72 on an 80x24 terminal.
        assert_eq!(
            t.translate(&click(8, 0)),
            Some(DeckEvent::Input(InputEvent::Touch { x: 2, y: 5 }))
        );
        assert_eq!(t.translate(&click(2, 10)), None);
    }

    #[test]
    fn test_resize_remaps_and_repaints() {
        let mut t = translator();
        assert_eq!(t.translate(&Event::Resize(64, 24)), Some(DeckEvent::Repaint));
        // The deck now starts at column 0.
        assert_eq!(
            t.translate(&click(0, 0)),
            Some(DeckEvent::Input(InputEvent::Touch { x: 2, y: 5 }))
        );
    }
}
