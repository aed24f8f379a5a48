//! Input router — turns presses into logical commands.
//!
//! Zones are validated up front to be non-empty, inside the surface and
//! pairwise disjoint, so any coordinate resolves to at most one command.

use nowdeck_proto::config::{ButtonsConfig, LayoutConfig, ZoneConfig};
use nowdeck_proto::protocol::{InputEvent, ZoneCommand};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("zone {index} ({command:?}) has no area")]
    Empty { index: usize, command: ZoneCommand },
    #[error("zone {index} ({command:?}) extends past the {width}x{height} surface")]
    OutOfBounds {
        index: usize,
        command: ZoneCommand,
        width: u16,
        height: u16,
    },
    #[error("zones {first} and {second} overlap")]
    Overlap { first: usize, second: usize },
}

/// Half-open rectangle `x0..x1` × `y0..y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Zone {
    command: ZoneCommand,
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Zone {
    fn from_config(z: &ZoneConfig) -> Self {
        Self {
            command: z.command,
            x0: z.x as u32,
            y0: z.y as u32,
            x1: z.x as u32 + z.width as u32,
            y1: z.y as u32 + z.height as u32,
        }
    }

    fn contains(&self, x: u16, y: u16) -> bool {
        let (x, y) = (x as u32, y as u32);
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    fn overlaps(&self, other: &Zone) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    fn center(&self) -> (u16, u16) {
        (((self.x0 + self.x1) / 2) as u16, ((self.y0 + self.y1) / 2) as u16)
    }
}

#[derive(Debug, Clone)]
pub struct InputRouter {
    width: u16,
    height: u16,
    zones: Vec<Zone>,
    buttons: ButtonsConfig,
}

impl InputRouter {
    pub fn new(layout: &LayoutConfig, buttons: &ButtonsConfig) -> Result<Self, LayoutError> {
        let zones: Vec<Zone> = layout.zones.iter().map(Zone::from_config).collect();

        for (index, zone) in zones.iter().enumerate() {
            if zone.x1 == zone.x0 || zone.y1 == zone.y0 {
                return Err(LayoutError::Empty {
                    index,
                    command: zone.command,
                });
            }
            if zone.x1 > layout.width as u32 || zone.y1 > layout.height as u32 {
                return Err(LayoutError::OutOfBounds {
                    index,
                    command: zone.command,
                    width: layout.width,
                    height: layout.height,
                });
            }
        }

        for (first, a) in zones.iter().enumerate() {
            for (offset, b) in zones[first + 1..].iter().enumerate() {
                if a.overlaps(b) {
                    return Err(LayoutError::Overlap {
                        first,
                        second: first + 1 + offset,
                    });
                }
            }
        }

        Ok(Self {
            width: layout.width,
            height: layout.height,
            zones,
            buttons: buttons.clone(),
        })
    }

    pub fn surface_size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Resolve a press.  `None` for touches outside every zone.
    pub fn route(&self, event: InputEvent) -> Option<ZoneCommand> {
        match event {
            InputEvent::Touch { x, y } => self.zone_at(x, y),
            InputEvent::Button(button) => Some(self.buttons.command_for(button)),
        }
    }

    pub fn zone_at(&self, x: u16, y: u16) -> Option<ZoneCommand> {
        self.zones
            .iter()
            .find(|zone| zone.contains(x, y))
            .map(|zone| zone.command)
    }

    /// A coordinate inside the first zone bound to `command`.
    pub fn center_of(&self, command: ZoneCommand) -> Option<(u16, u16)> {
        self.zones
            .iter()
            .find(|zone| zone.command == command)
            .map(Zone::center)
    }
}
