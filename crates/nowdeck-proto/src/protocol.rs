use serde::{Deserialize, Serialize};

use crate::snapshot::RepeatMode;

/// Transport commands accepted by the remote playback service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd")]
pub enum Command {
    Play,
    Pause,
    Next,
    Previous,
    Like { track_id: String },
    Unlike { track_id: String },
    SetShuffle { state: bool },
    SetRepeat { mode: RepeatMode },
}

impl Command {
    /// Short name for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Command::Play => "play",
            Command::Pause => "pause",
            Command::Next => "next",
            Command::Previous => "previous",
            Command::Like { .. } => "like",
            Command::Unlike { .. } => "unlike",
            Command::SetShuffle { .. } => "shuffle",
            Command::SetRepeat { .. } => "repeat",
        }
    }
}

/// The logical action a press resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneCommand {
    Previous,
    TogglePlayPause,
    Next,
    ToggleLike,
}

/// Physical buttons below the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonId {
    A,
    B,
    C,
}

/// A discrete, edge-triggered press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Touch at surface coordinates.
    Touch { x: u16, y: u16 },
    Button(ButtonId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_wire_tag() {
        let json = serde_json::to_value(Command::SetRepeat {
            mode: RepeatMode::Track,
        })
        .unwrap();
        assert_eq!(json["cmd"], "SetRepeat");
        assert_eq!(json["mode"], "track");
    }

    #[test]
    fn test_zone_command_names() {
        let parsed: ZoneCommand = serde_json::from_str("\"toggle_play_pause\"").unwrap();
        assert_eq!(parsed, ZoneCommand::TogglePlayPause);
    }
}
