use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::platform;
use crate::protocol::{ButtonId, ZoneCommand};

/// Environment variable that overrides `service.access_token`.
pub const ACCESS_TOKEN_ENV: &str = "NOWDECK_ACCESS_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub buttons: ButtonsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Bearer token for the Web API.  Obtaining and refreshing it is out of
    /// scope; paste one here or export `NOWDECK_ACCESS_TOKEN`.
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

/// Touch surface size and the zones laid over it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_width")]
    pub width: u16,
    #[serde(default = "default_height")]
    pub height: u16,
    #[serde(default = "default_zones")]
    pub zones: Vec<ZoneConfig>,
}

/// A rectangular press zone: `x..x+width`, `y..y+height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub command: ZoneCommand,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonsConfig {
    #[serde(default = "default_button_a")]
    pub a: ZoneCommand,
    #[serde(default = "default_button_b")]
    pub b: ZoneCommand,
    #[serde(default = "default_button_c")]
    pub c: ZoneCommand,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            access_token: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            zones: default_zones(),
        }
    }
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            a: default_button_a(),
            b: default_button_b(),
            c: default_button_c(),
        }
    }
}

impl ServiceConfig {
    /// Token from the environment if set, else from the file.
    pub fn resolved_token(&self) -> String {
        std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.access_token.clone())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(100))
    }
}

impl ButtonsConfig {
    pub fn command_for(&self, button: ButtonId) -> ZoneCommand {
        match button {
            ButtonId::A => self.a,
            ButtonId::B => self.b,
            ButtonId::C => self.c,
        }
    }
}

fn default_api_base() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_interval_ms() -> u64 {
    3000
}

fn default_width() -> u16 {
    320
}

fn default_height() -> u16 {
    240
}

/// Artwork doubles as the like button; the transport row sits in the bottom band.
fn default_zones() -> Vec<ZoneConfig> {
    vec![
        ZoneConfig {
            command: ZoneCommand::ToggleLike,
            x: 0,
            y: 0,
            width: 180,
            height: 180,
        },
        ZoneConfig {
            command: ZoneCommand::Previous,
            x: 0,
            y: 180,
            width: 110,
            height: 60,
        },
        ZoneConfig {
            command: ZoneCommand::TogglePlayPause,
            x: 110,
            y: 180,
            width: 100,
            height: 60,
        },
        ZoneConfig {
            command: ZoneCommand::Next,
            x: 210,
            y: 180,
            width: 110,
            height: 60,
        },
    ]
}

fn default_button_a() -> ZoneCommand {
    ZoneCommand::Previous
}

fn default_button_b() -> ZoneCommand {
    ZoneCommand::TogglePlayPause
}

fn default_button_c() -> ZoneCommand {
    ZoneCommand::Next
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing {}", config_path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("writing {}", config_path.display()))?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll.interval(), Duration::from_millis(3000));
        assert_eq!(config.service.api_base, "https://api.spotify.com/v1");
        assert_eq!((config.layout.width, config.layout.height), (320, 240));
        assert_eq!(config.layout.zones.len(), 4);
        assert_eq!(config.buttons.command_for(ButtonId::B), ZoneCommand::TogglePlayPause);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [poll]
            interval_ms = 5000

            [buttons]
            a = "toggle_like"
            "#,
        )
        .unwrap();
        assert_eq!(config.poll.interval_ms, 5000);
        assert_eq!(config.buttons.a, ZoneCommand::ToggleLike);
        assert_eq!(config.buttons.c, ZoneCommand::Next);
        assert_eq!(config.layout.zones.len(), 4);
    }

    #[test]
    fn test_config_survives_toml_round_trip() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.layout.zones, Config::default().layout.zones);
    }
}
