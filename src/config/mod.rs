//! # Configuration Management Module
//!
//! Venture reads a single TOML file (default `config.toml`) with three
//! sections. Every field has a default, so an empty file is a valid config.
//!
//! - [`ServerConfig`] - listening address, read cap and wire framing
//! - [`GameConfig`] - game name, start room, grue countdown, data files
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0"
//! port = 50000
//! max_input_bytes = 32
//! ack_prefix = "OK! "
//! newline_framing = false
//! single_session = true
//!
//! [game]
//! name = "Realms of Venture"
//! start_room = "0"
//! grue_countdown = 4
//! grue_warning_threshold = 2
//! # world_file = "data/world.json"
//! # phrasebook_file = "data/phrasebook.json"
//!
//! [logging]
//! level = "info"
//! file = "venture.log"
//! ```
//!
//! CLI flags override file values; see `src/main.rs`.

use anyhow::{anyhow, Result};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::game::hazard::{GrueHazard, DEFAULT_WARNING_THRESHOLD};
use crate::game::{
    canonical_world, load_world_from_json, GameError, GameSettings, Phrasebook, WorldDefinition,
    CANONICAL_START_ROOM, DEFAULT_GRUE_COUNTDOWN,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bytes read from the client per turn; longer input is truncated.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
    /// Prefix placed before every server message.
    #[serde(default = "default_ack_prefix")]
    pub ack_prefix: String,
    /// Append `\n` after each message, for telnet/netcat style clients.
    #[serde(default)]
    pub newline_framing: bool,
    /// Exit after the first session ends instead of waiting for another client.
    #[serde(default = "default_single_session")]
    pub single_session: bool,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    50000
}

fn default_max_input_bytes() -> usize {
    32
}

fn default_ack_prefix() -> String {
    "OK! ".to_string()
}

fn default_single_session() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            max_input_bytes: default_max_input_bytes(),
            ack_prefix: default_ack_prefix(),
            newline_framing: false,
            single_session: default_single_session(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_game_name")]
    pub name: String,
    #[serde(default = "default_start_room")]
    pub start_room: String,
    /// Turns allowed in unlit darkness before the grue strikes.
    #[serde(default = "default_grue_countdown")]
    pub grue_countdown: u32,
    /// Countdown value at or below which the player is warned.
    #[serde(default = "default_grue_warning_threshold")]
    pub grue_warning_threshold: u32,
    /// JSON world file; the built-in four-room house when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_file: Option<String>,
    /// JSON phrasebook for `say`; plain echo when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrasebook_file: Option<String>,
}

fn default_game_name() -> String {
    "Realms of Venture".to_string()
}

fn default_start_room() -> String {
    CANONICAL_START_ROOM.to_string()
}

fn default_grue_countdown() -> u32 {
    DEFAULT_GRUE_COUNTDOWN
}

fn default_grue_warning_threshold() -> u32 {
    DEFAULT_WARNING_THRESHOLD
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            name: default_game_name(),
            start_room: default_start_room(),
            grue_countdown: default_grue_countdown(),
            grue_warning_threshold: default_grue_warning_threshold(),
            world_file: None,
            phrasebook_file: None,
        }
    }
}

impl GameConfig {
    /// Load the configured world (or the built-in one) and check the start room.
    pub fn load_world(&self) -> Result<WorldDefinition, GameError> {
        let world = match &self.world_file {
            Some(path) => {
                info!("Loading world from {}", path);
                load_world_from_json(path)?
            }
            None => canonical_world(),
        };
        world.check_start_room(&self.start_room)?;
        Ok(world)
    }

    /// Load the configured phrasebook; `None` means `say` just echoes.
    pub fn load_phrasebook(&self) -> Result<Option<Phrasebook>, GameError> {
        match &self.phrasebook_file {
            Some(path) => {
                let book = Phrasebook::load(path)?;
                info!("Loaded phrasebook {} with {} entries", path, book.len());
                Ok(Some(book))
            }
            None => Ok(None),
        }
    }

    pub fn hazard(&self) -> GrueHazard {
        GrueHazard::new(self.grue_countdown, self.grue_warning_threshold)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.server.max_input_bytes == 0 {
            return Err(anyhow!("server.max_input_bytes must be at least 1"));
        }
        if self.game.grue_countdown == 0 {
            return Err(anyhow!("game.grue_countdown must be at least 1"));
        }
        if self.game.grue_warning_threshold > self.game.grue_countdown {
            return Err(anyhow!(
                "game.grue_warning_threshold ({}) exceeds game.grue_countdown ({})",
                self.game.grue_warning_threshold,
                self.game.grue_countdown
            ));
        }
        Ok(())
    }

    /// Settings handed to each new game.
    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            name: self.game.name.clone(),
            start_room: self.game.start_room.clone(),
            address: self.server.bind.clone(),
            port: self.server.port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_protocol() {
        let config = Config::default();
        assert_eq!(config.server.port, 50000);
        assert_eq!(config.server.max_input_bytes, 32);
        assert_eq!(config.server.ack_prefix, "OK! ");
        assert!(!config.server.newline_framing);
        assert_eq!(config.game.grue_countdown, 4);
        assert_eq!(config.game.start_room, "0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.game.name, "Realms of Venture");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str("[server]\nport = 4000\n").unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.server.max_input_bytes, 32);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.server.max_input_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.game.grue_countdown = 1;
        config.game.grue_warning_threshold = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_roundtrips_through_toml() {
        let serialized = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.server.port, 50000);
        assert!(parsed.game.world_file.is_none());
    }

    #[test]
    fn test_unknown_start_room_is_rejected() {
        let mut config = Config::default();
        config.game.start_room = "attic".to_string();
        assert!(matches!(
            config.game.load_world(),
            Err(GameError::UnknownStartRoom(_))
        ));
    }

    #[test]
    fn test_game_settings_carry_endpoint() {
        let mut config = Config::default();
        config.server.bind = "127.0.0.1".to_string();
        config.server.port = 6000;
        let settings = config.game_settings();
        assert_eq!(settings.address, "127.0.0.1");
        assert_eq!(settings.port, 6000);
    }
}
