//! Guesthouse configuration.
//!
//! One config.toml per installation: the room roster, the admin identity
//! and where the local store lives. The persistence backend is chosen
//! here once at startup, not re-detected per call.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{RoomCalError, RoomCalResult};

static DEFAULT_DATA_PATH: &str = "~/.local/share/roomcal";

/// The roster the original guesthouse shipped with; used until the
/// config file says otherwise.
pub const DEFAULT_ROOMS: &[&str] = &[
    "Double Room",
    "Double or Twin Room",
    "Standard Double Room",
    "Deluxe Double Room",
    "Family Room with Balcony",
    "Cottage in the Garden",
    "Sauna",
];

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_rooms() -> Vec<String> {
    DEFAULT_ROOMS.iter().map(|r| r.to_string()).collect()
}

/// Which persistence backend to construct at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// JSON file under `data_dir`. The only backend shipped in-tree;
    /// remote backends plug in behind the same `SyncAdapter` trait.
    #[default]
    Local,
}

/// Configuration at ~/.config/roomcal/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoomCalConfig {
    #[serde(default = "default_rooms")]
    pub rooms: Vec<String>,

    /// The one identity allowed to edit bookings. Unset means view-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,

    #[serde(default = "default_data_path")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub backend: Backend,
}

impl Default for RoomCalConfig {
    fn default() -> Self {
        RoomCalConfig {
            rooms: default_rooms(),
            admin_email: None,
            data_dir: default_data_path(),
            backend: Backend::Local,
        }
    }
}

impl RoomCalConfig {
    pub fn config_path() -> RoomCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RoomCalError::Config("Could not determine config directory".into()))?
            .join("roomcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> RoomCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: RoomCalConfig = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .build()
            .map_err(|e| RoomCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RoomCalError::Config(e.to_string()))?;

        Ok(config)
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full)
    }

    /// Resolve a room name as typed on the command line: exact match
    /// first, then unique case-insensitive prefix.
    pub fn resolve_room(&self, name: &str) -> RoomCalResult<String> {
        if let Some(room) = self.rooms.iter().find(|r| r.as_str() == name) {
            return Ok(room.clone());
        }

        let lowered = name.to_lowercase();
        let mut matches = self
            .rooms
            .iter()
            .filter(|r| r.to_lowercase().starts_with(&lowered));
        match (matches.next(), matches.next()) {
            (Some(room), None) => Ok(room.clone()),
            _ => Err(RoomCalError::UnknownRoom(name.to_string())),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> RoomCalResult<()> {
        let rooms = DEFAULT_ROOMS
            .iter()
            .map(|r| format!("#   \"{r}\","))
            .collect::<Vec<_>>()
            .join("\n");

        let contents = format!(
            "\
# roomcal configuration

# Rooms shown on the calendar:
# rooms = [
{rooms}
# ]

# The only identity allowed to edit bookings (everyone else is a viewer):
# admin_email = \"host@example.com\"

# Where bookings are stored locally:
# data_dir = \"{DEFAULT_DATA_PATH}\"

# Persistence backend (only \"local\" ships in-tree):
# backend = \"local\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RoomCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RoomCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_room_accepts_exact_and_unique_prefix() {
        let config = RoomCalConfig::default();

        assert_eq!(config.resolve_room("Sauna").unwrap(), "Sauna");
        assert_eq!(config.resolve_room("sau").unwrap(), "Sauna");
        assert_eq!(
            config.resolve_room("cottage").unwrap(),
            "Cottage in the Garden"
        );
    }

    #[test]
    fn resolve_room_rejects_ambiguous_and_unknown_names() {
        let config = RoomCalConfig::default();

        // "Double Room", "Double or Twin Room" both match the prefix.
        assert!(matches!(
            config.resolve_room("double"),
            Err(RoomCalError::UnknownRoom(_))
        ));
        assert!(matches!(
            config.resolve_room("Attic"),
            Err(RoomCalError::UnknownRoom(_))
        ));
    }

    #[test]
    fn default_backend_is_local() {
        let config: RoomCalConfig = toml::from_str("").unwrap();
        assert_eq!(config.backend, Backend::Local);
        assert_eq!(config.rooms.len(), DEFAULT_ROOMS.len());
    }
}
