// Configuration management
//
// Emulator settings persisted as TOML next to the binary.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Default configuration file path
const CONFIG_FILE: &str = "famicore.toml";

/// Emulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorConfig {
    /// Video settings
    pub video: VideoConfig,

    /// Screenshot settings
    pub screenshot: ScreenshotConfig,
}

/// Video configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Target frames per second (60 for NTSC)
    pub fps: u32,
}

/// Screenshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotConfig {
    /// Base directory screenshots are written under
    pub directory: PathBuf,

    /// Include a timestamp in screenshot filenames
    pub include_timestamp: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            video: VideoConfig { fps: 60 },
            screenshot: ScreenshotConfig {
                directory: PathBuf::from("screenshots"),
                include_timestamp: true,
            },
        }
    }
}

impl EmulatorConfig {
    /// Load the configuration file, falling back to defaults if it is
    /// missing or unreadable
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Load configuration from file
    pub fn load() -> Result<Self, io::Error> {
        let contents = fs::read_to_string(CONFIG_FILE)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(CONFIG_FILE, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmulatorConfig::default();
        assert_eq!(config.video.fps, 60);
        assert!(config.screenshot.include_timestamp);
    }

    #[test]
    fn test_config_serialization() {
        let config = EmulatorConfig::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let deserialized: EmulatorConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize");

        assert_eq!(config.video.fps, deserialized.video.fps);
        assert_eq!(config.screenshot.directory, deserialized.screenshot.directory);
    }
}
