// Most-recently-used ROM list, persisted as JSON

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where the list is stored
const RECENT_ROMS_FILE: &str = "recent_roms.json";

/// Maximum number of entries kept
const MAX_RECENT_ROMS: usize = 10;

/// A most-recently-used list of ROM paths
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RecentRomsList {
    roms: Vec<PathBuf>,
}

impl RecentRomsList {
    /// Load the list, falling back to an empty one
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Load the list from disk
    pub fn load() -> Result<Self, io::Error> {
        let contents = fs::read_to_string(RECENT_ROMS_FILE)?;
        serde_json::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save the list to disk
    pub fn save(&self) -> Result<(), io::Error> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(RECENT_ROMS_FILE, contents)
    }

    /// Record a ROM as most recently used
    ///
    /// Duplicates move to the front; the list is capped at ten entries.
    pub fn add<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref().to_path_buf();
        self.roms.retain(|p| p != &path);
        self.roms.insert(0, path);
        self.roms.truncate(MAX_RECENT_ROMS);
    }

    /// The recorded paths, most recent first
    pub fn roms(&self) -> &[PathBuf] {
        &self.roms
    }
}
