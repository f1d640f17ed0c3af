use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};
use std::{fs, path::PathBuf};

use crate::model::{EventData, UserPreferences};

const EVENT_DATA_FILE: &str = "event_data.json";
const USER_PREFERENCES_FILE: &str = "user_preferences.json";

/// Client-local session storage: the planned event and the user's comfort
/// thresholds, one JSON file each.
///
/// Absence of a record means "no data yet" and is never an error; there is
/// no versioning or migration handling.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store rooted at an explicit directory (tests, alternate profiles).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform data directory.
    pub fn open() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "riskcast", "riskcast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(Self::at(dirs.data_local_dir().join("session")))
    }

    pub fn load_event(&self) -> Result<Option<EventData>> {
        self.load(EVENT_DATA_FILE)
    }

    pub fn save_event(&self, event: &EventData) -> Result<()> {
        self.save(EVENT_DATA_FILE, event)
    }

    pub fn load_preferences(&self) -> Result<Option<UserPreferences>> {
        self.load(USER_PREFERENCES_FILE)
    }

    pub fn save_preferences(&self, prefs: &UserPreferences) -> Result<()> {
        self.save(USER_PREFERENCES_FILE, prefs)
    }

    /// Drop both records. Records that were never written are skipped.
    pub fn clear(&self) -> Result<()> {
        for name in [EVENT_DATA_FILE, USER_PREFERENCES_FILE] {
            let path = self.dir.join(name);
            if path.exists() {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove session file: {}", path.display()))?;
            }
        }
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;

        let value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session file: {}", path.display()))?;

        Ok(Some(value))
    }

    fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create session directory: {}", self.dir.display())
        })?;

        let json = serde_json::to_string_pretty(value).context("Failed to serialize session record")?;

        let path = self.dir.join(name);
        fs::write(&path, json)
            .with_context(|| format!("Failed to write session file: {}", path.display()))?;

        Ok(())
    }
}
