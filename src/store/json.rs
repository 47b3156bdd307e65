//! JSON file-backed store
//!
//! One pretty-printed JSON file per record under a state directory
//! (default `~/.readhero/state`). A file that is missing or fails to parse
//! counts as an absent record.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::store::records::{
    Certificate, CompletedText, DailyRecord, Profile, Progress, SkillBook,
};
use crate::store::{keys, StateStore};

/// Store location configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the record files
    pub state_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let state_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".readhero")
            .join("state");

        Self { state_dir }
    }
}

/// File-per-record JSON store
pub struct JsonFileStore {
    config: StoreConfig,
}

impl JsonFileStore {
    /// Create a store, ensuring the state directory exists
    pub fn new(config: StoreConfig) -> Result<Self> {
        if !config.state_dir.exists() {
            fs::create_dir_all(&config.state_dir)?;
        }

        Ok(Self { config })
    }

    /// Create with the default state directory
    pub fn open_default() -> Result<Self> {
        Self::new(StoreConfig::default())
    }

    /// Directory the record files live in
    pub fn state_dir(&self) -> &PathBuf {
        &self.config.state_dir
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.config.state_dir.join(format!("{key}.json"))
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = fs::read_to_string(self.record_path(key)).ok()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                // Unparseable content counts as absent
                warn!(key, %err, "discarding unreadable record");
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.record_path(key), json)?;
        debug!(key, "record saved");
        Ok(())
    }
}

impl StateStore for JsonFileStore {
    fn load_profile(&self) -> Option<Profile> {
        self.read(keys::PROFILE)
    }

    fn save_profile(&mut self, profile: &Profile) -> Result<()> {
        self.write(keys::PROFILE, profile)
    }

    fn load_progress(&self) -> Progress {
        self.read(keys::PROGRESS).unwrap_or_default()
    }

    fn save_progress(&mut self, progress: &Progress) -> Result<()> {
        self.write(keys::PROGRESS, progress)
    }

    fn load_skills(&self) -> SkillBook {
        self.read(keys::SKILLS).unwrap_or_default()
    }

    fn save_skills(&mut self, skills: &SkillBook) -> Result<()> {
        self.write(keys::SKILLS, skills)
    }

    fn load_completed(&self) -> Vec<CompletedText> {
        self.read(keys::COMPLETED).unwrap_or_default()
    }

    fn save_completed(&mut self, completed: &[CompletedText]) -> Result<()> {
        self.write(keys::COMPLETED, &completed)
    }

    fn load_daily(&self) -> DailyRecord {
        self.read(keys::DAILY).unwrap_or_default()
    }

    fn save_daily(&mut self, daily: &DailyRecord) -> Result<()> {
        self.write(keys::DAILY, daily)
    }

    fn load_badges(&self) -> Vec<String> {
        self.read(keys::BADGES).unwrap_or_default()
    }

    fn save_badges(&mut self, badges: &[String]) -> Result<()> {
        self.write(keys::BADGES, &badges)
    }

    fn load_certificate(&self) -> Option<Certificate> {
        self.read(keys::CERTIFICATE)
    }

    fn save_certificate(&mut self, certificate: &Certificate) -> Result<()> {
        self.write(keys::CERTIFICATE, certificate)
    }

    fn clear_all(&mut self) -> Result<()> {
        for key in keys::ALL {
            let path = self.record_path(key);
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        debug!("all records cleared");
        Ok(())
    }
}
