//! In-memory store for tests
//!
//! Serializes records the same way the file store does, so fallback on
//! malformed content is exercisable without touching the filesystem.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

use crate::errors::Result;
use crate::store::records::{
    Certificate, CompletedText, DailyRecord, Profile, Progress, SkillBook,
};
use crate::store::{keys, StateStore};

/// HashMap-backed record store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a record with raw content, bypassing serialization
    pub fn inject_raw(&mut self, key: &str, raw: &str) {
        self.records.insert(key.to_string(), raw.to_string());
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.records.get(key)?;
        serde_json::from_str(raw).ok()
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.records.insert(key.to_string(), json);
        Ok(())
    }
}

impl StateStore for MemoryStore {
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
        self.records.clear();
        Ok(())
    }
}
