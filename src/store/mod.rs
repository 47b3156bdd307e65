//! Persistent student state
//!
//! Seven independently stored records behind the [`StateStore`] capability
//! trait: engine code never touches the filesystem directly, and tests run
//! against the in-memory implementation.

pub mod json;
pub mod memory;
pub mod records;

pub use json::{JsonFileStore, StoreConfig};
pub use memory::MemoryStore;
pub use records::{
    Certificate, CompletedText, DailyRecord, Profile, Progress, SkillBook, SkillRecord,
    ATTEMPT_HISTORY, MASTERY_WINDOW, SKILL_COUNT,
};

use crate::errors::Result;

/// Storage keys, one per record
pub mod keys {
    pub const PROFILE: &str = "profile";
    pub const PROGRESS: &str = "progress";
    pub const SKILLS: &str = "skills";
    pub const COMPLETED: &str = "completed";
    pub const DAILY: &str = "daily";
    pub const BADGES: &str = "badges";
    pub const CERTIFICATE: &str = "certificate";

    /// Every key, in clear-all order
    pub const ALL: &[&str] = &[
        PROFILE,
        PROGRESS,
        SKILLS,
        COMPLETED,
        DAILY,
        BADGES,
        CERTIFICATE,
    ];
}

/// Capability interface over the per-record store
///
/// Loads never fail: an absent record yields its documented default, and a
/// record that fails to parse is treated as absent. Saves report I/O and
/// serialization errors.
pub trait StateStore {
    /// Student profile; `None` until onboarding has run
    fn load_profile(&self) -> Option<Profile>;
    fn save_profile(&mut self, profile: &Profile) -> Result<()>;

    fn load_progress(&self) -> Progress;
    fn save_progress(&mut self, progress: &Progress) -> Result<()>;

    fn load_skills(&self) -> SkillBook;
    fn save_skills(&mut self, skills: &SkillBook) -> Result<()>;

    /// Completed-text records, one per text id
    fn load_completed(&self) -> Vec<CompletedText>;
    fn save_completed(&mut self, completed: &[CompletedText]) -> Result<()>;

    fn load_daily(&self) -> DailyRecord;
    fn save_daily(&mut self, daily: &DailyRecord) -> Result<()>;

    /// Earned badge ids, in the order they were earned
    fn load_badges(&self) -> Vec<String>;
    fn save_badges(&mut self, badges: &[String]) -> Result<()>;

    /// The issued certificate; `None` until issuance
    fn load_certificate(&self) -> Option<Certificate>;
    fn save_certificate(&mut self, certificate: &Certificate) -> Result<()>;

    /// Remove every record, returning the store to first-run state
    fn clear_all(&mut self) -> Result<()>;
}
