//! Trainer configuration
//!
//! Scoring, timing, and certificate thresholds, loaded from a TOML file.
//! Every field has a default, and a missing or unreadable file falls back
//! to the defaults rather than failing startup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default XP awarded per correct answer
pub const DEFAULT_XP_PER_CORRECT: u32 = 10;

/// Default XP awarded for finishing a text
pub const DEFAULT_XP_PER_TEXT_COMPLETE: u32 = 50;

/// Default XP needed to advance one level
pub const DEFAULT_XP_PER_LEVEL: u32 = 200;

/// Default timed-mode duration in minutes
pub const DEFAULT_NAFS_TOTAL_MINUTES: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// XP per correct answer
    pub xp_per_correct: u32,
    /// XP per text completion
    pub xp_per_text_complete: u32,
    /// XP per level step
    pub xp_per_level: u32,
    /// Total minutes for the timed exam mode
    pub nafs_total_minutes: u64,
    /// Certificate eligibility thresholds
    pub certificate: CertificateConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            xp_per_correct: DEFAULT_XP_PER_CORRECT,
            xp_per_text_complete: DEFAULT_XP_PER_TEXT_COMPLETE,
            xp_per_level: DEFAULT_XP_PER_LEVEL,
            nafs_total_minutes: DEFAULT_NAFS_TOTAL_MINUTES,
            certificate: CertificateConfig::default(),
        }
    }
}

/// Thresholds a student must clear to earn the certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateConfig {
    /// Minimum completed texts
    pub min_texts: u32,
    /// Minimum overall accuracy percent
    pub min_avg_percent: u8,
    /// Minimum mastery required on every skill
    pub mastery_threshold: u8,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            min_texts: 25,
            min_avg_percent: 80,
            mastery_threshold: 80,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file is absent or unreadable
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read config, using defaults");
                return Self::default();
            }
        };

        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), %err, "could not parse config, using defaults");
                Self::default()
            }
        }
    }

    /// Default configuration file location (`~/.readhero/config.toml`)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".readhero")
            .join("config.toml")
    }

    /// Timed-mode duration in seconds
    pub fn exam_seconds(&self) -> u64 {
        self.nafs_total_minutes * 60
    }
}
