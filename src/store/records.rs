//! Persisted record types
//!
//! The seven records the trainer keeps between runs. Each record is stored
//! and loaded independently; absent or unreadable records fall back to the
//! defaults defined here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of tracked reading skills (ids 1..=SKILL_COUNT)
pub const SKILL_COUNT: u8 = 15;

/// Maximum attempts kept per skill (FIFO)
pub const ATTEMPT_HISTORY: usize = 10;

/// Mastery is computed from this many most-recent attempts
pub const MASTERY_WINDOW: usize = 3;

/// Student identity, captured once at onboarding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub class_name: String,
}

/// Cumulative progress counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Experience points from correct answers and text completions
    pub xp: u32,
    /// Current level, always `xp / xp_per_level + 1`
    pub level: u32,
    /// Texts finished at least once (counts repeats)
    pub texts_completed: u32,
    /// Correct answers across all sessions
    pub total_correct: u32,
    /// Answers given across all sessions
    pub total_answered: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            texts_completed: 0,
            total_correct: 0,
            total_answered: 0,
        }
    }
}

impl Progress {
    /// Overall accuracy as a rounded percentage, 0 before any answer
    pub fn accuracy_percent(&self) -> u8 {
        if self.total_answered == 0 {
            return 0;
        }
        ((self.total_correct as f64 / self.total_answered as f64) * 100.0).round() as u8
    }
}

/// Rolling attempt history and derived mastery for one skill
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    /// Most recent attempts, oldest first, 1 = correct, 0 = wrong
    pub attempts: Vec<u8>,
    /// Derived 0-100 score over the last few attempts
    pub mastery: u8,
}

/// Per-skill records for all tracked skills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillBook {
    skills: BTreeMap<u8, SkillRecord>,
}

impl Default for SkillBook {
    fn default() -> Self {
        let skills = (1..=SKILL_COUNT)
            .map(|id| (id, SkillRecord::default()))
            .collect();
        Self { skills }
    }
}

impl SkillBook {
    /// Mastery for a skill, 0 when the record is missing
    pub fn mastery(&self, skill_id: u8) -> u8 {
        self.skills.get(&skill_id).map_or(0, |s| s.mastery)
    }

    /// Record for a skill, default when missing
    pub fn get(&self, skill_id: u8) -> SkillRecord {
        self.skills.get(&skill_id).cloned().unwrap_or_default()
    }

    /// Mutable record for a skill, created on first access
    pub fn get_mut(&mut self, skill_id: u8) -> &mut SkillRecord {
        self.skills.entry(skill_id).or_default()
    }

    /// Iterate records in skill-id order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &SkillRecord)> {
        self.skills.iter().map(|(id, rec)| (*id, rec))
    }

    /// True when every tracked skill is at or above `threshold`
    pub fn all_at_least(&self, threshold: u8) -> bool {
        (1..=SKILL_COUNT).all(|id| self.mastery(id) >= threshold)
    }

    /// True when any tracked skill sits below `threshold`
    pub fn any_below(&self, threshold: u8) -> bool {
        (1..=SKILL_COUNT).any(|id| self.mastery(id) < threshold)
    }

    /// The `n` lowest-mastery skills, weakest first
    pub fn weakest(&self, n: usize) -> Vec<(u8, u8)> {
        let mut all: Vec<(u8, u8)> = (1..=SKILL_COUNT).map(|id| (id, self.mastery(id))).collect();
        all.sort_by_key(|&(_, mastery)| mastery);
        all.truncate(n);
        all
    }
}

/// Best result for a text the student has finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedText {
    pub id: u32,
    /// Best score percent across attempts
    pub score: u8,
    /// Completion count, at least 1
    pub attempts: u32,
    pub last_date: DateTime<Utc>,
}

/// Daily-challenge bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar day the daily text was last assigned
    pub last_date: Option<NaiveDate>,
    /// Consecutive days with a completed daily challenge
    pub streak: u32,
    /// Whether today's assigned text was completed
    pub today_done: bool,
    /// Text assigned for the current day
    pub today_text_id: Option<u32>,
}

/// The one completion certificate, immutable once issued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub name: String,
    pub class_name: String,
    pub date: DateTime<Utc>,
    pub avg_percent: u8,
    pub grade: String,
    pub verification_id: String,
    pub xp: u32,
    pub texts_completed: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_defaults() {
        let progress = Progress::default();
        assert_eq!(progress.xp, 0);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.accuracy_percent(), 0);
    }

    #[test]
    fn test_accuracy_rounding() {
        let progress = Progress {
            total_correct: 2,
            total_answered: 3,
            ..Default::default()
        };
        assert_eq!(progress.accuracy_percent(), 67);
    }

    #[test]
    fn test_skill_book_covers_all_skills() {
        let book = SkillBook::default();
        assert_eq!(book.iter().count(), SKILL_COUNT as usize);
        assert_eq!(book.mastery(1), 0);
        assert_eq!(book.mastery(SKILL_COUNT), 0);
    }

    #[test]
    fn test_skill_book_thresholds() {
        let mut book = SkillBook::default();
        assert!(book.any_below(50));
        assert!(!book.all_at_least(80));

        for id in 1..=SKILL_COUNT {
            book.get_mut(id).mastery = 85;
        }
        assert!(book.all_at_least(80));
        assert!(!book.any_below(50));
    }

    #[test]
    fn test_weakest_orders_by_mastery() {
        let mut book = SkillBook::default();
        book.get_mut(3).mastery = 90;
        book.get_mut(7).mastery = 40;
        let weakest = book.weakest(3);
        assert_eq!(weakest.len(), 3);
        assert!(weakest.iter().all(|&(id, _)| id != 3));
    }

    #[test]
    fn test_skill_book_json_shape() {
        let mut book = SkillBook::default();
        book.get_mut(1).attempts = vec![1, 0, 1];
        book.get_mut(1).mastery = 67;

        let json = serde_json::to_string(&book).unwrap();
        let back: SkillBook = serde_json::from_str(&json).unwrap();
        assert_eq!(back, book);
        assert_eq!(back.get(1).attempts, vec![1, 0, 1]);
    }
}
