//! Attempt-window mastery math
//!
//! A skill's mastery is the rounded mean of its most recent attempts,
//! over a window of at most three. The full history is kept FIFO-bounded
//! at ten entries; anything older than the window has no effect on the
//! score.

use crate::store::records::{SkillRecord, ATTEMPT_HISTORY, MASTERY_WINDOW};

/// Mastery from an attempt history, 0 when empty
pub fn mastery_from_attempts(attempts: &[u8]) -> u8 {
    let start = attempts.len().saturating_sub(MASTERY_WINDOW);
    let window = &attempts[start..];
    if window.is_empty() {
        return 0;
    }

    let sum: u32 = window.iter().map(|&a| u32::from(a)).sum();
    ((sum as f64 / window.len() as f64) * 100.0).round() as u8
}

/// Append an attempt, trim the history, and refresh mastery
pub fn push_attempt(record: &mut SkillRecord, is_correct: bool) {
    record.attempts.push(u8::from(is_correct));
    if record.attempts.len() > ATTEMPT_HISTORY {
        let excess = record.attempts.len() - ATTEMPT_HISTORY;
        record.attempts.drain(..excess);
    }
    record.mastery = mastery_from_attempts(&record.attempts);
}

/// Level for an XP total: one level per `xp_per_level`, starting at 1
pub fn level_for_xp(xp: u32, xp_per_level: u32) -> u32 {
    xp / xp_per_level.max(1) + 1
}
