//! Text selection policies
//!
//! Practice mode draws randomly from texts the student has not finished,
//! falling back to the full catalog once everything has been seen. The
//! daily challenge is a deterministic date-keyed pick with streak
//! bookkeeping handled by the engine.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::catalog::ReadingText;
use crate::store::records::{CompletedText, DailyRecord, SkillBook};

/// Skills below this mastery count as weak for selection purposes
pub const WEAK_SKILL_THRESHOLD: u8 = 50;

/// Pick the next practice text
///
/// Unseen texts are preferred. While any skill is weak the unseen pool is
/// shuffled and the head taken; otherwise a uniform draw from the pool.
/// Both branches amount to a uniform pick from the unseen texts.
// TODO: bias the draw toward texts exercising the weak skills instead of a plain shuffle.
pub fn pick_practice_text<'a, R: Rng>(
    catalog: &'a [ReadingText],
    completed: &[CompletedText],
    skills: &SkillBook,
    rng: &mut R,
) -> Option<&'a ReadingText> {
    let completed_ids: HashSet<u32> = completed.iter().map(|c| c.id).collect();
    let unseen: Vec<&ReadingText> = catalog
        .iter()
        .filter(|t| !completed_ids.contains(&t.id))
        .collect();

    if !unseen.is_empty() {
        if skills.any_below(WEAK_SKILL_THRESHOLD) {
            let mut pool = unseen;
            pool.shuffle(rng);
            return pool.first().copied();
        }
        return unseen.choose(rng).copied();
    }

    // Everything has been completed at least once
    catalog.choose(rng)
}

/// Deterministic catalog index for a calendar day
///
/// The date's digits (YYYYMMDD) mod the catalog size, so the same day and
/// catalog always pick the same text, on any device.
pub fn daily_index(date: NaiveDate, count: usize) -> usize {
    debug_assert!(count > 0);
    let digits: u64 = date
        .format("%Y%m%d")
        .to_string()
        .parse()
        .unwrap_or_default();
    (digits % count as u64) as usize
}

/// Streak value for a new day, given the previous daily record
///
/// Increments only when the previous assignment was exactly one day ago
/// and was completed; a longer gap resets the streak.
pub fn advance_streak(daily: &DailyRecord, today: NaiveDate) -> u32 {
    let Some(last) = daily.last_date else {
        return daily.streak;
    };

    let gap = (today - last).num_days();
    if gap == 1 && daily.today_done {
        daily.streak + 1
    } else if gap > 1 {
        0
    } else {
        daily.streak
    }
}
