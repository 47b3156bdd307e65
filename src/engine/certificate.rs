//! Certificate eligibility and verification codes
//!
//! Eligibility is a compound condition over skill mastery, completion
//! count, and overall accuracy, reported per sub-condition so the UI can
//! render a progress checklist. Verification codes use a 32-symbol
//! alphabet with the easily-confused characters removed.

use rand::Rng;
use std::collections::BTreeMap;

use crate::config::CertificateConfig;
use crate::store::records::{Progress, SkillBook};

/// Verification code prefix
pub const VERIFICATION_PREFIX: &str = "RH-";

/// Code alphabet: A-Z and 2-9 without I, O, 0, 1
pub const VERIFICATION_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Random characters after the prefix
pub const VERIFICATION_CODE_LEN: usize = 8;

/// Per-condition eligibility breakdown
#[derive(Debug, Clone)]
pub struct EligibilityReport {
    /// True when every sub-condition passes
    pub eligible: bool,
    /// Every skill at or above the mastery threshold
    pub all_mastered: bool,
    /// Enough texts completed
    pub enough_texts: bool,
    /// Overall accuracy at or above the bar
    pub good_average: bool,
    pub texts_completed: u32,
    pub min_texts: u32,
    pub avg_percent: u8,
    pub min_avg_percent: u8,
    pub mastery_threshold: u8,
    /// Current mastery per skill, for the checklist display
    pub masteries: BTreeMap<u8, u8>,
}

/// Evaluate certificate eligibility against the configured thresholds
pub fn eligibility(
    progress: &Progress,
    skills: &SkillBook,
    config: &CertificateConfig,
) -> EligibilityReport {
    let all_mastered = skills.all_at_least(config.mastery_threshold);
    let enough_texts = progress.texts_completed >= config.min_texts;
    let avg_percent = progress.accuracy_percent();
    let good_average = avg_percent >= config.min_avg_percent;

    EligibilityReport {
        eligible: all_mastered && enough_texts && good_average,
        all_mastered,
        enough_texts,
        good_average,
        texts_completed: progress.texts_completed,
        min_texts: config.min_texts,
        avg_percent,
        min_avg_percent: config.min_avg_percent,
        mastery_threshold: config.mastery_threshold,
        masteries: skills.iter().map(|(id, rec)| (id, rec.mastery)).collect(),
    }
}

/// Letter grade for an average percent
pub fn grade_for_percent(percent: u8) -> &'static str {
    if percent >= 90 {
        "Excellent"
    } else if percent >= 80 {
        "Very Good"
    } else if percent >= 70 {
        "Good"
    } else if percent >= 60 {
        "Pass"
    } else {
        "Needs Improvement"
    }
}

/// Generate a fresh verification code ("RH-" + 8 alphabet chars)
pub fn generate_verification_id<R: Rng>(rng: &mut R) -> String {
    let mut id = String::with_capacity(VERIFICATION_PREFIX.len() + VERIFICATION_CODE_LEN);
    id.push_str(VERIFICATION_PREFIX);
    for _ in 0..VERIFICATION_CODE_LEN {
        let idx = rng.gen_range(0..VERIFICATION_ALPHABET.len());
        id.push(VERIFICATION_ALPHABET[idx] as char);
    }
    id
}
