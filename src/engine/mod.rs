//! Mastery & progress engine
//!
//! The decision core of the trainer: answer scoring, mastery updates,
//! XP/leveling, text selection, badge evaluation, and certificate
//! issuance. The engine owns a [`StateStore`] and takes catalog, config,
//! date, and RNG as explicit arguments, so every operation is
//! reproducible in tests.

pub mod badges;
pub mod certificate;
pub mod mastery;
pub mod selection;

pub use badges::{BadgeDef, BADGES};
pub use certificate::EligibilityReport;

use chrono::{NaiveDate, Utc};
use rand::Rng;
use tracing::debug;

use crate::catalog::{Catalog, ReadingText};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::store::records::{
    Certificate, CompletedText, DailyRecord, Progress, SkillRecord, SKILL_COUNT,
};
use crate::store::StateStore;

/// Result of recording one answer
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    /// The updated record for the answered skill
    pub skill: SkillRecord,
    pub progress: Progress,
}

/// Result of completing a text
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub progress: Progress,
    /// Badges earned by this completion
    pub new_badges: Vec<&'static BadgeDef>,
}

/// The trainer's decision core over a state store
pub struct Engine<S: StateStore> {
    store: S,
}

impl<S: StateStore> Engine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Record an answered question for a skill
    ///
    /// Appends the attempt, refreshes mastery over the recent window, and
    /// applies XP / accuracy / level updates. A skill id outside 1..=15 is
    /// a caller bug, not a runtime condition.
    pub fn record_answer(
        &mut self,
        skill_id: u8,
        is_correct: bool,
        config: &AppConfig,
    ) -> Result<AnswerOutcome> {
        debug_assert!((1..=SKILL_COUNT).contains(&skill_id));

        let mut skills = self.store.load_skills();
        let mut progress = self.store.load_progress();

        mastery::push_attempt(skills.get_mut(skill_id), is_correct);

        if is_correct {
            progress.xp += config.xp_per_correct;
            progress.total_correct += 1;
        }
        progress.total_answered += 1;
        progress.level = mastery::level_for_xp(progress.xp, config.xp_per_level);

        self.store.save_skills(&skills)?;
        self.store.save_progress(&progress)?;

        let skill = skills.get(skill_id);
        debug!(skill_id, is_correct, mastery = skill.mastery, xp = progress.xp, "answer recorded");

        Ok(AnswerOutcome { skill, progress })
    }

    /// Record a finished text and award completion XP
    ///
    /// The completed record keeps the best score across attempts; replaying
    /// a text with a worse result never lowers it. Badge evaluation runs as
    /// part of the same operation.
    pub fn complete_text(
        &mut self,
        text_id: u32,
        score_percent: u8,
        config: &AppConfig,
    ) -> Result<CompletionOutcome> {
        let mut progress = self.store.load_progress();
        progress.texts_completed += 1;
        progress.xp += config.xp_per_text_complete;
        progress.level = mastery::level_for_xp(progress.xp, config.xp_per_level);
        self.store.save_progress(&progress)?;

        let mut completed = self.store.load_completed();
        match completed.iter_mut().find(|c| c.id == text_id) {
            Some(entry) => {
                entry.score = entry.score.max(score_percent);
                entry.attempts += 1;
                entry.last_date = Utc::now();
            }
            None => completed.push(CompletedText {
                id: text_id,
                score: score_percent,
                attempts: 1,
                last_date: Utc::now(),
            }),
        }
        self.store.save_completed(&completed)?;

        let new_badges = self.evaluate_badges()?;
        debug!(text_id, score_percent, badges = new_badges.len(), "text completed");

        Ok(CompletionOutcome { progress, new_badges })
    }

    /// Pick the next practice text, preferring unseen content
    pub fn select_next_text<'a, R: Rng>(
        &self,
        catalog: &'a Catalog,
        rng: &mut R,
    ) -> Option<&'a ReadingText> {
        let completed = self.store.load_completed();
        let skills = self.store.load_skills();
        selection::pick_practice_text(catalog.texts(), &completed, &skills, rng)
    }

    /// Pick today's challenge text, deterministically
    ///
    /// Re-calls on the same day return the already-assigned text. A new day
    /// rolls the streak forward (or resets it) and persists the fresh daily
    /// record before returning the pick.
    pub fn select_daily_text<'a>(
        &mut self,
        catalog: &'a Catalog,
        today: NaiveDate,
    ) -> Result<Option<&'a ReadingText>> {
        if catalog.is_empty() {
            return Ok(None);
        }

        let daily = self.store.load_daily();
        if daily.last_date == Some(today) {
            if let Some(id) = daily.today_text_id {
                return Ok(catalog.find(id).or_else(|| catalog.texts().first()));
            }
        }

        let streak = selection::advance_streak(&daily, today);
        let index = selection::daily_index(today, catalog.len());
        let text = &catalog.texts()[index];

        self.store.save_daily(&DailyRecord {
            last_date: Some(today),
            streak,
            today_done: false,
            today_text_id: Some(text.id),
        })?;
        debug!(date = %today, text_id = text.id, streak, "daily text assigned");

        Ok(Some(text))
    }

    /// Mark today's challenge as completed (feeds tomorrow's streak check)
    pub fn mark_daily_done(&mut self) -> Result<()> {
        let mut daily = self.store.load_daily();
        daily.today_done = true;
        self.store.save_daily(&daily)
    }

    /// Award any badges whose skill group just cleared the bar
    ///
    /// Returns only the badges earned by this call; the held set never
    /// shrinks, and an earned badge is never reported twice.
    pub fn evaluate_badges(&mut self) -> Result<Vec<&'static BadgeDef>> {
        let skills = self.store.load_skills();
        let mut held = self.store.load_badges();

        let earned = badges::newly_earned(&skills, &held);
        if !earned.is_empty() {
            held.extend(earned.iter().map(|b| b.id.to_string()));
            self.store.save_badges(&held)?;
            debug!(count = earned.len(), "badges earned");
        }

        Ok(earned)
    }

    /// Per-condition certificate eligibility breakdown
    pub fn certificate_eligibility(&self, config: &AppConfig) -> EligibilityReport {
        let progress = self.store.load_progress();
        let skills = self.store.load_skills();
        certificate::eligibility(&progress, &skills, &config.certificate)
    }

    /// Issue the completion certificate, once
    ///
    /// A previously issued certificate is returned unchanged; it is never
    /// regenerated. Issuance requires an onboarded profile and a passing
    /// eligibility report.
    pub fn issue_certificate<R: Rng>(
        &mut self,
        config: &AppConfig,
        rng: &mut R,
    ) -> Result<Certificate> {
        if let Some(existing) = self.store.load_certificate() {
            return Ok(existing);
        }

        let profile = self
            .store
            .load_profile()
            .ok_or_else(|| AppError::Certificate("no student profile on record".to_string()))?;

        let report = self.certificate_eligibility(config);
        if !report.eligible {
            return Err(AppError::Certificate(
                "eligibility requirements not met".to_string(),
            ));
        }

        let progress = self.store.load_progress();
        let cert = Certificate {
            name: profile.name,
            class_name: profile.class_name,
            date: Utc::now(),
            avg_percent: report.avg_percent,
            grade: certificate::grade_for_percent(report.avg_percent).to_string(),
            verification_id: certificate::generate_verification_id(rng),
            xp: progress.xp,
            texts_completed: progress.texts_completed,
        };

        self.store.save_certificate(&cert)?;
        debug!(verification_id = %cert.verification_id, "certificate issued");

        Ok(cert)
    }

    /// Exact-match lookup of the stored certificate by verification code
    pub fn verify_certificate(&self, code: &str) -> Option<Certificate> {
        self.store
            .load_certificate()
            .filter(|cert| cert.verification_id == code)
    }

    /// Wipe every record, returning to first-run state
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear_all()
    }
}
