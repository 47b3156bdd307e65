//! Quiz session state machine
//!
//! One run through a text's questions. Options are shuffled per question
//! at session start with the correct index remapped. `finish` is the only
//! terminal transition and is idempotent, so a countdown firing after the
//! session already ended is a no-op.

pub mod countdown;

pub use countdown::Countdown;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{Question, ReadingText};

/// How a session is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    /// Free practice with per-question feedback
    Practice,
    /// Today's challenge (feeds the streak)
    Daily,
    /// Timed exam, review shown at the end
    Exam,
}

/// One answered question
#[derive(Debug, Clone)]
pub struct AnswerRecord {
    pub skill_id: u8,
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
}

/// Feedback for a just-submitted answer
#[derive(Debug, Clone)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub correct_index: usize,
    pub explanation: String,
}

/// Final session result
#[derive(Debug, Clone)]
pub struct QuizSummary {
    pub text_id: u32,
    /// Correct answers over the full question count, as a percent
    pub score_percent: u8,
    pub correct: usize,
    pub total: usize,
    pub answers: Vec<AnswerRecord>,
}

/// A single pass through one text's questions
pub struct QuizSession {
    mode: QuizMode,
    text: ReadingText,
    questions: Vec<Question>,
    current: usize,
    answers: Vec<AnswerRecord>,
    correct: usize,
    finished: bool,
}

impl QuizSession {
    /// Start a session, shuffling each question's options
    pub fn new<R: Rng>(mode: QuizMode, text: ReadingText, rng: &mut R) -> Self {
        let questions = text
            .questions
            .iter()
            .map(|q| shuffle_question(q, rng))
            .collect();

        Self {
            mode,
            text,
            questions,
            current: 0,
            answers: Vec::new(),
            correct: 0,
            finished: false,
        }
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn text(&self) -> &ReadingText {
        &self.text
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// One-based number of the question being asked
    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    /// The question awaiting an answer, if any
    pub fn current_question(&self) -> Option<&Question> {
        if self.finished {
            return None;
        }
        self.questions.get(self.current)
    }

    /// Submit an answer for the current question
    ///
    /// Records the attempt and returns feedback; the session stays on the
    /// question until [`advance`](Self::advance). Returns `None` when there
    /// is no open question.
    pub fn submit_answer(&mut self, selected: usize) -> Option<AnswerFeedback> {
        let question = self.current_question()?.clone();
        let is_correct = selected == question.correct_index;

        self.answers.push(AnswerRecord {
            skill_id: question.skill_id,
            selected,
            correct_index: question.correct_index,
            is_correct,
        });
        if is_correct {
            self.correct += 1;
        }

        Some(AnswerFeedback {
            is_correct,
            correct_index: question.correct_index,
            explanation: question.explanation,
        })
    }

    /// Move to the next question
    pub fn advance(&mut self) {
        if !self.finished {
            self.current += 1;
        }
    }

    /// True once every question has been passed
    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// Answers recorded so far
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Shuffled questions, for end-of-session review
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// End the session
    ///
    /// The first call yields the summary; the session is terminal
    /// afterwards and later calls yield nothing. Unanswered questions
    /// count against the score, so a timer-forced finish is scored over
    /// the full question set.
    pub fn finish(&mut self) -> Option<QuizSummary> {
        if self.finished {
            return None;
        }
        self.finished = true;

        let total = self.questions.len();
        let score_percent = if total == 0 {
            0
        } else {
            ((self.correct as f64 / total as f64) * 100.0).round() as u8
        };

        Some(QuizSummary {
            text_id: self.text.id,
            score_percent,
            correct: self.correct,
            total,
            answers: self.answers.clone(),
        })
    }
}

/// Shuffle a question's options, remapping the correct index
pub fn shuffle_question<R: Rng>(question: &Question, rng: &mut R) -> Question {
    let mut order: Vec<usize> = (0..question.options.len()).collect();
    order.shuffle(rng);

    let options = order.iter().map(|&i| question.options[i].clone()).collect();
    let correct_index = order
        .iter()
        .position(|&i| i == question.correct_index)
        .unwrap_or(question.correct_index);

    Question {
        options,
        correct_index,
        ..question.clone()
    }
}
