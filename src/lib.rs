//! ReadHero - Terminal Reading Trainer
//!
//! A local reading-comprehension trainer for young students: texts with
//! skill-tagged questions, rolling-window mastery tracking, XP and levels,
//! daily-challenge streaks, badges, and a verifiable completion
//! certificate. All state lives in a JSON store under the user's home
//! directory; there is no server.
//!
//! # Architecture
//!
//! - **store**: seven persisted records behind a capability trait
//! - **engine**: mastery, XP, selection, badges, certificate decisions
//! - **quiz**: the per-session state machine and the exam countdown
//! - **catalog / config**: content and thresholds, loaded gracefully
//! - **app / cli**: thin presentation over engine outputs

pub mod errors;
pub mod config;
pub mod catalog;
pub mod store;
pub mod engine;
pub mod quiz;
pub mod app;
pub mod cli;

// Re-export commonly used types
pub use errors::{AppError, Result};
pub use config::AppConfig;
pub use engine::Engine;
pub use store::{JsonFileStore, MemoryStore, StateStore};
