//! Reading text catalog
//!
//! The ordered set of texts the trainer serves, each carrying one 4-option
//! question per tracked skill. Loaded from JSON in a data directory; the
//! supplementary file is best-effort and a failed primary load degrades to
//! an empty catalog instead of aborting.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Options per question
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Primary catalog file name
pub const CATALOG_FILE: &str = "texts.json";

/// Optional supplementary catalog file name
pub const EXTRA_CATALOG_FILE: &str = "texts_extra.json";

/// One quiz question, tagged with the skill it exercises
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub stem: String,
    /// Exactly four answer options
    pub options: Vec<String>,
    /// Zero-based index of the correct option
    pub correct_index: usize,
    /// Skill id 1..=15
    pub skill_id: u8,
    /// Shown after answering in practice mode
    #[serde(default)]
    pub explanation: String,
}

/// A reading text with its question set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingText {
    pub id: u32,
    pub title: String,
    pub body: String,
    pub difficulty: String,
    pub genre: String,
    pub questions: Vec<Question>,
}

/// The full text catalog, in file order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    texts: Vec<ReadingText>,
}

impl Catalog {
    /// Build a catalog from already-loaded texts
    pub fn from_texts(texts: Vec<ReadingText>) -> Self {
        Self { texts }
    }

    /// Load the catalog from `data_dir`
    ///
    /// `texts.json` failures empty the catalog; `texts_extra.json` is
    /// appended when present and silently skipped otherwise.
    pub fn load(data_dir: &Path) -> Self {
        let mut texts = match read_texts(&data_dir.join(CATALOG_FILE)) {
            Ok(texts) => texts,
            Err(err) => {
                warn!(%err, "could not load text catalog");
                return Self::default();
            }
        };

        // Supplementary content is optional
        if let Ok(extra) = read_texts(&data_dir.join(EXTRA_CATALOG_FILE)) {
            debug!(count = extra.len(), "loaded supplementary texts");
            texts.extend(extra);
        }

        Self { texts }
    }

    pub fn texts(&self) -> &[ReadingText] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn find(&self, id: u32) -> Option<&ReadingText> {
        self.texts.iter().find(|t| t.id == id)
    }

    /// Texts matching the given difficulty and genre filters
    pub fn filtered(&self, difficulty: Option<&str>, genre: Option<&str>) -> Vec<&ReadingText> {
        self.texts
            .iter()
            .filter(|t| difficulty.map_or(true, |d| t.difficulty == d))
            .filter(|t| genre.map_or(true, |g| t.genre == g))
            .collect()
    }
}

fn read_texts(path: &Path) -> crate::errors::Result<Vec<ReadingText>> {
    let raw = fs::read_to_string(path)?;
    let texts = serde_json::from_str(&raw)?;
    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_text(id: u32) -> ReadingText {
        ReadingText {
            id,
            title: format!("Text {id}"),
            body: "Once upon a time.".to_string(),
            difficulty: "easy".to_string(),
            genre: "story".to_string(),
            questions: vec![Question {
                stem: "What happened first?".to_string(),
                options: vec![
                    "A".to_string(),
                    "B".to_string(),
                    "C".to_string(),
                    "D".to_string(),
                ],
                correct_index: 2,
                skill_id: 5,
                explanation: String::new(),
            }],
        }
    }

    #[test]
    fn test_load_primary_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let texts = vec![sample_text(1), sample_text(2)];
        fs::write(
            temp_dir.path().join(CATALOG_FILE),
            serde_json::to_string(&texts).unwrap(),
        )
        .unwrap();

        let catalog = Catalog::load(temp_dir.path());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find(2).unwrap().title, "Text 2");
    }

    #[test]
    fn test_missing_primary_yields_empty() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = Catalog::load(temp_dir.path());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_extra_catalog_appended() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CATALOG_FILE),
            serde_json::to_string(&vec![sample_text(1)]).unwrap(),
        )
        .unwrap();
        fs::write(
            temp_dir.path().join(EXTRA_CATALOG_FILE),
            serde_json::to_string(&vec![sample_text(9)]).unwrap(),
        )
        .unwrap();

        let catalog = Catalog::load(temp_dir.path());
        assert_eq!(catalog.len(), 2);
        assert!(catalog.find(9).is_some());
    }

    #[test]
    fn test_broken_extra_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CATALOG_FILE),
            serde_json::to_string(&vec![sample_text(1)]).unwrap(),
        )
        .unwrap();
        fs::write(temp_dir.path().join(EXTRA_CATALOG_FILE), "nonsense").unwrap();

        let catalog = Catalog::load(temp_dir.path());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_filtered() {
        let mut hard = sample_text(3);
        hard.difficulty = "hard".to_string();
        let catalog = Catalog::from_texts(vec![sample_text(1), sample_text(2), hard]);

        assert_eq!(catalog.filtered(Some("easy"), None).len(), 2);
        assert_eq!(catalog.filtered(Some("hard"), Some("story")).len(), 1);
        assert_eq!(catalog.filtered(None, None).len(), 3);
    }
}
