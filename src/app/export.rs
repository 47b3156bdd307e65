//! CSV progress report
//!
//! One-row report for teachers: identity, per-skill mastery, overall
//! average, XP, and completion count. The output carries a UTF-8 BOM so
//! spreadsheet tools detect the encoding.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::errors::Result;
use crate::store::records::{Profile, Progress, SkillBook, SKILL_COUNT};

/// Byte-order mark expected by spreadsheet imports
const BOM: char = '\u{feff}';

/// Build the report CSV contents
pub fn report_csv(
    profile: Option<&Profile>,
    progress: &Progress,
    skills: &SkillBook,
    date: NaiveDate,
) -> String {
    let mut csv = String::new();
    csv.push(BOM);

    csv.push_str("Name,Class,Date");
    for skill in 1..=SKILL_COUNT {
        csv.push_str(&format!(",Skill {skill}"));
    }
    csv.push_str(",Average,XP,Texts Completed\n");

    let (name, class_name) = match profile {
        Some(p) => (p.name.as_str(), p.class_name.as_str()),
        None => ("", ""),
    };
    csv.push_str(&format!("{name},{class_name},{date}"));
    for skill in 1..=SKILL_COUNT {
        csv.push_str(&format!(",{}%", skills.mastery(skill)));
    }
    csv.push_str(&format!(
        ",{}%,{},{}\n",
        progress.accuracy_percent(),
        progress.xp,
        progress.texts_completed
    ));

    csv
}

/// Write the report to `path`
pub fn write_report(
    path: &Path,
    profile: Option<&Profile>,
    progress: &Progress,
    skills: &SkillBook,
    date: NaiveDate,
) -> Result<()> {
    fs::write(path, report_csv(profile, progress, skills, date))?;
    Ok(())
}
