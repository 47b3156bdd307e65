//! Badge definitions and evaluation
//!
//! Ten fixed badges, each covering a group of skills. A badge is earned
//! the moment every skill in its group reaches the mastery bar, and once
//! earned it is never revoked.

use crate::store::records::SkillBook;

/// Mastery every skill in a badge group must reach
pub const BADGE_MASTERY_THRESHOLD: u8 = 80;

/// A badge and the skill group it rewards
#[derive(Debug, Clone, Copy)]
pub struct BadgeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub skills: &'static [u8],
}

/// All badge definitions, in display order
pub static BADGES: &[BadgeDef] = &[
    BadgeDef {
        id: "vocab",
        name: "Vocabulary Hero",
        icon: "📚",
        skills: &[1, 2, 3, 4],
    },
    BadgeDef {
        id: "direct",
        name: "Direct Comprehension Hero",
        icon: "🎯",
        skills: &[5],
    },
    BadgeDef {
        id: "analysis",
        name: "Analysis & Comparison Hero",
        icon: "🔍",
        skills: &[6, 7],
    },
    BadgeDef {
        id: "narrative",
        name: "Narrative Hero",
        icon: "📖",
        skills: &[8],
    },
    BadgeDef {
        id: "reality",
        name: "Real-World Connection Hero",
        icon: "🌍",
        skills: &[9],
    },
    BadgeDef {
        id: "taste",
        name: "Literary Taste Hero",
        icon: "✨",
        skills: &[10],
    },
    BadgeDef {
        id: "opinion",
        name: "Opinion & Critique Hero",
        icon: "💬",
        skills: &[11, 12],
    },
    BadgeDef {
        id: "creative",
        name: "Creativity Hero",
        icon: "🎨",
        skills: &[13],
    },
    BadgeDef {
        id: "persuade",
        name: "Persuasion Hero",
        icon: "🎤",
        skills: &[14],
    },
    BadgeDef {
        id: "solutions",
        name: "Solutions Hero",
        icon: "💡",
        skills: &[15],
    },
];

/// Look up a badge definition by id
pub fn find(id: &str) -> Option<&'static BadgeDef> {
    BADGES.iter().find(|b| b.id == id)
}

/// Badges whose skill group just cleared the bar and are not yet held
pub fn newly_earned(skills: &SkillBook, held: &[String]) -> Vec<&'static BadgeDef> {
    BADGES
        .iter()
        .filter(|badge| !held.iter().any(|h| h == badge.id))
        .filter(|badge| {
            badge
                .skills
                .iter()
                .all(|&skill| skills.mastery(skill) >= BADGE_MASTERY_THRESHOLD)
        })
        .collect()
}
