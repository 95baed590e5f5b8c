//! Item type definitions
//!
//! The three item kinds that make up a lesson, with their per-field
//! length bands.

use super::SequenceError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A closed [min, max] band on field length, measured in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBand {
    pub min: usize,
    pub max: usize,
}

impl LengthBand {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Check whether a string's character count falls inside the band.
    pub fn contains(&self, text: &str) -> bool {
        let len = text.chars().count();
        len >= self.min && len <= self.max
    }
}

/// Band for `Content.text`.
pub const CONTENT_TEXT_BAND: LengthBand = LengthBand::new(50, 300);
/// Band for `Quiz.question`.
pub const QUIZ_QUESTION_BAND: LengthBand = LengthBand::new(15, 120);
/// Band for each `Quiz.options` entry.
pub const QUIZ_OPTION_BAND: LengthBand = LengthBand::new(3, 60);
/// Band for `Quiz.explanation`.
pub const QUIZ_EXPLANATION_BAND: LengthBand = LengthBand::new(30, 250);
/// Band for `Quote.text`.
pub const QUOTE_TEXT_BAND: LengthBand = LengthBand::new(20, 200);
/// Allowed number of quiz options.
pub const QUIZ_OPTION_COUNT: LengthBand = LengthBand::new(2, 5);

/// Item kind taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Explanatory teaching text
    Content,
    /// Multiple-choice question
    Quiz,
    /// Motivational quote
    Quote,
}

impl ItemKind {
    /// Get the grammar token / wire code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ItemKind::Content => "content",
            ItemKind::Quiz => "quiz",
            ItemKind::Quote => "quote",
        }
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Content => "Content",
            ItemKind::Quiz => "Quiz",
            ItemKind::Quote => "Quote",
        }
    }

    /// Get all item kinds
    pub fn all() -> Vec<ItemKind> {
        vec![ItemKind::Content, ItemKind::Quiz, ItemKind::Quote]
    }
}

impl FromStr for ItemKind {
    type Err = SequenceError;

    /// Grammar tokens are case-sensitive: `Content` is not a valid token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content" => Ok(ItemKind::Content),
            "quiz" => Ok(ItemKind::Quiz),
            "quote" => Ok(ItemKind::Quote),
            _ => Err(SequenceError::InvalidToken(s.to_string())),
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One unit of lesson content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    Content {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tips: Vec<String>,
    },
    Quiz {
        question: String,
        options: Vec<String>,
        correct_index: usize,
        explanation: String,
    },
    Quote {
        text: String,
        author: String,
    },
}

impl Item {
    /// The kind tag of this item.
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Content { .. } => ItemKind::Content,
            Item::Quiz { .. } => ItemKind::Quiz,
            Item::Quote { .. } => ItemKind::Quote,
        }
    }

    /// Check the intra-item invariants for this variant.
    ///
    /// Field lengths are assumed already normalized; this catches what
    /// normalization cannot repair (option count, answer index).
    pub fn check_structure(&self) -> Result<(), String> {
        match self {
            Item::Content { text, .. } => {
                if !CONTENT_TEXT_BAND.contains(text) {
                    return Err(format!(
                        "content text length {} outside [{}, {}]",
                        text.chars().count(),
                        CONTENT_TEXT_BAND.min,
                        CONTENT_TEXT_BAND.max
                    ));
                }
                Ok(())
            }
            Item::Quiz {
                question,
                options,
                correct_index,
                explanation,
            } => {
                if options.len() < QUIZ_OPTION_COUNT.min || options.len() > QUIZ_OPTION_COUNT.max {
                    return Err(format!("quiz has {} options, need 2-5", options.len()));
                }
                if *correct_index >= options.len() {
                    return Err(format!(
                        "correct_index {} out of range for {} options",
                        correct_index,
                        options.len()
                    ));
                }
                if !QUIZ_QUESTION_BAND.contains(question) {
                    return Err("quiz question length out of band".to_string());
                }
                if let Some(bad) = options.iter().find(|o| !QUIZ_OPTION_BAND.contains(o)) {
                    return Err(format!("quiz option '{bad}' length out of band"));
                }
                if !QUIZ_EXPLANATION_BAND.contains(explanation) {
                    return Err("quiz explanation length out of band".to_string());
                }
                Ok(())
            }
            Item::Quote { text, .. } => {
                if !QUOTE_TEXT_BAND.contains(text) {
                    return Err("quote text length out of band".to_string());
                }
                Ok(())
            }
        }
    }
}
