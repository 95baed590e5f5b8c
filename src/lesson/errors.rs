//! Lesson assembly errors
//!
//! Error types for sequence parsing and lesson composition.

use super::document::ValidationResult;
use super::item::ItemKind;
use thiserror::Error;

/// Minimum number of tokens in a sequence (and items in a lesson).
pub const MIN_SEQUENCE_LEN: usize = 3;
/// Maximum number of tokens in a sequence (and items in a lesson).
pub const MAX_SEQUENCE_LEN: usize = 8;

/// Errors produced while parsing or validating a sequence grammar string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Invalid sequence token: {0}")]
    InvalidToken(String),

    #[error("Sequence too short: {len} tokens (minimum {MIN_SEQUENCE_LEN})")]
    TooShort { len: usize },

    #[error("Sequence too long: {len} tokens (maximum {MAX_SEQUENCE_LEN})")]
    TooLong { len: usize },

    #[error("Sequence missing required kinds: {}", format_kinds(.0))]
    MissingKinds(Vec<ItemKind>),
}

fn format_kinds(kinds: &[ItemKind]) -> String {
    kinds
        .iter()
        .map(ItemKind::code)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur during lesson composition
#[derive(Error, Debug)]
pub enum LessonError {
    #[error("Sequence grammar error: {0}")]
    Sequence(#[from] SequenceError),

    #[error("Lesson rejected by schema validator ({} violations)", .0.violations.len())]
    SchemaRejected(ValidationResult),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_error_messages_name_the_problem() {
        let err = SequenceError::InvalidToken("quizz".to_string());
        assert_eq!(err.to_string(), "Invalid sequence token: quizz");

        let err = SequenceError::TooShort { len: 2 };
        assert!(err.to_string().contains("2 tokens"));
        assert!(err.to_string().contains("minimum 3"));

        let err = SequenceError::TooLong { len: 9 };
        assert!(err.to_string().contains("maximum 8"));
    }

    #[test]
    fn missing_kinds_lists_each_absent_kind() {
        let err = SequenceError::MissingKinds(vec![ItemKind::Quiz, ItemKind::Quote]);
        let msg = err.to_string();
        assert!(msg.contains("quiz"));
        assert!(msg.contains("quote"));
        assert!(!msg.contains("content"));
    }
}
