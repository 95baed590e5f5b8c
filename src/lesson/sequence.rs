//! Sequence grammar
//!
//! Parses the compact ordering grammar (`content → quiz → quote`) that
//! drives the narrative assembler.

use super::errors::{SequenceError, MAX_SEQUENCE_LEN, MIN_SEQUENCE_LEN};
use super::item::ItemKind;
use serde::{Deserialize, Serialize};

/// The built-in ordering used when no grammar string is supplied.
pub const DEFAULT_SEQUENCE: [ItemKind; 6] = [
    ItemKind::Content,
    ItemKind::Quiz,
    ItemKind::Content,
    ItemKind::Quote,
    ItemKind::Content,
    ItemKind::Quiz,
];

/// A parsed, validated ordering of item kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSpec {
    tokens: Vec<ItemKind>,
}

impl SequenceSpec {
    /// Parse a grammar string into a validated spec.
    ///
    /// Tokens are separated by `→` or `->`; empty segments from repeated
    /// separators or stray whitespace are discarded. An empty or
    /// all-whitespace input is not an error: it resolves to
    /// [`DEFAULT_SEQUENCE`].
    ///
    /// Validation order is fixed so callers always get the most specific
    /// diagnosis: unknown tokens first, then length bounds, then kind
    /// coverage.
    pub fn parse(input: &str) -> Result<Self, SequenceError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut tokens = Vec::new();
        for segment in input.replace("->", "→").split('→') {
            let token = segment.trim();
            if token.is_empty() {
                continue;
            }
            tokens.push(token.parse::<ItemKind>()?);
        }

        let spec = Self { tokens };
        spec.validate()?;
        Ok(spec)
    }

    /// Check length bounds and kind coverage.
    pub fn validate(&self) -> Result<(), SequenceError> {
        if self.tokens.len() < MIN_SEQUENCE_LEN {
            return Err(SequenceError::TooShort {
                len: self.tokens.len(),
            });
        }
        if self.tokens.len() > MAX_SEQUENCE_LEN {
            return Err(SequenceError::TooLong {
                len: self.tokens.len(),
            });
        }

        let missing: Vec<ItemKind> = ItemKind::all()
            .into_iter()
            .filter(|kind| !self.tokens.contains(kind))
            .collect();
        if !missing.is_empty() {
            return Err(SequenceError::MissingKinds(missing));
        }

        Ok(())
    }

    /// The ordered kind tokens.
    pub fn tokens(&self) -> &[ItemKind] {
        &self.tokens
    }

    /// Whether the spec draws from the given kind at least once.
    pub fn requires(&self, kind: ItemKind) -> bool {
        self.tokens.contains(&kind)
    }
}

impl Default for SequenceSpec {
    fn default() -> Self {
        Self {
            tokens: DEFAULT_SEQUENCE.to_vec(),
        }
    }
}

impl std::fmt::Display for SequenceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let codes: Vec<&str> = self.tokens.iter().map(|k| k.code()).collect();
        write!(f, "{}", codes.join(" → "))
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;

    #[test]
    fn test_SEQ_001_parse_unicode_arrows() {
        let spec = SequenceSpec::parse("content → quiz → quote").unwrap();
        assert_eq!(
            spec.tokens(),
            &[ItemKind::Content, ItemKind::Quiz, ItemKind::Quote]
        );
    }

    #[test]
    fn test_SEQ_002_parse_ascii_arrows() {
        let spec = SequenceSpec::parse("quote -> content -> quiz").unwrap();
        assert_eq!(
            spec.tokens(),
            &[ItemKind::Quote, ItemKind::Content, ItemKind::Quiz]
        );
    }

    #[test]
    fn test_SEQ_003_empty_input_gives_default() {
        let spec = SequenceSpec::parse("").unwrap();
        assert_eq!(spec.tokens(), &DEFAULT_SEQUENCE);

        let spec = SequenceSpec::parse("   \n\t ").unwrap();
        assert_eq!(spec.tokens(), &DEFAULT_SEQUENCE);
    }

    #[test]
    fn test_SEQ_004_empty_segments_discarded() {
        let spec = SequenceSpec::parse("content →→ quiz → → quote").unwrap();
        assert_eq!(spec.tokens().len(), 3);
    }

    #[test]
    fn test_SEQ_005_invalid_token() {
        let err = SequenceSpec::parse("content → quizz → quote").unwrap_err();
        assert_eq!(err, SequenceError::InvalidToken("quizz".to_string()));
    }

    #[test]
    fn test_SEQ_006_case_sensitive_tokens() {
        let err = SequenceSpec::parse("Content → quiz → quote").unwrap_err();
        assert_eq!(err, SequenceError::InvalidToken("Content".to_string()));
    }

    #[test]
    fn test_SEQ_007_too_short() {
        let err = SequenceSpec::parse("content → quiz").unwrap_err();
        assert_eq!(err, SequenceError::TooShort { len: 2 });
    }

    #[test]
    fn test_SEQ_008_too_long() {
        let input = vec!["content"; 7].join(" → ") + " → quiz → quote";
        let err = SequenceSpec::parse(&input).unwrap_err();
        assert_eq!(err, SequenceError::TooLong { len: 9 });
    }

    #[test]
    fn test_SEQ_009_missing_kinds_names_absent_ones() {
        let err = SequenceSpec::parse("content → content → content → content").unwrap_err();
        assert_eq!(
            err,
            SequenceError::MissingKinds(vec![ItemKind::Quiz, ItemKind::Quote])
        );
    }

    #[test]
    fn test_SEQ_010_token_error_wins_over_length_error() {
        // One bad token in a two-token string: the unknown token is the
        // more specific diagnosis and must be reported first.
        let err = SequenceSpec::parse("content → banana").unwrap_err();
        assert_eq!(err, SequenceError::InvalidToken("banana".to_string()));
    }

    #[test]
    fn test_SEQ_011_length_error_wins_over_coverage_error() {
        let err = SequenceSpec::parse("content → content").unwrap_err();
        assert_eq!(err, SequenceError::TooShort { len: 2 });
    }

    #[test]
    fn test_SEQ_012_default_sequence_is_valid() {
        assert!(SequenceSpec::default().validate().is_ok());
    }

    #[test]
    fn test_SEQ_013_adjacent_repeats_allowed() {
        let spec = SequenceSpec::parse("quiz → quiz → content → quote").unwrap();
        assert_eq!(spec.tokens().len(), 4);
    }

    #[test]
    fn test_SEQ_014_display_roundtrip() {
        let spec = SequenceSpec::parse("quote → content → quiz").unwrap();
        let reparsed = SequenceSpec::parse(&spec.to_string()).unwrap();
        assert_eq!(reparsed, spec);
    }
}
