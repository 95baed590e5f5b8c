//! Lesson Assembly Module
//!
//! Deterministically assembles loosely-structured generator output into a
//! schema-valid micro-lesson.
//!
//! # Pipeline
//! - Sequence grammar: parse the ordering string (`content → quiz → quote`)
//! - Pools: normalize and validate candidates per kind
//! - Assembly: interleave pools in sequence order
//! - Sanitizer: whole-list authorship and uniqueness invariants
//! - Validator: the final compliance gate
//!
//! Every stage is a pure, synchronous transform; lossy fallbacks surface
//! as [`AssemblyReport`] counters, never as errors. Callers get either a
//! fully schema-valid [`Lesson`] or a structured rejection.

pub mod assemble;
pub mod document;
pub mod errors;
pub mod item;
pub mod normalize;
pub mod pool;
pub mod report;
pub mod sanitize;
pub mod sequence;

pub use assemble::{assemble, AssembleReport, MAX_ITEMS, MIN_ITEMS};
pub use document::{
    Lesson, LessonValidator, ValidationResult, ValidationSeverity, ValidationViolation,
};
pub use errors::{LessonError, SequenceError, MAX_SEQUENCE_LEN, MIN_SEQUENCE_LEN};
pub use item::{Item, ItemKind, LengthBand};
pub use normalize::{normalize, strip_markup, Normalized};
pub use pool::{build_pools, default_item, CandidatePools, PoolReport, RawItem};
pub use report::AssemblyReport;
pub use sanitize::{AuthorPolicy, Sanitizer};
pub use sequence::{SequenceSpec, DEFAULT_SEQUENCE};

/// Configuration for one compose run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeConfig {
    /// Lesson title
    pub title: String,
    /// Category tag
    pub category: String,
    /// Estimated duration in minutes
    pub duration_minutes: u32,
    /// Reward units granted on completion
    pub xp: u32,
    /// Grammar string; `None` or empty means the default sequence
    pub sequence: Option<String>,
    /// Injected authorship policy
    pub policy: AuthorPolicy,
}

impl ComposeConfig {
    /// Create a compose config with glue defaults for the scalar fields.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the category tag
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the estimated duration
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Set the reward units
    pub fn with_xp(mut self, xp: u32) -> Self {
        self.xp = xp;
        self
    }

    /// Set the sequence grammar string
    pub fn with_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.sequence = Some(sequence.into());
        self
    }

    /// Set the authorship policy
    pub fn with_policy(mut self, policy: AuthorPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            title: "Untitled lesson".to_string(),
            category: "general".to_string(),
            duration_minutes: 5,
            xp: 25,
            sequence: None,
            policy: AuthorPolicy::default(),
        }
    }
}

/// A schema-valid lesson plus the diagnostics of its assembly.
#[derive(Debug, Clone)]
pub struct ComposedLesson {
    pub lesson: Lesson,
    pub report: AssemblyReport,
}

/// Run the full pipeline: parse → pools → assemble → sanitize → validate.
///
/// Returns either a lesson the validator accepted, or a hard failure:
/// a sequence grammar error, or the validator's full violation list.
/// Nothing partially valid ever escapes.
pub fn compose_lesson(
    config: &ComposeConfig,
    raw_items: Vec<RawItem>,
) -> Result<ComposedLesson, LessonError> {
    let spec = match config.sequence.as_deref() {
        Some(s) => SequenceSpec::parse(s)?,
        None => SequenceSpec::default(),
    };

    let (pools, pool_report) = build_pools(raw_items, &spec, &config.policy);
    let (items, assemble_report) = assemble(&spec, pools, &config.policy);
    let items = Sanitizer::new(config.policy.clone()).sanitize(items);

    let lesson = Lesson {
        title: config.title.clone(),
        category: config.category.clone(),
        duration_minutes: config.duration_minutes,
        xp: config.xp,
        items,
    };

    let result = LessonValidator::new(config.policy.clone()).validate(&lesson);
    if !result.passed {
        return Err(LessonError::SchemaRejected(result));
    }

    Ok(ComposedLesson {
        lesson,
        report: AssemblyReport::new(pool_report, assemble_report),
    })
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;

    fn sample_raw() -> Vec<RawItem> {
        vec![
            RawItem::content(
                "Spaced repetition schedules reviews right before you would forget, \
                 which is when recall practice pays off most.",
            ),
            RawItem::quiz(
                "When is a review most effective?",
                vec![
                    "Immediately after reading".to_string(),
                    "Right before forgetting".to_string(),
                    "Once a year".to_string(),
                ],
                1,
                "Reviewing just before forgetting forces effortful recall, which \
                 strengthens the memory trace.",
            ),
            RawItem::quote("The secret of getting ahead is getting started.", "Maria Torres"),
        ]
    }

    #[test]
    fn test_PIPE_001_default_sequence_round_trip() {
        let config = ComposeConfig::new("Spaced repetition basics").with_category("learning");
        let composed = compose_lesson(&config, sample_raw()).unwrap();
        assert!(composed.lesson.items.len() >= MIN_ITEMS);
        assert!(composed.lesson.items.len() <= MAX_ITEMS);
        let result = LessonValidator::new(AuthorPolicy::default()).validate(&composed.lesson);
        assert!(result.passed);
    }

    #[test]
    fn test_PIPE_002_bad_grammar_is_a_hard_failure() {
        let config = ComposeConfig::new("Broken").with_sequence("content → mystery → quote");
        let err = compose_lesson(&config, sample_raw()).unwrap_err();
        assert!(matches!(
            err,
            LessonError::Sequence(SequenceError::InvalidToken(ref t)) if t == "mystery"
        ));
    }

    #[test]
    fn test_PIPE_003_empty_sequence_string_uses_default() {
        let config = ComposeConfig::new("Defaults").with_sequence("");
        let composed = compose_lesson(&config, sample_raw()).unwrap();
        // default sequence draws three content slots; only one candidate
        // exists, so two slots skip and assembly still lands in bounds
        assert!(composed.lesson.items.len() >= MIN_ITEMS);
        assert!(composed.report.assemble.skipped_slots > 0);
    }

    #[test]
    fn test_PIPE_004_empty_generator_output_still_composes() {
        let config = ComposeConfig::new("From nothing");
        let composed = compose_lesson(&config, Vec::new()).unwrap();
        assert_eq!(composed.report.pool.synthesized, 3);
        assert!(composed.lesson.items.len() >= MIN_ITEMS);
    }

    #[test]
    fn test_PIPE_005_opening_quote_scenario() {
        let config = ComposeConfig::new("Quote first")
            .with_sequence("quote → content → quiz → content → quiz → quote");
        let mut raw = sample_raw();
        raw.push(RawItem::quote(
            "Discipline is choosing what you want most.",
            "James Okafor",
        ));
        let composed = compose_lesson(&config, raw).unwrap();
        assert_eq!(composed.lesson.items[0].kind(), ItemKind::Quote);
        let quotes = composed
            .lesson
            .items
            .iter()
            .filter(|i| i.kind() == ItemKind::Quote)
            .count();
        assert_eq!(quotes, 1);
    }

    #[test]
    fn test_PIPE_006_zero_duration_rejected_with_violations() {
        let config = ComposeConfig::new("Broken scalars").with_duration(0);
        let err = compose_lesson(&config, sample_raw()).unwrap_err();
        match err {
            LessonError::SchemaRejected(result) => {
                assert!(result
                    .violations
                    .iter()
                    .any(|v| v.constraint == "duration_positive"));
            }
            other => panic!("expected schema rejection, got {other}"),
        }
    }
}
