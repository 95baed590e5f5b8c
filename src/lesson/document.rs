//! Lesson document and schema validator
//!
//! The final compliance gate. Re-checks every invariant at the
//! whole-document level without trusting upstream stages, and collects
//! every violation rather than stopping at the first.

use super::errors::{MAX_SEQUENCE_LEN, MIN_SEQUENCE_LEN};
use super::item::{Item, ItemKind};
use super::sanitize::AuthorPolicy;
use serde::{Deserialize, Serialize};

/// The final artifact handed to persistence/reporting collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Lesson title
    pub title: String,
    /// Category tag
    pub category: String,
    /// Estimated duration in minutes
    pub duration_minutes: u32,
    /// Reward units granted on completion
    pub xp: u32,
    /// Ordered lesson items
    pub items: Vec<Item>,
}

/// Validation severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationSeverity {
    /// Error - rejects the document
    Error,
    /// Warning - flag for revision, does not reject
    Warning,
}

impl ValidationSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// Constraint that was violated
    pub constraint: String,
    /// Severity level
    pub severity: ValidationSeverity,
    /// Location in the document (e.g., "items[3]")
    pub location: String,
    /// What was found
    pub text: String,
    /// Suggested fix
    pub suggestion: String,
}

impl ValidationViolation {
    fn new(
        constraint: &str,
        severity: ValidationSeverity,
        location: String,
        text: String,
        suggestion: &str,
    ) -> Self {
        Self {
            constraint: constraint.to_string(),
            severity,
            location,
            text,
            suggestion: suggestion.to_string(),
        }
    }
}

/// Validation result from the schema validator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the document may be emitted
    pub passed: bool,
    /// Every violation found
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    /// Create a passing result
    pub fn pass() -> Self {
        Self {
            passed: true,
            violations: Vec::new(),
        }
    }

    /// Add a violation; error-level violations reject the document.
    pub fn add_violation(&mut self, violation: ValidationViolation) {
        if violation.severity == ValidationSeverity::Error {
            self.passed = false;
        }
        self.violations.push(violation);
    }

    /// Format as display string
    pub fn format_display(&self) -> String {
        let mut output = String::new();

        if self.violations.is_empty() {
            output.push_str("Schema valid. No violations found. ✓\n");
            return output;
        }

        output.push_str(&format!("Violations ({}):\n", self.violations.len()));
        for (i, v) in self.violations.iter().enumerate() {
            let prefix = if i == self.violations.len() - 1 {
                "└──"
            } else {
                "├──"
            };
            output.push_str(&format!(
                "{} [{}] {} @ {}\n",
                prefix,
                v.severity.label(),
                v.constraint,
                v.location
            ));
            output.push_str(&format!("    Found: {}\n", v.text));
            output.push_str(&format!("    Fix: {}\n", v.suggestion));
        }

        output
    }
}

/// Whole-document schema validator
#[derive(Debug, Clone)]
pub struct LessonValidator {
    policy: AuthorPolicy,
}

impl LessonValidator {
    /// Create a validator carrying the injected author policy.
    pub fn new(policy: AuthorPolicy) -> Self {
        Self { policy }
    }

    /// Validate a lesson against the full structural schema. Pure; the
    /// only component allowed to declare a document accepted.
    pub fn validate(&self, lesson: &Lesson) -> ValidationResult {
        let mut result = ValidationResult::pass();

        self.validate_scalars(lesson, &mut result);
        self.validate_item_count(lesson, &mut result);
        self.validate_quote_uniqueness(lesson, &mut result);
        self.validate_items(lesson, &mut result);

        result
    }

    fn validate_scalars(&self, lesson: &Lesson, result: &mut ValidationResult) {
        if lesson.title.trim().is_empty() {
            result.add_violation(ValidationViolation::new(
                "title_present",
                ValidationSeverity::Error,
                "title".to_string(),
                "empty title".to_string(),
                "Set a non-empty lesson title",
            ));
        }
        if lesson.category.trim().is_empty() {
            result.add_violation(ValidationViolation::new(
                "category_present",
                ValidationSeverity::Error,
                "category".to_string(),
                "empty category".to_string(),
                "Set a non-empty category tag",
            ));
        }
        if lesson.duration_minutes == 0 {
            result.add_violation(ValidationViolation::new(
                "duration_positive",
                ValidationSeverity::Error,
                "duration_minutes".to_string(),
                "0".to_string(),
                "Set an estimated duration of at least one minute",
            ));
        }
        if lesson.xp == 0 {
            result.add_violation(ValidationViolation::new(
                "xp_positive",
                ValidationSeverity::Error,
                "xp".to_string(),
                "0".to_string(),
                "Grant at least one reward unit",
            ));
        }
    }

    fn validate_item_count(&self, lesson: &Lesson, result: &mut ValidationResult) {
        let count = lesson.items.len();
        if count < MIN_SEQUENCE_LEN || count > MAX_SEQUENCE_LEN {
            result.add_violation(ValidationViolation::new(
                "item_count",
                ValidationSeverity::Error,
                "items".to_string(),
                format!("{count} items"),
                &format!("Provide between {MIN_SEQUENCE_LEN} and {MAX_SEQUENCE_LEN} items"),
            ));
        }
    }

    fn validate_quote_uniqueness(&self, lesson: &Lesson, result: &mut ValidationResult) {
        let quotes = lesson
            .items
            .iter()
            .filter(|i| i.kind() == ItemKind::Quote)
            .count();
        if quotes > 1 {
            result.add_violation(ValidationViolation::new(
                "quote_uniqueness",
                ValidationSeverity::Error,
                "items".to_string(),
                format!("{quotes} quote items"),
                "Keep at most one quote per lesson",
            ));
        }
    }

    fn validate_items(&self, lesson: &Lesson, result: &mut ValidationResult) {
        for (idx, item) in lesson.items.iter().enumerate() {
            if let Err(reason) = item.check_structure() {
                result.add_violation(ValidationViolation::new(
                    "item_structure",
                    ValidationSeverity::Error,
                    format!("items[{idx}]"),
                    reason,
                    "Normalize the item's fields into their length bands",
                ));
            }
            if let Item::Quote { author, .. } = item {
                if !self.policy.allows(author) {
                    result.add_violation(ValidationViolation::new(
                        "quote_author_allowlist",
                        ValidationSeverity::Error,
                        format!("items[{idx}].author"),
                        author.clone(),
                        "Attribute the quote to an allow-listed contributor",
                    ));
                }
            }
        }
    }
}
