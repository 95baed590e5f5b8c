//! Candidate pool builder
//!
//! Turns the generator's raw output into per-kind pools of validated
//! items. Item-level defects are dropped and counted, never raised; a
//! kind the active sequence requires is never left with an empty pool.

use super::item::{
    Item, ItemKind, CONTENT_TEXT_BAND, QUIZ_EXPLANATION_BAND, QUIZ_OPTION_BAND,
    QUIZ_OPTION_COUNT, QUIZ_QUESTION_BAND, QUOTE_TEXT_BAND,
};
use super::normalize::{normalize, strip_markup, Normalized};
use super::sanitize::AuthorPolicy;
use super::sequence::SequenceSpec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Padding / empty-input filler per field.
pub const CONTENT_FILLER: &str =
    "Take a moment to connect this idea to something you already know.";
pub const QUESTION_FILLER: &str = "What is the key takeaway here?";
pub const OPTION_FILLER: &str = "None of the above";
pub const EXPLANATION_FILLER: &str =
    "Review the lesson material above for the full reasoning.";
pub const QUOTE_FILLER: &str = "Every expert was once a beginner.";

/// Fixed text of the synthesized default content item.
pub const DEFAULT_CONTENT_TEXT: &str =
    "Learning works best in small, focused steps. Revisit one idea from this \
     lesson and explain it in your own words to make it stick.";

/// One raw content unit as handed over by the generation backend. All
/// fields are optional or defaulted: the generator is unreliable and the
/// builder decides what survives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawItem {
    pub kind: Option<ItemKind>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_index: Option<usize>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl RawItem {
    /// Shorthand for a raw content unit.
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            kind: Some(ItemKind::Content),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Shorthand for a raw quiz unit.
    pub fn quiz(
        question: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            kind: Some(ItemKind::Quiz),
            question: Some(question.into()),
            options,
            correct_index: Some(correct_index),
            explanation: Some(explanation.into()),
            ..Default::default()
        }
    }

    /// Shorthand for a raw quote unit.
    pub fn quote(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            kind: Some(ItemKind::Quote),
            text: Some(text.into()),
            author: Some(author.into()),
            ..Default::default()
        }
    }
}

/// Per-kind ordered candidate pools, first-seen-first-served.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidatePools {
    pub content: Vec<Item>,
    pub quiz: Vec<Item>,
    pub quote: Vec<Item>,
}

impl CandidatePools {
    pub fn of(&self, kind: ItemKind) -> &[Item] {
        match kind {
            ItemKind::Content => &self.content,
            ItemKind::Quiz => &self.quiz,
            ItemKind::Quote => &self.quote,
        }
    }

    fn of_mut(&mut self, kind: ItemKind) -> &mut Vec<Item> {
        match kind {
            ItemKind::Content => &mut self.content,
            ItemKind::Quiz => &mut self.quiz,
            ItemKind::Quote => &mut self.quote,
        }
    }

    pub fn total(&self) -> usize {
        self.content.len() + self.quiz.len() + self.quote.len()
    }
}

/// Counters for the lossy fallbacks applied while building pools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolReport {
    /// Candidates rejected for unrepairable structural defects.
    pub dropped: usize,
    /// Fields cut down to their band's maximum.
    pub truncated: usize,
    /// Fields padded up to their band's minimum.
    pub padded: usize,
    /// Fields that stripped to empty and were replaced by filler.
    pub defaulted: usize,
    /// Quote authors rewritten onto the allow-list.
    pub author_rewrites: usize,
    /// Default items synthesized for starved required kinds.
    pub synthesized: usize,
}

impl PoolReport {
    fn absorb(&mut self, n: &Normalized) {
        if n.truncated {
            self.truncated += 1;
        }
        if n.padded {
            self.padded += 1;
        }
        if n.defaulted {
            self.defaulted += 1;
        }
    }
}

/// The deterministic default item synthesized when a required pool is
/// empty (and, for content, by the assembler's backfill).
pub fn default_item(kind: ItemKind, policy: &AuthorPolicy) -> Item {
    match kind {
        ItemKind::Content => Item::Content {
            text: DEFAULT_CONTENT_TEXT.to_string(),
            author: Some(policy.canonical_author.clone()),
            tips: Vec::new(),
        },
        ItemKind::Quiz => Item::Quiz {
            question: "Which habit makes new knowledge stick best?".to_string(),
            options: vec![
                "Cramming once".to_string(),
                "Spaced short reviews".to_string(),
                "Only reading notes".to_string(),
                "Skipping practice".to_string(),
            ],
            correct_index: 1,
            explanation: "Short, spaced reviews force recall, which strengthens memory \
                          far more than passive rereading."
                .to_string(),
        },
        ItemKind::Quote => Item::Quote {
            text: QUOTE_FILLER.to_string(),
            author: policy.first_allowed().to_string(),
        },
    }
}

/// Build per-kind pools from raw generator output.
///
/// Generation order is preserved within each pool; ordering policy
/// belongs entirely to the assembler.
pub fn build_pools(
    raw_items: Vec<RawItem>,
    spec: &SequenceSpec,
    policy: &AuthorPolicy,
) -> (CandidatePools, PoolReport) {
    let mut pools = CandidatePools::default();
    let mut report = PoolReport::default();

    for raw in raw_items {
        match build_candidate(raw, policy, &mut report) {
            Some(item) => pools.of_mut(item.kind()).push(item),
            None => report.dropped += 1,
        }
    }

    for kind in ItemKind::all() {
        if spec.requires(kind) && pools.of(kind).is_empty() {
            warn!(kind = kind.code(), "required pool starved, synthesizing default");
            pools.of_mut(kind).push(default_item(kind, policy));
            report.synthesized += 1;
        }
    }

    (pools, report)
}

fn build_candidate(
    raw: RawItem,
    policy: &AuthorPolicy,
    report: &mut PoolReport,
) -> Option<Item> {
    let Some(kind) = raw.kind else {
        debug!("dropping candidate without a kind tag");
        return None;
    };

    let item = match kind {
        ItemKind::Content => {
            let text = normalize(raw.text.as_deref().unwrap_or(""), CONTENT_TEXT_BAND, CONTENT_FILLER);
            report.absorb(&text);
            let tips: Vec<String> = raw
                .tips
                .iter()
                .map(|t| strip_markup(t))
                .filter(|t| !t.is_empty())
                .collect();
            Item::Content {
                text: text.text,
                author: raw.author.filter(|a| !a.trim().is_empty()),
                tips,
            }
        }
        ItemKind::Quiz => {
            // Option count and answer index cannot be repaired by
            // normalization; check them on the raw values.
            if raw.options.len() < QUIZ_OPTION_COUNT.min
                || raw.options.len() > QUIZ_OPTION_COUNT.max
            {
                debug!(options = raw.options.len(), "dropping quiz: bad option count");
                return None;
            }
            let correct_index = raw.correct_index?;
            if correct_index >= raw.options.len() {
                debug!(correct_index, "dropping quiz: answer index out of range");
                return None;
            }

            let question = normalize(
                raw.question.as_deref().unwrap_or(""),
                QUIZ_QUESTION_BAND,
                QUESTION_FILLER,
            );
            report.absorb(&question);
            let options: Vec<String> = raw
                .options
                .iter()
                .map(|o| {
                    let n = normalize(o, QUIZ_OPTION_BAND, OPTION_FILLER);
                    report.absorb(&n);
                    n.text
                })
                .collect();
            let explanation = normalize(
                raw.explanation.as_deref().unwrap_or(""),
                QUIZ_EXPLANATION_BAND,
                EXPLANATION_FILLER,
            );
            report.absorb(&explanation);

            Item::Quiz {
                question: question.text,
                options,
                correct_index,
                explanation: explanation.text,
            }
        }
        ItemKind::Quote => {
            let text = normalize(raw.text.as_deref().unwrap_or(""), QUOTE_TEXT_BAND, QUOTE_FILLER);
            report.absorb(&text);
            let author = match raw.author {
                Some(a) if policy.allows(&a) => a,
                other => {
                    debug!(author = ?other, "rewriting quote author onto allow-list");
                    report.author_rewrites += 1;
                    policy.first_allowed().to_string()
                }
            };
            Item::Quote {
                text: text.text,
                author,
            }
        }
    };

    // Normalization repairs every length defect, so this only trips if a
    // band/filler combination is misconfigured.
    match item.check_structure() {
        Ok(()) => Some(item),
        Err(reason) => {
            warn!(%reason, "dropping candidate that failed structural check");
            None
        }
    }
}
