//! Narrative assembler
//!
//! Interleaves the candidate pools in sequence order. This stage cannot
//! fail: starvation is resolved by skipping, the floor by backfill, the
//! cap by stopping early.

use super::errors::{MAX_SEQUENCE_LEN, MIN_SEQUENCE_LEN};
use super::item::{Item, ItemKind};
use super::pool::{default_item, CandidatePools};
use super::sanitize::AuthorPolicy;
use super::sequence::SequenceSpec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum number of items in an assembled lesson.
pub const MIN_ITEMS: usize = MIN_SEQUENCE_LEN;
/// Maximum number of items in an assembled lesson.
pub const MAX_ITEMS: usize = MAX_SEQUENCE_LEN;

/// Counters for the skip/backfill policies applied during assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembleReport {
    /// Non-quote tokens skipped because their pool ran dry.
    pub skipped_slots: usize,
    /// Quote tokens skipped after the first quote was placed.
    pub capped_quotes: usize,
    /// Default content items appended to reach the floor.
    pub backfilled: usize,
}

/// Deterministically interleave `pools` following `spec`'s token order.
///
/// One forward-only cursor per pool; pools are consumed, never shared.
/// The quote cap is global: once a quote has been placed, every later
/// quote token is skipped outright. A dry non-quote pool skips the slot
/// rather than substituting, so narrative positions stay faithful to the
/// grammar; the floor is restored by end-backfill instead (see the
/// backfill note in DESIGN.md).
pub fn assemble(
    spec: &SequenceSpec,
    pools: CandidatePools,
    policy: &AuthorPolicy,
) -> (Vec<Item>, AssembleReport) {
    let mut report = AssembleReport::default();
    let mut items = Vec::with_capacity(spec.tokens().len());

    let mut content = pools.content.into_iter();
    let mut quiz = pools.quiz.into_iter();
    let mut quote = pools.quote.into_iter();
    let mut quote_placed = false;

    for &token in spec.tokens() {
        if items.len() >= MAX_ITEMS {
            debug!("item cap reached, ignoring remaining sequence tokens");
            break;
        }

        let drawn = match token {
            ItemKind::Quote if quote_placed => {
                report.capped_quotes += 1;
                debug!("skipping quote token: a quote is already placed");
                continue;
            }
            ItemKind::Content => content.next(),
            ItemKind::Quiz => quiz.next(),
            ItemKind::Quote => quote.next(),
        };

        match drawn {
            Some(item) => {
                if item.kind() == ItemKind::Quote {
                    quote_placed = true;
                }
                items.push(item);
            }
            None => {
                report.skipped_slots += 1;
                debug!(kind = token.code(), "pool exhausted, skipping slot");
            }
        }
    }

    while items.len() < MIN_ITEMS {
        items.push(default_item(ItemKind::Content, policy));
        report.backfilled += 1;
    }

    (items, report)
}
