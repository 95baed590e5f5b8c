//! Authorship and uniqueness sanitizer
//!
//! The last defensive pass before validation. Enforces whole-list
//! invariants that per-item stages cannot see, and is safe to call on
//! item lists that never went through the assembler.

use super::errors::MAX_SEQUENCE_LEN;
use super::item::Item;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Who may be quoted, and who signs unattributed content. Injected at
/// construction so the core carries no hard-coded contributor names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorPolicy {
    /// Authors a quote may carry. The first entry is the rewrite target
    /// for off-list authors.
    pub allowlist: Vec<String>,
    /// Author assigned to content items that arrive unattributed.
    pub canonical_author: String,
}

impl AuthorPolicy {
    pub fn new(allowlist: Vec<String>, canonical_author: impl Into<String>) -> Self {
        Self {
            allowlist,
            canonical_author: canonical_author.into(),
        }
    }

    /// Whether the author may be quoted.
    pub fn allows(&self, author: &str) -> bool {
        self.allowlist.iter().any(|a| a == author)
    }

    /// The rewrite target for off-list quote authors.
    pub fn first_allowed(&self) -> &str {
        self.allowlist
            .first()
            .map(String::as_str)
            .unwrap_or(&self.canonical_author)
    }
}

impl Default for AuthorPolicy {
    fn default() -> Self {
        Self {
            allowlist: vec![
                "Telar Coaching Team".to_string(),
                "Maria Torres".to_string(),
                "James Okafor".to_string(),
                "Lena Fischer".to_string(),
            ],
            canonical_author: "Telar Coaching Team".to_string(),
        }
    }
}

/// Whole-list sanitizer over assembled items.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    policy: AuthorPolicy,
}

impl Sanitizer {
    pub fn new(policy: AuthorPolicy) -> Self {
        Self { policy }
    }

    /// Enforce global invariants: at most one quote (first wins, later
    /// ones dropped), quote authors on the allow-list, a canonical author
    /// on unattributed content, and the item cap. Idempotent.
    pub fn sanitize(&self, items: Vec<Item>) -> Vec<Item> {
        let mut out = Vec::with_capacity(items.len());
        let mut quote_seen = false;

        for mut item in items {
            match &mut item {
                Item::Quote { author, .. } => {
                    if quote_seen {
                        debug!("dropping surplus quote item");
                        continue;
                    }
                    quote_seen = true;
                    if !self.policy.allows(author) {
                        debug!(%author, "rewriting quote author onto allow-list");
                        *author = self.policy.first_allowed().to_string();
                    }
                }
                Item::Content { author, .. } => {
                    let missing = author
                        .as_deref()
                        .map(|a| a.trim().is_empty())
                        .unwrap_or(true);
                    if missing {
                        *author = Some(self.policy.canonical_author.clone());
                    }
                }
                Item::Quiz { .. } => {}
            }
            out.push(item);
        }

        out.truncate(MAX_SEQUENCE_LEN);
        out
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::lesson::item::ItemKind;

    fn sanitizer() -> Sanitizer {
        Sanitizer::new(AuthorPolicy::default())
    }

    fn quote(text: &str, author: &str) -> Item {
        Item::Quote {
            text: text.to_string(),
            author: author.to_string(),
        }
    }

    fn content(author: Option<&str>) -> Item {
        Item::Content {
            text: "A block of teaching text long enough to clear the lower band bound."
                .to_string(),
            author: author.map(str::to_string),
            tips: vec![],
        }
    }

    #[test]
    fn test_SAN_001_first_quote_wins_rest_dropped() {
        let items = vec![
            quote("Begin before you feel ready today.", "Maria Torres"),
            content(None),
            quote("Consistency beats intensity always.", "James Okafor"),
        ];
        let out = sanitizer().sanitize(items);
        let quotes: Vec<&Item> = out.iter().filter(|i| i.kind() == ItemKind::Quote).collect();
        assert_eq!(quotes.len(), 1);
        assert_eq!(out.len(), 2);
        match quotes[0] {
            Item::Quote { text, .. } => assert!(text.starts_with("Begin")),
            other => panic!("expected quote, got {other:?}"),
        }
    }

    #[test]
    fn test_SAN_002_offlist_author_rewritten_content_untouched() {
        let items = vec![quote("Discipline is a form of self-respect.", "Anonymous")];
        let out = sanitizer().sanitize(items);
        match &out[0] {
            Item::Quote { text, author } => {
                assert_eq!(author, "Telar Coaching Team");
                assert_eq!(text, "Discipline is a form of self-respect.");
            }
            other => panic!("expected quote, got {other:?}"),
        }
    }

    #[test]
    fn test_SAN_003_content_gets_canonical_author() {
        let out = sanitizer().sanitize(vec![content(None), content(Some("  "))]);
        for item in &out {
            match item {
                Item::Content { author, .. } => {
                    assert_eq!(author.as_deref(), Some("Telar Coaching Team"));
                }
                other => panic!("expected content, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_SAN_004_existing_content_author_kept() {
        let out = sanitizer().sanitize(vec![content(Some("Lena Fischer"))]);
        match &out[0] {
            Item::Content { author, .. } => assert_eq!(author.as_deref(), Some("Lena Fischer")),
            other => panic!("expected content, got {other:?}"),
        }
    }

    #[test]
    fn test_SAN_005_truncates_to_cap() {
        let items: Vec<Item> = (0..12).map(|_| content(None)).collect();
        let out = sanitizer().sanitize(items);
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn test_SAN_006_idempotent() {
        let items = vec![
            quote("Small steps, repeated, become distance.", "Nobody Known"),
            content(None),
            quote("Another quote that should get dropped.", "Maria Torres"),
            content(Some("Maria Torres")),
        ];
        let once = sanitizer().sanitize(items);
        let twice = sanitizer().sanitize(once.clone());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_SAN_007_empty_allowlist_falls_back_to_canonical() {
        let policy = AuthorPolicy::new(Vec::new(), "Editorial Desk");
        let s = Sanitizer::new(policy);
        let out = s.sanitize(vec![quote("A quote without any allow-list at all.", "X")]);
        match &out[0] {
            Item::Quote { author, .. } => assert_eq!(author, "Editorial Desk"),
            other => panic!("expected quote, got {other:?}"),
        }
    }
}
