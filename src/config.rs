use crate::lesson::AuthorPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Telar project configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelarConfig {
    /// Lesson scalar defaults
    pub lesson: LessonDefaults,

    /// Authorship settings
    pub authors: AuthorConfig,

    /// Default sequence grammar string; absent means the built-in default
    pub sequence: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonDefaults {
    /// Default category tag
    pub category: String,

    /// Default estimated duration in minutes
    pub duration_minutes: u32,

    /// Default reward units
    pub xp: u32,
}

impl Default for LessonDefaults {
    fn default() -> Self {
        Self {
            category: "general".to_string(),
            duration_minutes: 5,
            xp: 25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    /// Contributors a quote may be attributed to
    pub allowlist: Vec<String>,

    /// Author assigned to unattributed content items
    pub canonical: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        let policy = AuthorPolicy::default();
        Self {
            allowlist: policy.allowlist,
            canonical: policy.canonical_author,
        }
    }
}

impl TelarConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: TelarConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// The authorship policy this configuration injects into the core.
    pub fn author_policy(&self) -> AuthorPolicy {
        AuthorPolicy::new(
            self.authors.allowlist.clone(),
            self.authors.canonical.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = TelarConfig::default();
        assert_eq!(config.lesson.duration_minutes, 5);
        assert!(!config.authors.allowlist.is_empty());
        assert_eq!(
            config.author_policy().canonical_author,
            config.authors.canonical
        );
    }

    #[test]
    fn partial_config_fills_defaults() {
        let json = r#"{"authors":{"canonical":"Editorial Desk"}}"#;
        let config: TelarConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.authors.canonical, "Editorial Desk");
        // untouched sections keep their defaults
        assert_eq!(config.lesson.xp, 25);
        assert!(!config.authors.allowlist.is_empty());
    }

    #[test]
    fn config_roundtrip() {
        let config = TelarConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: TelarConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.authors.canonical, config.authors.canonical);
    }
}
