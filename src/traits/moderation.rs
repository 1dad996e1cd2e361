//! Content moderation capability trait

use async_trait::async_trait;
use std::collections::HashMap;

/// Reason reported when a per-language keyword rule blocks a message.
pub const LANGUAGE_POLICY_REASON: &str = "language_specific_policy";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationVerdict {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl ModerationVerdict {
    pub const fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Moderates a message in the context of its resolved language.
#[async_trait]
pub trait ContentModerator: Send + Sync {
    async fn moderate(&self, text: &str, language: &str) -> ModerationVerdict;
}

/// Case-insensitive substring blocklist, one list per language plus a default.
#[derive(Debug, Clone, Default)]
pub struct KeywordModerator {
    default_rules: Vec<String>,
    language_rules: HashMap<String, Vec<String>>,
}

impl KeywordModerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Words blocked for languages without their own list.
    pub fn with_default_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.default_rules = lowercase_all(words);
        self
    }

    pub fn with_language_words<I, S>(mut self, language: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.language_rules.insert(language.into(), lowercase_all(words));
        self
    }

    fn rules_for(&self, language: &str) -> &[String] {
        self.language_rules
            .get(language)
            .map_or(&self.default_rules, |rules| rules)
    }

    pub fn check(&self, text: &str, language: &str) -> ModerationVerdict {
        if text.trim().is_empty() {
            return ModerationVerdict::allow();
        }
        let lowered = text.to_lowercase();
        match self
            .rules_for(language)
            .iter()
            .find(|word| lowered.contains(word.as_str()))
        {
            Some(banned) => {
                tracing::warn!(language, banned = %banned, "blocked by language safety rule");
                ModerationVerdict::block(LANGUAGE_POLICY_REASON)
            }
            None => ModerationVerdict::allow(),
        }
    }
}

fn lowercase_all<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| w.as_ref().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[async_trait]
impl ContentModerator for KeywordModerator {
    async fn moderate(&self, text: &str, language: &str) -> ModerationVerdict {
        self.check(text, language)
    }
}
