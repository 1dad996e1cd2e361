//! Known regional dialects.

use super::resolver::SupportedLanguage;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedDialect {
    Oyo,
    Ijebu,
    Central,
    Waawa,
    Kano,
    Sokoto,
    Unguja,
    Mvita,
}

impl SupportedDialect {
    pub const ALL: [SupportedDialect; 8] = [
        SupportedDialect::Oyo,
        SupportedDialect::Ijebu,
        SupportedDialect::Central,
        SupportedDialect::Waawa,
        SupportedDialect::Kano,
        SupportedDialect::Sokoto,
        SupportedDialect::Unguja,
        SupportedDialect::Mvita,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SupportedDialect::Oyo => "oyo",
            SupportedDialect::Ijebu => "ijebu",
            SupportedDialect::Central => "central",
            SupportedDialect::Waawa => "waawa",
            SupportedDialect::Kano => "kano",
            SupportedDialect::Sokoto => "sokoto",
            SupportedDialect::Unguja => "unguja",
            SupportedDialect::Mvita => "mvita",
        }
    }

    /// The language this dialect belongs to.
    pub const fn language(self) -> SupportedLanguage {
        match self {
            SupportedDialect::Oyo | SupportedDialect::Ijebu => SupportedLanguage::Yoruba,
            SupportedDialect::Central | SupportedDialect::Waawa => SupportedLanguage::Igbo,
            SupportedDialect::Kano | SupportedDialect::Sokoto => SupportedLanguage::Hausa,
            SupportedDialect::Unguja | SupportedDialect::Mvita => SupportedLanguage::Swahili,
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_lowercase();
        Self::ALL.into_iter().find(|d| d.as_str() == normalized)
    }
}

impl fmt::Display for SupportedDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prompt suffix pinning generation to a regional variety.
///
/// Free-form dialect names are accepted as-is.
pub fn dialect_directive(dialect: &str, language: &str) -> String {
    format!(
        "\nIMPORTANT: Use the {dialect} dialect/variety of {language}. Ensure vocabulary and tone matches this specific region."
    )
}
