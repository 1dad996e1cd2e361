//! Language resolution, prompt catalog, dialects and detection

pub mod catalog;
pub mod detect;
pub mod dialect;
pub mod resolver;

pub use catalog::{BASE_INSTRUCTION, PromptCatalog, fallback_prompt};
pub use detect::{DetectionResult, LanguageDetector, UNKNOWN_LANGUAGE, parse_detection};
pub use dialect::{SupportedDialect, dialect_directive};
pub use resolver::{Region, SupportedLanguage, canonicalize, resolve_language_alias};
