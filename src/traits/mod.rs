//! Capability traits at the provider and moderation seams

pub mod moderation;
pub mod provider;

pub use moderation::{ContentModerator, KeywordModerator, LANGUAGE_POLICY_REASON, ModerationVerdict};
pub use provider::{GenerationProvider, TextStream};
