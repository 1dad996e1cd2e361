//! Operations exposed on [`AfriTalk`](crate::AfriTalk).
//!
//! Each module adds an `impl AfriTalk` block for one capability. Every
//! operation has a `*_as` variant taking the caller identity used by the
//! rate limiter.

pub mod audio;
pub mod chat;
pub mod feedback;
pub mod media;
pub mod translate;

pub use audio::{DEFAULT_VOICE, VoiceStream, provider_voice};
