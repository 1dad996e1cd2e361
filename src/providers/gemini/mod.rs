//! Google Gemini provider

pub mod client;
mod streaming;
pub mod types;

pub use client::{GeminiProvider, SPEECH_CONTENT_TYPE};
