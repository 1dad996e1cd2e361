//! # AfriTalk
//!
//! Multilingual chat orchestration over generative model providers, with
//! first-class support for African languages.
//!
//! A request names its language loosely ("Yorùbá", "zulu", "auto") or asks
//! for detection. The pipeline resolves it to a canonical id, gates on
//! detection confidence, moderates the message, assembles a culturally tuned
//! system prompt and calls the provider with retry and backoff. Responses
//! come back whole or as a metadata-first chunk stream.
#![deny(unsafe_code)]

//! ## Quick Start
//!
//! ```rust,no_run
//! use afritalk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AfriError> {
//!     let client = AfriTalk::from_env()?;
//!
//!     let response = client
//!         .chat(ChatRequest::text("Bawo ni o se wa?").with_language("auto").with_auto_detect(true))
//!         .await?;
//!     println!("[{}] {}", response.metadata.language, response.text);
//!
//!     let mut stream = client
//!         .chat_stream(ChatRequest::text("Habari yako?").with_language("Kiswahili"))
//!         .await?;
//!     while let Some(chunk) = stream.recv().await {
//!         if let Some(delta) = chunk.as_delta() {
//!             print!("{delta}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod executors;
pub mod language;
pub mod observability;
pub mod orchestrator;
pub mod providers;
pub mod rate_limit;
pub mod retry;
pub mod streaming;
pub mod traits;
pub mod types;
pub mod utils;

pub use client::AfriTalk;
pub use error::{AfriError, ErrorCode};

/// Common imports.
pub mod prelude {
    pub use crate::client::AfriTalk;
    pub use crate::config::{ClientConfig, ModelSet, ProviderKind};
    pub use crate::error::{AfriError, ErrorBody, ErrorCode, ProviderError};
    pub use crate::language::{SupportedDialect, SupportedLanguage, canonicalize};
    pub use crate::observability::{LogFormat, init_tracing};
    pub use crate::rate_limit::{RateLimitConfig, RateLimiter};
    pub use crate::retry::RetryPolicy;
    pub use crate::streaming::{ChunkReceiver, StreamChunk};
    pub use crate::traits::{ContentModerator, GenerationProvider, KeywordModerator};
    pub use crate::types::*;
    pub use crate::utils::CancelHandle;
}
