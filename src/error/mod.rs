//! Error Handling Module
//!
//! - `types`: the closed application taxonomy (`AfriError`, `ErrorCode`)
//! - `provider`: failures reported by upstream generation providers
//! - `classify`: mapping of arbitrary failures onto the taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use afritalk::error::{AfriError, ErrorCode};
//!
//! let error = AfriError::InvalidInput("Message required.".into());
//! assert_eq!(error.code(), ErrorCode::InvalidInput);
//! assert_eq!(error.status_code(), 400);
//! ```

mod conversions;
pub mod classify;
pub mod provider;
pub mod types;

pub use classify::{classify, classify_message, classify_provider_error};
pub use provider::ProviderError;
pub use types::*;
