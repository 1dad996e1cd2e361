//! Output chunks of a streamed chat.

use serde::{Deserialize, Serialize};

use crate::error::{AfriError, ErrorCode};
use crate::types::ResponseMetadata;

/// One unit of a streamed response.
///
/// A well-formed stream is `Metadata`, then zero or more `Content`, then
/// exactly one of `Done` or `Error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamChunk {
    Metadata { data: ResponseMetadata },
    Content { delta: String },
    Done,
    Error { error: ErrorCode, message: String },
}

impl StreamChunk {
    pub fn content(delta: impl Into<String>) -> Self {
        Self::Content {
            delta: delta.into(),
        }
    }

    pub fn error(err: &AfriError) -> Self {
        Self::Error {
            error: err.code(),
            message: err.message(),
        }
    }

    /// `Done` and `Error` end the stream.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error { .. })
    }

    pub fn as_delta(&self) -> Option<&str> {
        match self {
            Self::Content { delta } => Some(delta),
            _ => None,
        }
    }
}
