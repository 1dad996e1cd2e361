//! Streamed chat output

pub mod chunk;
pub mod transcoder;

pub use chunk::StreamChunk;
pub use transcoder::{ChunkReceiver, DEFAULT_STREAM_BUFFER, StreamTranscoder};
