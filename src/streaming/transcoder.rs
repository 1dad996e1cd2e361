//! Channel-based stream transcoder.
//!
//! A background task pushes [`StreamChunk`]s into a bounded channel: the
//! metadata chunk before the provider is contacted, then one content chunk per
//! non-empty increment, then `done`, or a single `error` chunk on failure.
//! Cancellation and a dropped receiver both stop the producer without
//! emitting anything further. The producer runs on a child of the caller's
//! handle, so dropping the receiver never cancels the caller.

use std::future::Future;

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;

use super::chunk::StreamChunk;
use crate::error::AfriError;
use crate::traits::TextStream;
use crate::types::ResponseMetadata;
use crate::utils::CancelHandle;

/// Default channel capacity between producer and consumer.
pub const DEFAULT_STREAM_BUFFER: usize = 32;

#[derive(Debug, Clone)]
pub struct StreamTranscoder {
    buffer: usize,
    cancel: CancelHandle,
}

impl Default for StreamTranscoder {
    fn default() -> Self {
        Self::new(DEFAULT_STREAM_BUFFER, CancelHandle::new())
    }
}

impl StreamTranscoder {
    pub fn new(buffer: usize, cancel: CancelHandle) -> Self {
        Self {
            buffer: buffer.max(1),
            cancel,
        }
    }

    /// Spawn the producer task. `open` starts the provider stream and is only
    /// polled after the metadata chunk has been delivered.
    pub fn spawn<F>(self, metadata: ResponseMetadata, open: F) -> ChunkReceiver
    where
        F: Future<Output = Result<TextStream, AfriError>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(self.buffer);
        let cancel = self.cancel.child();
        tokio::spawn(pump(tx, cancel.clone(), metadata, open));
        ChunkReceiver { rx, cancel }
    }
}

async fn pump<F>(
    tx: mpsc::Sender<StreamChunk>,
    cancel: CancelHandle,
    metadata: ResponseMetadata,
    open: F,
) where
    F: Future<Output = Result<TextStream, AfriError>> + Send,
{
    if !emit(&tx, &cancel, StreamChunk::Metadata { data: metadata }).await {
        return;
    }

    let opened = tokio::select! {
        biased;
        _ = cancel.cancelled() => return,
        opened = open => opened,
    };
    let mut stream = match opened {
        Ok(stream) => stream,
        Err(err) => {
            tracing::warn!(code = %err.code(), error = %err, "stream failed to open");
            emit(&tx, &cancel, StreamChunk::error(&err)).await;
            return;
        }
    };

    let mut deltas = 0usize;
    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(deltas, "stream cancelled");
                return;
            }
            next = stream.next() => next,
        };
        match next {
            Some(Ok(delta)) if delta.is_empty() => {}
            Some(Ok(delta)) => {
                if !emit(&tx, &cancel, StreamChunk::content(delta)).await {
                    return;
                }
                deltas += 1;
            }
            Some(Err(err)) => {
                let err = AfriError::from(err);
                tracing::warn!(
                    deltas,
                    code = %err.code(),
                    error = %err,
                    "stream failed mid-flight"
                );
                emit(&tx, &cancel, StreamChunk::error(&err)).await;
                return;
            }
            None => break,
        }
    }

    tracing::debug!(deltas, "stream completed");
    emit(&tx, &cancel, StreamChunk::Done).await;
}

/// Send one chunk. Returns `false` when the consumer is gone or the stream
/// was cancelled.
async fn emit(tx: &mpsc::Sender<StreamChunk>, cancel: &CancelHandle, chunk: StreamChunk) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        sent = tx.send(chunk) => sent.is_ok(),
    }
}

/// Consumer side of a transcoded stream.
#[derive(Debug)]
pub struct ChunkReceiver {
    rx: mpsc::Receiver<StreamChunk>,
    cancel: CancelHandle,
}

impl ChunkReceiver {
    /// Next chunk, or `None` once the stream has ended or was cancelled.
    pub async fn recv(&mut self) -> Option<StreamChunk> {
        if self.cancel.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            chunk = self.rx.recv() => chunk,
        }
    }

    /// Stop the stream; no further chunks are delivered.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn into_stream(self) -> impl Stream<Item = StreamChunk> + Send {
        let mut receiver = self;
        async_stream::stream! {
            while let Some(chunk) = receiver.recv().await {
                yield chunk;
            }
        }
    }

    /// Drain every remaining chunk.
    pub async fn collect(mut self) -> Vec<StreamChunk> {
        let mut chunks = Vec::new();
        while let Some(chunk) = self.recv().await {
            chunks.push(chunk);
        }
        chunks
    }
}

impl Drop for ChunkReceiver {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
