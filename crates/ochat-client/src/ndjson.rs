//! Newline-delimited JSON decoding for chunked response bodies.
//!
//! The server streams one JSON value per line, but the transport delivers
//! arbitrary byte chunks: a record may be split across chunks, and a chunk
//! may hold several records. [`NdjsonDecoder`] reassembles records;
//! [`ndjson_frames`] drives it from a byte stream.
//!
//! A line that is not valid JSON is delivered as [`StreamFrame::Text`]
//! instead of failing the stream.

use std::collections::VecDeque;

use bytes::BytesMut;
use futures_util::{Stream, StreamExt, stream::BoxStream};
use serde_json::Value;

/// One record decoded from an NDJSON body.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamFrame {
    /// The line parsed as JSON.
    Json(Value),
    /// The line did not parse; its text is passed through untouched.
    Text(String),
}

impl StreamFrame {
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Top-level `error` string carried by the frame, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.as_json()?.get("error")?.as_str()
    }
}

/// Incremental line reassembler.
///
/// Buffers raw bytes and splits on `\n` before decoding UTF-8, so a
/// multi-byte character split across two chunks is decoded intact.
#[derive(Debug, Default)]
pub struct NdjsonDecoder {
    buf: BytesMut,
}

impl NdjsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return every record it completed, in order.
    ///
    /// The trailing partial line stays buffered for the next chunk.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamFrame> {
        self.buf.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line = self.buf.split_to(pos + 1);
            if let Some(frame) = decode_line(&line[..pos]) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Flush the unterminated remainder at end of stream.
    pub fn finish(&mut self) -> Option<StreamFrame> {
        let rest = self.buf.split();
        decode_line(&rest)
    }
}

fn decode_line(line: &[u8]) -> Option<StreamFrame> {
    let text = String::from_utf8_lossy(line);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => Some(StreamFrame::Json(value)),
        Err(_) => Some(StreamFrame::Text(text.trim_end_matches('\r').to_string())),
    }
}

struct FrameState<B, E> {
    stream: BoxStream<'static, Result<B, E>>,
    decoder: NdjsonDecoder,
    pending: VecDeque<StreamFrame>,
    done: bool,
}

/// Decode a chunked byte stream into NDJSON frames.
///
/// The returned stream is finite and forward-only. A transport error is
/// yielded once and ends the stream; otherwise the stream ends when the
/// input does, after flushing any final unterminated record.
pub fn ndjson_frames<S, B, E>(byte_stream: S) -> impl Stream<Item = Result<StreamFrame, E>> + Send
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Send + 'static,
{
    let state = FrameState {
        stream: byte_stream.boxed(),
        decoder: NdjsonDecoder::new(),
        pending: VecDeque::new(),
        done: false,
    };

    futures_util::stream::unfold(state, |mut st| async move {
        loop {
            if let Some(frame) = st.pending.pop_front() {
                return Some((Ok(frame), st));
            }
            if st.done {
                return None;
            }

            match st.stream.next().await {
                Some(Ok(chunk)) => {
                    let frames = st.decoder.push(chunk.as_ref());
                    st.pending.extend(frames);
                }
                Some(Err(e)) => {
                    st.done = true;
                    return Some((Err(e), st));
                }
                None => {
                    st.done = true;
                    st.pending.extend(st.decoder.finish());
                }
            }
        }
    })
}
