//! Streaming response encoder - turns the runner's chunk sequence into the
//! single byte stream delivered as the chunked HTTP response body.
//!
//! stdout passes through verbatim; stderr is wrapped per chunk in a red ANSI
//! envelope so partial lines still render colored without the client having
//! to track color state. A terminal chunk (exit code or error) always closes
//! the stream.

use std::convert::Infallible;

use bytes::{Bytes, BytesMut};
use futures_util::stream::{self, Stream};
use tokio::sync::mpsc;

use crate::runner::OutputChunk;

const RED: &[u8] = b"\x1b[31m";
const RESET: &[u8] = b"\x1b[0m";

/// Encode the chunk stream for one execution into response body bytes.
///
/// Arrival order is preserved; nothing is emitted after the terminal chunk.
pub fn encode_output(
    rx: mpsc::Receiver<OutputChunk>,
) -> impl Stream<Item = Result<Bytes, Infallible>> {
    stream::unfold(Some(rx), |slot| async move {
        let mut rx = slot?;
        match rx.recv().await {
            Some(OutputChunk::Stdout(bytes)) => Some((Ok(bytes), Some(rx))),
            Some(OutputChunk::Stderr(bytes)) => {
                let mut framed = BytesMut::with_capacity(RED.len() + bytes.len() + RESET.len());
                framed.extend_from_slice(RED);
                framed.extend_from_slice(&bytes);
                framed.extend_from_slice(RESET);
                Some((Ok(framed.freeze()), Some(rx)))
            }
            // Success appends nothing; just end the stream.
            Some(OutputChunk::Exit(0)) | None => None,
            Some(OutputChunk::Exit(code)) => {
                let notice = format!("\n\x1b[31mProcess exited with code {code}\x1b[0m\n");
                Some((Ok(Bytes::from(notice)), None))
            }
            Some(OutputChunk::Error(message)) => {
                let notice = format!("\n\x1b[31mError: {message}\x1b[0m\n");
                Some((Ok(Bytes::from(notice)), None))
            }
        }
    })
}
