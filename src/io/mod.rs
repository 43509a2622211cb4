//! Byte-stream I/O contexts.
//!
//! Codec code reads and writes encoded image data only through the
//! [`IoContext`] trait. The concrete contexts here bind that trait to a
//! caller-owned stream:
//!
//! - [`InputContext`]: any `Read + Seek` stream, read direction only
//! - [`OutputContext`]: any `Write + Seek` stream, write direction only
//!
//! A context borrows its stream for its whole lifetime and never closes it.
//! Dropping (or [`release`](IoContext::release)-ing) the context leaves the
//! stream exactly as the last operation left it.

mod ext;
mod http;
mod input;
mod output;

pub use ext::{ContextReader, ContextWriter, IoContextExt};
pub use http::HttpRangeStream;
pub use input::InputContext;
pub use output::OutputContext;

use std::io::{Read, Seek, Write};

use crate::error::ContextError;

/// The operation set every byte-stream backend supplies to codec code.
///
/// Signalling conventions:
/// - `get_char` returns `None` at end-of-data or on error.
/// - `get_block` returns the number of bytes obtained (`Ok(0)` at end-of-data,
///   possibly fewer than requested), or `Err` on a hard failure.
/// - `put_block` returns `Ok(buf.len())` only when every byte was written.
/// - `seek` returns whether the stream now sits at `pos`.
/// - `tell` returns `None` when the position cannot be determined.
///
/// Operations for the wrong direction still exist on every context; they fail
/// without touching the stream.
pub trait IoContext {
    fn get_char(&mut self) -> Option<u8>;

    fn put_char(&mut self, byte: u8);

    fn get_block(&mut self, buf: &mut [u8]) -> Result<usize, ContextError>;

    fn put_block(&mut self, buf: &[u8]) -> Result<usize, ContextError>;

    /// Move to the absolute offset `pos`, clearing any latched end/error state.
    fn seek(&mut self, pos: u64) -> bool;

    fn tell(&mut self) -> Option<u64>;

    /// Destroy the context. The bound stream is not closed.
    fn release(self: Box<Self>) {}
}

/// End/error condition a context has observed on its stream.
///
/// Latched by the context from what its stream last reported. `seek` resets
/// it to `Good`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamState {
    #[default]
    Good,
    Eof,
    Failed,
}

/// Bind a new input context to `stream`.
///
/// The stream must outlive the returned context; it is never closed by it.
pub fn new_input_context<'a, R>(stream: &'a mut R) -> Box<dyn IoContext + 'a>
where
    R: Read + Seek + ?Sized + 'a,
{
    Box::new(InputContext::new(stream))
}

/// Bind a new output context to `stream`.
///
/// The stream must outlive the returned context; it is never closed or
/// flushed by it.
pub fn new_output_context<'a, W>(stream: &'a mut W) -> Box<dyn IoContext + 'a>
where
    W: Write + Seek + ?Sized + 'a,
{
    Box::new(OutputContext::new(stream))
}
