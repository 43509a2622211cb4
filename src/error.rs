use std::io;
use thiserror::Error;

/// Failure reported by an [`IoContext`](crate::IoContext) block operation.
///
/// End-of-data is not an error: block reads report it as `Ok(0)` or a short
/// count. Everything here means the operation did not do what was asked.
#[derive(Debug, Error)]
pub enum ContextError {
    /// A write was attempted on an input context.
    #[error("write attempted on a read-only context")]
    ReadOnly,

    /// A read was attempted on an output context.
    #[error("read attempted on a write-only context")]
    WriteOnly,

    /// An earlier operation failed and the context has not been re-seeked since.
    #[error("stream is in a failed state; seek to clear it")]
    StreamFailed,

    /// The stream ran out of data before a fixed-size value could be read.
    #[error("unexpected end of data")]
    UnexpectedEof,

    /// The stream accepted only part of a block before failing.
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite {
        written: usize,
        expected: usize,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ContextError {
    /// Whether this is a direction misuse rather than a stream fault.
    pub fn is_misuse(&self) -> bool {
        matches!(self, ContextError::ReadOnly | ContextError::WriteOnly)
    }
}

impl From<ContextError> for io::Error {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Io(e) => e,
            ContextError::UnexpectedEof => io::Error::from(io::ErrorKind::UnexpectedEof),
            ContextError::ReadOnly | ContextError::WriteOnly => {
                io::Error::new(io::ErrorKind::Unsupported, err)
            }
            other => io::Error::other(other),
        }
    }
}
