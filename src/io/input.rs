use std::io::{ErrorKind, Read, Seek, SeekFrom};

use super::{IoContext, StreamState};
use crate::error::ContextError;

/// Input context over a borrowed `Read + Seek` stream
pub struct InputContext<'a, R: Read + Seek + ?Sized> {
    stream: &'a mut R,
    state: StreamState,
}

impl<'a, R: Read + Seek + ?Sized> InputContext<'a, R> {
    pub fn new(stream: &'a mut R) -> Self {
        Self {
            stream,
            state: StreamState::Good,
        }
    }

    /// End/error condition latched by the last read.
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Read into `buf` until it is full or the stream runs dry.
    ///
    /// A hard error after some bytes arrived still returns their count; the
    /// failure is latched and reported by the next read.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, ContextError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.stream.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.state = StreamState::Eof;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.state = StreamState::Failed;
                    if filled == 0 {
                        return Err(e.into());
                    }
                    break;
                }
            }
        }
        Ok(filled)
    }
}

impl<R: Read + Seek + ?Sized> IoContext for InputContext<'_, R> {
    fn get_char(&mut self) -> Option<u8> {
        if self.state != StreamState::Good {
            return None;
        }
        let mut byte = [0u8; 1];
        match self.fill(&mut byte) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }

    /// Discarded: the operation has no way to report the misuse.
    fn put_char(&mut self, _byte: u8) {}

    fn get_block(&mut self, buf: &mut [u8]) -> Result<usize, ContextError> {
        match self.state {
            StreamState::Good => self.fill(buf),
            StreamState::Eof => Ok(0),
            StreamState::Failed => Err(ContextError::StreamFailed),
        }
    }

    fn put_block(&mut self, _buf: &[u8]) -> Result<usize, ContextError> {
        Err(ContextError::ReadOnly)
    }

    fn seek(&mut self, pos: u64) -> bool {
        self.state = StreamState::Good;
        match self.stream.seek(SeekFrom::Start(pos)) {
            Ok(at) => at == pos,
            Err(_) => {
                self.state = StreamState::Failed;
                false
            }
        }
    }

    fn tell(&mut self) -> Option<u64> {
        if self.state == StreamState::Failed {
            return None;
        }
        self.stream.stream_position().ok()
    }
}
