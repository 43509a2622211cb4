//! Helpers codec routines layer on top of the primitive context operations.
//!
//! Multi-byte values go through [`ContextReader`] / [`ContextWriter`], which
//! expose any context as a `std::io::Read` / `std::io::Write` so `byteorder`
//! can do the decoding.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};

use super::IoContext;
use crate::error::ContextError;

/// `std::io::Read` view of a context.
pub struct ContextReader<'c, C: IoContext + ?Sized> {
    ctx: &'c mut C,
}

impl<C: IoContext + ?Sized> Read for ContextReader<'_, C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.ctx.get_block(buf)?)
    }
}

/// `std::io::Write` view of a context.
pub struct ContextWriter<'c, C: IoContext + ?Sized> {
    ctx: &'c mut C,
}

impl<C: IoContext + ?Sized> Write for ContextWriter<'_, C> {
    /// A block the context only partly wrote counts as a short write here.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.ctx.put_block(buf) {
            Ok(n) => Ok(n),
            Err(ContextError::ShortWrite { written, .. }) if written > 0 => Ok(written),
            Err(e) => Err(e.into()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Lift an `io::Error` raised by the bridges back into the context's error.
fn lift(err: io::Error) -> ContextError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        return ContextError::UnexpectedEof;
    }
    match err.downcast::<ContextError>() {
        Ok(inner) => inner,
        Err(err) => ContextError::Io(err),
    }
}

/// Fixed-size reads and writes built on any [`IoContext`].
pub trait IoContextExt: IoContext {
    fn reader(&mut self) -> ContextReader<'_, Self> {
        ContextReader { ctx: self }
    }

    fn writer(&mut self) -> ContextWriter<'_, Self> {
        ContextWriter { ctx: self }
    }

    fn get_byte(&mut self) -> Result<u8, ContextError> {
        self.get_char().ok_or(ContextError::UnexpectedEof)
    }

    fn get_word_be(&mut self) -> Result<u16, ContextError> {
        self.reader().read_u16::<BigEndian>().map_err(lift)
    }

    fn get_word_le(&mut self) -> Result<u16, ContextError> {
        self.reader().read_u16::<LittleEndian>().map_err(lift)
    }

    fn get_int_be(&mut self) -> Result<u32, ContextError> {
        self.reader().read_u32::<BigEndian>().map_err(lift)
    }

    fn get_int_le(&mut self) -> Result<u32, ContextError> {
        self.reader().read_u32::<LittleEndian>().map_err(lift)
    }

    fn put_word_be(&mut self, v: u16) -> Result<(), ContextError> {
        self.writer().write_u16::<BigEndian>(v).map_err(lift)
    }

    fn put_word_le(&mut self, v: u16) -> Result<(), ContextError> {
        self.writer().write_u16::<LittleEndian>(v).map_err(lift)
    }

    fn put_int_be(&mut self, v: u32) -> Result<(), ContextError> {
        self.writer().write_u32::<BigEndian>(v).map_err(lift)
    }

    fn put_int_le(&mut self, v: u32) -> Result<(), ContextError> {
        self.writer().write_u32::<LittleEndian>(v).map_err(lift)
    }

    /// Fill `buf` completely, or fail with `UnexpectedEof`.
    fn get_exact(&mut self, buf: &mut [u8]) -> Result<(), ContextError> {
        self.reader().read_exact(buf).map_err(lift)
    }

    fn put_all(&mut self, buf: &[u8]) -> Result<(), ContextError> {
        self.put_block(buf).map(|_| ())
    }

    /// Advance `n` bytes from the current position.
    fn skip(&mut self, n: u64) -> Result<(), ContextError> {
        let target = self
            .tell()
            .and_then(|at| at.checked_add(n))
            .ok_or(ContextError::StreamFailed)?;
        if self.seek(target) {
            Ok(())
        } else {
            Err(ContextError::StreamFailed)
        }
    }
}

impl<C: IoContext + ?Sized> IoContextExt for C {}
