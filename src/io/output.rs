use std::io::{ErrorKind, Seek, SeekFrom, Write};

use super::{IoContext, StreamState};
use crate::error::ContextError;

/// Output context over a borrowed `Write + Seek` stream
///
/// Buffered writers are not flushed by this context, on release or otherwise.
pub struct OutputContext<'a, W: Write + Seek + ?Sized> {
    stream: &'a mut W,
    state: StreamState,
}

impl<'a, W: Write + Seek + ?Sized> OutputContext<'a, W> {
    pub fn new(stream: &'a mut W) -> Self {
        Self {
            stream,
            state: StreamState::Good,
        }
    }

    /// `Failed` once any write has failed, until the next successful seek.
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Write all of `buf`, returning how much went out before a failure.
    fn drain(&mut self, buf: &[u8]) -> Result<usize, (usize, std::io::Error)> {
        let mut written = 0;
        while written < buf.len() {
            match self.stream.write(&buf[written..]) {
                Ok(0) => return Err((written, ErrorKind::WriteZero.into())),
                Ok(n) => written += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err((written, e)),
            }
        }
        Ok(written)
    }
}

impl<W: Write + Seek + ?Sized> IoContext for OutputContext<'_, W> {
    fn get_char(&mut self) -> Option<u8> {
        None
    }

    fn put_char(&mut self, byte: u8) {
        if self.state == StreamState::Failed {
            return;
        }
        if self.drain(&[byte]).is_err() {
            self.state = StreamState::Failed;
        }
    }

    fn get_block(&mut self, _buf: &mut [u8]) -> Result<usize, ContextError> {
        Err(ContextError::WriteOnly)
    }

    fn put_block(&mut self, buf: &[u8]) -> Result<usize, ContextError> {
        if self.state == StreamState::Failed {
            return Err(ContextError::StreamFailed);
        }
        self.drain(buf).map_err(|(written, source)| {
            self.state = StreamState::Failed;
            ContextError::ShortWrite {
                written,
                expected: buf.len(),
                source,
            }
        })
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::new_output_context;
    use std::io::{self, Cursor};

    /// Accepts at most `room` bytes, then fails.
    struct CappedWriter {
        inner: Cursor<Vec<u8>>,
        room: usize,
    }

    impl Write for CappedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.room == 0 {
                return Err(io::Error::other("disk full"));
            }
            let n = buf.len().min(self.room);
            self.room -= n;
            self.inner.write(&buf[..n])
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for CappedWriter {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    /// Append-only sink, like a socket: writes land, seeks always fail.
    struct Sink {
        bytes: Vec<u8>,
    }

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for Sink {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Err(io::Error::new(ErrorKind::Unsupported, "not seekable"))
        }
    }

    #[test]
    fn writes_gif_signature() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut ctx = new_output_context(&mut buf);
            assert_eq!(ctx.put_block(b"GIF89a").unwrap(), 6);
            assert_eq!(ctx.tell(), Some(6));
        }
        assert_eq!(buf.get_ref().as_slice(), b"GIF89a");
    }

    #[test]
    fn put_char_appends_and_advances() {
        let mut buf = Cursor::new(Vec::new());
        let mut ctx = OutputContext::new(&mut buf);
        for b in b"PNG" {
            ctx.put_char(*b);
        }
        assert_eq!(ctx.tell(), Some(3));
        assert_eq!(ctx.state(), StreamState::Good);
        drop(ctx);
        assert_eq!(buf.into_inner(), b"PNG".to_vec());
    }

    #[test]
    fn seek_then_overwrite() {
        let mut buf = Cursor::new(Vec::new());
        let mut ctx = OutputContext::new(&mut buf);
        ctx.put_block(b"width=0000").unwrap();
        assert!(ctx.seek(6));
        assert_eq!(ctx.tell(), Some(6));
        ctx.put_block(b"0640").unwrap();
        drop(ctx);
        assert_eq!(buf.into_inner(), b"width=0640".to_vec());
    }

    #[test]
    fn partial_write_is_a_failure() {
        let mut capped = CappedWriter {
            inner: Cursor::new(Vec::new()),
            room: 4,
        };
        let mut ctx = OutputContext::new(&mut capped);

        match ctx.put_block(b"abcdef") {
            Err(ContextError::ShortWrite {
                written, expected, ..
            }) => {
                assert_eq!(written, 4);
                assert_eq!(expected, 6);
            }
            other => panic!("expected short write, got {other:?}"),
        }
        assert_eq!(ctx.state(), StreamState::Failed);
        assert_eq!(ctx.tell(), None);
        assert!(matches!(
            ctx.put_block(b"x"),
            Err(ContextError::StreamFailed)
        ));
    }

    #[test]
    fn put_char_failure_is_detected_by_tell() {
        let mut capped = CappedWriter {
            inner: Cursor::new(Vec::new()),
            room: 1,
        };
        let mut ctx = OutputContext::new(&mut capped);
        ctx.put_char(b'a');
        assert_eq!(ctx.tell(), Some(1));
        ctx.put_char(b'b');
        assert_eq!(ctx.tell(), None);

        assert!(ctx.seek(0));
        assert_eq!(ctx.tell(), Some(0));
    }

    #[test]
    fn reads_fail_without_touching_stream() {
        let mut buf = Cursor::new(b"keep".to_vec());
        buf.set_position(2);
        {
            let mut ctx = OutputContext::new(&mut buf);
            assert_eq!(ctx.get_char(), None);
            let mut out = [0u8; 4];
            let err = ctx.get_block(&mut out).unwrap_err();
            assert!(matches!(err, ContextError::WriteOnly));
            assert_eq!(out, [0u8; 4]);
        }
        assert_eq!(buf.position(), 2);
        assert_eq!(buf.get_ref().as_slice(), b"keep");
    }

    #[test]
    fn release_does_not_dispose_stream() {
        let mut buf = Cursor::new(Vec::new());
        let mut ctx = new_output_context(&mut buf);
        ctx.put_block(b"abc").unwrap();
        ctx.release();

        buf.write_all(b"def").unwrap();
        assert_eq!(buf.into_inner(), b"abcdef".to_vec());
    }

    #[test]
    fn failing_seek_and_tell_are_reported() {
        let mut sink = Sink { bytes: Vec::new() };
        {
            let mut ctx = OutputContext::new(&mut sink);

            assert_eq!(ctx.put_block(b"ab").unwrap(), 2);
            assert_eq!(ctx.state(), StreamState::Good);
            assert_eq!(ctx.tell(), None);

            assert!(!ctx.seek(0));
            assert_eq!(ctx.state(), StreamState::Failed);
            assert_eq!(ctx.tell(), None);
            assert!(matches!(
                ctx.put_block(b"cd"),
                Err(ContextError::StreamFailed)
            ));
            ctx.put_char(b'e');
        }
        assert_eq!(sink.bytes, b"ab".to_vec());
    }
}
