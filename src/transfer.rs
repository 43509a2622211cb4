use crate::error::ContextError;
use crate::io::IoContext;

/// Copy everything readable from `src` into `dst`, `chunk` bytes at a time.
///
/// Returns the number of bytes copied. Stops at the first end-of-data from
/// `src`; any failure on either side aborts the copy and is returned as is.
pub fn copy(
    src: &mut dyn IoContext,
    dst: &mut dyn IoContext,
    chunk: usize,
) -> Result<u64, ContextError> {
    let mut buf = vec![0u8; chunk.max(1)];
    let mut total = 0u64;

    loop {
        let n = src.get_block(&mut buf)?;
        if n == 0 {
            break;
        }
        dst.put_block(&buf[..n])?;
        total += n as u64;
        tracing::trace!(block = n, total, "copied block");
    }

    Ok(total)
}
