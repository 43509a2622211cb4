//! Property tests for the read and write contexts.

use std::io::Cursor;

use proptest::prelude::*;
use streamctx::{new_input_context, new_output_context};

fn arb_content() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..512)
}

/// Content plus a list of chunk sizes that together cover it.
fn arb_chunked() -> impl Strategy<Value = (Vec<u8>, Vec<usize>)> {
    (arb_content(), proptest::collection::vec(1usize..64, 1..32))
}

fn split<'a>(data: &'a [u8], sizes: &[usize]) -> Vec<&'a [u8]> {
    let mut pieces = Vec::new();
    let mut rest = data;
    let mut i = 0;
    while !rest.is_empty() {
        let n = sizes[i % sizes.len()].min(rest.len());
        let (head, tail) = rest.split_at(n);
        pieces.push(head);
        rest = tail;
        i += 1;
    }
    pieces
}

proptest! {
    /// Reading N bytes one at a time reproduces the content, then hits the sentinel.
    #[test]
    fn byte_by_byte_read_reproduces_content(data in arb_content()) {
        let mut buf = Cursor::new(data.clone());
        let mut ctx = new_input_context(&mut buf);

        let mut seen = Vec::with_capacity(data.len());
        for _ in 0..data.len() {
            match ctx.get_char() {
                Some(b) => seen.push(b),
                None => break,
            }
        }
        prop_assert_eq!(&seen, &data);
        prop_assert_eq!(ctx.get_char(), None);
    }

    /// Chunked writes produce the same bytes as a single write.
    #[test]
    fn chunked_writes_match_single_write((data, sizes) in arb_chunked()) {
        let mut whole = Cursor::new(Vec::new());
        {
            let mut ctx = new_output_context(&mut whole);
            prop_assert_eq!(ctx.put_block(&data).unwrap(), data.len());
        }

        let mut pieces = Cursor::new(Vec::new());
        {
            let mut ctx = new_output_context(&mut pieces);
            for piece in split(&data, &sizes) {
                prop_assert_eq!(ctx.put_block(piece).unwrap(), piece.len());
            }
            prop_assert_eq!(ctx.tell(), Some(data.len() as u64));
        }

        prop_assert_eq!(whole.into_inner(), pieces.into_inner());
    }

    /// tell() after K bytes equals the starting position plus K.
    #[test]
    fn tell_advances_by_bytes_read(data in arb_content(), start in 0usize..64, k in 0usize..64) {
        let start = start.min(data.len());
        let mut buf = Cursor::new(data.clone());
        buf.set_position(start as u64);
        let mut ctx = new_input_context(&mut buf);

        prop_assert_eq!(ctx.tell(), Some(start as u64));
        let mut out = vec![0u8; k];
        let got = ctx.get_block(&mut out).unwrap();
        prop_assert_eq!(got, k.min(data.len() - start));
        prop_assert_eq!(ctx.tell(), Some((start + got) as u64));
    }

    /// seek(p) then tell() is p, and a read there sees the byte at p or end-of-data.
    #[test]
    fn seek_then_tell(data in arb_content(), p in 0u64..1024) {
        let mut buf = Cursor::new(data.clone());
        let mut ctx = new_input_context(&mut buf);

        prop_assert!(ctx.seek(p));
        prop_assert_eq!(ctx.tell(), Some(p));
        prop_assert_eq!(ctx.get_char(), data.get(p as usize).copied());
    }
}
