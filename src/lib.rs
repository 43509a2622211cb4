//! # streamctx
//!
//! Pluggable byte-stream I/O contexts for image codecs.
//!
//! Codec routines read and write encoded image data only through the
//! [`IoContext`] trait: single-byte and block reads and writes, absolute
//! seek, tell, and release. What actually stores the bytes is decided by the
//! caller when it builds the context around a stream it owns.
//!
//! ## Features
//!
//! - [`InputContext`] over any `Read + Seek` stream (files, `Cursor`, sockets
//!   wrapped to be seekable)
//! - [`OutputContext`] over any `Write + Seek` stream
//! - [`IoContextExt`] helpers for big- and little-endian words and ints
//! - [`HttpRangeStream`] to read remote images with HTTP Range requests
//! - A small format [`probe`](probe::probe) and block [`copy`](transfer::copy)
//!   written only against the trait
//!
//! ## Example
//!
//! ```no_run
//! use std::fs::File;
//! use streamctx::{new_input_context, probe};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut file = File::open("image.png")?;
//!     let mut ctx = new_input_context(&mut file);
//!
//!     let report = probe::probe(&mut *ctx)?;
//!     println!("{} {:?}", report.format.name(), report.dimensions);
//!
//!     // Releasing the context leaves `file` open and usable.
//!     ctx.release();
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod io;
pub mod probe;
pub mod transfer;

pub use cli::Cli;
pub use error::ContextError;
pub use io::{
    ContextReader, ContextWriter, HttpRangeStream, InputContext, IoContext, IoContextExt,
    OutputContext, StreamState, new_input_context, new_output_context,
};
