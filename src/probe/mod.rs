//! Image format probing over an I/O context.
//!
//! This is a consumer of the [`IoContext`](crate::IoContext) interface in the
//! same position a codec would be: it reads a header through the context and
//! never touches the stream behind it.
//!
//! - [`signature`]: known formats and their magic bytes
//! - [`sniffer`]: reads the header and, for GIF and PNG, the image dimensions
//!
//! Pixel data is never decoded.

mod signature;
mod sniffer;

pub use signature::{ImageFormat, ProbeReport};
pub use sniffer::probe;
