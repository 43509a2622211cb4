//! Header sniffing driven purely through an [`IoContext`].
//!
//! Nothing here knows which stream backs the context; the same code probes
//! files, memory buffers and remote HTTP objects.

use anyhow::{Context, Result, bail};

use crate::io::{IoContext, IoContextExt};

use super::signature::{ImageFormat, ProbeReport};

/// Offset of the GIF logical screen width, after the 6-byte signature.
const GIF_SCREEN_OFFSET: u64 = 6;

/// Offset of the PNG IHDR width: signature (8), chunk length (4), chunk type (4).
const PNG_IHDR_OFFSET: u64 = 16;

/// Identify the image format at the context's current position.
///
/// The context is returned to where it started, so a decoder can run on it
/// afterwards.
pub fn probe(ctx: &mut dyn IoContext) -> Result<ProbeReport> {
    let start = match ctx.tell() {
        Some(pos) => pos,
        None => bail!("Stream position cannot be determined"),
    };

    let report = sniff(ctx, start);

    if !ctx.seek(start) {
        bail!("Failed to rewind stream to offset {}", start);
    }

    report
}

fn sniff(ctx: &mut dyn IoContext, start: u64) -> Result<ProbeReport> {
    let mut head = [0u8; ImageFormat::SNIFF_LEN];
    let len = ctx.get_block(&mut head).context("Failed to read header")?;

    let Some(format) = ImageFormat::from_magic(&head[..len]) else {
        bail!("Unrecognized image format");
    };

    let dimensions = match format {
        ImageFormat::Gif => {
            seek_to(ctx, start + GIF_SCREEN_OFFSET)?;
            let width = ctx.get_word_le()?;
            let height = ctx.get_word_le()?;
            Some((u32::from(width), u32::from(height)))
        }
        ImageFormat::Png => {
            seek_to(ctx, start + PNG_IHDR_OFFSET)?;
            let width = ctx.get_int_be()?;
            let height = ctx.get_int_be()?;
            Some((width, height))
        }
        _ => None,
    };

    tracing::debug!(format = format.name(), ?dimensions, "probed stream");

    Ok(ProbeReport { format, dimensions })
}

fn seek_to(ctx: &mut dyn IoContext, pos: u64) -> Result<()> {
    if !ctx.seek(pos) {
        bail!("Failed to seek to offset {}", pos);
    }
    Ok(())
}
