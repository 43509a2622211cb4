//! Main entry point for the streamctx CLI application.
//!
//! Every command builds I/O contexts around streams it owns and hands only
//! the contexts to the library code.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use tracing_subscriber::EnvFilter;

use streamctx::cli::{Command, is_http_url};
use streamctx::{Cli, HttpRangeStream, new_input_context, new_output_context, probe, transfer};

/// Seekable source a context can be built on.
trait Source: Read + Seek {}

impl<T: Read + Seek> Source for T {}

/// Application entry point.
///
/// Parses command-line arguments, sets up logging and dispatches to the
/// selected command.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Command::Copy {
            source,
            dest,
            chunk,
        } => copy(source, dest, *chunk as usize, &cli),
        Command::Probe { sources } => {
            for source in sources {
                probe_one(source, &cli)?;
            }
            Ok(())
        }
    }
}

/// Open `source` as a buffered, seekable stream.
fn open_source(source: &str, capacity: usize) -> Result<Box<dyn Source>> {
    if is_http_url(source) {
        let stream = HttpRangeStream::open(source)?;
        tracing::info!(url = source, size = stream.size(), "remote source");
        Ok(Box::new(BufReader::with_capacity(capacity, stream)))
    } else {
        let file = File::open(source).with_context(|| format!("Failed to open {}", source))?;
        Ok(Box::new(BufReader::with_capacity(capacity, file)))
    }
}

/// Copy `source` to `dest` through an input and an output context.
fn copy(source: &str, dest: &str, chunk: usize, cli: &Cli) -> Result<()> {
    let mut reader = open_source(source, chunk)?;
    let mut writer = BufWriter::new(
        File::create(dest).with_context(|| format!("Failed to create {}", dest))?,
    );

    let copied = {
        let mut input = new_input_context(&mut reader);
        let mut output = new_output_context(&mut writer);
        transfer::copy(&mut *input, &mut *output, chunk)
            .with_context(|| format!("Failed to copy {} to {}", source, dest))?
    };

    // Contexts never flush; the stream is ours to finish.
    writer.flush()?;

    if !cli.is_quiet() {
        println!("{} -> {}: {}", source, dest, format_size(copied));
    }

    Ok(())
}

/// Probe one source and print what was found.
fn probe_one(source: &str, cli: &Cli) -> Result<()> {
    let mut reader = open_source(source, 64)?;
    let mut ctx = new_input_context(&mut reader);

    let report = probe::probe(&mut *ctx).with_context(|| format!("Failed to probe {}", source))?;
    ctx.release();

    if cli.is_quiet() {
        return Ok(());
    }

    match report.dimensions {
        Some((width, height)) => {
            println!("{}: {} {}x{}", source, report.format.name(), width, height)
        }
        None => println!("{}: {}", source, report.format.name()),
    }

    Ok(())
}

/// Render a byte count with a binary unit, e.g. `1.50 KiB`.
fn format_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["bytes", "KiB", "MiB", "GiB"];

    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} bytes", size)
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
