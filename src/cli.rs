use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "streamctx")]
#[command(version)]
#[command(about = "Move and inspect encoded image data through byte-stream I/O contexts", long_about = None)]
#[command(after_help = "Examples:\n  \
  streamctx copy in.png out.png                    copy through an input and output context\n  \
  streamctx copy -c 512 https://example.com/a.gif a.gif   fetch a remote image in 512-byte blocks\n  \
  streamctx probe a.gif b.png                      show format and dimensions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode, only errors are printed
    #[arg(short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy a source to a destination block by block
    Copy {
        /// Source file path or HTTP URL
        #[arg(value_name = "SRC")]
        source: String,

        /// Destination file path
        #[arg(value_name = "DST")]
        dest: String,

        /// Block size in bytes
        #[arg(short = 'c', long = "chunk", value_name = "BYTES", default_value_t = 8192,
              value_parser = clap::value_parser!(u32).range(1..))]
        chunk: u32,
    },

    /// Identify image formats
    Probe {
        /// Files or HTTP URLs to probe
        #[arg(value_name = "SRC", required = true)]
        sources: Vec<String>,
    },
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

/// Whether `source` names a remote object rather than a local path.
pub fn is_http_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
