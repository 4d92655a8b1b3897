//! ilinfo: detect and decode images, then print what was found.
//!
//! Format detection looks at content only; file extensions are used just to
//! pick files out of directories.

mod batch;
mod info;

use clap::Parser;

/// Detect, decode and describe images.
#[derive(Parser, Debug)]
#[command(name = "ilinfo", version, about)]
pub struct Args {
    /// Input files, directories or glob patterns.
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    /// Read-ahead window in bytes used when loading files.
    #[arg(long, env = "ILINFO_READ_AHEAD", default_value_t = imgload::READ_AHEAD_CAPACITY)]
    pub read_ahead: usize,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    info::run(args)
}
