use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "feed_harvester", version)]
#[command(
    about = "Harvest items and their replies from an infinitely scrolling feed",
    long_about = None
)]
pub struct Args {
    /// Feed address to open and harvest.
    pub address: String,

    /// Desired number of items; collection may overshoot by one tick.
    #[arg(short, long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: u64,

    /// Directory the export JSON is written to.
    #[arg(short, long, default_value = "./output")]
    pub output: PathBuf,

    /// RON file with harvest settings and selectors.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,

    /// Log file path, written alongside terminal output.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
