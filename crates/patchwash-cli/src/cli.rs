use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "patchwash")]
#[command(about = "Sanitize patch files as they land in a watched folder", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Folder to watch for patch files
    pub directory: PathBuf,

    /// File-name pattern to sanitize (default from config: *.patch)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Debounce window in milliseconds (default from config: 1000)
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Settle delay before the first read, in milliseconds (default from config: 500)
    #[arg(long)]
    pub settle_ms: Option<u64>,
}
