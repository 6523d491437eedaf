use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "outline-split")]
#[command(about = "Split a PDF into separate files along its outline (bookmarks)")]
#[command(version)]
pub struct Cli {
    /// PDF file to split
    pub input: PathBuf,

    /// Output directory (default: <input-dir>/<input-name>_split)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Deepest outline level to split on (1 = top-level bookmarks only)
    #[arg(short = 'd', long, default_value = "1")]
    pub max_depth: u32,

    /// Print the split plan without writing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Print the dry-run plan as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Print the outline tree and exit
    #[arg(long, conflicts_with = "dry_run")]
    pub list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Output directory, defaulting to a `<stem>_split` sibling of the input.
    pub fn output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output {
            return dir.clone();
        }
        let stem = self
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        let parent = self.input.parent().unwrap_or_else(|| std::path::Path::new(""));
        parent.join(format!("{}_split", stem))
    }
}
