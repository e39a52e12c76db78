use anyhow::Result;
use clap::Parser;

use fp_rankings::fetch::HttpSource;
use fp_rankings::pipeline::{self, DEFAULT_BACKOFF, DEFAULT_RETRIES};
use fp_rankings::{sources, storage};

/// Download FantasyPros season projections and write a per-game
/// rankings CSV.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Games to divide season FPTS by
    #[arg(long, default_value_t = 17, value_parser = clap::value_parser!(u32).range(1..))]
    weeks: u32,

    /// Output CSV filename (default: fp_rankings_MMDDYYYY.csv under data/)
    #[arg(long)]
    out: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let source = HttpSource::new()?;
    let specs = sources::default_sources();
    let rows = pipeline::fetch_all(&source, &specs, args.weeks, DEFAULT_RETRIES, DEFAULT_BACKOFF)?;

    let today = chrono::Local::now().date_naive();
    let path = storage::resolve_output_path(args.out.as_deref(), today);
    storage::write_rankings(&path, &rows)?;

    println!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
