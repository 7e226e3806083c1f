//! blockmerge CLI
//!
//! Builds one deduplicated domain blacklist from a set of local and remote
//! block lists.

mod config;
mod fetch;
mod logging;
mod output;

use std::path::Path;
use std::time::{Duration, Instant};

use clap::Parser;
use log::info;

use bm_compiler::{build_blacklist, render_time_restricted, BuildOptions};

use crate::fetch::HttpLoader;

#[derive(Parser)]
#[command(name = "bm-cli")]
#[command(about = "Create a unified blacklist from a set of local and remote files")]
struct Cli {
    /// File containing blacklist sources
    #[arg(short, long, default_value = "domains-blacklist.conf")]
    config: String,

    /// File containing a set of names to exclude from the blacklist
    #[arg(short, long, default_value = "domains-whitelist.txt")]
    whitelist: String,

    /// File containing a set of names to be time restricted
    #[arg(short = 'r', long, default_value = "domains-time-restricted.txt")]
    time_restricted: String,

    /// Generate the list even if some sources could not be retrieved
    #[arg(short, long)]
    ignore_retrieval_failure: bool,

    /// File where the blacklist should be written
    #[arg(short, long, default_value = "blacklist.txt")]
    output_file: String,

    /// Retrieval timeout in seconds
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// Write per-source counts as JSON
    #[arg(long)]
    stats: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let start = Instant::now();

    let mut sources = config::read_source_list(&cli.config)?;
    if let Some(previous) = config::self_reference(&cli.output_file) {
        sources.push(previous);
    }

    let options = BuildOptions {
        sources,
        whitelist: config::resolve_reference("Whitelist", &cli.whitelist)?,
        time_restricted: config::resolve_reference("Time-restricted", &cli.time_restricted)?,
        ignore_retrieval_failure: cli.ignore_retrieval_failure,
    };

    let loader = HttpLoader::new(Duration::from_secs(cli.timeout))?;
    let built = build_blacklist(&loader, &options).map_err(|e| e.to_string())?;

    if let Some(list) = &built.time_restricted {
        print!("{}", render_time_restricted(list));
    }

    output::write_blacklist(Path::new(&cli.output_file), &built.reports)?;

    let summary = built.summary();
    if let Some(stats) = &cli.stats {
        output::write_stats(Path::new(stats), &summary)?;
    }

    info!(
        "Wrote {} domains from {} sources to '{}' in {:.1}ms ({} failed)",
        summary.total_blacklisted,
        summary.sources.len(),
        cli.output_file,
        start.elapsed().as_secs_f64() * 1000.0,
        summary.failed_sources.len(),
    );

    Ok(())
}
