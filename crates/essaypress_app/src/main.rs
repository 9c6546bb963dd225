//! essaypress — download a single author's essay collection, convert it to
//! Markdown with YAML frontmatter, and build merged/EPUB/PDF artifacts.

mod cli;
mod runner;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use press_logging::LogDestination;

use cli::{Cli, Command, FetchArgs};
use essaypress_core::PipelineStage;
use essaypress_engine::ArchiveConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    press_logging::initialize(
        LogDestination::Terminal,
        level,
        Path::new("essaypress.log"),
    );

    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let root = root.canonicalize().unwrap_or(root);

    let (plan, config) = match cli.command {
        Command::Fetch(args) => (vec![PipelineStage::Fetch], configure(&root, Some(&args))),
        Command::Merge => (vec![PipelineStage::Merge], configure(&root, None)),
        Command::Epub => (vec![PipelineStage::Epub], configure(&root, None)),
        Command::Pdf => (vec![PipelineStage::Pdf], configure(&root, None)),
        Command::Wordcount => (vec![PipelineStage::Wordcount], configure(&root, None)),
        Command::All(args) => (PipelineStage::full_plan(), configure(&root, Some(&args))),
        Command::Clean => return runner::clean(&configure(&root, None)),
    };

    runner::drive(plan, config).await
}

fn configure(root: &Path, fetch: Option<&FetchArgs>) -> ArchiveConfig {
    let mut config = ArchiveConfig::for_root(root);
    if let Some(args) = fetch {
        if args.no_csv {
            config.csv_path = None;
        } else if let Some(path) = &args.csv_path {
            config.csv_path = Some(path.clone());
        }
        let delay = if args.delay.is_finite() {
            args.delay.clamp(0.0, 3600.0)
        } else {
            0.05
        };
        config.request_delay = Duration::from_secs_f64(delay);
    }
    config
}
