//! CLI surface: subcommands map 1:1 onto pipeline stages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Download and export a single-author essay collection.
#[derive(Debug, Parser)]
#[command(name = "essaypress", version, about)]
pub struct Cli {
    /// Project root where outputs are stored (defaults to the current directory).
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download the essays as Markdown files with a CSV manifest.
    Fetch(FetchArgs),
    /// Merge all essays into a single Markdown file.
    Merge,
    /// Build an EPUB from the essay corpus.
    Epub,
    /// Convert the EPUB artifact to PDF.
    Pdf,
    /// Count total words and articles.
    Wordcount,
    /// Run fetch, merge, epub, pdf, and wordcount in order.
    All(FetchArgs),
    /// Remove generated files.
    Clean,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Skip writing the CSV manifest.
    #[arg(long)]
    pub no_csv: bool,

    /// Custom path for the CSV manifest.
    #[arg(long, value_name = "PATH")]
    pub csv_path: Option<PathBuf>,

    /// Delay between article requests, in seconds.
    #[arg(long, default_value_t = 0.05)]
    pub delay: f64,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fetch_flags_parse() {
        let cli = Cli::try_parse_from([
            "essaypress",
            "fetch",
            "--no-csv",
            "--delay",
            "0.2",
            "--root",
            "/tmp/run",
        ])
        .unwrap();
        match cli.command {
            Command::Fetch(args) => {
                assert!(args.no_csv);
                assert_eq!(args.delay, 0.2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.root.unwrap().to_str(), Some("/tmp/run"));
    }

    #[test]
    fn all_accepts_a_csv_path() {
        let cli =
            Cli::try_parse_from(["essaypress", "all", "--csv-path", "meta/essays.csv"]).unwrap();
        match cli.command {
            Command::All(args) => {
                assert!(!args.no_csv);
                assert_eq!(args.csv_path.unwrap().to_str(), Some("meta/essays.csv"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["essaypress", "publish"]).is_err());
    }
}
