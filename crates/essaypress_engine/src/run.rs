use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::decode::decode_page;
use crate::feed::{fetch_feed_index, FeedItem};
use crate::frontmatter::build_markdown_document;
use crate::ledger::Ledger;
use crate::normalize::normalize;
use crate::persist::{ensure_output_dir, AtomicFileWriter, WriteError};
use crate::{ArchiveConfig, Converter, FetchError, Fetcher, RawEntry};

/// Why one article was left out of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Fetch(String),
    Normalize(String),
    Write(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Fetch(msg) | SkipReason::Normalize(msg) | SkipReason::Write(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub sequence: u32,
    pub url: String,
    pub reason: SkipReason,
}

/// Result of one fetch stage: every index entry is accounted for as either
/// written or skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub found: usize,
    pub written: usize,
    pub skipped: Vec<SkippedEntry>,
    pub csv_path: Option<PathBuf>,
}

/// Run-fatal failures of the fetch stage. Per-article problems never show up
/// here; they land in [`FetchReport::skipped`].
#[derive(Debug, Error)]
pub enum FetchStageError {
    #[error(transparent)]
    Feed(#[from] FetchError),
    #[error("could not prepare output directory: {0}")]
    OutputDir(WriteError),
    #[error("could not write manifest: {0}")]
    Manifest(WriteError),
}

/// The fetch stage: read the feed index, then fetch, normalize, and persist
/// each essay in order, oldest first. A failing article is logged, recorded as
/// a skip, and does not stop the batch; a failing index fetch stops the run.
pub async fn run_fetch(
    config: &ArchiveConfig,
    fetcher: &dyn Fetcher,
    converter: &dyn Converter,
) -> Result<FetchReport, FetchStageError> {
    let mut items = fetch_feed_index(fetcher, config).await?;
    // The index lists newest first; process oldest first so sequence numbers
    // read in publication order.
    items.reverse();
    let found = items.len();

    ensure_output_dir(&config.output_dir).map_err(FetchStageError::OutputDir)?;
    let writer = AtomicFileWriter::new(config.output_dir.clone());
    let mut ledger = Ledger::new();
    let mut skipped = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let sequence = (index + 1) as u32;
        if index > 0 && !config.request_delay.is_zero() {
            tokio::time::sleep(config.request_delay).await;
        }

        match process_entry(item, sequence, config, fetcher, converter, &writer, &mut ledger)
            .await
        {
            Ok(()) => log::info!("{sequence:03} {}", item.title),
            Err(reason) => {
                log::warn!("{sequence:03} {} skipped: {reason}", item.title);
                skipped.push(SkippedEntry {
                    sequence,
                    url: item.url.clone(),
                    reason,
                });
            }
        }
    }

    let csv_path = match &config.csv_path {
        Some(path) => Some(write_manifest(path, &ledger)?),
        None => None,
    };

    Ok(FetchReport {
        found,
        written: ledger.len(),
        skipped,
        csv_path,
    })
}

async fn process_entry(
    item: &FeedItem,
    sequence: u32,
    config: &ArchiveConfig,
    fetcher: &dyn Fetcher,
    converter: &dyn Converter,
    writer: &AtomicFileWriter,
    ledger: &mut Ledger,
) -> Result<(), SkipReason> {
    let output = fetcher
        .get(&item.url)
        .await
        .map_err(|err| SkipReason::Fetch(err.to_string()))?;
    let page = decode_page(&output.bytes, output.metadata.content_type.as_deref())
        .map_err(|err| SkipReason::Fetch(err.to_string()))?;

    let entry = RawEntry {
        title: item.title.clone(),
        url: item.url.clone(),
        published: None,
        summary: None,
        author: None,
        html: page.html,
    };

    let article = normalize(&entry, sequence, config, converter)
        .map_err(|err| SkipReason::Normalize(err.to_string()))?;
    let document = build_markdown_document(&article);
    writer
        .write(&article.filename, &document)
        .map_err(|err| SkipReason::Write(err.to_string()))?;

    ledger.record(&article);
    Ok(())
}

fn write_manifest(path: &Path, ledger: &Ledger) -> Result<PathBuf, FetchStageError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "essays.csv".to_string());

    AtomicFileWriter::new(dir)
        .write(&name, &ledger.render_csv())
        .map_err(FetchStageError::Manifest)
}
