//! Essaypress engine: feed acquisition, article normalization, and export pipeline.
mod config;
mod convert;
mod dates;
mod decode;
mod external;
mod feed;
mod filename;
mod footnotes;
mod frontmatter;
mod ledger;
mod normalize;
mod persist;
mod run;
mod stages;
mod types;
mod wordcount;
mod fetch;

pub use config::ArchiveConfig;
pub use convert::{strip_site_chrome, Converter, Html2MdConverter};
pub use dates::extract_publication_date;
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use external::{
    resolve_tool, resolve_tool_from, ExternalToolError, SystemToolRunner, ToolOutput, ToolRunner,
};
pub use feed::{fetch_feed_index, parse_feed_index, FeedItem};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::article_filename;
pub use footnotes::convert_notes_to_footnotes;
pub use frontmatter::build_markdown_document;
pub use ledger::{Ledger, LedgerRecord};
pub use normalize::{normalize, NormalizeError, NormalizeErrorKind};
pub use persist::{clean_outputs, ensure_output_dir, AtomicFileWriter, WriteError};
pub use run::{run_fetch, FetchReport, FetchStageError, SkipReason, SkippedEntry};
pub use stages::{run_epub, run_merge, run_pdf, ArtifactSummary};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, NormalizedArticle, RawEntry};
pub use wordcount::{count_corpus, CorpusCount, WhitespaceWordCounter, WordCounter};
