use std::fmt;

use chrono::NaiveDate;

/// One feed item as fetched, before normalization. Immutable; consumed exactly
/// once by [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub title: String,
    pub url: String,
    /// Date declared by the feed itself, when it carries one.
    pub published: Option<NaiveDate>,
    /// Summary declared by the feed itself, when it carries one.
    pub summary: Option<String>,
    /// Author declared by the feed itself, when it carries one.
    pub author: Option<String>,
    /// Decoded page HTML.
    pub html: String,
}

/// A fully normalized article, ready for the file writer and the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedArticle {
    /// 1-based position in processing order.
    pub sequence: u32,
    pub title: String,
    pub description: String,
    /// Resolved via feed date, then HTML markers; omitted when neither exists.
    pub date: Option<NaiveDate>,
    pub author: String,
    pub url: String,
    /// Markdown body, heading included.
    pub body: String,
    /// Unique within a run: sequence-prefixed slug, e.g. `003-how-to-start.md`.
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// Network-level failure. Fatal for the run when it hits the feed index;
/// per-article failures on essay pages are downgraded to skips by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "undecodable response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
