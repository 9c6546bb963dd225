use thiserror::Error;

use crate::convert::{strip_site_chrome, Converter};
use crate::dates::extract_publication_date;
use crate::filename::article_filename;
use crate::footnotes::convert_notes_to_footnotes;
use crate::{ArchiveConfig, NormalizedArticle, RawEntry};

/// Lines shorter than this are navigation residue, not prose.
const MIN_DESCRIPTION_LINE: usize = 20;
const MAX_DESCRIPTION_LEN: usize = 240;

/// One article could not be processed. The orchestrator skips it and keeps
/// going; the URL identifies the offender in the run report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not normalize article at {url}: {kind}")]
pub struct NormalizeError {
    pub url: String,
    pub kind: NormalizeErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeErrorKind {
    #[error("entry title is empty")]
    EmptyTitle,
    #[error("converted body is empty")]
    EmptyBody,
}

/// Turn one raw entry into a normalized article. Pure function of the entry,
/// its 1-based sequence position, and the configuration.
pub fn normalize(
    entry: &RawEntry,
    sequence: u32,
    config: &ArchiveConfig,
    converter: &dyn Converter,
) -> Result<NormalizedArticle, NormalizeError> {
    let title = entry.title.trim().to_string();
    if title.is_empty() {
        return Err(NormalizeError {
            url: entry.url.clone(),
            kind: NormalizeErrorKind::EmptyTitle,
        });
    }

    let converted = converter.to_markdown(&entry.html);
    let markdown = convert_notes_to_footnotes(&strip_site_chrome(&converted));
    if markdown.trim().is_empty() {
        return Err(NormalizeError {
            url: entry.url.clone(),
            kind: NormalizeErrorKind::EmptyBody,
        });
    }

    // Date fallback chain: feed date, then markers in the page itself, then
    // nothing at all (the frontmatter omits the key rather than guessing).
    let date = entry
        .published
        .or_else(|| extract_publication_date(&entry.html));

    let description = entry
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|summary| !summary.is_empty())
        .map(truncate_at_word_boundary)
        .unwrap_or_else(|| derive_description(&markdown));

    let author = entry
        .author
        .as_deref()
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .unwrap_or(&config.default_author)
        .to_string();

    let filename = article_filename(sequence, &title);
    let body = format!("# {sequence:03} {title}\n\n{markdown}");

    Ok(NormalizedArticle {
        sequence,
        title,
        description,
        date,
        author,
        url: entry.url.clone(),
        body,
        filename,
    })
}

/// First prose-sized line of the converted body, bounded in length.
fn derive_description(markdown: &str) -> String {
    for line in markdown.lines() {
        let line = line.trim();
        if line.len() < MIN_DESCRIPTION_LINE {
            continue;
        }
        return truncate_at_word_boundary(line);
    }
    String::new()
}

fn truncate_at_word_boundary(text: &str) -> String {
    if text.len() <= MAX_DESCRIPTION_LEN {
        return text.to_string();
    }
    let mut end = MAX_DESCRIPTION_LEN;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    let clipped = &text[..end];
    let cut = clipped.rfind(char::is_whitespace).unwrap_or(end);
    clipped[..cut].trim_end().to_string()
}
