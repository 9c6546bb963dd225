use std::path::{Path, PathBuf};
use std::time::Duration;

/// Explicit configuration passed to every pipeline component.
///
/// Nothing in the engine reads ambient globals; the CLI builds one of these
/// from its flags and hands it down.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Site root the feed and article links are resolved against. Must end
    /// with a slash.
    pub base_url: String,
    /// Index page listing every essay, relative to `base_url`.
    pub index_page: String,
    /// Author recorded when the feed provides none.
    pub default_author: String,
    /// Directory receiving one Markdown file per essay.
    pub output_dir: PathBuf,
    /// Manifest path; `None` disables the CSV export.
    pub csv_path: Option<PathBuf>,
    /// Output of the merge stage.
    pub merged_path: PathBuf,
    /// Output of the epub stage.
    pub epub_path: PathBuf,
    /// Output of the pdf stage.
    pub pdf_path: PathBuf,
    /// Optional pandoc metadata file consulted by the epub stage.
    pub metadata_path: PathBuf,
    /// Optional cover image consulted by the epub stage.
    pub cover_path: PathBuf,
    /// Pause between article requests.
    pub request_delay: Duration,
    /// Document-merge binary, looked up on PATH.
    pub merge_tool: String,
    /// Ebook-conversion binary, looked up on PATH.
    pub ebook_tool: String,
    /// Upper bound for one external-tool invocation. Conversion over hundreds
    /// of files is slow, so this is minutes rather than seconds.
    pub tool_timeout: Duration,
}

impl ArchiveConfig {
    /// Defaults for the Paul Graham essay collection, rooted at `root`.
    pub fn for_root(root: &Path) -> Self {
        Self {
            base_url: "https://paulgraham.com/".to_string(),
            index_page: "articles.html".to_string(),
            default_author: "Paul Graham".to_string(),
            output_dir: root.join("essays"),
            csv_path: Some(root.join("essays.csv")),
            merged_path: root.join("graham.md"),
            epub_path: root.join("graham.epub"),
            pdf_path: root.join("graham.pdf"),
            metadata_path: root.join("metadata.yaml"),
            cover_path: root.join("cover.png"),
            request_delay: Duration::from_millis(50),
            merge_tool: "pandoc".to_string(),
            ebook_tool: "ebook-convert".to_string(),
            tool_timeout: Duration::from_secs(10 * 60),
        }
    }

    /// Absolute URL of the feed index page.
    pub fn index_url(&self) -> String {
        format!("{}{}", self.base_url, self.index_page)
    }

    /// Every path the pipeline may generate, for `clean`.
    pub fn generated_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![
            self.output_dir.clone(),
            self.merged_path.clone(),
            self.epub_path.clone(),
            self.pdf_path.clone(),
        ];
        if let Some(csv) = &self.csv_path {
            paths.push(csv.clone());
        }
        paths
    }
}
