use std::fs;
use std::path::{Path, PathBuf};

use crate::external::{ExternalToolError, ToolRunner};
use crate::ArchiveConfig;

/// What a converter stage produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSummary {
    pub inputs: usize,
    pub output: PathBuf,
}

/// Merge every essay into a single Markdown file with the document-merge tool.
pub async fn run_merge(
    config: &ArchiveConfig,
    runner: &dyn ToolRunner,
) -> Result<ArtifactSummary, ExternalToolError> {
    let corpus = markdown_corpus(&config.output_dir)?;

    let mut args = path_args(&corpus);
    args.push("-o".to_string());
    args.push(path_arg(&config.merged_path));

    invoke(runner, &config.merge_tool, &args).await?;
    log::info!(
        "merged {} essays into {}",
        corpus.len(),
        config.merged_path.display()
    );
    Ok(ArtifactSummary {
        inputs: corpus.len(),
        output: config.merged_path.clone(),
    })
}

/// Build the EPUB from the essay corpus. Metadata file and cover image are
/// passed through only when they exist next to the outputs.
pub async fn run_epub(
    config: &ArchiveConfig,
    runner: &dyn ToolRunner,
) -> Result<ArtifactSummary, ExternalToolError> {
    let corpus = markdown_corpus(&config.output_dir)?;

    let mut args = path_args(&corpus);
    args.push("-o".to_string());
    args.push(path_arg(&config.epub_path));
    args.extend(
        ["-t", "epub3", "-f", "markdown", "--toc", "--toc-depth=1"]
            .into_iter()
            .map(String::from),
    );
    if config.metadata_path.is_file() {
        args.push("--metadata-file".to_string());
        args.push(path_arg(&config.metadata_path));
    }
    if config.cover_path.is_file() {
        args.push("--epub-cover-image".to_string());
        args.push(path_arg(&config.cover_path));
    }

    invoke(runner, &config.merge_tool, &args).await?;
    log::info!("built {}", config.epub_path.display());
    Ok(ArtifactSummary {
        inputs: corpus.len(),
        output: config.epub_path.clone(),
    })
}

/// Convert the EPUB artifact to PDF with the ebook-conversion tool.
pub async fn run_pdf(
    config: &ArchiveConfig,
    runner: &dyn ToolRunner,
) -> Result<ArtifactSummary, ExternalToolError> {
    if !config.epub_path.is_file() {
        return Err(ExternalToolError::MissingInput(config.epub_path.clone()));
    }

    let args = vec![path_arg(&config.epub_path), path_arg(&config.pdf_path)];
    invoke(runner, &config.ebook_tool, &args).await?;
    log::info!("built {}", config.pdf_path.display());
    Ok(ArtifactSummary {
        inputs: 1,
        output: config.pdf_path.clone(),
    })
}

async fn invoke(
    runner: &dyn ToolRunner,
    tool: &str,
    args: &[String],
) -> Result<(), ExternalToolError> {
    let output = runner.run(tool, args).await?;
    if !output.success() {
        return Err(ExternalToolError::ToolFailed {
            tool: tool.to_string(),
            status: output.status,
            stderr: output.stderr.trim_end().to_string(),
        });
    }
    Ok(())
}

/// Sorted `*.md` corpus from the essays directory. Zero files is an explicit
/// error rather than a silent empty artifact.
fn markdown_corpus(dir: &Path) -> Result<Vec<PathBuf>, ExternalToolError> {
    if !dir.is_dir() {
        return Err(ExternalToolError::EmptyCorpus(dir.to_path_buf()));
    }
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("md"))
        .filter(|path| path.is_file())
        .collect();
    if files.is_empty() {
        return Err(ExternalToolError::EmptyCorpus(dir.to_path_buf()));
    }
    files.sort();
    Ok(files)
}

fn path_args(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|path| path_arg(path)).collect()
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
