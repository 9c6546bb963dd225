use std::fs;
use std::io;
use std::path::Path;

pub trait WordCounter: Send + Sync {
    fn count(&self, text: &str) -> u64;
}

/// Simple, deterministic whitespace word counter.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceWordCounter;

impl WordCounter for WhitespaceWordCounter {
    fn count(&self, text: &str) -> u64 {
        text.split_whitespace().count() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusCount {
    pub words: u64,
    pub articles: usize,
}

/// Total words and article count over the sorted `*.md` corpus.
///
/// A missing corpus directory is an error (run fetch first); an empty one is
/// a valid zero count.
pub fn count_corpus(dir: &Path, counter: &dyn WordCounter) -> io::Result<CorpusCount> {
    let mut files: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("md"))
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let mut words = 0u64;
    for path in &files {
        // Tolerate stray encoding damage in older files rather than aborting.
        let text = String::from_utf8_lossy(&fs::read(path)?).into_owned();
        words += counter.count(&text);
    }

    Ok(CorpusCount {
        words,
        articles: files.len(),
    })
}
