const MAX_SLUG_LEN: usize = 64;

/// Deterministic, filesystem-safe filename: `{NNN}-{slug}.md`.
///
/// The zero-padded sequence prefix keeps filenames unique within a run even
/// when two titles slugify identically.
pub fn article_filename(sequence: u32, title: &str) -> String {
    format!("{sequence:03}-{}.md", slugify(title))
}

/// Lower-cased slug with punctuation and whitespace runs collapsed to single
/// hyphens. Accented characters fold to their closest ASCII equivalent; the
/// Markdown body keeps the originals, only filenames are folded.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        for lower in ch.to_lowercase() {
            let folded = fold_ascii(lower);
            if folded.is_empty() && !lower.is_ascii_alphanumeric() {
                pending_hyphen = true;
                continue;
            }
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            if folded.is_empty() {
                slug.push(lower);
            } else {
                slug.push_str(folded);
            }
        }
    }

    if slug.is_empty() {
        return "untitled".to_string();
    }
    truncate_at_word_boundary(slug)
}

fn truncate_at_word_boundary(mut slug: String) -> String {
    if slug.len() <= MAX_SLUG_LEN {
        return slug;
    }
    // Slugs are pure ASCII at this point, so byte truncation is safe.
    slug.truncate(MAX_SLUG_LEN);
    if let Some(pos) = slug.rfind('-') {
        slug.truncate(pos);
    }
    slug.trim_end_matches('-').to_string()
}

/// Closest-ASCII folding for the Latin accents that actually occur in titles.
/// Returns the replacement, or "" for characters that need no folding.
fn fold_ascii(ch: char) -> &'static str {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'ç' => "c",
        'ñ' => "n",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'ð' => "d",
        'þ' => "th",
        _ => "",
    }
}
