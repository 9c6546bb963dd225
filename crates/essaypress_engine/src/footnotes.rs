use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

static NOTES_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\*\*Notes?\*\*").unwrap());
static NEXT_BOLD_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\*\*").unwrap());
static NOTE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Rewrite a trailing `**Notes**` section into pandoc footnotes.
///
/// The essays end with a bold Notes block whose items look like `[1] text…`;
/// inline `[1]` references point at them. Pandoc only links them up when they
/// use the `[^1]` footnote syntax, so the section is dissolved into `[^N]:`
/// definitions and every `[N]` reference is rewritten. Documents without a
/// Notes section pass through untouched.
pub fn convert_notes_to_footnotes(markdown: &str) -> String {
    let Some(header) = NOTES_HEADER.find(markdown) else {
        return markdown.to_string();
    };

    // The section runs until the next bold block (Thanks, appendices) or EOF.
    let section_end = NEXT_BOLD_BLOCK
        .find(&markdown[header.end()..])
        .map(|m| header.end() + m.start())
        .unwrap_or(markdown.len());
    let section = &markdown[header.start()..section_end];

    let definitions = parse_note_items(section);
    if definitions.is_empty() {
        return markdown.to_string();
    }

    let mut body = String::with_capacity(markdown.len());
    body.push_str(&markdown[..header.start()]);
    body.push_str(&markdown[section_end..]);

    for number in definitions.keys() {
        body = body.replace(&format!("[{number}]"), &format!("[^{number}]"));
    }

    let mut rendered = body.trim_end().to_string();
    rendered.push_str("\n\n");
    let mut first = true;
    for (number, text) in &definitions {
        if !first {
            rendered.push_str("\n\n");
        }
        rendered.push_str(&format!("[^{number}]: {text}"));
        first = false;
    }
    rendered
}

fn parse_note_items(section: &str) -> BTreeMap<u32, String> {
    let markers: Vec<_> = NOTE_MARKER.captures_iter(section).collect();
    let mut items = BTreeMap::new();

    for (index, caps) in markers.iter().enumerate() {
        let Ok(number) = caps[1].parse::<u32>() else {
            continue;
        };
        let start = caps.get(0).map(|m| m.end()).unwrap_or(0);
        let end = markers
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(section.len());
        let text = WHITESPACE_RUN
            .replace_all(section[start..end].trim(), " ")
            .into_owned();
        if !text.is_empty() {
            items.insert(number, text);
        }
    }

    items
}
