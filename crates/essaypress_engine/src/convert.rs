use once_cell::sync::Lazy;
use regex::Regex;

pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_markdown(&self, html: &str) -> String {
        html2md::parse_html(html)
    }
}

// Matches the converted home-navigation link, with or without an inline image:
// `[](index.html)` or `[![alt](img.gif)](index.html)`.
static NAV_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(?:!\[[^\]]*\]\([^)]*\))?\]\(index\.html\)").unwrap()
});

static EXCESS_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Remove site navigation residue the converter leaves behind and collapse
/// the blank lines it opens up.
pub fn strip_site_chrome(markdown: &str) -> String {
    let without_nav = NAV_LINK.replace_all(markdown, "");
    let collapsed = EXCESS_BLANK_LINES.replace_all(&without_nav, "\n\n");
    collapsed.trim_start_matches('\n').trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::strip_site_chrome;

    #[test]
    fn nav_links_are_removed() {
        let markdown = "[![](trans_1x1.gif)](index.html)\n\n[](index.html)\n\nThe essay body.";
        assert_eq!(strip_site_chrome(markdown), "The essay body.");
    }

    #[test]
    fn ordinary_links_survive() {
        let markdown = "See [the FAQ](faq.html) for details.";
        assert_eq!(strip_site_chrome(markdown), markdown);
    }

    #[test]
    fn blank_line_runs_collapse() {
        assert_eq!(strip_site_chrome("a\n\n\n\n\nb"), "a\n\nb");
    }
}
