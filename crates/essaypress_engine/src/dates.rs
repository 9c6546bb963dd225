use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

// The site dates its essays with a bare "Month Year" line inside a font tag.
static FONT_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)<font[^>]*>\s*((?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{4})",
    )
    .unwrap()
});

static MONTH_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)([A-Za-z]+)\s+(\d{4})").unwrap());

static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap());

/// Scan raw page HTML for a publication date.
///
/// Priority: the site's own `<font>Month Year</font>` marker, then ISO dates
/// in common publication meta tags. A month-precision marker resolves to the
/// first of the month so reruns stay deterministic.
pub fn extract_publication_date(html: &str) -> Option<NaiveDate> {
    if let Some(date) = font_marker_date(html) {
        return Some(date);
    }
    meta_tag_date(html)
}

fn font_marker_date(html: &str) -> Option<NaiveDate> {
    let marker = FONT_DATE.captures(html)?.get(1)?.as_str();
    let caps = MONTH_YEAR.captures(marker)?;
    let month = month_number(caps.get(1)?.as_str())?;
    let year: i32 = caps.get(2)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn meta_tag_date(html: &str) -> Option<NaiveDate> {
    let meta_sel = Selector::parse("meta").ok()?;
    let doc = Html::parse_document(html);

    for meta in doc.select(&meta_sel) {
        let element = meta.value();
        let key = element
            .attr("property")
            .or_else(|| element.attr("name"))
            .or_else(|| element.attr("itemprop"))
            .unwrap_or("");
        if !is_publication_key(key) {
            continue;
        }
        if let Some(date) = element.attr("content").and_then(parse_iso_prefix) {
            return Some(date);
        }
    }
    None
}

fn is_publication_key(key: &str) -> bool {
    matches!(
        key.to_ascii_lowercase().as_str(),
        "article:published_time" | "date" | "datepublished" | "dcterms.date" | "dc.date"
    )
}

fn parse_iso_prefix(content: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE.captures(content)?;
    NaiveDate::from_ymd_opt(
        caps.get(1)?.as_str().parse().ok()?,
        caps.get(2)?.as_str().parse().ok()?,
        caps.get(3)?.as_str().parse().ok()?,
    )
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_ascii_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        "december" => 12,
        _ => return None,
    };
    Some(month)
}
