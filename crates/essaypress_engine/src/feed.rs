use scraper::{Html, Selector};
use url::Url;

use crate::decode::decode_page;
use crate::{ArchiveConfig, FailureKind, FetchError, Fetcher};

/// One entry of the site's article index: a title and a resolved link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub url: String,
}

/// Fetch and parse the article index. One request yields the whole feed, so
/// any failure here is fatal for the run. An index with no entries is valid.
pub async fn fetch_feed_index(
    fetcher: &dyn Fetcher,
    config: &ArchiveConfig,
) -> Result<Vec<FeedItem>, FetchError> {
    let base = Url::parse(&config.base_url)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

    let output = fetcher.get(&config.index_url()).await?;
    let page = decode_page(&output.bytes, output.metadata.content_type.as_deref())
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

    let items = parse_feed_index(&page.html, &base);
    log::info!("feed index lists {} essays", items.len());
    Ok(items)
}

/// Parse the index page in page order (newest essay first).
///
/// An essay row is a table cell holding a small bullet image (width and height
/// at most 15) and a `<font><a>` link. Anything else on the page is chrome.
pub fn parse_feed_index(html: &str, base: &Url) -> Vec<FeedItem> {
    let Some((cell_sel, table_sel, bullet_sel, link_sel)) = index_selectors() else {
        return Vec::new();
    };

    let doc = Html::parse_document(html);
    let mut items = Vec::new();

    for cell in doc.select(&cell_sel) {
        // The page nests its layout tables; only leaf cells hold one entry.
        // An outer cell would otherwise re-match every bullet below it.
        if cell.select(&table_sel).next().is_some() {
            continue;
        }

        let has_bullet = cell.select(&bullet_sel).next().is_some_and(|img| {
            dimension(img.value().attr("width")) <= 15
                && dimension(img.value().attr("height")) <= 15
        });
        if !has_bullet {
            continue;
        }

        let Some(link) = cell.select(&link_sel).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let title = link.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }
        let Ok(resolved) = base.join(href) else {
            continue;
        };

        items.push(FeedItem {
            title,
            url: repair_index_url(resolved.to_string()),
        });
    }

    items
}

fn index_selectors() -> Option<(Selector, Selector, Selector, Selector)> {
    Some((
        Selector::parse("td").ok()?,
        Selector::parse("table").ok()?,
        Selector::parse("img").ok()?,
        Selector::parse("font a").ok()?,
    ))
}

fn dimension(attr: Option<&str>) -> u32 {
    attr.and_then(|value| value.trim().parse().ok()).unwrap_or(0)
}

/// The index occasionally links an absolute URL that gets glued onto the site
/// prefix (`…paulgraham.com/https://…`). Keep only the embedded URL.
fn repair_index_url(url: String) -> String {
    match url.find("/https://").or_else(|| url.find("/http://")) {
        Some(pos) => url[pos + 1..].to_string(),
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::repair_index_url;

    #[test]
    fn embedded_absolute_url_is_unwrapped() {
        assert_eq!(
            repair_index_url("https://paulgraham.com/https://example.com/talk.html".to_string()),
            "https://example.com/talk.html"
        );
    }

    #[test]
    fn ordinary_urls_pass_through() {
        assert_eq!(
            repair_index_url("https://paulgraham.com/avg.html".to_string()),
            "https://paulgraham.com/avg.html"
        );
    }
}
