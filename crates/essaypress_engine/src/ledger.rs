use chrono::NaiveDate;

use crate::NormalizedArticle;

const CSV_HEADER: &str = "Article no.,Title,Description,Date,Author,URL,Filename";

/// A flattened projection of one processed article, one CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRecord {
    pub sequence: u32,
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub author: String,
    pub url: String,
    pub filename: String,
}

/// Append-only record of every article processed in one run.
///
/// The ledger trusts its caller for uniqueness (enforced upstream by unique
/// filenames): it never reorders and never dedupes, so append order is exactly
/// processing order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<LedgerRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, article: &NormalizedArticle) {
        self.records.push(LedgerRecord {
            sequence: article.sequence,
            title: article.title.clone(),
            description: article.description.clone(),
            date: article.date,
            author: article.author.clone(),
            url: article.url.clone(),
            filename: article.filename.clone(),
        });
    }

    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the manifest: header plus one row per record in append order.
    pub fn render_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(CSV_HEADER);
        out.push('\n');
        for record in &self.records {
            let date = record
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let row = [
                format!("{:03}", record.sequence),
                record.title.clone(),
                record.description.clone(),
                date,
                record.author.clone(),
                record.url.clone(),
                record.filename.clone(),
            ];
            let escaped: Vec<String> = row.iter().map(|field| csv_escape(field)).collect();
            out.push_str(&escaped.join(","));
            out.push('\n');
        }
        out
    }
}

/// Standard CSV quoting: fields containing a comma, quote, or line break are
/// wrapped in quotes with embedded quotes doubled.
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::csv_escape;

    #[test]
    fn plain_fields_are_unquoted() {
        assert_eq!(csv_escape("plain"), "plain");
    }

    #[test]
    fn commas_and_quotes_force_quoting() {
        assert_eq!(csv_escape("a, b"), "\"a, b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
