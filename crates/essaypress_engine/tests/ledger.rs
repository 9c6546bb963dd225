use chrono::NaiveDate;
use essaypress_engine::{Ledger, NormalizedArticle};
use pretty_assertions::assert_eq;

fn article(sequence: u32, title: &str) -> NormalizedArticle {
    NormalizedArticle {
        sequence,
        title: title.to_string(),
        description: "What it says.".to_string(),
        date: NaiveDate::from_ymd_opt(2005, 3, 1),
        author: "Paul Graham".to_string(),
        url: format!("https://paulgraham.com/{sequence}.html"),
        body: format!("# {sequence:03} {title}\n\nBody."),
        filename: format!("{sequence:03}-essay.md"),
    }
}

#[test]
fn csv_has_the_manifest_header() {
    let ledger = Ledger::new();
    assert_eq!(
        ledger.render_csv(),
        "Article no.,Title,Description,Date,Author,URL,Filename\n"
    );
}

#[test]
fn rows_render_in_append_order() {
    let mut ledger = Ledger::new();
    ledger.record(&article(1, "First"));
    ledger.record(&article(2, "Second"));

    let csv = ledger.render_csv();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        "001,First,What it says.,2005-03-01,Paul Graham,https://paulgraham.com/1.html,001-essay.md"
    );
    assert!(lines[2].starts_with("002,Second,"));
}

#[test]
fn fields_with_commas_and_quotes_are_escaped() {
    let mut essay = article(1, "Mean, \"Median\", Mode");
    essay.description = "Commas, everywhere".to_string();
    let mut ledger = Ledger::new();
    ledger.record(&essay);

    let csv = ledger.render_csv();
    assert!(csv.contains("\"Mean, \"\"Median\"\", Mode\""));
    assert!(csv.contains("\"Commas, everywhere\""));
}

#[test]
fn missing_date_renders_as_an_empty_cell() {
    let mut essay = article(7, "Undated");
    essay.date = None;
    let mut ledger = Ledger::new();
    ledger.record(&essay);

    let csv = ledger.render_csv();
    assert!(csv.contains("007,Undated,What it says.,,Paul Graham,"));
}

#[test]
fn duplicate_records_are_kept_verbatim() {
    // The ledger trusts its caller; uniqueness is enforced upstream by
    // filenames, not here.
    let essay = article(3, "Twice");
    let mut ledger = Ledger::new();
    ledger.record(&essay);
    ledger.record(&essay);

    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.render_csv().lines().count(), 3);
}
