use std::fs;
use std::sync::Once;
use std::time::Duration;

use essaypress_engine::{
    count_corpus, run_fetch, ArchiveConfig, FetchSettings, Html2MdConverter, ReqwestFetcher,
    SkipReason, WhitespaceWordCounter,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(press_logging::initialize_for_tests);
}

fn index_html() -> &'static str {
    // Newest essay first, as the site lists them.
    r#"<html><body><table><tr><td><table>
    <tr><td><img src="bullet.gif" width="10" height="10">
        <font size="2"><a href="third.html">Third Essay</a></font></td></tr>
    <tr><td><img src="bullet.gif" width="10" height="10">
        <font size="2"><a href="second.html">Second Essay</a></font></td></tr>
    <tr><td><img src="bullet.gif" width="10" height="10">
        <font size="2"><a href="first.html">First Essay</a></font></td></tr>
    </table></td></tr></table></body></html>"#
}

async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/articles.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(index_html(), "text/html"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/first.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><body><font size=\"2\" face=\"verdana\">March 2005</font>\
             <p>The first essay says one thing at decent length.</p></body></html>",
            "text/html",
        ))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/second.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><body><p>The second essay says another thing entirely.</p></body></html>",
            "text/html",
        ))
        .mount(server)
        .await;
    // The third essay is gone; the run must skip it and keep going.
    Mock::given(method("GET"))
        .and(path("/third.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

fn config_for(server: &MockServer, temp: &TempDir) -> ArchiveConfig {
    let mut config = ArchiveConfig::for_root(temp.path());
    config.base_url = format!("{}/", server.uri());
    config.request_delay = Duration::ZERO;
    config
}

#[tokio::test]
async fn fetch_writes_essays_and_manifest() {
    init_logging();
    let server = MockServer::start().await;
    mount_site(&server).await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, &temp);
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");

    let report = run_fetch(&config, &fetcher, &Html2MdConverter)
        .await
        .expect("fetch stage");

    // Every index entry is accounted for.
    assert_eq!(report.found, 3);
    assert_eq!(report.written + report.skipped.len(), report.found);
    assert_eq!(report.written, 2);

    // Oldest essay gets sequence 1.
    let first = fs::read_to_string(config.output_dir.join("001-first-essay.md")).unwrap();
    assert!(first.starts_with("---\ntitle: \"First Essay\"\n"));
    assert!(first.contains("date: \"2005-03-01\""));
    assert!(first.contains("author: \"Paul Graham\""));
    assert!(first.contains("# 001 First Essay"));

    // No date marker anywhere: the key is omitted, not empty.
    let second = fs::read_to_string(config.output_dir.join("002-second-essay.md")).unwrap();
    assert!(!second.contains("date:"));

    // The dead link shows up as a skip with its URL.
    assert_eq!(report.skipped.len(), 1);
    let skip = &report.skipped[0];
    assert_eq!(skip.sequence, 3);
    assert!(skip.url.ends_with("third.html"));
    assert!(matches!(skip.reason, SkipReason::Fetch(_)));

    // Manifest: header plus one row per written essay, in processing order.
    let csv = fs::read_to_string(report.csv_path.as_ref().unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Article no.,Title,Description,Date,Author,URL,Filename"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("001,First Essay,"));
    assert!(lines[2].starts_with("002,Second Essay,"));
}

#[tokio::test]
async fn rerunning_fetch_is_byte_identical() {
    init_logging();
    let server = MockServer::start().await;
    mount_site(&server).await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, &temp);
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");

    let report = run_fetch(&config, &fetcher, &Html2MdConverter).await.unwrap();
    let csv_path = report.csv_path.clone().unwrap();
    let first_bytes = fs::read(config.output_dir.join("001-first-essay.md")).unwrap();
    let csv_bytes = fs::read(&csv_path).unwrap();

    let again = run_fetch(&config, &fetcher, &Html2MdConverter).await.unwrap();
    assert_eq!(report.written, again.written);
    assert_eq!(
        first_bytes,
        fs::read(config.output_dir.join("001-first-essay.md")).unwrap()
    );
    assert_eq!(csv_bytes, fs::read(&csv_path).unwrap());
}

#[tokio::test]
async fn csv_can_be_disabled() {
    init_logging();
    let server = MockServer::start().await;
    mount_site(&server).await;
    let temp = TempDir::new().unwrap();
    let mut config = config_for(&server, &temp);
    config.csv_path = None;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");
    let report = run_fetch(&config, &fetcher, &Html2MdConverter).await.unwrap();

    assert_eq!(report.csv_path, None);
    assert!(!temp.path().join("essays.csv").exists());
}

#[tokio::test]
async fn wordcount_totals_the_written_corpus() {
    init_logging();
    let server = MockServer::start().await;
    mount_site(&server).await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, &temp);
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");
    run_fetch(&config, &fetcher, &Html2MdConverter).await.unwrap();

    let count = count_corpus(&config.output_dir, &WhitespaceWordCounter).unwrap();
    assert_eq!(count.articles, 2);
    assert!(count.words > 0);

    // Without a corpus directory the count is an error, not a zero.
    assert!(count_corpus(&temp.path().join("missing"), &WhitespaceWordCounter).is_err());
}
