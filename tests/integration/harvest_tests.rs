use journal_harvest::config::{HarvestConfig, UserAgentConfig, YearSelection};
use journal_harvest::harvest::{
    extract_sections, Harvester, HttpFetcher, JournalJob, JournalSource,
};
use journal_harvest::output::{read_records, CsvSink};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LANDING_PAGE: &str = r#"<html><head><title>Example Review</title></head><body>
<p><b>Volume 113, Issue 4, 2023</b></p>
<dl>
  <dt><a href="v113y2023i4p1.htm">Market Power and Wages</a></dt>
  <dd>Jane Doe and John Roe</dd>
  <dt><a href="v113y2023i4p2.htm">Firms, Prices, and Trade</a></dt>
  <dd>Ann Smith</dd>
</dl>
<p>Older volumes:
<a href="default1.htm">archive</a> (1998)<br>
<a href="default2.htm">archive</a> (1998)<br>
<a href="default3.htm">archive</a> (1997)<br>
</p>
</body></html>"#;

const ARCHIVE_1998_A: &str = r#"<html><body>
<p><b>1998, Vol. 88, No. 3</b></p>
<dl>
  <dt><a href="v88y1998i3p1.htm">Trade and Growth</a></dt>
  <dd>A. Author</dd>
  <dt>Front Matter</dt>
  <dd>Editors</dd>
  <dt><a href="v88y1998i3p2.htm">Money and Banking</a></dt>
  <dd>B. Author</dd>
</dl>
</body></html>"#;

const ARCHIVE_1998_B: &str = r#"<html><body>
<p><b>1998, Vol. 88, No. 1</b></p>
<dl>
  <dt><a href="v88y1998i1p1.htm">Labor Supply Revisited</a></dt>
  <dd>C. Author</dd>
</dl>
</body></html>"#;

fn detail_page(abstract_text: &str, outbound: &str) -> String {
    format!(
        r#"<html><body><h1>Article</h1>
<p><b>Abstract:</b> {}<br>
<b>Date:</b> 1998<br>
<b>Downloads:</b> (external link)<br><a href="{}">{}</a><br>
</p></body></html>"#,
        abstract_text, outbound, outbound
    )
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts a journal under /journal/ with two years on the landing page
/// side and 1998 split across two archive pages
async fn mount_journal(server: &MockServer) {
    mount_html(server, "/journal/", LANDING_PAGE).await;
    mount_html(server, "/journal/default1.htm", ARCHIVE_1998_A).await;
    mount_html(server, "/journal/default2.htm", ARCHIVE_1998_B).await;

    mount_html(
        server,
        "/journal/v113y2023i4p1.htm",
        &detail_page("We study wages.", "https://doi.org/10.1257/aer.1"),
    )
    .await;
    mount_html(
        server,
        "/journal/v113y2023i4p2.htm",
        &detail_page("We study prices.", "https://doi.org/10.1257/aer.2"),
    )
    .await;
    mount_html(
        server,
        "/journal/v88y1998i3p1.htm",
        &detail_page("Growth follows trade.", "https://www.jstor.org/stable/1"),
    )
    .await;
    mount_html(
        server,
        "/journal/v88y1998i1p1.htm",
        &detail_page("Labor supply is elastic.", "https://www.jstor.org/stable/3"),
    )
    .await;

    // v88y1998i3p2.htm is not mounted: wiremock answers 404
}

fn test_user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestHarvest".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: None,
        contact_email: None,
    }
}

fn harvester(output_dir: &str) -> Harvester<HttpFetcher> {
    let config = HarvestConfig {
        output_dir: output_dir.to_string(),
        detail_concurrency: 2,
        ..HarvestConfig::default()
    };
    let fetcher = HttpFetcher::new(&test_user_agent(), Duration::from_secs(5))
        .expect("Failed to build HTTP client");
    Harvester::new(fetcher, &config)
}

fn job(server: &MockServer, years: YearSelection) -> JournalJob {
    JournalJob {
        source: JournalSource {
            name: "Example Review: Letters".to_string(),
            landing_url: format!("{}/journal/", server.uri()),
        },
        years,
    }
}

#[tokio::test]
async fn test_archive_links_resolve_to_pages() {
    let server = MockServer::start().await;
    mount_journal(&server).await;

    let harvester = harvester("unused");
    let landing = harvester
        .resolve_index(&job(&server, YearSelection::All).source)
        .await
        .expect("Failed to resolve index");

    assert_eq!(landing.index.years_desc(), vec![2023, 1998, 1997]);
    assert_eq!(
        landing.index.pages(1998).unwrap(),
        &[
            format!("{}/journal/default1.htm", server.uri()),
            format!("{}/journal/default2.htm", server.uri()),
        ]
    );
    assert_eq!(
        landing.index.pages(2023).unwrap(),
        &[format!("{}/journal/", server.uri())]
    );
}

#[tokio::test]
async fn test_section_entries_in_document_order() {
    let server = MockServer::start().await;
    let base = url::Url::parse(&format!("{}/journal/default1.htm", server.uri())).unwrap();

    let entries = extract_sections(ARCHIVE_1998_A, 1998, &base);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Trade and Growth");
    assert_eq!(entries[0].authors_raw, "A. Author");
    assert_eq!(
        entries[0].detail_url,
        format!("{}/journal/v88y1998i3p1.htm", server.uri())
    );
    assert_eq!(entries[1].title, "Money and Banking");
}

#[tokio::test]
async fn test_full_harvest_writes_csv_per_year() {
    let server = MockServer::start().await;
    mount_journal(&server).await;

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("data");
    let harvester = harvester(output_dir.to_str().unwrap());
    let mut sink = CsvSink::new(&output_dir);

    let stats = harvester
        .run(
            &[job(&server, YearSelection::Years(vec![2023, 1998]))],
            &mut sink,
        )
        .await;

    assert_eq!(stats.journals_completed, 1);
    assert!(stats.failed_journals.is_empty());
    assert_eq!(stats.records_written, 5);

    let recent = read_records(&output_dir.join("Example_Review_Letters_2023.csv"))
        .expect("Failed to read 2023 file");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].journal, "Example Review: Letters");
    assert_eq!(recent[0].year, 2023);
    assert_eq!(recent[0].title, "Market Power and Wages");
    assert_eq!(recent[0].authors, "Jane Doe and John Roe");
    assert_eq!(recent[0].abstract_text, "We study wages.");
    assert_eq!(recent[0].url, "https://doi.org/10.1257/aer.1");
    assert_eq!(recent[1].title, "Firms, Prices, and Trade");

    let archived = read_records(&output_dir.join("Example_Review_Letters_1998.csv"))
        .expect("Failed to read 1998 file");
    let titles: Vec<&str> = archived.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Trade and Growth", "Money and Banking", "Labor Supply Revisited"]
    );
}

#[tokio::test]
async fn test_detail_404_leaves_fields_empty() {
    let server = MockServer::start().await;
    mount_journal(&server).await;

    let harvester = harvester("unused");
    let landing = harvester
        .resolve_index(&job(&server, YearSelection::All).source)
        .await
        .unwrap();

    let records = harvester
        .harvest_year("Example Review: Letters", &landing, 1998)
        .await
        .expect("Year should harvest despite a missing detail page");

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].abstract_text, "Growth follows trade.");
    assert_eq!(records[1].title, "Money and Banking");
    assert_eq!(records[1].abstract_text, "");
    assert_eq!(records[1].url, "");
}

#[tokio::test]
async fn test_unavailable_year_skipped() {
    let server = MockServer::start().await;
    mount_journal(&server).await;

    let dir = TempDir::new().unwrap();
    let harvester = harvester(dir.path().to_str().unwrap());
    let mut sink = CsvSink::new(dir.path());

    let stats = harvester
        .run(
            &[job(&server, YearSelection::Years(vec![2050, 2023]))],
            &mut sink,
        )
        .await;

    assert_eq!(
        stats.skipped_years,
        vec![("Example Review: Letters".to_string(), 2050)]
    );
    assert_eq!(stats.journals_completed, 1);
    assert!(!dir.path().join("Example_Review_Letters_2050.csv").exists());
    assert!(dir.path().join("Example_Review_Letters_2023.csv").exists());
}

#[tokio::test]
async fn test_missing_archive_page_fails_journal_only() {
    let server = MockServer::start().await;
    mount_journal(&server).await;

    let dir = TempDir::new().unwrap();
    let harvester = harvester(dir.path().to_str().unwrap());
    let mut sink = CsvSink::new(dir.path());

    let broken = JournalJob {
        source: JournalSource {
            name: "Broken Journal".to_string(),
            landing_url: format!("{}/broken/", server.uri()),
        },
        years: YearSelection::All,
    };

    // 1997 points at default3.htm, which is not mounted
    let stats = harvester
        .run(
            &[
                job(&server, YearSelection::Years(vec![1997])),
                broken,
                job(&server, YearSelection::Years(vec![2023])),
            ],
            &mut sink,
        )
        .await;

    assert_eq!(stats.journals_attempted, 3);
    assert_eq!(stats.journals_completed, 1);
    assert_eq!(stats.failed_journals.len(), 2);
    assert_eq!(stats.failed_journals[1].0, "Broken Journal");
    assert!(stats.failed_journals[1].1.contains("404"));
    assert!(dir.path().join("Example_Review_Letters_2023.csv").exists());
}

#[tokio::test]
async fn test_user_agent_header_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/journal/"))
        .and(header("user-agent", "TestHarvest/1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LANDING_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let harvester = harvester("unused");
    let landing = harvester
        .resolve_index(&job(&server, YearSelection::All).source)
        .await
        .expect("Request with the configured user agent should match");

    assert!(landing.index.contains(2023));
}
