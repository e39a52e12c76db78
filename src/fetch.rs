//! Table retrieval over HTTP.
//!
//! Two paths per projections page:
//! - CSV export (`csv=1` query parameter), cheap and already tabular
//! - rendered HTML page, every `<table>` pulled out for selection
//!
//! The pipeline talks to a `TableSource` so tests can script both paths
//! without sockets.

use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::redirect;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

use crate::query::build_export_url;
use crate::types::Table;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; projections-scraper/1.0; +https://example.com)";
const ACCEPT_TYPES: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Retrieval seam between the pipeline and the network.
pub trait TableSource {
    /// Try the machine-readable export. `Ok(None)` means the endpoint
    /// answered but did not produce a usable player CSV.
    fn fetch_export(&self, url: &str) -> Result<Option<Table>>;

    /// Fetch the rendered page and extract every table in it. A page
    /// with no tables is an empty vec, not an error.
    fn fetch_rendered(&self, url: &str) -> Result<Vec<Table>>;
}

/// Real HTTP implementation of [`TableSource`].
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_TYPES));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .redirect(redirect::Policy::limited(5))
            .build()?;
        Ok(HttpSource { client })
    }
}

impl TableSource for HttpSource {
    fn fetch_export(&self, url: &str) -> Result<Option<Table>> {
        let export_url = build_export_url(url, &[("csv", "1")]);
        let response = self.client.get(&export_url).send()?;
        if !response.status().is_success() {
            return Ok(None);
        }

        let text = response.text()?;
        if !looks_like_player_csv(&text) {
            return Ok(None);
        }

        // A body that passed the sniff but still fails to parse is
        // treated the same as a missing export.
        Ok(parse_csv_table(&text).ok())
    }

    fn fetch_rendered(&self, url: &str) -> Result<Vec<Table>> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let html = response.text()?;
        Ok(parse_html_tables(&html))
    }
}

/// Quick sniff for the export format: the header line must mention the
/// player column.
pub fn looks_like_player_csv(body: &str) -> bool {
    body.trim().lines().next().is_some_and(|line| line.contains("Player"))
}

/// Parse a delimited export body into a single-level table.
pub fn parse_csv_table(body: &str) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.trim().as_bytes());

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(Table::new(vec![header], rows))
}

/// Extract every `<table>` from page markup, in document order.
///
/// Leading rows made entirely of `<th>` cells become header levels
/// (grouped headers arrive as two levels); everything after the first
/// data row is body. Cell text is whitespace-collapsed.
pub fn parse_html_tables(html: &str) -> Vec<Table> {
    let document = Html::parse_document(html);
    let mut tables = Vec::new();

    let table_sel = match Selector::parse("table") {
        Ok(sel) => sel,
        Err(_) => return tables,
    };
    let row_sel = match Selector::parse("tr") {
        Ok(sel) => sel,
        Err(_) => return tables,
    };
    let cell_sel = match Selector::parse("th, td") {
        Ok(sel) => sel,
        Err(_) => return tables,
    };

    for table_el in document.select(&table_sel) {
        let mut header: Vec<Vec<String>> = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();

        for row_el in table_el.select(&row_sel) {
            let cells: Vec<ElementRef> = row_el.select(&cell_sel).collect();
            if cells.is_empty() {
                continue;
            }
            let all_header = cells.iter().all(|c| c.value().name() == "th");
            let texts: Vec<String> = cells.iter().map(|c| cell_text(c)).collect();

            if all_header && rows.is_empty() {
                header.push(texts);
            } else {
                rows.push(texts);
            }
        }

        if !header.is_empty() || !rows.is_empty() {
            tables.push(Table::new(header, rows));
        }
    }
    tables
}

/// Concatenated text of a cell with runs of whitespace (non-breaking
/// spaces included) collapsed to single spaces.
fn cell_text(cell: &ElementRef) -> String {
    let raw: String = cell.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_player_csv() {
        assert!(looks_like_player_csv("Player,Team,FPTS\nJosh Allen,BUF,410.5\n"));
        assert!(looks_like_player_csv("\n  \"Player\",\"FPTS\"\nx,1\n"));
        assert!(!looks_like_player_csv("<!DOCTYPE html><html></html>"));
        assert!(!looks_like_player_csv(""));
    }

    #[test]
    fn test_parse_csv_table() {
        let body = "Player,Team,FPTS\nJosh Allen,BUF,410.5\nJalen Hurts,PHI,398.2\n";
        let table = parse_csv_table(body).unwrap();
        assert_eq!(table.columns(), ["Player", "Team", "FPTS"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], ["Josh Allen", "BUF", "410.5"]);
    }

    #[test]
    fn test_parse_html_tables_flat_header() {
        let html = r#"
            <html><body><table>
              <thead><tr><th>Player</th><th>Team</th><th>FPTS</th></tr></thead>
              <tbody>
                <tr><td>Josh Allen</td><td>BUF</td><td>410.5</td></tr>
              </tbody>
            </table></body></html>
        "#;
        let tables = parse_html_tables(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].header, vec![vec!["Player", "Team", "FPTS"]]);
        assert_eq!(tables[0].rows, vec![vec!["Josh Allen", "BUF", "410.5"]]);
    }

    #[test]
    fn test_parse_html_tables_grouped_header() {
        let html = r##"
            <table>
              <thead>
                <tr><th colspan="2"></th><th>Misc</th></tr>
                <tr><th>Player</th><th>Team</th><th>FPTS</th></tr>
              </thead>
              <tbody>
                <tr><td><a href="#">Lamar Jackson</a> <small>BAL</small></td><td>BAL</td><td>380.0</td></tr>
              </tbody>
            </table>
        "##;
        let tables = parse_html_tables(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].header.len(), 2);
        assert_eq!(tables[0].columns(), ["Player", "Team", "FPTS"]);
        assert_eq!(tables[0].rows[0][0], "Lamar Jackson BAL");
    }

    #[test]
    fn test_parse_html_tables_collapses_nbsp() {
        let html = "<table><tr><th>Fantasy\u{a0} Pts</th></tr><tr><td>12.5</td></tr></table>";
        let tables = parse_html_tables(html);
        assert_eq!(tables[0].columns(), ["Fantasy Pts"]);
    }

    #[test]
    fn test_parse_html_tables_none_found() {
        assert!(parse_html_tables("<html><body><p>no data</p></body></html>").is_empty());
    }

    #[test]
    fn test_parse_html_th_row_after_data_is_body() {
        let html = r#"
            <table>
              <tr><th>Player</th><th>FPTS</th></tr>
              <tr><td>Josh Allen</td><td>410.5</td></tr>
              <tr><th>Totals</th><th>410.5</th></tr>
            </table>
        "#;
        let tables = parse_html_tables(html);
        assert_eq!(tables[0].header.len(), 1);
        assert_eq!(tables[0].rows.len(), 2);
    }
}
