//! Remote spreadsheet source.
//!
//! Google Sheets links are rewritten to their CSV export endpoint; any other
//! `http(s)` URL is assumed to already serve CSV and is fetched unchanged.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, instrument};
use url::Url;

use super::http_client::{HttpTimeouts, build_source_http_client};
use super::{RecipeSource, SourceError, Table};

const GOOGLE_SHEETS_HOST: &str = "docs.google.com";

/// Marker segment Google uses for "Publish to web" links (`/spreadsheets/d/e/<id>/...`).
const PUBLISHED_MARKER: &str = "e";

/// A recipe table served over HTTP, typically a Google Sheet.
#[derive(Debug, Clone)]
pub struct SheetSource {
    export_url: Url,
    client: Client,
}

impl SheetSource {
    /// Creates a source for a sheet link, optionally selecting a worksheet by name.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidUrl`] for unusable links and
    /// [`SourceError::Client`] when the HTTP client cannot be built.
    pub fn new(
        sheet_url: &str,
        worksheet: Option<&str>,
        timeouts: HttpTimeouts,
    ) -> Result<Self, SourceError> {
        let export_url = csv_export_url(sheet_url, worksheet)?;
        let client = build_source_http_client(timeouts)?;
        debug!(export_url = %export_url, "Sheet source configured");
        Ok(Self { export_url, client })
    }

    /// The URL actually fetched on each load.
    #[must_use]
    pub fn export_url(&self) -> &Url {
        &self.export_url
    }
}

#[async_trait]
impl RecipeSource for SheetSource {
    fn describe(&self) -> String {
        format!("sheet {}", self.export_url)
    }

    #[instrument(skip(self), fields(url = %self.export_url))]
    async fn fetch_table(&self) -> Result<Table, SourceError> {
        let url = self.export_url.as_str();

        let response = self
            .client
            .get(self.export_url.clone())
            .send()
            .await
            .map_err(|error| SourceError::from_reqwest(url, error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::http_status(url, status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if let Some(content_type) = content_type
            && content_type.starts_with("text/html")
        {
            return Err(SourceError::NotCsv {
                url: url.to_string(),
                content_type,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|error| SourceError::from_reqwest(url, error))?;

        let table = Table::from_csv(body.as_ref()).map_err(|error| SourceError::csv(url, error))?;
        info!(rows = table.len(), columns = table.headers.len(), "Fetched sheet");
        Ok(table)
    }
}

/// Resolves the CSV endpoint for a sheet link.
///
/// - `https://docs.google.com/spreadsheets/d/<id>/edit#gid=<gid>` becomes
///   `.../d/<id>/export?format=csv&gid=<gid>`
/// - with a worksheet name it becomes `.../d/<id>/gviz/tq?tqx=out:csv&sheet=<name>`
/// - "Publish to web" links become `.../d/e/<id>/pub?output=csv`
/// - any other `http(s)` URL is returned unchanged
///
/// # Errors
///
/// Returns [`SourceError::InvalidUrl`] when the link does not parse or is not `http(s)`.
pub fn csv_export_url(sheet_url: &str, worksheet: Option<&str>) -> Result<Url, SourceError> {
    let trimmed = sheet_url.trim();
    let parsed =
        Url::parse(trimmed).map_err(|error| SourceError::invalid_url(trimmed, error.to_string()))?;

    let scheme = parsed.scheme();
    if !matches!(scheme, "http" | "https") {
        return Err(SourceError::invalid_url(
            trimmed,
            format!("scheme '{scheme}' is not supported"),
        ));
    }

    let Some(sheet) = google_sheet_id(&parsed) else {
        return Ok(parsed);
    };

    let gid = sheet_gid(&parsed);
    let worksheet = worksheet.map(str::trim).filter(|name| !name.is_empty());

    let mut export = match sheet {
        GoogleSheetId::Published(id) => {
            let mut url = google_url(trimmed, &format!("/spreadsheets/d/e/{id}/pub"))?;
            url.query_pairs_mut().append_pair("output", "csv");
            url
        }
        GoogleSheetId::Document(id) if worksheet.is_some() => {
            let mut url = google_url(trimmed, &format!("/spreadsheets/d/{id}/gviz/tq"))?;
            url.query_pairs_mut().append_pair("tqx", "out:csv");
            url
        }
        GoogleSheetId::Document(id) => {
            let mut url = google_url(trimmed, &format!("/spreadsheets/d/{id}/export"))?;
            url.query_pairs_mut().append_pair("format", "csv");
            url
        }
    };

    if let Some(name) = worksheet {
        export.query_pairs_mut().append_pair("sheet", name);
    } else if let Some(gid) = gid {
        export.query_pairs_mut().append_pair("gid", &gid);
    }

    Ok(export)
}

#[derive(Debug, PartialEq, Eq)]
enum GoogleSheetId<'a> {
    Document(&'a str),
    Published(&'a str),
}

fn google_sheet_id(url: &Url) -> Option<GoogleSheetId<'_>> {
    if url.host_str() != Some(GOOGLE_SHEETS_HOST) {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.collect();
    let start = segments
        .windows(2)
        .position(|pair| pair == ["spreadsheets", "d"])?;

    match segments.get(start + 2..) {
        Some([marker, id, ..]) if *marker == PUBLISHED_MARKER && !id.is_empty() => {
            Some(GoogleSheetId::Published(*id))
        }
        Some([id, ..]) if !id.is_empty() => Some(GoogleSheetId::Document(*id)),
        _ => None,
    }
}

fn sheet_gid(url: &Url) -> Option<String> {
    let from_query = url
        .query_pairs()
        .find(|(key, _)| key == "gid")
        .map(|(_, value)| value.into_owned());

    let from_fragment = || {
        url.fragment().and_then(|fragment| {
            fragment
                .split('&')
                .find_map(|pair| pair.strip_prefix("gid="))
                .map(str::to_string)
        })
    };

    from_query
        .or_else(from_fragment)
        .filter(|gid| !gid.is_empty() && gid.chars().all(|c| c.is_ascii_digit()))
}

fn google_url(original: &str, path: &str) -> Result<Url, SourceError> {
    Url::parse(&format!("https://{GOOGLE_SHEETS_HOST}{path}"))
        .map_err(|error| SourceError::invalid_url(original, error.to_string()))
}
