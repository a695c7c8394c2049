//! Google Sheets v4 REST backend.
//!
//! The session (HTTP client, credential and resolved worksheet) is built on
//! first use and shared by every later call until [`SheetsTable::disconnect`].
//! A request rejected with 401 is sent once more when the credential can
//! produce a fresh token.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::SheetConfig;

use super::a1::{cell_range, row_range, sheet_range, CellRef};
use super::auth::RequestAuth;
use super::error::StoreError;
use super::table::{RawTable, TableStore};

/// A worksheet inside the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Worksheet {
    #[serde(rename = "sheetId", default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub index: i64,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: Worksheet,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

struct SheetSession {
    client: Client,
    base: Url,
    spreadsheet_id: String,
    auth: RequestAuth,
    worksheet: Worksheet,
}

/// Lazily connected Google Sheets table.
pub struct SheetsTable {
    config: SheetConfig,
    session: Mutex<Option<Arc<SheetSession>>>,
}

impl SheetsTable {
    pub fn new(config: SheetConfig) -> Self {
        Self {
            config,
            session: Mutex::new(None),
        }
    }

    /// Open the session now instead of on first use.
    ///
    /// Errors are always `StoreError::Connection`.
    pub fn connect(&self) -> Result<Worksheet, StoreError> {
        Ok(self.session()?.worksheet.clone())
    }

    /// The resolved worksheet, if connected.
    pub fn worksheet(&self) -> Option<Worksheet> {
        self.session.lock().as_ref().map(|s| s.worksheet.clone())
    }

    pub fn is_connected(&self) -> bool {
        self.session.lock().is_some()
    }

    /// Drop the cached session. The next call reconnects.
    pub fn disconnect(&self) {
        if self.session.lock().take().is_some() {
            tracing::debug!(sheet_id = %self.config.id, "Sheets session closed");
        }
    }

    fn session(&self) -> Result<Arc<SheetSession>, StoreError> {
        let mut slot = self.session.lock();
        if let Some(session) = slot.as_ref() {
            return Ok(Arc::clone(session));
        }

        let session = Arc::new(self.establish().map_err(|e| StoreError::Connection {
            sheet_id: self.config.id.clone(),
            source: Box::new(e),
        })?);
        *slot = Some(Arc::clone(&session));
        Ok(session)
    }

    fn establish(&self) -> Result<SheetSession, StoreError> {
        let credential = self.config.credential().ok_or(StoreError::MissingCredential)?;
        let auth = RequestAuth::from_credential(credential)?;

        let base = Url::parse(&self.config.base_url)
            .map_err(|e| StoreError::Decode(format!("invalid base_url: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::Decode(format!(
                "invalid base_url: {}",
                self.config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds as u64))
            .connect_timeout(Duration::from_secs(self.config.connect_timeout_seconds as u64))
            .build()?;

        let mut session = SheetSession {
            client,
            base,
            spreadsheet_id: self.config.id.clone(),
            auth,
            worksheet: Worksheet {
                id: 0,
                title: String::new(),
                index: 0,
            },
        };

        let url = session.url(
            &[],
            &[("fields", "sheets.properties(sheetId,title,index)")],
        );
        let meta: SpreadsheetMeta = session.get(url)?.json()?;
        let worksheets = meta.sheets.into_iter().map(|s| s.properties).collect();
        session.worksheet = select_worksheet(worksheets, self.config.worksheet.as_deref())?;

        tracing::info!(
            sheet_id = %self.config.id,
            worksheet = %session.worksheet.title,
            "Sheets session established"
        );
        Ok(session)
    }
}

impl SheetSession {
    /// `{base}/v4/spreadsheets/{id}/{segments...}?{query}`, plus `key` for API-key auth.
    fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
                .extend(segments);
        }
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
            if let Some(key) = self.auth.api_key() {
                pairs.append_pair("key", key.expose());
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        url
    }

    /// Authenticate and send, retrying once with a fresh token after a 401.
    fn send(&self, request: impl Fn() -> RequestBuilder) -> Result<Response, StoreError> {
        let response = self.auth.apply(request(), &self.client)?.send()?;
        if response.status() != StatusCode::UNAUTHORIZED || !self.auth.refresh() {
            return check_status(response);
        }

        tracing::info!(sheet_id = %self.spreadsheet_id, "Access token rejected, refreshing");
        check_status(self.auth.apply(request(), &self.client)?.send()?)
    }

    fn get(&self, url: Url) -> Result<Response, StoreError> {
        tracing::debug!(path = %url.path(), "GET");
        self.send(|| self.client.get(url.clone()))
    }

    fn read_range(&self, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let url = self.url(
            &["values", range],
            &[
                ("majorDimension", "ROWS"),
                ("valueRenderOption", "FORMATTED_VALUE"),
            ],
        );
        let body: ValueRange = self.get(url)?.json()?;
        Ok(body
            .values
            .into_iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }
}

impl TableStore for SheetsTable {
    fn read_all(&self) -> Result<RawTable, StoreError> {
        let session = self.session()?;
        let grid = session.read_range(&sheet_range(&session.worksheet.title))?;
        tracing::debug!(rows = grid.len(), "Read worksheet");
        Ok(RawTable::from_grid(grid))
    }

    fn read_header(&self) -> Result<Vec<String>, StoreError> {
        let session = self.session()?;
        let mut grid = session.read_range(&row_range(&session.worksheet.title, 1))?;
        Ok(if grid.is_empty() {
            Vec::new()
        } else {
            grid.swap_remove(0)
        })
    }

    fn update_cell(&self, cell: CellRef, value: i64) -> Result<(), StoreError> {
        let session = self.session()?;
        let range = cell_range(&session.worksheet.title, cell);
        let url = session.url(
            &["values", range.as_str()],
            &[("valueInputOption", "USER_ENTERED")],
        );
        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": [[value]],
        });

        tracing::debug!(range = %range, value, "PUT");
        session.send(|| session.client.put(url.clone()).json(&body))?;
        tracing::info!(range = %range, value, "Cell updated");
        Ok(())
    }
}

/// Pick the worksheet by exact title, or the first one (lowest index) when unset.
pub fn select_worksheet(
    mut worksheets: Vec<Worksheet>,
    wanted: Option<&str>,
) -> Result<Worksheet, StoreError> {
    match wanted.map(str::trim).filter(|w| !w.is_empty()) {
        Some(title) => worksheets
            .into_iter()
            .find(|w| w.title == title)
            .ok_or_else(|| StoreError::WorksheetNotFound {
                title: title.to_string(),
            }),
        None => {
            worksheets.sort_by_key(|w| w.index);
            worksheets
                .into_iter()
                .next()
                .ok_or_else(|| StoreError::Decode("spreadsheet has no worksheets".to_string()))
        }
    }
}

fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(StoreError::Api {
        status: status.as_u16(),
        message: api_error_message(&body),
    })
}

/// Google wraps errors as `{"error": {"code", "message", "status"}}`.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.message,
        Ok(parsed) => parsed.error.status,
        Err(_) => body.chars().take(200).collect(),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        other => other.to_string(),
    }
}
