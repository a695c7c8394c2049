//! Error types for the data source adapter.

use thiserror::Error;

/// Transport-level failures talking to the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Establishing the store session failed (auth, metadata, worksheet lookup).
    #[error("Could not open spreadsheet '{sheet_id}': {source}")]
    Connection {
        sheet_id: String,
        #[source]
        source: Box<StoreError>,
    },

    /// No credential was configured for the store.
    #[error("No access token configured")]
    MissingCredential,

    /// The service account key file is unreadable or malformed.
    #[error("Invalid service account key: {0}")]
    InvalidKey(String),

    /// Exchanging the signed assertion for an access token failed.
    #[error("Token request failed: {status} - {message}")]
    Token { status: u16, message: String },

    /// The configured worksheet does not exist.
    #[error("Worksheet '{title}' not found")]
    WorksheetNotFound { title: String },

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Sheets API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response could not be understood.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Whether this error happened while opening the store.
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Connection { .. })
    }
}

/// Required columns are missing from the header row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing columns in sheet: {}", missing.join(", "))]
pub struct SchemaError {
    pub missing: Vec<String>,
}

/// Reading the vocabulary failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Failed to read sheet: {0}")]
    Store(#[from] StoreError),
}

impl FetchError {
    /// Schema and connection failures end the session; anything else can be retried.
    pub fn is_fatal(&self) -> bool {
        match self {
            FetchError::Schema(_) => true,
            FetchError::Store(err) => err.is_connection(),
        }
    }
}

/// Writing the learned flag failed. The row must be treated as unchanged.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Column '{column}' not found")]
    MissingColumn { column: String },

    #[error("Failed to update sheet row {row}: {source}")]
    Store {
        row: u32,
        #[source]
        source: StoreError,
    },
}
