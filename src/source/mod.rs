//! Data source adapter: reads vocabulary rows and writes the learned flag.
//!
//! # Components
//! - `table.rs`: `TableStore`, raw cell access to a sheet
//! - `sheets.rs`: Google Sheets implementation of `TableStore`
//! - `adapter.rs`: `SheetSource`, header matching and value coercion
//! - `auth.rs`: request authentication and service account tokens
//! - `a1.rs`: A1 notation helpers

pub mod a1;
mod adapter;
mod auth;
mod error;
mod sheets;
mod table;

pub use a1::CellRef;
pub use adapter::{ColumnLayout, SheetSource};
pub use auth::ServiceAccountKey;
pub use error::{FetchError, SchemaError, StoreError, WriteError};
pub use sheets::{select_worksheet, SheetsTable, Worksheet};
pub use table::{RawTable, TableStore};

use crate::dataset::{RowIdentity, VocabularyRow};

/// Contract between the session and the backing store.
pub trait DataSource: Send + Sync {
    /// Every data row in sheet order, each carrying its identity.
    fn fetch_all(&self) -> Result<Vec<VocabularyRow>, FetchError>;

    /// Write `value` into the learned column of `row`.
    ///
    /// On error the caller must assume nothing was written.
    fn write_learned_flag(&self, row: RowIdentity, value: i64) -> Result<(), WriteError>;
}
