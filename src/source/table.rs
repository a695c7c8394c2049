//! Raw table access: the seam between the schema-aware adapter and the sheet.

use super::a1::CellRef;
use super::error::StoreError;

/// Cell text as returned by the store. The first row is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Split a grid of rows into header and data rows.
    pub fn from_grid(mut grid: Vec<Vec<String>>) -> Self {
        if grid.is_empty() {
            return Self::default();
        }
        let rows = grid.split_off(1);
        let header = grid.pop().unwrap_or_default();
        Self { header, rows }
    }
}

/// Row/column access to a tabular store.
///
/// Implementations block until the store has answered.
pub trait TableStore: Send + Sync {
    /// Every populated row, header first.
    fn read_all(&self) -> Result<RawTable, StoreError>;

    /// Only the header row.
    fn read_header(&self) -> Result<Vec<String>, StoreError>;

    /// Overwrite one cell with a number.
    fn update_cell(&self, cell: CellRef, value: i64) -> Result<(), StoreError>;
}
