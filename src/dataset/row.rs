//! Vocabulary rows and their identity in the backing sheet.

/// Rows above the first data row.
pub const HEADER_ROWS: u32 = 1;

/// Value of the learned column that marks a row as learned.
pub const LEARNED: i64 = 1;

/// Position of a row within one loaded snapshot.
///
/// Identity is index-based: after a reload the same index may refer to a
/// different row if the sheet was edited in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowIdentity {
    index: usize,
}

impl RowIdentity {
    /// Identity of the `index`-th data row (0-based, header excluded).
    pub fn from_index(index: usize) -> Self {
        Self { index }
    }

    /// 0-based position among the data rows.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based row number in the sheet, header included.
    pub fn sheet_row(&self) -> u32 {
        self.index as u32 + HEADER_ROWS + 1
    }
}

impl std::fmt::Display for RowIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}", self.sheet_row())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyRow {
    pub id: RowIdentity,
    pub characters: String,
    pub pinyin: String,
    pub translation: String,
    /// `None` when the cell is empty or not a number.
    pub learned: Option<f64>,
}

impl VocabularyRow {
    pub fn is_learned(&self) -> bool {
        self.learned == Some(LEARNED as f64)
    }
}

/// Coerce learned-column text to a number; anything unparsable is unset.
pub fn parse_learned(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}
