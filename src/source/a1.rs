//! A1 notation helpers.

/// A single cell, 1-based like the sheet itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: u32,
    pub column: u32,
}

impl CellRef {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// `CellRef::new(2, 4)` -> `"D2"`.
    pub fn to_a1(&self) -> String {
        format!("{}{}", column_letters(self.column), self.row)
    }
}

/// Bijective base-26 column name: 1 -> A, 26 -> Z, 27 -> AA.
pub fn column_letters(mut column: u32) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push(b'A' + rem as u8);
        column = (column - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Quote a worksheet title for use in a range (`Foglio 1` -> `'Foglio 1'`).
pub fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Range covering a whole worksheet.
pub fn sheet_range(title: &str) -> String {
    quote_title(title)
}

/// Range covering one row.
pub fn row_range(title: &str, row: u32) -> String {
    format!("{}!{row}:{row}", quote_title(title))
}

/// Range covering one cell.
pub fn cell_range(title: &str, cell: CellRef) -> String {
    format!("{}!{}", quote_title(title), cell.to_a1())
}
