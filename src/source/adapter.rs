//! Schema-aware adapter over a raw table.

use crate::config::ColumnNames;
use crate::dataset::{parse_learned, RowIdentity, VocabularyRow};

use super::a1::CellRef;
use super::error::{FetchError, SchemaError, WriteError};
use super::table::TableStore;
use super::DataSource;

fn normalize(header: &str) -> String {
    header.trim().to_lowercase()
}

/// 0-based positions of the required columns within the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub characters: usize,
    pub pinyin: usize,
    pub translation: usize,
    pub learned: usize,
}

impl ColumnLayout {
    /// Locate every required column, reporting all missing ones at once.
    pub fn resolve(header: &[String], names: &ColumnNames) -> Result<Self, SchemaError> {
        let normalized: Vec<String> = header.iter().map(|h| normalize(h)).collect();
        let position = |name: &str| {
            let wanted = normalize(name);
            normalized.iter().position(|h| *h == wanted)
        };

        let found = names.required().map(|name| (name, position(name)));
        let missing: Vec<String> = found
            .iter()
            .filter(|(_, pos)| pos.is_none())
            .map(|(name, _)| normalize(name))
            .collect();

        match found {
            [(_, Some(characters)), (_, Some(pinyin)), (_, Some(translation)), (_, Some(learned))] => {
                Ok(Self {
                    characters,
                    pinyin,
                    translation,
                    learned,
                })
            }
            _ => Err(SchemaError { missing }),
        }
    }
}

/// Vocabulary rows backed by any [`TableStore`].
pub struct SheetSource<T: TableStore> {
    table: T,
    columns: ColumnNames,
}

impl<T: TableStore> SheetSource<T> {
    pub fn new(table: T, columns: ColumnNames) -> Self {
        Self { table, columns }
    }

    pub fn table(&self) -> &T {
        &self.table
    }
}

impl<T: TableStore> DataSource for SheetSource<T> {
    fn fetch_all(&self) -> Result<Vec<VocabularyRow>, FetchError> {
        let table = self.table.read_all()?;
        let layout = ColumnLayout::resolve(&table.header, &self.columns)?;

        let cell = |row: &[String], column: usize| row.get(column).cloned().unwrap_or_default();
        Ok(table
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| VocabularyRow {
                id: RowIdentity::from_index(index),
                characters: cell(row, layout.characters),
                pinyin: cell(row, layout.pinyin),
                translation: cell(row, layout.translation),
                learned: row.get(layout.learned).and_then(|text| parse_learned(text)),
            })
            .collect())
    }

    fn write_learned_flag(&self, row: RowIdentity, value: i64) -> Result<(), WriteError> {
        let sheet_row = row.sheet_row();
        let header = self
            .table
            .read_header()
            .map_err(|source| WriteError::Store {
                row: sheet_row,
                source,
            })?;

        let wanted = normalize(&self.columns.learned);
        let column = header
            .iter()
            .position(|h| normalize(h) == wanted)
            .ok_or(WriteError::MissingColumn { column: wanted })?;

        self.table
            .update_cell(CellRef::new(sheet_row, column as u32 + 1), value)
            .map_err(|source| WriteError::Store {
                row: sheet_row,
                source,
            })?;

        tracing::info!(row = sheet_row, value, "Learned flag written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RawTable, StoreError};
    use parking_lot::Mutex;

    struct FakeTable {
        table: RawTable,
        writes: Mutex<Vec<(CellRef, i64)>>,
        fail_writes: bool,
    }

    impl FakeTable {
        fn new(header: &[&str], rows: &[&[&str]]) -> Self {
            Self {
                table: RawTable {
                    header: header.iter().map(|s| s.to_string()).collect(),
                    rows: rows
                        .iter()
                        .map(|r| r.iter().map(|s| s.to_string()).collect())
                        .collect(),
                },
                writes: Mutex::new(Vec::new()),
                fail_writes: false,
            }
        }
    }

    impl TableStore for FakeTable {
        fn read_all(&self) -> Result<RawTable, StoreError> {
            Ok(self.table.clone())
        }

        fn read_header(&self) -> Result<Vec<String>, StoreError> {
            Ok(self.table.header.clone())
        }

        fn update_cell(&self, cell: CellRef, value: i64) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError::Api {
                    status: 500,
                    message: "backend error".to_string(),
                });
            }
            self.writes.lock().push((cell, value));
            Ok(())
        }
    }

    #[test]
    fn headers_match_case_and_whitespace_insensitively() {
        let source = SheetSource::new(
            FakeTable::new(
                &[" Caratteri ", "PINYIN", "Traduzione", "appr "],
                &[&["你好", "nǐ hǎo", "ciao", ""], &["谢谢", "xièxie", "grazie", "1"]],
            ),
            ColumnNames::default(),
        );
        let rows = source.fetch_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].characters, "你好");
        assert_eq!(rows[0].learned, None);
        assert_eq!(rows[1].learned, Some(1.0));
        assert_eq!(rows[1].id.sheet_row(), 3);
    }

    #[test]
    fn columns_may_appear_in_any_order() {
        let source = SheetSource::new(
            FakeTable::new(
                &["appr", "note", "traduzione", "pinyin", "caratteri"],
                &[&["x", "", "grazie", "xièxie", "谢谢"]],
            ),
            ColumnNames::default(),
        );
        let rows = source.fetch_all().unwrap();
        assert_eq!(rows[0].characters, "谢谢");
        assert_eq!(rows[0].translation, "grazie");
        assert_eq!(rows[0].learned, None);
    }

    #[test]
    fn short_rows_are_padded() {
        let source = SheetSource::new(
            FakeTable::new(&["caratteri", "pinyin", "traduzione", "appr"], &[&["好"]]),
            ColumnNames::default(),
        );
        let rows = source.fetch_all().unwrap();
        assert_eq!(rows[0].pinyin, "");
        assert_eq!(rows[0].learned, None);
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let source = SheetSource::new(
            FakeTable::new(&["pinyin", "traduzione"], &[]),
            ColumnNames::default(),
        );
        match source.fetch_all() {
            Err(FetchError::Schema(err)) => {
                assert_eq!(err.missing, vec!["caratteri".to_string(), "appr".to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn write_targets_learned_column_and_sheet_row() {
        let source = SheetSource::new(
            FakeTable::new(&["caratteri", "pinyin", "traduzione", "appr"], &[]),
            ColumnNames::default(),
        );
        source
            .write_learned_flag(RowIdentity::from_index(4), 1)
            .unwrap();
        let writes = source.table().writes.lock().clone();
        assert_eq!(writes, vec![(CellRef::new(6, 4), 1)]);
    }

    #[test]
    fn write_without_learned_column_fails() {
        let source = SheetSource::new(
            FakeTable::new(&["caratteri", "pinyin", "traduzione"], &[]),
            ColumnNames::default(),
        );
        let err = source
            .write_learned_flag(RowIdentity::from_index(0), 1)
            .unwrap_err();
        assert!(matches!(err, WriteError::MissingColumn { column } if column == "appr"));
    }

    #[test]
    fn write_failure_is_wrapped() {
        let mut table = FakeTable::new(&["caratteri", "pinyin", "traduzione", "appr"], &[]);
        table.fail_writes = true;
        let source = SheetSource::new(table, ColumnNames::default());
        let err = source
            .write_learned_flag(RowIdentity::from_index(0), 1)
            .unwrap_err();
        assert!(matches!(err, WriteError::Store { row: 2, .. }));
    }
}
