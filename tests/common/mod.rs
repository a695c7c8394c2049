//! Shared test utilities: an in-memory sheet and a mock Sheets server.

#![allow(dead_code, unused_imports)]

pub mod mock_sheets;

use hanzi_quiz::config::{ColumnNames, SheetConfig};
use hanzi_quiz::dataset::{Dataset, RowIdentity, VocabularyRow};
use hanzi_quiz::session::QuizSession;
use hanzi_quiz::source::{CellRef, RawTable, SheetSource, StoreError, TableStore};
use hanzi_quiz::ui::App;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

pub const HEADER: [&str; 4] = ["caratteri", "pinyin", "traduzione", "appr"];

/// In-memory sheet with switchable failures.
///
/// Writes land in the grid, so a later read sees them.
pub struct MemoryTable {
    grid: Mutex<Vec<Vec<String>>>,
    writes: Mutex<Vec<(CellRef, i64)>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub connection_lost: AtomicBool,
}

impl MemoryTable {
    pub fn new(header: &[&str], rows: &[&[&str]]) -> Self {
        let mut grid = vec![header.iter().map(|s| s.to_string()).collect::<Vec<_>>()];
        grid.extend(
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect::<Vec<_>>()),
        );
        Self {
            grid: Mutex::new(grid),
            writes: Mutex::new(Vec::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            connection_lost: AtomicBool::new(false),
        }
    }

    /// Standard vocabulary header with the given data rows.
    pub fn vocab(rows: &[&[&str]]) -> Self {
        Self::new(&HEADER, rows)
    }

    pub fn writes(&self) -> Vec<(CellRef, i64)> {
        self.writes.lock().clone()
    }

    /// Text of a 1-based cell, empty when out of range.
    pub fn cell(&self, row: u32, column: u32) -> String {
        self.grid
            .lock()
            .get(row as usize - 1)
            .and_then(|r| r.get(column as usize - 1))
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the header row, simulating a schema edit.
    pub fn set_header(&self, header: &[&str]) {
        self.grid.lock()[0] = header.iter().map(|s| s.to_string()).collect();
    }

    /// Append a data row, simulating an edit made elsewhere.
    pub fn push_row(&self, row: &[&str]) {
        self.grid
            .lock()
            .push(row.iter().map(|s| s.to_string()).collect());
    }

    fn check(&self, flag: &AtomicBool) -> Result<(), StoreError> {
        if self.connection_lost.load(Ordering::SeqCst) {
            return Err(StoreError::Connection {
                sheet_id: "memory".to_string(),
                source: Box::new(StoreError::Api {
                    status: 401,
                    message: "Request had invalid authentication credentials".to_string(),
                }),
            });
        }
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 503,
                message: "The service is currently unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl TableStore for MemoryTable {
    fn read_all(&self) -> Result<RawTable, StoreError> {
        self.check(&self.fail_reads)?;
        Ok(RawTable::from_grid(self.grid.lock().clone()))
    }

    fn read_header(&self) -> Result<Vec<String>, StoreError> {
        self.check(&self.fail_writes)?;
        Ok(self.grid.lock().first().cloned().unwrap_or_default())
    }

    fn update_cell(&self, cell: CellRef, value: i64) -> Result<(), StoreError> {
        self.check(&self.fail_writes)?;
        let mut grid = self.grid.lock();
        let row = cell.row as usize - 1;
        let column = cell.column as usize - 1;
        if grid.len() <= row {
            grid.resize(row + 1, Vec::new());
        }
        if grid[row].len() <= column {
            grid[row].resize(column + 1, String::new());
        }
        grid[row][column] = value.to_string();
        self.writes.lock().push((cell, value));
        Ok(())
    }
}

pub type MemorySource = SheetSource<MemoryTable>;

pub fn memory_source(rows: &[&[&str]]) -> Arc<MemorySource> {
    Arc::new(SheetSource::new(
        MemoryTable::vocab(rows),
        ColumnNames::default(),
    ))
}

/// Session with a fixed seed so draws are reproducible.
pub fn seeded_session(source: Arc<MemorySource>, seed: u64) -> QuizSession {
    QuizSession::with_rng(source, StdRng::seed_from_u64(seed))
}

/// App over an in-memory sheet, loaded the way startup loads it.
pub fn make_app(source: Arc<MemorySource>) -> App {
    let dataset = Dataset::load(&*source).expect("initial load");
    let session = seeded_session(Arc::clone(&source), 7);
    App::with_session(source, dataset, session, "Vocab")
}

/// Sheet config pointing at a mock server.
pub fn mock_sheet_config(base_url: &str) -> SheetConfig {
    SheetConfig {
        id: "sheet-123".to_string(),
        worksheet: None,
        base_url: base_url.to_string(),
        auth_type_str: "bearer".to_string(),
        token: Some("test-token".to_string()),
        key_file: None,
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    }
}

/// Write `content` to a config.toml in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn ids(rows: &[VocabularyRow]) -> Vec<RowIdentity> {
    rows.iter().map(|r| r.id).collect()
}
