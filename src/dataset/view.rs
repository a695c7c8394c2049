//! Immutable snapshot of the sheet plus the derived learning pool.

use crate::source::{DataSource, FetchError};

use super::row::{RowIdentity, VocabularyRow};

/// Rows not yet learned, in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearningPool {
    members: Vec<RowIdentity>,
}

impl LearningPool {
    pub fn from_rows(rows: &[VocabularyRow]) -> Self {
        Self {
            members: rows
                .iter()
                .filter(|row| !row.is_learned())
                .map(|row| row.id)
                .collect(),
        }
    }

    pub fn members(&self) -> &[RowIdentity] {
        &self.members
    }

    pub fn contains(&self, id: RowIdentity) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One read of the backing sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<VocabularyRow>,
    pool: LearningPool,
}

impl Dataset {
    /// Fetch every row and derive a fresh pool.
    pub fn load(source: &dyn DataSource) -> Result<Self, FetchError> {
        let rows = source.fetch_all()?;
        let dataset = Self::from_rows(rows);
        tracing::debug!(
            rows = dataset.len(),
            pool = dataset.pool.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_rows(rows: Vec<VocabularyRow>) -> Self {
        let pool = LearningPool::from_rows(&rows);
        Self { rows, pool }
    }

    pub fn rows(&self) -> &[VocabularyRow] {
        &self.rows
    }

    pub fn row(&self, id: RowIdentity) -> Option<&VocabularyRow> {
        self.rows.get(id.index())
    }

    pub fn pool(&self) -> &LearningPool {
        &self.pool
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn learned_count(&self) -> usize {
        self.rows.len() - self.pool.len()
    }
}
