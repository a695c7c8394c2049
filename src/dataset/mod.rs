//! Dataset view: normalized rows and the learning pool derived from them.

mod row;
mod view;

pub use row::{parse_learned, RowIdentity, VocabularyRow, HEADER_ROWS, LEARNED};
pub use view::{Dataset, LearningPool};
