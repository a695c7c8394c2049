use crate::dataset::RowIdentity;
use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionIntent {
    /// A row was picked from the pool.
    Draw { item: RowIdentity },
    Reveal,
    /// The learned flag of the current item was written.
    KnownRecorded,
    /// Writing the learned flag failed. Counters stay as they are.
    KnownFailed { message: String },
    MarkUnknown,
    End,
}

impl Intent for SessionIntent {}
