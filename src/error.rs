//! Errors reported to the callers of [`DayViewController`](crate::DayViewController)

use thiserror::Error;

use crate::store::StoreError;
use crate::task::TaskId;

#[derive(Debug, Error)]
pub enum Error {
    /// The task is not (or no longer) in the store
    #[error("no task with id {0}")]
    NotFound(TaskId),

    /// The store could not read, stage or commit a change. Nothing has been applied
    #[error("unable to persist the change: {0}")]
    PersistenceFailure(#[source] StoreError),

    /// Moving the selected day would leave the supported calendar range
    #[error("date out of range")]
    DateOutOfRange,
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::PersistenceFailure(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
