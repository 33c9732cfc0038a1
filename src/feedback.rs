//! Notifications sent to whoever displays a [`DayViewController`](crate::DayViewController)
//!
//! Events only say _that_ something changed. Listeners are expected to read the controller state again.

use std::fmt::{Display, Error, Formatter};

use chrono::NaiveDate;

use crate::task::TaskId;

/// Something that happened to the tasks of the selected day
#[derive(Clone, Debug, PartialEq)]
pub enum DayEvent {
    /// Nothing happened yet
    Idle,
    /// The selected day has changed (its tasks are reloaded right after)
    DateChanged(NaiveDate),
    /// The tasks of a day have been (re)loaded from the store
    Reloaded{ date: NaiveDate, count: usize },
    TaskCreated(TaskId),
    TaskUpdated(TaskId),
    TaskDeleted(TaskId),
}

impl Display for DayEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            DayEvent::Idle => write!(f, "Idle"),
            DayEvent::DateChanged(date) => write!(f, "Moved to {}", date),
            DayEvent::Reloaded{date, count} => write!(f, "{} task(s) loaded for {}", count, date),
            DayEvent::TaskCreated(id) => write!(f, "Task {} created", id),
            DayEvent::TaskUpdated(id) => write!(f, "Task {} updated", id),
            DayEvent::TaskDeleted(id) => write!(f, "Task {} deleted", id),
        }
    }
}

impl Default for DayEvent {
    fn default() -> Self {
        Self::Idle
    }
}



/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<DayEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<DayEvent>;

/// Create a feedback channel, that can be used to be told when the displayed tasks should be re-read
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(DayEvent::default())
}
