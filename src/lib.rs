//! This crate provides the core of a day-by-day to-do list.
//!
//! Tasks are dated [`TaskRecord`]s, persisted by a [`Store`](store::Store). The [`store`] module provides a
//! [`LocalStore`](store::LocalStore), that keeps tasks in memory and commits them to a local JSON file.
//!
//! A [`DayViewController`] is what a "tasks of the day" screen binds to. \
//! It holds the selected day, caches the tasks due that day, filters them by completion (see [`TaskFilter`]),
//! and writes every change through to its store. \
//! Listeners can [`subscribe`](DayViewController::subscribe) to be told when to read its state again.
//!
//! Everything that depends on the current time asks a [`Clock`](clock::Clock), so that it can be pinned in tests.

pub mod task;
pub use task::{TaskFields, TaskId, TaskRecord};
pub mod filter;
pub use filter::TaskFilter;
pub mod clock;
pub mod status;

pub mod store;
pub mod error;
pub use error::Error;
pub mod feedback;
pub mod day_view;
pub use day_view::DayViewController;

pub mod mock_behaviour;
pub mod settings;
pub mod utils;
