//! Completion filters applied to the tasks of a day

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::task::TaskRecord;

/// Flags to tell which tasks should be displayed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskFilter {
    /// Every task
    All,
    /// Tasks that are still to do
    Active,
    /// Tasks that have been completed
    Completed,
}

impl TaskFilter {
    /// The filters, in the order a picker displays them
    pub fn all_filters() -> [TaskFilter; 3] {
        [TaskFilter::Active, TaskFilter::Completed, TaskFilter::All]
    }

    /// The user-facing label
    pub fn label(&self) -> &'static str {
        match self {
            TaskFilter::All => "All",
            TaskFilter::Active => "To Do",
            TaskFilter::Completed => "Completed",
        }
    }

    pub fn matches(&self, task: &TaskRecord) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => task.completed_at().is_none(),
            TaskFilter::Completed => task.completed_at().is_some(),
        }
    }
}

impl Default for TaskFilter {
    fn default() -> Self {
        TaskFilter::Active
    }
}

impl Display for TaskFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TaskFilter {
    type Err = String;

    /// Accepts both labels ("To Do") and names ("active")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TaskFilter::All),
            "active" | "to do" | "todo" => Ok(TaskFilter::Active),
            "completed" | "done" => Ok(TaskFilter::Completed),
            other => Err(format!("Unknown filter {:?}. Expected one of all, active, completed", other)),
        }
    }
}
