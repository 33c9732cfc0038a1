//! Dated to-do tasks

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// The opaque identifier of a [`TaskRecord`]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId {
    content: Uuid,
}

impl TaskId {
    /// Generate a random TaskId.
    pub fn random() -> Self {
        Self { content: Uuid::new_v4() }
    }
}

impl From<Uuid> for TaskId {
    fn from(uuid: Uuid) -> Self {
        Self { content: uuid }
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let u = Uuid::parse_str(s)?;
        Ok(Self::from(u))
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content.to_hyphenated())
    }
}


/// The user-editable part of a task, as filled in an edit form
#[derive(Clone, Debug, PartialEq)]
pub struct TaskFields {
    pub name: String,
    pub description: Option<String>,
    /// Local wall-clock due date. Its time of day only matters when `schedule_time` is set
    pub due_date: NaiveDateTime,
    pub schedule_time: bool,
}

impl TaskFields {
    /// Fields for a task that is due some day, at no particular time
    pub fn new<S: ToString>(name: S, due_day: NaiveDate) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            due_date: due_day.and_time(NaiveTime::default()),
            schedule_time: false,
        }
    }

    /// Fields for a task that is due at a given time
    pub fn scheduled<S: ToString>(name: S, due_date: NaiveDateTime) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            due_date,
            schedule_time: true,
        }
    }

    pub fn with_description<S: ToString>(mut self, description: S) -> Self {
        self.description = Some(description.to_string());
        self
    }
}


/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Assigned once, at creation
    id: TaskId,

    /// The display name of the task
    name: String,
    description: Option<String>,

    /// When this task is due, in local wall-clock time
    due_date: NaiveDateTime,
    /// Whether the time of day of `due_date` is meaningful
    schedule_time: bool,

    /// The time this task was created
    created_at: DateTime<Utc>,
    /// When this task has been completed. `None` means it is still to do
    completed_at: Option<DateTime<Utc>>,

    /// The symbol shown next to the task. See [`crate::settings::DEFAULT_ICON`] for the fallback
    icon: Option<String>,
}

impl TaskRecord {
    /// Create a brand new task, that has not been completed yet.
    /// This will pick a new (random) task ID.
    pub fn new(fields: TaskFields, created_at: DateTime<Utc>) -> Self {
        Self::new_with_parameters(TaskId::random(), fields, created_at, None, None)
    }

    /// Create a new TaskRecord instance, that may come from a store already
    pub fn new_with_parameters(id: TaskId, fields: TaskFields,
                               created_at: DateTime<Utc>, completed_at: Option<DateTime<Utc>>,
                               icon: Option<String>,
                            ) -> Self
    {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            due_date: fields.due_date,
            schedule_time: fields.schedule_time,
            created_at,
            completed_at,
            icon,
        }
    }

    pub fn id(&self) -> &TaskId     { &self.id          }
    pub fn name(&self) -> &str      { &self.name        }
    pub fn description(&self) -> Option<&str>          { self.description.as_deref() }
    pub fn due_date(&self) -> &NaiveDateTime           { &self.due_date }
    pub fn schedule_time(&self) -> bool                { self.schedule_time }
    pub fn created_at(&self) -> &DateTime<Utc>         { &self.created_at }
    pub fn completed_at(&self) -> Option<&DateTime<Utc>> { self.completed_at.as_ref() }
    pub fn icon(&self) -> Option<&str>                 { self.icon.as_deref() }

    /// The day this task is due, regardless of its time of day
    pub fn due_day(&self) -> NaiveDate {
        self.due_date.date()
    }

    /// Whether this task belongs to the given day
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.due_day() == day
    }

    /// The user-editable fields of this task
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            name: self.name.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            schedule_time: self.schedule_time,
        }
    }

    /// Overwrite the user-editable fields.
    /// Completion, creation date and icon are left untouched
    pub fn apply_fields(&mut self, fields: TaskFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.due_date = fields.due_date;
        self.schedule_time = fields.schedule_time;
    }

    /// Set the completion timestamp. `None` marks the task as not completed
    pub fn set_completed_at(&mut self, completed_at: Option<DateTime<Utc>>) {
        self.completed_at = completed_at;
    }

    pub fn set_icon(&mut self, icon: Option<String>) {
        self.icon = icon;
    }
}
