//! Display helpers derived from a task and the current time
//!
//! None of these are stored: they are recomputed from the task fields and a [`Clock`] every time they are asked for.

use csscolorparser::Color;

use crate::clock::Clock;
use crate::settings;
use crate::task::TaskRecord;

pub fn is_completed(task: &TaskRecord) -> bool {
    task.completed_at().is_some()
}

/// A task is overdue when it is not completed, has a meaningful due time, and this time has passed
pub fn is_overdue<C: Clock + ?Sized>(task: &TaskRecord, clock: &C) -> bool {
    !is_completed(task)
        && task.schedule_time()
        && *task.due_date() < clock.local_now()
}

/// Red for overdue tasks, black otherwise
pub fn overdue_color<C: Clock + ?Sized>(task: &TaskRecord, clock: &C) -> Color {
    if is_overdue(task, clock) {
        Color::from_rgb_u8(255, 0, 0)
    } else {
        Color::from_rgb_u8(0, 0, 0)
    }
}

/// The time of day the task is due, e.g. `06:15 PM`.
/// See [`settings::TIME_ONLY_FORMAT`]
pub fn due_time_only(task: &TaskRecord) -> String {
    let format = settings::read(&settings::TIME_ONLY_FORMAT);
    task.due_date().format(&format).to_string()
}

/// The icon to display for this task, falling back to [`settings::DEFAULT_ICON`]
pub fn display_icon(task: &TaskRecord) -> String {
    match task.icon() {
        Some(icon) => icon.to_string(),
        None => settings::read(&settings::DEFAULT_ICON),
    }
}

/// The icon an icon picker should preselect for this task, falling back to [`settings::PICKER_FALLBACK_ICON`]
pub fn picker_icon(task: &TaskRecord) -> String {
    match task.icon() {
        Some(icon) => icon.to_string(),
        None => settings::read(&settings::PICKER_FALLBACK_ICON),
    }
}
