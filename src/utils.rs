//! Some utility functions

use crate::clock::Clock;
use crate::day_view::DayViewController;
use crate::status;
use crate::store::Store;
use crate::task::TaskRecord;

/// A one-line description of a task, as printed by [`print_task`]
pub fn format_task<C: Clock + ?Sized>(task: &TaskRecord, clock: &C) -> String {
    let completion = if status::is_completed(task) { "✓" } else { " " };
    let overdue = if status::is_overdue(task, clock) { "!" } else { " " };
    let time = if task.schedule_time() { status::due_time_only(task) } else { String::from("        ") };
    format!("{}{} {} [{}] {}\t{}", completion, overdue, time, status::display_icon(task), task.name(), task.id())
}

/// A debug utility that pretty-prints a task
pub fn print_task<C: Clock + ?Sized>(task: &TaskRecord, clock: &C) {
    println!("    {}", format_task(task, clock));
    if let Some(description) = task.description() {
        if !description.is_empty() {
            println!("            {}", description);
        }
    }
}

/// A debug utility that pretty-prints the visible tasks of a controller
pub fn print_day<S, C>(controller: &DayViewController<S, C>)
where
    S: Store,
    C: Clock,
{
    let date = controller.selected_date();
    println!("{} ({})", date.format("%A, %b %-d %Y"), controller.filter());
    let visible = controller.visible_tasks();
    if visible.is_empty() {
        println!("    (nothing)");
    }
    for task in visible {
        print_task(task, controller.clock());
    }
}
