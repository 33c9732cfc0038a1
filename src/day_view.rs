//! The state behind a "tasks of the day" screen
//!
//! A [`DayViewController`] holds the selected day, caches the tasks due that day, and filters them by completion.
//! Every change it makes goes through its [`Store`] and is committed before the cache is touched, so that what is
//! displayed never shows a change that has not been persisted.

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::feedback::{feedback_channel, DayEvent, FeedbackReceiver, FeedbackSender};
use crate::filter::TaskFilter;
use crate::store::{Store, StoreError};
use crate::task::{TaskFields, TaskId, TaskRecord};

pub struct DayViewController<S, C = SystemClock>
where
    S: Store,
    C: Clock,
{
    store: S,
    clock: C,

    selected_date: NaiveDate,
    /// The tasks due on `selected_date`, in store order
    cached_tasks: Vec<TaskRecord>,
    active_filter: TaskFilter,

    feedback: FeedbackSender,
}

impl<S, C> DayViewController<S, C>
where
    S: Store,
    C: Clock,
{
    /// Create a controller that shows today's tasks.
    ///
    /// Nothing is read from the store yet: call [`Self::reload`] to fill the cache
    pub fn new(store: S, clock: C) -> Self {
        let today = clock.today();
        Self::with_date(store, clock, today)
    }

    /// Create a controller that shows the tasks of the given day (once [`Self::reload`] has been called)
    pub fn with_date(store: S, clock: C, date: NaiveDate) -> Self {
        let (feedback, _) = feedback_channel();
        Self {
            store,
            clock,
            selected_date: date,
            cached_tasks: Vec::new(),
            active_filter: TaskFilter::default(),
            feedback,
        }
    }

    pub fn store(&self) -> &S { &self.store }
    pub fn clock(&self) -> &C { &self.clock }
    pub fn into_store(self) -> S { self.store }

    pub fn selected_date(&self) -> NaiveDate { self.selected_date }
    pub fn filter(&self) -> TaskFilter { self.active_filter }

    /// Every cached task of the selected day, regardless of the active filter
    pub fn cached_tasks(&self) -> &[TaskRecord] { &self.cached_tasks }

    /// A cached task of the selected day
    pub fn task(&self, id: &TaskId) -> Option<&TaskRecord> {
        self.cached_tasks.iter().find(|task| task.id() == id)
    }

    /// Get notified whenever the displayed state changes
    pub fn subscribe(&self) -> FeedbackReceiver {
        self.feedback.subscribe()
    }

    /// Send the notifications to an existing channel instead
    pub fn set_feedback_sender(&mut self, sender: FeedbackSender) {
        self.feedback = sender;
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.active_filter = filter;
    }

    /// The tasks of the selected day that match the active filter
    pub fn visible_tasks(&self) -> Vec<&TaskRecord> {
        let filter = self.active_filter;
        self.cached_tasks.iter()
            .filter(|task| filter.matches(task))
            .collect()
    }

    /// Select another day, and load its tasks.
    ///
    /// In case the tasks cannot be loaded, the previous day stays selected
    pub async fn set_date(&mut self, date: NaiveDate) -> Result<()> {
        let tasks = self.store.query_day(date).await?;
        self.selected_date = date;
        self.notify(DayEvent::DateChanged(date));
        self.replace_cache(tasks);
        Ok(())
    }

    /// Move the selected day `delta_days` days forward (or backward, if negative)
    pub async fn shift_date(&mut self, delta_days: i64) -> Result<()> {
        let days = Days::new(delta_days.unsigned_abs());
        let target = if delta_days >= 0 {
            self.selected_date.checked_add_days(days)
        } else {
            self.selected_date.checked_sub_days(days)
        };

        match target {
            None => Err(Error::DateOutOfRange),
            Some(date) => self.set_date(date).await,
        }
    }

    /// Replace the cache with the tasks the store has for the selected day
    pub async fn reload(&mut self) -> Result<()> {
        let tasks = self.store.query_day(self.selected_date).await?;
        self.replace_cache(tasks);
        Ok(())
    }

    fn replace_cache(&mut self, tasks: Vec<TaskRecord>) {
        log::debug!("Loaded {} task(s) for {}", tasks.len(), self.selected_date);
        self.cached_tasks = tasks;
        self.notify(DayEvent::Reloaded{ date: self.selected_date, count: self.cached_tasks.len() });
    }

    /// Create a task, and return its ID.
    ///
    /// It is added to the displayed tasks in case it is due on the selected day
    pub async fn create_task(&mut self, fields: TaskFields) -> Result<TaskId> {
        let task = TaskRecord::new(fields, self.clock.now());
        let id = task.id().clone();

        let staged = self.store.insert(task.clone()).await;
        self.commit_or_rollback(staged, "create a task").await?;
        log::info!("Created task {} ({:?}) due {}", id, task.name(), task.due_date());

        if task.is_due_on(self.selected_date) {
            self.cached_tasks.push(task);
        }
        self.notify(DayEvent::TaskCreated(id.clone()));
        Ok(id)
    }

    /// Overwrite the name, description and due date of a task.
    /// Its completion, creation date and icon are left untouched
    pub async fn update_task(&mut self, id: &TaskId, fields: TaskFields) -> Result<()> {
        let mut task = self.fetch(id).await?;
        task.apply_fields(fields);

        let staged = self.store.update(task.clone()).await;
        self.commit_or_rollback(staged, "update a task").await?;

        let due_on_selected_date = task.is_due_on(self.selected_date);
        let cached = self.task(id).is_some();
        match (cached, due_on_selected_date) {
            (true, true) => { self.replace_cached(&task); },
            (true, false) => self.cached_tasks.retain(|cached| cached.id() != id),
            (false, true) => self.reload_after_commit(task).await,
            (false, false) => {},
        }
        self.notify(DayEvent::TaskUpdated(id.clone()));
        Ok(())
    }

    /// Reload the cache once a task has moved to the selected day.
    ///
    /// The change is committed already, so a failing query is not a failed write: the task is appended to the
    /// cache instead, and its position will be fixed by the next reload
    async fn reload_after_commit(&mut self, task: TaskRecord) {
        match self.store.query_day(self.selected_date).await {
            Ok(tasks) => self.replace_cache(tasks),
            Err(err) => {
                log::warn!("Task {} has been saved, but the tasks of {} could not be reloaded: {}", task.id(), self.selected_date, err);
                self.cached_tasks.push(task);
            },
        }
    }

    /// Mark a task as completed now, or as not completed if it already was.
    /// Returns its new completion date
    pub async fn toggle_completion(&mut self, id: &TaskId) -> Result<Option<DateTime<Utc>>> {
        let mut task = self.fetch(id).await?;
        let completed_at = match task.completed_at() {
            Some(_) => None,
            None => Some(self.clock.now()),
        };
        task.set_completed_at(completed_at);

        let staged = self.store.update(task.clone()).await;
        self.commit_or_rollback(staged, "toggle a completion").await?;

        self.replace_cached(&task);
        self.notify(DayEvent::TaskUpdated(id.clone()));
        Ok(completed_at)
    }

    /// Set the icon of a task. `None` brings back the default one
    pub async fn set_icon(&mut self, id: &TaskId, icon: Option<String>) -> Result<()> {
        let mut task = self.fetch(id).await?;
        task.set_icon(icon);

        let staged = self.store.update(task.clone()).await;
        self.commit_or_rollback(staged, "set an icon").await?;

        self.replace_cached(&task);
        self.notify(DayEvent::TaskUpdated(id.clone()));
        Ok(())
    }

    pub async fn delete_task(&mut self, id: &TaskId) -> Result<()> {
        let task = self.fetch(id).await?;

        let staged = self.store.delete(task.id()).await;
        self.commit_or_rollback(staged, "delete a task").await?;
        log::info!("Deleted task {} ({:?})", id, task.name());

        self.cached_tasks.retain(|cached| cached.id() != id);
        self.notify(DayEvent::TaskDeleted(id.clone()));
        Ok(())
    }

    async fn fetch(&self, id: &TaskId) -> Result<TaskRecord> {
        match self.store.get(id).await? {
            Some(task) => Ok(task),
            None => Err(Error::NotFound(id.clone())),
        }
    }

    /// Commit a staged change, or bring the store back to its last committed state if staging or committing failed
    async fn commit_or_rollback(&mut self, staged: std::result::Result<(), StoreError>, action: &str) -> Result<()> {
        let outcome = match staged {
            Ok(()) => self.store.commit().await,
            Err(err) => Err(err),
        };

        if let Err(err) = outcome {
            log::warn!("Unable to {}: {}. Discarding the pending changes", action, err);
            self.store.rollback();
            return Err(Error::PersistenceFailure(err));
        }
        Ok(())
    }

    /// Replace the cached copy of this task, if any. Returns whether it was cached
    fn replace_cached(&mut self, task: &TaskRecord) -> bool {
        match self.cached_tasks.iter_mut().find(|cached| cached.id() == task.id()) {
            None => false,
            Some(cached) => {
                *cached = task.clone();
                true
            },
        }
    }

    fn notify(&self, event: DayEvent) {
        log::trace!("{}", event);
        self.feedback.send_replace(event);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use chrono::{Duration, NaiveDateTime};

    use crate::clock::FixedClock;
    use crate::mock_behaviour::MockBehaviour;
    use crate::store::LocalStore;

    type Controller = DayViewController<LocalStore, Arc<FixedClock>>;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(d: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        d.and_hms_opt(hour, minute, 0).unwrap()
    }

    fn controller_on(date: NaiveDate) -> (Controller, Arc<FixedClock>) {
        let _ = env_logger::builder().is_test(true).try_init();
        let clock = Arc::new(FixedClock::at_local(at(date, 8, 0)));
        (DayViewController::new(LocalStore::in_memory(), clock.clone()), clock)
    }

    fn failing_store(behaviour: MockBehaviour) -> (LocalStore, Arc<Mutex<MockBehaviour>>) {
        let mock = Arc::new(Mutex::new(behaviour));
        let mut store = LocalStore::in_memory();
        store.set_mock_behaviour(Some(mock.clone()));
        (store, mock)
    }

    fn names(tasks: &[&TaskRecord]) -> Vec<String> {
        tasks.iter().map(|t| t.name().to_string()).collect()
    }

    #[tokio::test]
    async fn buy_milk_scenario() {
        let (mut controller, _) = controller_on(day(2025, 7, 8));

        controller.create_task(TaskFields::new("Buy milk", day(2025, 7, 10))).await.unwrap();
        controller.set_date(day(2025, 7, 10)).await.unwrap();
        controller.reload().await.unwrap();
        controller.set_filter(TaskFilter::All);

        let visible = controller.visible_tasks();
        assert_eq!(names(&visible), vec!["Buy milk"]);
        assert!(visible[0].completed_at().is_none());
    }

    #[tokio::test]
    async fn new_controllers_start_today_with_active_filter() {
        let (controller, _) = controller_on(day(2025, 7, 8));
        assert_eq!(controller.selected_date(), day(2025, 7, 8));
        assert_eq!(controller.filter(), TaskFilter::Active);
        assert!(controller.cached_tasks().is_empty());
    }

    #[tokio::test]
    async fn reload_returns_exactly_the_tasks_of_the_day() {
        let today = day(2025, 7, 10);
        let (mut controller, _) = controller_on(today);
        controller.create_task(TaskFields::new("yesterday", day(2025, 7, 9))).await.unwrap();
        controller.create_task(TaskFields::scheduled("morning", at(today, 0, 0))).await.unwrap();
        controller.create_task(TaskFields::new("tomorrow", day(2025, 7, 11))).await.unwrap();
        controller.create_task(TaskFields::scheduled("night", at(today, 23, 59))).await.unwrap();

        controller.set_date(today).await.unwrap();
        let first: Vec<TaskRecord> = controller.cached_tasks().to_vec();
        assert_eq!(first.iter().map(|t| t.name()).collect::<Vec<_>>(), vec!["morning", "night"]);

        controller.reload().await.unwrap();
        assert_eq!(controller.cached_tasks(), &first[..]);
    }

    #[tokio::test]
    async fn created_tasks_on_other_days_are_not_cached() {
        let (mut controller, _) = controller_on(day(2025, 7, 10));
        controller.create_task(TaskFields::new("later", day(2025, 7, 20))).await.unwrap();
        assert!(controller.cached_tasks().is_empty());
        assert_eq!(controller.store().committed_tasks().len(), 1);
    }

    #[tokio::test]
    async fn shift_date_moves_the_cursor() {
        let (mut controller, _) = controller_on(day(2025, 7, 10));
        controller.create_task(TaskFields::new("monday", day(2025, 7, 7))).await.unwrap();

        controller.shift_date(1).await.unwrap();
        assert_eq!(controller.selected_date(), day(2025, 7, 11));
        controller.shift_date(-4).await.unwrap();
        assert_eq!(controller.selected_date(), day(2025, 7, 7));
        assert_eq!(controller.cached_tasks().len(), 1);
        controller.shift_date(0).await.unwrap();
        assert_eq!(controller.selected_date(), day(2025, 7, 7));
    }

    #[tokio::test]
    async fn shift_date_reports_overflows() {
        let clock = Arc::new(FixedClock::at_local(at(day(2025, 7, 10), 8, 0)));
        let mut controller = DayViewController::with_date(LocalStore::in_memory(), clock, NaiveDate::MAX);
        assert!(matches!(controller.shift_date(1).await, Err(Error::DateOutOfRange)));
        assert_eq!(controller.selected_date(), NaiveDate::MAX);
    }

    #[tokio::test]
    async fn filters_partition_the_cache() {
        let today = day(2025, 7, 10);
        let (mut controller, _) = controller_on(today);
        let a = controller.create_task(TaskFields::new("a", today)).await.unwrap();
        controller.create_task(TaskFields::new("b", today)).await.unwrap();
        let c = controller.create_task(TaskFields::new("c", today)).await.unwrap();
        controller.toggle_completion(&a).await.unwrap();
        controller.toggle_completion(&c).await.unwrap();

        controller.set_filter(TaskFilter::Active);
        let active = names(&controller.visible_tasks());
        controller.set_filter(TaskFilter::Completed);
        let completed = names(&controller.visible_tasks());
        controller.set_filter(TaskFilter::All);
        let all = names(&controller.visible_tasks());

        assert_eq!(active, vec!["b"]);
        assert_eq!(completed, vec!["a", "c"]);
        assert_eq!(all, vec!["a", "b", "c"]);
        assert_eq!(controller.cached_tasks().len(), 3);
    }

    #[tokio::test]
    async fn toggling_twice_clears_the_completion() {
        let today = day(2025, 7, 10);
        let (mut controller, clock) = controller_on(today);
        let id = controller.create_task(TaskFields::new("laundry", today)).await.unwrap();

        clock.advance(Duration::minutes(5));
        let completed_at = controller.toggle_completion(&id).await.unwrap();
        assert_eq!(completed_at, Some(clock.now()));
        assert_eq!(controller.task(&id).unwrap().completed_at(), Some(&clock.now()));

        controller.set_filter(TaskFilter::Active);
        assert!(controller.visible_tasks().is_empty());
        controller.set_filter(TaskFilter::Completed);
        assert_eq!(controller.visible_tasks().len(), 1);

        assert_eq!(controller.toggle_completion(&id).await.unwrap(), None);
        assert!(controller.task(&id).unwrap().completed_at().is_none());
        assert!(controller.store().committed_tasks()[0].completed_at().is_none());
    }

    #[tokio::test]
    async fn update_never_touches_completion_creation_or_icon() {
        let today = day(2025, 7, 10);
        let (mut controller, clock) = controller_on(today);
        let id = controller.create_task(TaskFields::new("draft", today)).await.unwrap();
        controller.toggle_completion(&id).await.unwrap();
        controller.set_icon(&id, Some("star.fill".to_string())).await.unwrap();
        let before = controller.task(&id).unwrap().clone();

        clock.advance(Duration::days(1));
        let fields = TaskFields::scheduled("final", at(today, 17, 30)).with_description("send it");
        controller.update_task(&id, fields.clone()).await.unwrap();

        let after = controller.task(&id).unwrap();
        assert_eq!(after.fields(), fields);
        assert_eq!(after.completed_at(), before.completed_at());
        assert_eq!(after.created_at(), before.created_at());
        assert_eq!(after.icon(), Some("star.fill"));
    }

    #[tokio::test]
    async fn updates_move_tasks_between_days() {
        let today = day(2025, 7, 10);
        let (mut controller, _) = controller_on(today);
        let id = controller.create_task(TaskFields::new("movable", today)).await.unwrap();
        let other = controller.create_task(TaskFields::new("elsewhere", day(2025, 7, 12))).await.unwrap();
        controller.set_date(today).await.unwrap();

        controller.update_task(&id, TaskFields::new("movable", day(2025, 7, 12))).await.unwrap();
        assert!(controller.cached_tasks().is_empty());

        controller.update_task(&other, TaskFields::new("elsewhere", today)).await.unwrap();
        assert_eq!(controller.cached_tasks().len(), 1);
        assert_eq!(controller.cached_tasks()[0].id(), &other);
    }

    #[tokio::test]
    async fn moving_a_task_away_needs_no_query() {
        let today = day(2025, 7, 10);
        let (store, mock) = failing_store(MockBehaviour::new());
        let clock = Arc::new(FixedClock::at_local(at(today, 8, 0)));
        let mut controller = DayViewController::new(store, clock);
        let id = controller.create_task(TaskFields::new("movable", today)).await.unwrap();
        let mut receiver = controller.subscribe();

        *mock.lock().unwrap() = MockBehaviour { query_behaviour: (0, 1), ..MockBehaviour::default() };
        controller.update_task(&id, TaskFields::new("movable", day(2025, 7, 12))).await.unwrap();

        assert!(controller.cached_tasks().is_empty());
        assert_eq!(controller.store().committed_tasks()[0].due_day(), day(2025, 7, 12));
        assert_eq!(*receiver.borrow_and_update(), DayEvent::TaskUpdated(id));
    }

    #[tokio::test]
    async fn moving_a_task_in_survives_a_failed_reload() {
        let today = day(2025, 7, 10);
        let (store, mock) = failing_store(MockBehaviour::new());
        let clock = Arc::new(FixedClock::at_local(at(today, 8, 0)));
        let mut controller = DayViewController::new(store, clock);
        controller.create_task(TaskFields::new("already here", today)).await.unwrap();
        let id = controller.create_task(TaskFields::new("coming", day(2025, 7, 12))).await.unwrap();
        let mut receiver = controller.subscribe();

        *mock.lock().unwrap() = MockBehaviour { query_behaviour: (0, 1), ..MockBehaviour::default() };
        controller.update_task(&id, TaskFields::new("coming", today)).await.unwrap();

        let cached: Vec<&TaskId> = controller.cached_tasks().iter().map(|t| t.id()).collect();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[1], &id);
        assert_eq!(*receiver.borrow_and_update(), DayEvent::TaskUpdated(id.clone()));

        // Once the store answers again, the cache matches it
        let before = controller.cached_tasks().to_vec();
        controller.reload().await.unwrap();
        assert_eq!(controller.cached_tasks(), &before[..]);
    }

    #[tokio::test]
    async fn deleted_tasks_are_not_found_anymore() {
        let today = day(2025, 7, 10);
        let (mut controller, _) = controller_on(today);
        let id = controller.create_task(TaskFields::new("gone", today)).await.unwrap();

        controller.delete_task(&id).await.unwrap();
        assert!(controller.cached_tasks().is_empty());

        assert!(matches!(controller.delete_task(&id).await, Err(Error::NotFound(_))));
        assert!(matches!(controller.toggle_completion(&id).await, Err(Error::NotFound(_))));
        assert!(matches!(controller.set_icon(&id, None).await, Err(Error::NotFound(_))));
        assert!(matches!(controller.update_task(&id, TaskFields::new("back", today)).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn set_icon_can_restore_the_default() {
        let today = day(2025, 7, 10);
        let (mut controller, _) = controller_on(today);
        let id = controller.create_task(TaskFields::new("shopping", today)).await.unwrap();

        controller.set_icon(&id, Some("cart.fill".to_string())).await.unwrap();
        assert_eq!(controller.task(&id).unwrap().icon(), Some("cart.fill"));
        controller.set_icon(&id, None).await.unwrap();
        assert_eq!(controller.task(&id).unwrap().icon(), None);
    }

    #[tokio::test]
    async fn failed_delete_commit_keeps_the_task() {
        let today = day(2025, 7, 10);
        let (store, mock) = failing_store(MockBehaviour::new());
        let clock = Arc::new(FixedClock::at_local(at(today, 8, 0)));
        let mut controller = DayViewController::new(store, clock);
        let id = controller.create_task(TaskFields::new("precious", today)).await.unwrap();

        *mock.lock().unwrap() = MockBehaviour::fail_commits(1);
        let result = controller.delete_task(&id).await;

        assert!(matches!(result, Err(Error::PersistenceFailure(_))));
        assert!(controller.task(&id).is_some());
        assert!(!controller.store().has_pending_changes());
        assert_eq!(controller.store().committed_tasks().len(), 1);

        // The caller may simply try again
        controller.delete_task(&id).await.unwrap();
        assert!(controller.task(&id).is_none());
    }

    #[tokio::test]
    async fn failed_writes_leave_the_cache_untouched() {
        let today = day(2025, 7, 10);
        let (store, mock) = failing_store(MockBehaviour::new());
        let clock = Arc::new(FixedClock::at_local(at(today, 8, 0)));
        let mut controller = DayViewController::new(store, clock);
        let id = controller.create_task(TaskFields::new("stable", today)).await.unwrap();
        let snapshot = controller.cached_tasks().to_vec();

        *mock.lock().unwrap() = MockBehaviour::fail_commits(4);
        assert!(matches!(controller.create_task(TaskFields::new("new", today)).await, Err(Error::PersistenceFailure(_))));
        assert!(matches!(controller.update_task(&id, TaskFields::new("renamed", today)).await, Err(Error::PersistenceFailure(_))));
        assert!(matches!(controller.toggle_completion(&id).await, Err(Error::PersistenceFailure(_))));
        assert!(matches!(controller.set_icon(&id, Some("bolt.fill".to_string())).await, Err(Error::PersistenceFailure(_))));

        assert_eq!(controller.cached_tasks(), &snapshot[..]);
        assert!(!controller.store().has_pending_changes());
        controller.reload().await.unwrap();
        assert_eq!(controller.cached_tasks(), &snapshot[..]);
    }

    #[tokio::test]
    async fn failed_staging_is_a_persistence_failure() {
        let today = day(2025, 7, 10);
        let (store, _mock) = failing_store(MockBehaviour { insert_behaviour: (0, 1), ..MockBehaviour::default() });
        let clock = Arc::new(FixedClock::at_local(at(today, 8, 0)));
        let mut controller = DayViewController::new(store, clock);

        assert!(matches!(controller.create_task(TaskFields::new("nope", today)).await, Err(Error::PersistenceFailure(StoreError::Mocked(_)))));
        assert!(controller.cached_tasks().is_empty());
        assert!(controller.store().committed_tasks().is_empty());
    }

    #[tokio::test]
    async fn failed_queries_keep_the_previous_day() {
        let today = day(2025, 7, 10);
        let (store, mock) = failing_store(MockBehaviour::new());
        let clock = Arc::new(FixedClock::at_local(at(today, 8, 0)));
        let mut controller = DayViewController::new(store, clock);
        controller.create_task(TaskFields::new("today", today)).await.unwrap();

        *mock.lock().unwrap() = MockBehaviour { query_behaviour: (0, 1), ..MockBehaviour::default() };
        assert!(matches!(controller.shift_date(1).await, Err(Error::PersistenceFailure(_))));
        assert_eq!(controller.selected_date(), today);
        assert_eq!(controller.cached_tasks().len(), 1);
    }

    #[tokio::test]
    async fn listeners_are_notified_after_changes() {
        let today = day(2025, 7, 10);
        let (mut controller, _) = controller_on(today);
        let mut receiver = controller.subscribe();
        assert_eq!(*receiver.borrow(), DayEvent::Idle);

        let id = controller.create_task(TaskFields::new("watched", today)).await.unwrap();
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), DayEvent::TaskCreated(id.clone()));

        controller.delete_task(&id).await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), DayEvent::TaskDeleted(id));

        controller.set_date(day(2025, 7, 11)).await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), DayEvent::Reloaded{ date: day(2025, 7, 11), count: 0 });
    }

    #[tokio::test]
    async fn notifications_can_go_to_an_existing_channel() {
        let today = day(2025, 7, 10);
        let (mut controller, _) = controller_on(today);
        let (sender, mut receiver) = crate::feedback::feedback_channel();
        controller.set_feedback_sender(sender);

        let id = controller.create_task(TaskFields::new("forwarded", today)).await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), DayEvent::TaskCreated(id));
    }

    #[tokio::test]
    async fn failures_are_not_notified() {
        let today = day(2025, 7, 10);
        let (mut controller, _) = controller_on(today);
        let mut receiver = controller.subscribe();

        let ghost = TaskId::random();
        assert!(controller.toggle_completion(&ghost).await.is_err());
        assert!(!receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), DayEvent::Idle);
    }
}
