//! Sources of the current time
//!
//! Everything that depends on "now" (creation and completion timestamps, overdue checks, the initial
//! selected day) asks a [`Clock`], so that tests can pin time instead of reading the wall clock.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, Utc};

pub trait Clock: Send + Sync {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;

    /// The current local wall-clock time, which due dates are expressed in
    fn local_now(&self) -> NaiveDateTime {
        self.now().with_timezone(&Local).naive_local()
    }

    /// The current local day
    fn today(&self) -> NaiveDate {
        self.local_now().date()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> { (**self).now() }
    fn local_now(&self) -> NaiveDateTime { (**self).local_now() }
    fn today(&self) -> NaiveDate { (**self).today() }
}


/// The system clock, in the local timezone of this machine
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}


/// A clock that only moves when told to.
///
/// Its local time is its UTC time, so that tests do not depend on the timezone of the machine they run on.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// A clock stopped at the given local wall-clock time
    pub fn at_local(local: NaiveDateTime) -> Self {
        Self::new(DateTime::<Utc>::from_naive_utc_and_offset(local, Utc))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.lock();
        *now = *now + by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        // A poisoned clock still holds a valid instant
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }

    fn local_now(&self) -> NaiveDateTime {
        self.lock().naive_utc()
    }
}
