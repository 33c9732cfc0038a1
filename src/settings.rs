//! Support for library configuration options

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The symbol displayed for tasks that have no icon.
/// Feel free to override it when initing this library.
pub static DEFAULT_ICON: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("circle.fill".to_string())));

/// The symbol an icon picker pre-selects when the task has no icon yet.
pub static PICKER_FALLBACK_ICON: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("paperclip".to_string())));

/// `strftime`-like format used to display the time of a scheduled task (e.g. `06:15 PM`).
/// Feel free to override it when initing this library.
pub static TIME_ONLY_FORMAT: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("%I:%M %p".to_string())));

/// Where the command-line tool stores its tasks, unless told otherwise
pub static DEFAULT_STORE_PATH: Lazy<Arc<Mutex<PathBuf>>> = Lazy::new(|| Arc::new(Mutex::new(PathBuf::from("daylist.json"))));

/// Environment variable that overrides [`DEFAULT_STORE_PATH`]
pub const STORE_PATH_ENV_VAR: &str = "DAYLIST_STORE";

/// The symbols an icon picker offers
pub const ICON_CATALOGUE: [&str; 20] = [
    "paperclip", "flag.fill", "star.fill", "heart.fill",
    "bookmark.fill", "bell.fill", "tag.fill", "bolt.fill",
    "hourglass", "lightbulb.fill", "pencil.circle", "trash.fill",
    "folder.fill", "tray.fill", "calendar", "alarm.fill",
    "cart.fill", "gift.fill", "creditcard.fill", "house.fill",
];

/// The current value of [`DEFAULT_STORE_PATH`]
pub fn default_store_path() -> PathBuf {
    read(&DEFAULT_STORE_PATH)
}

/// Whether this symbol is one an icon picker offers
pub fn is_catalogued_icon(icon: &str) -> bool {
    ICON_CATALOGUE.contains(&icon)
}

/// Read a setting, even if another thread panicked while holding it
pub(crate) fn read<T: Clone>(setting: &Lazy<Arc<Mutex<T>>>) -> T {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
