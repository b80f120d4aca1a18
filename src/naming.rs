//! Roster file names

use crate::types::GroupKey;
use chrono::{NaiveDateTime, Timelike};
use std::collections::HashSet;

/// Keep only alphanumeric characters
pub fn compact_token(text: &str) -> String {
    text.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// `Mar 27`
pub fn date_label(start: &NaiveDateTime) -> String {
    start.format("%b %d").to_string()
}

/// `9AM`, `12PM`; minutes are dropped
pub fn time_label(start: &NaiveDateTime) -> String {
    let (is_pm, hour) = start.hour12();
    format!("{}{}", hour, if is_pm { "PM" } else { "AM" })
}

/// `<MonDD>_<Location>_<Category>_<Time>.xlsx`
pub fn file_name(key: &GroupKey) -> String {
    format!(
        "{}_{}_{}_{}.xlsx",
        date_label(&key.start),
        compact_token(&key.location),
        compact_token(&key.category),
        time_label(&key.start)
    )
}

/// Hands out unique names within one run.
///
/// Two classes can share a name when they differ only by minutes or by
/// punctuation in their location/category. The first keeps the plain
/// name, later ones get `_2`, `_3`, ...
#[derive(Debug, Default)]
pub struct FileNamer {
    used: HashSet<String>,
}

impl FileNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name_for(&mut self, key: &GroupKey) -> String {
        let base = file_name(key);
        if self.used.insert(base.clone()) {
            return base;
        }

        let stem = base.trim_end_matches(".xlsx");
        let mut n = 2;
        loop {
            let candidate = format!("{}_{}.xlsx", stem, n);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
