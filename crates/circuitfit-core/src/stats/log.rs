//! Completed-workout log.
//!
//! One calendar date per finished session, stored per user under
//! `workouts:<userId>` as a JSON array of `YYYY-MM-DD` strings.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

fn log_key(user_id: &str) -> String {
    format!("workouts:{user_id}")
}

/// Append-only list of completion dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutLog {
    dates: Vec<NaiveDate>,
}

impl WorkoutLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn append(&mut self, date: NaiveDate) {
        self.dates.push(date);
    }

    pub fn total_count(&self) -> u32 {
        self.dates.len() as u32
    }

    /// Dates whose UTC midnight falls strictly after `now - 7 days`.
    pub fn weekly_count(&self, now: DateTime<Utc>) -> u32 {
        let cutoff = now - Duration::days(7);
        self.dates
            .iter()
            .filter(|d| d.and_hms_opt(0, 0, 0).is_some_and(|dt| dt.and_utc() > cutoff))
            .count() as u32
    }
}

impl From<Vec<NaiveDate>> for WorkoutLog {
    fn from(dates: Vec<NaiveDate>) -> Self {
        Self { dates }
    }
}

/// Per-user log persistence with the same fail-soft rules as routines.
pub struct WorkoutLogStore<'a, K: KeyValueStore + ?Sized> {
    kv: &'a K,
}

impl<'a, K: KeyValueStore + ?Sized> WorkoutLogStore<'a, K> {
    pub fn new(kv: &'a K) -> Self {
        Self { kv }
    }

    /// Absent, malformed or unreadable data loads as an empty log.
    pub fn load(&self, user_id: &str) -> WorkoutLog {
        let key = log_key(user_id);
        let raw = match self.kv.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return WorkoutLog::new(),
            Err(e) => {
                tracing::warn!(%key, "could not read workout log: {e}");
                return WorkoutLog::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(%key, "ignoring malformed workout log: {e}");
            WorkoutLog::new()
        })
    }

    /// Append `date` and persist. Write faults are logged and dropped; the
    /// returned log always contains the new entry.
    pub fn append(&self, user_id: &str, date: NaiveDate) -> WorkoutLog {
        let key = log_key(user_id);
        let mut log = self.load(user_id);
        log.append(date);
        match serde_json::to_string(&log) {
            Ok(json) => {
                if let Err(e) = self.kv.set(&key, &json) {
                    tracing::warn!(%key, "workout log not saved: {e}");
                }
            }
            Err(e) => tracing::warn!(%key, "could not serialize workout log: {e}"),
        }
        tracing::info!(user_id, %date, total = log.total_count(), "workout logged");
        log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn weekly_window_is_strict() {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 10, 0, 0).unwrap();
        let log = WorkoutLog::from(vec![
            date("2024-05-15"),
            date("2024-05-09"),
            date("2024-05-08"), // midnight is 7 days + 10h ago
            date("2024-04-01"),
        ]);
        assert_eq!(log.weekly_count(now), 2);
        assert_eq!(log.total_count(), 4);
    }

    #[test]
    fn exactly_seven_days_is_excluded() {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap();
        let log = WorkoutLog::from(vec![date("2024-05-08"), date("2024-05-09")]);
        assert_eq!(log.weekly_count(now), 1);
    }

    #[test]
    fn serializes_as_date_strings() {
        let log = WorkoutLog::from(vec![date("2024-01-02")]);
        assert_eq!(serde_json::to_string(&log).unwrap(), r#"["2024-01-02"]"#);
    }

    #[test]
    fn store_appends_per_user() {
        let kv = MemoryStore::new();
        let store = WorkoutLogStore::new(&kv);
        store.append("a", date("2024-01-01"));
        store.append("a", date("2024-01-02"));
        store.append("b", date("2024-01-03"));
        assert_eq!(store.load("a").total_count(), 2);
        assert_eq!(store.load("b").dates(), &[date("2024-01-03")]);
        assert_eq!(
            kv.get("workouts:a").unwrap().as_deref(),
            Some(r#"["2024-01-01","2024-01-02"]"#)
        );
    }

    #[test]
    fn malformed_log_loads_empty() {
        let kv = MemoryStore::new();
        kv.set("workouts:a", "{not json").unwrap();
        let store = WorkoutLogStore::new(&kv);
        assert_eq!(store.load("a"), WorkoutLog::new());
        let log = store.append("a", date("2024-01-01"));
        assert_eq!(log.total_count(), 1);
    }

    #[test]
    fn faults_are_swallowed() {
        let kv = MemoryStore::unavailable();
        let store = WorkoutLogStore::new(&kv);
        assert_eq!(store.load("a").total_count(), 0);
        let log = store.append("a", date("2024-01-01"));
        assert_eq!(log.total_count(), 1);
    }
}
