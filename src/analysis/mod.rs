//! Summaries computed over the tracked logs. Everything here works on collections that are
//! already loaded and never touches storage.

pub mod mood;
pub mod progress;
pub mod water;

use crate::storage::entities::FocusSession;

/// Returns the last `limit` entries, oldest first. A missing or zero limit keeps everything.
pub fn recent<T>(entries: &[T], limit: Option<usize>) -> &[T] {
    match limit {
        Some(limit) if limit > 0 => &entries[entries.len().saturating_sub(limit)..],
        _ => entries,
    }
}

pub fn focus_total_minutes(sessions: &[FocusSession]) -> i64 {
    sessions.iter().map(|v| v.minutes).sum()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use crate::storage::entities::FocusSession;

    use super::{focus_total_minutes, recent};

    const TEST_DATE_TIME: NaiveDateTime = NaiveDateTime::new(
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        NaiveTime::MIN,
    );

    #[test]
    fn test_recent_keeps_order() {
        let values = [1, 2, 3, 4, 5];
        assert_eq!(recent(&values, Some(2)), &[4, 5]);
        assert_eq!(recent(&values, Some(10)), &values);
        assert_eq!(recent(&values, None), &values);
        assert_eq!(recent(&values, Some(0)), &values);
        assert!(recent::<i32>(&[], Some(3)).is_empty());
    }

    #[test]
    fn test_focus_total() {
        let sessions = [25, 50, 5].map(|minutes| FocusSession {
            task: "inbox".into(),
            minutes,
            timestamp: TEST_DATE_TIME,
        });
        assert_eq!(focus_total_minutes(&sessions), 80);
        assert_eq!(focus_total_minutes(&[]), 0);
    }
}
