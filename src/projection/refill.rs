use chrono::{Days, NaiveDate};

/// Projects the refill date from the remaining pills.
///
/// Without a positive daily dosage nothing can be projected and `existing` is kept. A negative
/// pill count counts as none left.
pub fn predict_refill_date(
    pill_count: i64,
    daily_dosage: i64,
    today: NaiveDate,
    existing: NaiveDate,
) -> NaiveDate {
    if daily_dosage <= 0 {
        return existing;
    }
    let days_left = pill_count.max(0) / daily_dosage;
    today
        .checked_add_days(Days::new(days_left.unsigned_abs()))
        .unwrap_or(NaiveDate::MAX)
}
