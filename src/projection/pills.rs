use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use crate::{
    storage::entities::{Document, VyvanseLogEntry, VyvanseState, TAKE_REASON_PREFIX},
    utils::time::format_timestamp,
};

use super::refill::predict_refill_date;

pub const CONFIGURATION_REASON: &str = "configuration updated";

/// Fields to overwrite on the pill state. `None` leaves the current value alone.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PillConfiguration {
    pub pill_count: Option<i64>,
    pub daily_dosage: Option<i64>,
    pub refill_date: Option<NaiveDate>,
}

/// Every transition below projects the refill date again and leaves an entry in the audit log.
impl Document {
    /// A refill date given here only sticks when the dosage is 0, otherwise the projection
    /// replaces it.
    pub fn configure_pills(
        &mut self,
        configuration: PillConfiguration,
        now: NaiveDateTime,
    ) -> &VyvanseState {
        if let Some(pill_count) = configuration.pill_count {
            self.vyvanse.pill_count = pill_count;
        }
        if let Some(daily_dosage) = configuration.daily_dosage {
            self.vyvanse.daily_dosage = daily_dosage;
        }
        if let Some(refill_date) = configuration.refill_date {
            self.vyvanse.refill_date = refill_date;
        }
        self.record_pill_event(CONFIGURATION_REASON.into(), now)
    }

    /// The count is allowed to go negative.
    pub fn take_pills(&mut self, amount: i64, now: NaiveDateTime) -> &VyvanseState {
        self.vyvanse.pill_count -= amount;
        self.record_pill_event(format!("{TAKE_REASON_PREFIX} {amount}"), now)
    }

    pub fn refill_pills(&mut self, amount: i64, now: NaiveDateTime) -> &VyvanseState {
        self.vyvanse.pill_count += amount;
        self.record_pill_event(format!("refilled +{amount}"), now)
    }

    fn record_pill_event(&mut self, reason: String, now: NaiveDateTime) -> &VyvanseState {
        let state = &mut self.vyvanse;
        state.refill_date = predict_refill_date(
            state.pill_count,
            state.daily_dosage,
            now.date(),
            state.refill_date,
        );
        info!(
            "Pill event '{reason}', {} left, refill on {}",
            state.pill_count, state.refill_date
        );
        self.vyvanse_log.push(VyvanseLogEntry {
            change: state.daily_dosage,
            reason,
            timestamp: format_timestamp(now),
        });
        &self.vyvanse
    }
}
