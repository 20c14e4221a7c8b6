use std::fmt::Display;

use chrono::NaiveDateTime;

use crate::storage::entities::VyvanseLogEntry;

/// Where a dose is in its effect window, judged only by time since it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DosePhase {
    /// The dose is logged in the future.
    TimeAnomaly,
    Onset,
    PeakWindow,
    Plateau,
    Taper,
    Tail,
}

impl DosePhase {
    pub fn label(&self) -> &'static str {
        match self {
            DosePhase::TimeAnomaly => "time anomaly",
            DosePhase::Onset => "onset",
            DosePhase::PeakWindow => "peak window",
            DosePhase::Plateau => "plateau",
            DosePhase::Taper => "taper",
            DosePhase::Tail => "tail / mostly worn off",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DosePhase::TimeAnomaly => "time anomaly? (log in the future)",
            DosePhase::Onset => "onset (0–30 min)",
            DosePhase::PeakWindow => "peak window (~0.5–3 hr after dose)",
            DosePhase::Plateau => "plateau (3–6 hr after dose)",
            DosePhase::Taper => "taper (6–10 hr after dose)",
            DosePhase::Tail => "tail / mostly worn off (10+ hr)",
        }
    }
}

impl Display for DosePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Each phase starts exactly at its lower bound, e.g. 3 hours is already a plateau.
pub fn dose_phase(last_take: NaiveDateTime, now: NaiveDateTime) -> DosePhase {
    let hours = (now - last_take).num_milliseconds() as f64 / 3_600_000.;
    if hours < 0. {
        DosePhase::TimeAnomaly
    } else if hours < 0.5 {
        DosePhase::Onset
    } else if hours < 3. {
        DosePhase::PeakWindow
    } else if hours < 6. {
        DosePhase::Plateau
    } else if hours < 10. {
        DosePhase::Taper
    } else {
        DosePhase::Tail
    }
}

/// Time of the most recent dose. Only the newest take entry is considered, if its timestamp
/// can't be read there is no known last dose.
pub fn last_take(log: &[VyvanseLogEntry]) -> Option<NaiveDateTime> {
    log.iter()
        .rev()
        .find(|v| v.is_take())
        .and_then(|v| v.logged_at())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

    use crate::storage::entities::VyvanseLogEntry;

    use super::{dose_phase, last_take, DosePhase};

    const TAKEN: NaiveDateTime = NaiveDateTime::new(
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
    );

    fn phase_after(elapsed: Duration) -> DosePhase {
        dose_phase(TAKEN, TAKEN + elapsed)
    }

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(phase_after(Duration::minutes(-1)), DosePhase::TimeAnomaly);
        assert_eq!(phase_after(Duration::zero()), DosePhase::Onset);
        assert_eq!(phase_after(Duration::minutes(29)), DosePhase::Onset);
        assert_eq!(phase_after(Duration::minutes(30)), DosePhase::PeakWindow);
        assert_eq!(phase_after(Duration::minutes(179)), DosePhase::PeakWindow);
        assert_eq!(phase_after(Duration::hours(3)), DosePhase::Plateau);
        assert_eq!(phase_after(Duration::hours(6)), DosePhase::Taper);
        assert_eq!(phase_after(Duration::minutes(599)), DosePhase::Taper);
        assert_eq!(phase_after(Duration::hours(10)), DosePhase::Tail);
        assert_eq!(phase_after(Duration::days(2)), DosePhase::Tail);
    }

    #[test]
    fn test_phase_wording() {
        assert_eq!(DosePhase::Tail.label(), "tail / mostly worn off");
        assert_eq!(
            DosePhase::PeakWindow.to_string(),
            "peak window (~0.5–3 hr after dose)"
        );
    }

    fn log_entry(reason: &str, timestamp: &str) -> VyvanseLogEntry {
        VyvanseLogEntry {
            change: 1,
            reason: reason.into(),
            timestamp: timestamp.into(),
        }
    }

    #[test]
    fn test_last_take_picks_newest() {
        let log = [
            log_entry("took 1", "2025-03-14T07:00"),
            log_entry("took 1", "2025-03-15T07:30"),
            log_entry("refilled +30", "2025-03-15T12:00"),
            log_entry("configuration updated", "2025-03-15T12:05"),
        ];
        assert_eq!(last_take(&log), Some(TAKEN));
    }

    #[test]
    fn test_last_take_absent() {
        assert_eq!(last_take(&[]), None);
        let log = [
            log_entry("configuration updated", "2025-03-15T07:00"),
            log_entry("refilled +30", "2025-03-15T08:00"),
        ];
        assert_eq!(last_take(&log), None);
    }

    #[test]
    fn test_last_take_broken_timestamp() {
        let log = [
            log_entry("took 1", "2025-03-14T07:00"),
            log_entry("took 1", "garbled"),
        ];
        assert_eq!(last_take(&log), None);
    }
}
