use std::{collections::HashMap, fmt::Display};

use chrono::{Days, NaiveDate};

use crate::storage::entities::WaterEntry;

/// How many ounces a single block of the history graph stands for.
pub const OUNCES_PER_BLOCK: i64 = 8;
pub const DEFAULT_HISTORY_DAYS: u32 = 7;

const BLOCK: &str = "█";
const EMPTY_DAY: &str = "·";

pub fn water_entries_for_day(
    entries: &[WaterEntry],
    date: NaiveDate,
) -> impl Iterator<Item = &WaterEntry> {
    entries.iter().filter(move |v| v.timestamp.date() == date)
}

pub fn water_total_for_day(entries: &[WaterEntry], date: NaiveDate) -> i64 {
    water_entries_for_day(entries, date).map(|v| v.amount).sum()
}

/// Removes every entry logged on `date`. Returns how many were removed.
pub fn reset_day(entries: &mut Vec<WaterEntry>, date: NaiveDate) -> usize {
    let before = entries.len();
    entries.retain(|v| v.timestamp.date() != date);
    before - entries.len()
}

/// Water drunk during a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total: i64,
    pub blocks: u32,
}

impl DayTotal {
    /// Abbreviated weekday, e.g. `Mon`.
    pub fn label(&self) -> String {
        self.date.format("%a").to_string()
    }

    pub fn bar(&self) -> String {
        if self.blocks == 0 {
            EMPTY_DAY.to_string()
        } else {
            BLOCK.repeat(self.blocks as usize)
        }
    }
}

impl Display for DayTotal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}  ({} oz)", self.label(), self.bar(), self.total)
    }
}

/// Totals for the `days` calendar days ending with `today`, oldest first.
pub fn water_last_n_days(entries: &[WaterEntry], today: NaiveDate, days: u32) -> Vec<DayTotal> {
    let mut totals = HashMap::<NaiveDate, i64>::new();
    for entry in entries {
        *totals.entry(entry.timestamp.date()).or_default() += entry.amount;
    }

    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset.into())))
        .map(|date| {
            let total = totals.get(&date).copied().unwrap_or(0);
            DayTotal {
                date,
                total,
                blocks: blocks_for(total),
            }
        })
        .collect()
}

/// Rounds half to even, so 4 oz is no block and 12 oz is two.
fn blocks_for(total: i64) -> u32 {
    let blocks = (total as f64 / OUNCES_PER_BLOCK as f64).round_ties_even();
    if blocks > 0. {
        blocks as u32
    } else {
        0
    }
}
