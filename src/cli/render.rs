use std::io::Write;

use ansi_term::Colour::Red;
use anyhow::Result;

use crate::{
    storage::entities::{HempEntry, MoodEntry, SubstanceEntry, VyvanseState},
    utils::time::format_timestamp,
};

pub fn print_boxed(out: &mut impl Write, text: &str) -> Result<()> {
    let border = "=".repeat(text.chars().count());
    writeln!(out, "{border}")?;
    writeln!(out, "{text}")?;
    writeln!(out, "{border}")?;
    Ok(())
}

pub fn print_vyvanse_status(out: &mut impl Write, state: &VyvanseState) -> Result<()> {
    let warning = if state.needs_refill() {
        format!(" {}", Red.paint("⚠️ Refill needed!"))
    } else {
        String::new()
    };
    print_boxed(out, "Vyvanse status")?;
    writeln!(out, "Pills remaining: {}", state.pill_count)?;
    writeln!(out, "Daily dosage: {}", state.daily_dosage)?;
    writeln!(out, "Projected refill date: {}{warning}", state.refill_date)?;
    Ok(())
}

/// Optional `| feeling: x | outcome: y` suffix, empty parts are skipped.
pub fn feeling_outcome(feeling: &str, outcome: &str) -> String {
    let mut suffix = String::new();
    if !feeling.is_empty() {
        suffix.push_str(&format!(" | feeling: {feeling}"));
    }
    if !outcome.is_empty() {
        suffix.push_str(&format!(" | outcome: {outcome}"));
    }
    suffix
}

/// `7/10 - slept well`, or just `7/10` without a note.
pub fn describe_mood(entry: &MoodEntry) -> String {
    if entry.note.is_empty() {
        format!("{}/10", entry.rating)
    } else {
        format!("{}/10 - {}", entry.rating, entry.note)
    }
}

pub fn describe_hemp(entry: &HempEntry) -> String {
    format!(
        "{} mg{}  ({})",
        entry.amount_mg,
        feeling_outcome(&entry.feeling, &entry.outcome),
        format_timestamp(entry.timestamp)
    )
}

pub fn describe_substance(entry: &SubstanceEntry) -> String {
    format!(
        "{}: {} ({}){}",
        format_timestamp(entry.timestamp),
        entry.name,
        entry.amount,
        feeling_outcome(&entry.feeling, &entry.outcome)
    )
}
