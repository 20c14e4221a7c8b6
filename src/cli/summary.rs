use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::{
    analysis::{
        progress::{progress_bar, DEFAULT_BAR_WIDTH},
        recent,
        water::water_total_for_day,
    },
    projection::dose::{dose_phase, last_take},
    storage::{document_storage::DocumentStorage, repository::DocumentRepository},
    utils::time::format_timestamp,
};

use super::render::{describe_hemp, describe_mood, describe_substance, print_boxed};

const SUMMARY_SUBSTANCES: usize = 5;

/// Prints one section per tracker. Nothing is written back.
pub async fn process_summary_command<S: DocumentStorage>(
    repository: &DocumentRepository<S>,
    out: &mut impl Write,
) -> Result<()> {
    let document = repository.load().await?;
    let now = repository.clock().now();

    print_boxed(out, "ChaosCatcher Summary")?;
    writeln!(out, "Now: {}", format_timestamp(now))?;

    writeln!(out, "\n[VYVANSE]")?;
    let state = &document.vyvanse;
    writeln!(out, "Pills remaining: {}", state.pill_count)?;
    writeln!(out, "Daily dosage:   {}", state.daily_dosage)?;
    writeln!(out, "Refill date:    {}", state.refill_date)?;
    match last_take(&document.vyvanse_log) {
        Some(taken) => {
            let phase = dose_phase(taken, now);
            debug!("Last dose at {taken}, phase {}", phase.label());
            writeln!(out, "Last dose:       {}", format_timestamp(taken))?;
            writeln!(out, "Estimated phase: {phase}")?;
        }
        None => writeln!(out, "Last dose:       no 'take' logged in vyvanse_log yet.")?,
    }

    writeln!(out, "\n[WATER]")?;
    let total = water_total_for_day(&document.water, now.date());
    writeln!(out, "Goal:  {} oz", document.water_goal)?;
    writeln!(
        out,
        "{}",
        progress_bar(total, document.water_goal, DEFAULT_BAR_WIDTH)
    )?;

    writeln!(out, "\n[MOOD]")?;
    match document.moods.last() {
        Some(mood) => {
            writeln!(out, "Last mood: {}", describe_mood(mood))?;
            writeln!(out, "Logged at: {}", format_timestamp(mood.timestamp))?;
        }
        None => writeln!(out, "No mood entries yet. Log one with 'mood log'.")?,
    }

    writeln!(out, "\n[HEMP]")?;
    match document.hemp.last() {
        Some(entry) => writeln!(out, "Last entry: {}", describe_hemp(entry))?,
        None => writeln!(out, "No hemp entries yet.")?,
    }

    writeln!(out, "\n[SUBSTANCES]")?;
    if document.substances.is_empty() {
        writeln!(out, "No substance entries yet.")?;
    }
    for entry in recent(&document.substances, Some(SUMMARY_SUBSTANCES)) {
        writeln!(out, "{}", describe_substance(entry))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::{cli::test_support::run_command, storage::document_storage::MemoryStorage};

    #[tokio::test]
    async fn test_empty_summary() -> Result<()> {
        let storage = MemoryStorage::new();
        let output = run_command(&storage, &["summary"]).await?;
        assert_eq!(
            output,
            "====================\n\
             ChaosCatcher Summary\n\
             ====================\n\
             Now: 2025-03-15T12:30\n\
             \n\
             [VYVANSE]\n\
             Pills remaining: 0\n\
             Daily dosage:   1\n\
             Refill date:    2025-03-15\n\
             Last dose:       no 'take' logged in vyvanse_log yet.\n\
             \n\
             [WATER]\n\
             Goal:  64 oz\n\
             [░░░░░░░░░░░░░░░░░░░░] 0/64 oz\n\
             \n\
             [MOOD]\n\
             No mood entries yet. Log one with 'mood log'.\n\
             \n\
             [HEMP]\n\
             No hemp entries yet.\n\
             \n\
             [SUBSTANCES]\n\
             No substance entries yet.\n"
        );
        assert_eq!(storage.contents(), None);
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_after_logging() -> Result<()> {
        let storage = MemoryStorage::new();
        run_command(&storage, &["vyvanse", "configure", "--pill-count", "10"]).await?;
        run_command(&storage, &["vyvanse", "take", "1"]).await?;
        run_command(&storage, &["water", "log", "32"]).await?;
        run_command(&storage, &["mood", "log", "7", "--note", "calm"]).await?;
        run_command(&storage, &["hemp", "log", "15", "--outcome", "slept"]).await?;
        for name in ["coffee", "tea", "matcha", "cola", "cocoa", "mate"] {
            run_command(&storage, &["substance", "log", name, "1 cup"]).await?;
        }

        let output = run_command(&storage, &["summary"]).await?;
        assert!(output.contains("Pills remaining: 9\n"));
        assert!(output.contains("Last dose:       2025-03-15T12:30\n"));
        assert!(output.contains("Estimated phase: onset (0–30 min)\n"));
        assert!(output.contains("[██████████░░░░░░░░░░] 32/64 oz\n"));
        assert!(output.contains("Last mood: 7/10 - calm\nLogged at: 2025-03-15T12:30\n"));
        assert!(output.contains("Last entry: 15 mg | outcome: slept  (2025-03-15T12:30)\n"));

        let substances = output
            .split("[SUBSTANCES]\n")
            .nth(1)
            .unwrap()
            .lines()
            .collect::<Vec<_>>();
        assert_eq!(substances.len(), 5);
        assert_eq!(substances[0], "2025-03-15T12:30: tea (1 cup)");
        assert_eq!(substances[4], "2025-03-15T12:30: mate (1 cup)");
        Ok(())
    }
}
