use std::io::Write;

use anyhow::Result;
use clap::Subcommand;

use crate::{
    analysis::recent,
    storage::{
        document_storage::DocumentStorage,
        entities::{HempEntry, SubstanceEntry},
        repository::DocumentRepository,
    },
    utils::clock::entry_timestamp,
};

use super::render::{describe_hemp, describe_substance, feeling_outcome, print_boxed};

pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Subcommand, Debug)]
pub enum HempCommand {
    #[command(about = "Log a hemp dose")]
    Log {
        #[arg(help = "Amount in mg")]
        amount: i64,
        #[arg(long, help = "How you feel")]
        feeling: Option<String>,
        #[arg(long, help = "Outcome or effect")]
        outcome: Option<String>,
    },
    #[command(about = "Show recent hemp entries")]
    Recent {
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT, help = "Number of entries to show")]
        limit: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum SubstanceCommand {
    #[command(about = "Log a substance")]
    Log {
        #[arg(help = "Substance name")]
        name: String,
        #[arg(help = "Amount, e.g. '2 cups' or '1 tab'")]
        amount: String,
        #[arg(long, help = "How you feel")]
        feeling: Option<String>,
        #[arg(long, help = "Outcome or effect")]
        outcome: Option<String>,
    },
    #[command(about = "Show recent substance entries")]
    Recent {
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT, help = "Number of entries to show")]
        limit: usize,
    },
}

pub async fn process_hemp_command<S: DocumentStorage>(
    command: HempCommand,
    repository: &DocumentRepository<S>,
    out: &mut impl Write,
) -> Result<()> {
    let mut document = repository.load().await?;
    match command {
        HempCommand::Log {
            amount,
            feeling,
            outcome,
        } => {
            let entry = HempEntry {
                amount_mg: amount,
                feeling: feeling.unwrap_or_default(),
                outcome: outcome.unwrap_or_default(),
                timestamp: entry_timestamp(repository.clock()),
            };
            let message = format!(
                "Hemp logged: {amount} mg{}",
                feeling_outcome(&entry.feeling, &entry.outcome)
            );
            document.hemp.push(entry);
            repository.save(&document).await?;
            writeln!(out, "{message}")?;
        }
        HempCommand::Recent { limit } => {
            if document.hemp.is_empty() {
                writeln!(out, "No hemp entries yet. Log one with 'hemp log'.")?;
                return Ok(());
            }
            print_boxed(out, "Recent hemp")?;
            for entry in recent(&document.hemp, Some(limit)) {
                writeln!(out, "{}", describe_hemp(entry))?;
            }
        }
    }
    Ok(())
}

pub async fn process_substance_command<S: DocumentStorage>(
    command: SubstanceCommand,
    repository: &DocumentRepository<S>,
    out: &mut impl Write,
) -> Result<()> {
    let mut document = repository.load().await?;
    match command {
        SubstanceCommand::Log {
            name,
            amount,
            feeling,
            outcome,
        } => {
            let message = format!("Logged {name} ({amount}).");
            document.substances.push(SubstanceEntry {
                name,
                amount,
                feeling: feeling.unwrap_or_default(),
                outcome: outcome.unwrap_or_default(),
                timestamp: entry_timestamp(repository.clock()),
            });
            repository.save(&document).await?;
            writeln!(out, "{message}")?;
        }
        SubstanceCommand::Recent { limit } => {
            if document.substances.is_empty() {
                writeln!(out, "No substance entries yet. Log one with 'substance log'.")?;
                return Ok(());
            }
            print_boxed(out, "Recent substances")?;
            for entry in recent(&document.substances, Some(limit)) {
                writeln!(out, "{}", describe_substance(entry))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::{
        cli::test_support::{run_command, run_with, stored_document, ReadOnlyStorage},
        notify::NoopNotifier,
        storage::document_storage::MemoryStorage,
    };

    #[tokio::test]
    async fn test_hemp_log_and_recent() -> Result<()> {
        let storage = MemoryStorage::new();

        let output = run_command(&storage, &["hemp", "log", "25"]).await?;
        assert_eq!(output, "Hemp logged: 25 mg\n");
        let output = run_command(
            &storage,
            &["hemp", "log", "10", "--feeling", "wired", "--outcome", "slept"],
        )
        .await?;
        assert_eq!(
            output,
            "Hemp logged: 10 mg | feeling: wired | outcome: slept\n"
        );

        let document = stored_document(&storage)?;
        assert_eq!(document.hemp[1].amount_mg, 10);
        assert_eq!(document.hemp[0].feeling, "");

        let output = run_command(&storage, &["hemp", "recent", "--limit", "1"]).await?;
        assert_eq!(
            output,
            "===========\n\
             Recent hemp\n\
             ===========\n\
             10 mg | feeling: wired | outcome: slept  (2025-03-15T12:30)\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_defaults_to_ten() -> Result<()> {
        let storage = MemoryStorage::new();
        for amount in 1..=12 {
            let amount = amount.to_string();
            run_command(&storage, &["hemp", "log", amount.as_str()]).await?;
        }

        let output = run_command(&storage, &["hemp", "recent"]).await?;
        let lines = output.lines().skip(3).collect::<Vec<_>>();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("3 mg"));
        assert!(lines[9].starts_with("12 mg"));
        Ok(())
    }

    #[tokio::test]
    async fn test_substance_log_and_recent() -> Result<()> {
        let storage = MemoryStorage::new();
        let output = run_command(&storage, &["substance", "recent"]).await?;
        assert_eq!(
            output,
            "No substance entries yet. Log one with 'substance log'.\n"
        );

        let output = run_command(
            &storage,
            &["substance", "log", "coffee", "2 cups", "--feeling", "sharp"],
        )
        .await?;
        assert_eq!(output, "Logged coffee (2 cups).\n");

        let output = run_command(&storage, &["substance", "recent"]).await?;
        assert!(output.ends_with("2025-03-15T12:30: coffee (2 cups) | feeling: sharp\n"));
        assert_eq!(stored_document(&storage)?.substances[0].amount, "2 cups");
        Ok(())
    }

    #[tokio::test]
    async fn test_nothing_printed_when_save_fails() {
        for args in [
            &["hemp", "log", "10", "--feeling", "calm"][..],
            &["substance", "log", "coffee", "1 cup"][..],
        ] {
            let (result, output) = run_with(ReadOnlyStorage, &NoopNotifier, args).await;
            assert!(result.is_err(), "{args:?}");
            assert_eq!(output, "", "{args:?}");
        }
    }
}
