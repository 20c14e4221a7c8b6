use std::io::Write;

use anyhow::Result;
use clap::Subcommand;

use crate::{
    analysis::{mood::mood_graph, recent},
    storage::{
        document_storage::DocumentStorage, entities::MoodEntry, repository::DocumentRepository,
    },
    utils::clock::entry_timestamp,
};

use super::render::{describe_mood, print_boxed};

#[derive(Subcommand, Debug)]
pub enum MoodCommand {
    #[command(about = "Log a mood entry")]
    Log {
        #[arg(
            value_parser = clap::value_parser!(u8).range(1..=10),
            help = "Mood rating 1-10"
        )]
        rating: u8,
        #[arg(long, help = "Optional mood note")]
        note: Option<String>,
    },
    #[command(about = "Show ASCII mood graph")]
    Graph {
        #[arg(long, help = "Limit to most recent N entries")]
        limit: Option<usize>,
    },
}

pub async fn process_mood_command<S: DocumentStorage>(
    command: MoodCommand,
    repository: &DocumentRepository<S>,
    out: &mut impl Write,
) -> Result<()> {
    let mut document = repository.load().await?;
    match command {
        MoodCommand::Log { rating, note } => {
            let entry = MoodEntry {
                rating,
                note: note.unwrap_or_default(),
                timestamp: entry_timestamp(repository.clock()),
            };
            let message = format!("Mood logged: {}.", describe_mood(&entry));
            document.moods.push(entry);
            repository.save(&document).await?;
            writeln!(out, "{message}")?;
        }
        MoodCommand::Graph { limit } => {
            if document.moods.is_empty() {
                writeln!(out, "No mood entries yet. Add one with 'mood log'.")?;
                return Ok(());
            }
            print_boxed(out, "Mood trend (latest last)")?;
            for point in mood_graph(recent(&document.moods, limit)) {
                writeln!(out, "{point}")?;
            }
        }
    }
    Ok(())
}
