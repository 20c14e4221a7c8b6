use std::io::Write;

use anyhow::Result;
use clap::Subcommand;

use crate::{
    analysis::{focus_total_minutes, recent},
    storage::{
        document_storage::DocumentStorage, entities::FocusSession,
        repository::DocumentRepository,
    },
    utils::{clock::entry_timestamp, time::format_timestamp},
};

use super::{render::print_boxed, timer::interruptible_countdown};

#[derive(Subcommand, Debug)]
pub enum FocusCommand {
    #[command(about = "Add a focus session")]
    Add {
        #[arg(help = "Task name")]
        task: String,
        #[arg(help = "Minutes spent")]
        minutes: u32,
        #[arg(
            long,
            help = "Start a countdown timer for given minutes. The time actually spent is logged instead of MINUTES"
        )]
        timer: Option<u32>,
    },
    #[command(about = "Show focus summary")]
    Summary {
        #[arg(long, help = "Limit to most recent N sessions")]
        limit: Option<usize>,
    },
}

pub async fn process_focus_command<S: DocumentStorage>(
    command: FocusCommand,
    repository: &DocumentRepository<S>,
    out: &mut impl Write,
) -> Result<()> {
    let mut document = repository.load().await?;
    match command {
        FocusCommand::Add {
            task,
            minutes,
            timer,
        } => {
            let minutes = match timer {
                Some(timer) => interruptible_countdown(timer, repository.clock(), out).await?,
                None => minutes,
            };
            document.focus_sessions.push(FocusSession {
                task: task.clone(),
                minutes: minutes.into(),
                timestamp: entry_timestamp(repository.clock()),
            });
            repository.save(&document).await?;
            writeln!(
                out,
                "Logged {minutes} minutes on '{task}'. Data saved to {}.",
                repository.location()
            )?;
        }
        FocusCommand::Summary { limit } => {
            let sessions = &document.focus_sessions;
            if sessions.is_empty() {
                writeln!(out, "No focus sessions yet. Add one with 'focus add'.")?;
                return Ok(());
            }
            print_boxed(
                out,
                &format!("Total focus minutes: {}", focus_total_minutes(sessions)),
            )?;
            for session in recent(sessions, limit) {
                writeln!(
                    out,
                    "{}: {} - {} minutes",
                    format_timestamp(session.timestamp),
                    session.task,
                    session.minutes
                )?;
            }
        }
    }
    Ok(())
}
