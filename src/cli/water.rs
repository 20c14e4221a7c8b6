use std::io::Write;

use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use crate::{
    analysis::{
        progress::{progress_bar, DEFAULT_BAR_WIDTH},
        water::{
            reset_day, water_entries_for_day, water_last_n_days, water_total_for_day,
            DEFAULT_HISTORY_DAYS,
        },
    },
    notify::WaterNotifier,
    storage::{
        document_storage::DocumentStorage, entities::WaterEntry, repository::DocumentRepository,
    },
    utils::{clock::entry_timestamp, time::format_timestamp},
};

use super::render::print_boxed;

#[derive(Subcommand, Debug)]
pub enum WaterCommand {
    #[command(about = "Log water intake")]
    Log {
        #[arg(help = "Amount in ounces")]
        amount: i64,
    },
    #[command(about = "Show today's water total")]
    Today,
    #[command(about = "Set the daily water goal")]
    Goal {
        #[arg(help = "Goal in ounces")]
        amount: i64,
    },
    #[command(about = "Show progress towards today's goal")]
    Status,
    #[command(about = "Show water intake for the last 7 days")]
    Graph,
    #[command(about = "Remove every water entry logged today")]
    Reset,
}

pub async fn process_water_command<S: DocumentStorage>(
    command: WaterCommand,
    repository: &DocumentRepository<S>,
    notifier: &dyn WaterNotifier,
    out: &mut impl Write,
) -> Result<()> {
    let mut document = repository.load().await?;
    let today = repository.clock().now().date();
    match command {
        WaterCommand::Log { amount } => {
            document.water.push(WaterEntry {
                amount,
                timestamp: entry_timestamp(repository.clock()),
            });
            repository.save(&document).await?;
            writeln!(out, "Logged {amount} oz of water.")?;
            notifier.water_logged(
                amount,
                water_total_for_day(&document.water, today),
                document.water_goal,
                out,
            )?;
        }
        WaterCommand::Today => {
            let total = water_total_for_day(&document.water, today);
            print_boxed(out, &format!("Today's water: {total} oz"))?;
            for entry in water_entries_for_day(&document.water, today) {
                writeln!(
                    out,
                    "{}: {} oz",
                    format_timestamp(entry.timestamp),
                    entry.amount
                )?;
            }
        }
        WaterCommand::Goal { amount } => {
            document.water_goal = amount;
            repository.save(&document).await?;
            writeln!(out, "Water goal set to {amount} oz per day.")?;
        }
        WaterCommand::Status => {
            let goal = document.water_goal;
            let bar = progress_bar(
                water_total_for_day(&document.water, today),
                goal,
                DEFAULT_BAR_WIDTH,
            );
            print_boxed(out, "Water status")?;
            writeln!(out, "Goal:  {goal} oz")?;
            writeln!(out, "{bar}")?;
        }
        WaterCommand::Graph => {
            if document.water.is_empty() {
                writeln!(out, "No water entries yet. Log some with 'water log'.")?;
                return Ok(());
            }
            print_boxed(
                out,
                &format!(
                    "Hydration – last {DEFAULT_HISTORY_DAYS} days (goal: {} oz)",
                    document.water_goal
                ),
            )?;
            for day in water_last_n_days(&document.water, today, DEFAULT_HISTORY_DAYS) {
                writeln!(out, "{day}")?;
            }
        }
        WaterCommand::Reset => {
            let removed = reset_day(&mut document.water, today);
            info!("Removed {removed} water entries for {today}");
            repository.save(&document).await?;
            writeln!(out, "Today's water log has been reset to 0 oz.")?;
        }
    }
    Ok(())
}
