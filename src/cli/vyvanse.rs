use std::{fmt::Display, io::Write};

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Subcommand, ValueEnum};

use crate::{
    projection::pills::PillConfiguration,
    storage::{document_storage::DocumentStorage, repository::DocumentRepository},
    utils::clock::entry_timestamp,
};

use super::{render::print_vyvanse_status, Args};

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum VyvanseCommand {
    #[command(about = "Configure pill count, dosage and refill date")]
    Configure {
        #[arg(long, help = "Pills currently on hand")]
        pill_count: Option<i64>,
        #[arg(long, help = "Pills taken per day")]
        daily_dosage: Option<i64>,
        #[arg(
            long,
            help = "Refill date, either YYYY-MM-DD or something like \"next friday\". Only kept when the daily dosage is 0"
        )]
        refill_date: Option<String>,
        #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
        date_style: DateStyle,
    },
    #[command(about = "Log taking pills")]
    Take {
        #[arg(help = "Number of pills taken")]
        amount: i64,
    },
    #[command(about = "Log a refill")]
    Refill {
        #[arg(help = "Number of pills added")]
        amount: i64,
    },
    #[command(about = "Show current pill status")]
    Status,
}

pub async fn process_vyvanse_command<S: DocumentStorage>(
    command: VyvanseCommand,
    repository: &DocumentRepository<S>,
    out: &mut impl Write,
) -> Result<()> {
    let mut document = repository.load().await?;
    let now = entry_timestamp(repository.clock());
    let state = match command {
        VyvanseCommand::Configure {
            pill_count,
            daily_dosage,
            refill_date,
            date_style,
        } => {
            let refill_date = refill_date
                .map(|v| parse_refill_date(&v, now, date_style))
                .transpose()?;
            document.configure_pills(
                PillConfiguration {
                    pill_count,
                    daily_dosage,
                    refill_date,
                },
                now,
            );
            repository.save(&document).await?;
            &document.vyvanse
        }
        VyvanseCommand::Take { amount } => {
            document.take_pills(amount, now);
            repository.save(&document).await?;
            &document.vyvanse
        }
        VyvanseCommand::Refill { amount } => {
            document.refill_pills(amount, now);
            repository.save(&document).await?;
            &document.vyvanse
        }
        VyvanseCommand::Status => &document.vyvanse,
    };
    print_vyvanse_status(out, state)
}

/// Accepts an ISO date first and falls back to natural language relative to `now`.
fn parse_refill_date(value: &str, now: NaiveDateTime, date_style: DateStyle) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    match parse_date_string(value, now.and_utc(), date_style.into()) {
        Ok(v) => Ok(v.date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate refill date {e}"),
            )
            .into()),
    }
}
