pub mod focus;
pub mod intake;
pub mod mood;
pub mod render;
pub mod summary;
pub mod timer;
pub mod vyvanse;
pub mod water;

use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use focus::{process_focus_command, FocusCommand};
use intake::{process_hemp_command, process_substance_command, HempCommand, SubstanceCommand};
use mood::{process_mood_command, MoodCommand};
use summary::process_summary_command;
use tracing::{debug, level_filters::LevelFilter};
use vyvanse::{process_vyvanse_command, VyvanseCommand};
use water::{process_water_command, WaterCommand};

use crate::{
    notify::{ConsoleNotifier, NoopNotifier, WaterNotifier},
    storage::{
        document_storage::{DocumentStorage, FileStorage},
        repository::DocumentRepository,
    },
    utils::{
        clock::DefaultClock,
        dir::{create_application_default_path, resolve_data_path},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "chaoscatcher", version, long_about = None)]
#[command(about = "Self-care tracker for focus, mood, water, meds and other intake", long_about = None)]
#[command(arg_required_else_help = true)]
pub(crate) struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Path to the data file. Falls back to $CHAOSCATCHER_DATA, then $HOME/.chaoscatcher.json"
    )]
    data: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(long, global = true, help = "Print a notice when the daily water goal is reached")]
    notify: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Focus sessions and timer")]
    Focus {
        #[command(subcommand)]
        command: FocusCommand,
    },
    #[command(about = "Mood tracking")]
    Mood {
        #[command(subcommand)]
        command: MoodCommand,
    },
    #[command(about = "Water intake tracking")]
    Water {
        #[command(subcommand)]
        command: WaterCommand,
    },
    #[command(about = "Vyvanse pill tracking")]
    Vyvanse {
        #[command(subcommand)]
        command: VyvanseCommand,
    },
    #[command(about = "Hemp dose tracking")]
    Hemp {
        #[command(subcommand)]
        command: HempCommand,
    },
    #[command(about = "Log other substances")]
    Substance {
        #[command(subcommand)]
        command: SubstanceCommand,
    },
    #[command(about = "Show a summary across all trackers")]
    Summary,
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    start_logging(create_application_default_path(), logging_level, args.log);

    let data_path = resolve_data_path(args.data)?;
    debug!("Using data file {data_path:?}");
    let repository = DocumentRepository::new(FileStorage::new(data_path), Box::new(DefaultClock));

    let notifier: Box<dyn WaterNotifier> = if args.notify {
        Box::new(ConsoleNotifier)
    } else {
        Box::new(NoopNotifier)
    };

    execute(
        args.commands,
        &repository,
        notifier.as_ref(),
        &mut std::io::stdout(),
    )
    .await
}

/// Logging is best effort. Commands still run when the state directory can't be set up.
fn start_logging(
    application_path: Result<PathBuf>,
    log_level: Option<LevelFilter>,
    show_std: bool,
) -> bool {
    match application_path.and_then(|path| enable_logging(CLI_PREFIX, &path, log_level, show_std))
    {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Logging is disabled: {e:#}");
            false
        }
    }
}

async fn execute<S: DocumentStorage>(
    commands: Commands,
    repository: &DocumentRepository<S>,
    notifier: &dyn WaterNotifier,
    out: &mut impl Write,
) -> Result<()> {
    match commands {
        Commands::Focus { command } => process_focus_command(command, repository, out).await,
        Commands::Mood { command } => process_mood_command(command, repository, out).await,
        Commands::Water { command } => {
            process_water_command(command, repository, notifier, out).await
        }
        Commands::Vyvanse { command } => process_vyvanse_command(command, repository, out).await,
        Commands::Hemp { command } => process_hemp_command(command, repository, out).await,
        Commands::Substance { command } => {
            process_substance_command(command, repository, out).await
        }
        Commands::Summary => process_summary_command(repository, out).await,
    }
}
