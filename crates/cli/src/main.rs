#![warn(clippy::pedantic)]

mod entry;
mod log;
mod render;
mod settings;

use std::{fmt::Display, path::PathBuf, sync::Arc};

use ::log::{LevelFilter, debug, info};
use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rugbyprep_domain::{
    AnchorRepository, BlockID, BlockLog, CatalogService, ComposeOptions, CycleWeek, ExerciseID,
    Fatigue, Intent, LogID, LogService, Rer, Service, SessionLog, SessionType,
};
use rugbyprep_storage::{JsonAnchors, JsonStorage};

use crate::settings::{Settings, SettingsFile, SettingsRepository};

#[derive(Parser)]
#[command(
    name = "rugbyprep",
    version,
    about = "Rugby strength and conditioning program builder",
    long_about = "Compose weekly training sessions from a block catalog, suggest the next load of each exercise and track progress over the cycle"
)]
struct Args {
    /// Directory holding settings, catalog, profile and logs
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Compose without remembering block choices across weeks
    #[arg(long)]
    no_anchors: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the sessions of a week with suggestions for every exercise
    Program {
        /// Cycle week (W1 to W8 or DELOAD), defaults to the current week
        #[arg(long)]
        week: Option<CycleWeek>,

        /// Week whose selection a deload week reuses
        #[arg(long)]
        last_non_deload: Option<CycleWeek>,

        /// Intents to place first when a step falls back (e.g. contrast)
        #[arg(long = "priority", value_delimiter = ',')]
        priority_intents: Vec<Intent>,

        /// OK or FATIGUE, defaults to the last check-in
        #[arg(long)]
        fatigue: Option<Fatigue>,
    },
    /// Suggest the next performance of an exercise
    Suggest {
        exercise: String,

        #[arg(long)]
        week: Option<CycleWeek>,

        #[arg(long)]
        fatigue: Option<Fatigue>,

        /// Target effort reserve (0 to 4)
        #[arg(long)]
        rer: Option<u8>,
    },
    /// Show the personal best and the W1 to W4 change of an exercise
    Progress { exercise: String },
    /// Show how much of each session of a week has been logged
    Recap {
        #[arg(long)]
        week: Option<CycleWeek>,
    },
    /// Check whether a deload week is due
    DeloadCheck {
        #[arg(long)]
        week: Option<CycleWeek>,
    },
    /// Record a performed block or a session check-in
    #[command(subcommand)]
    Log(LogCommand),
    /// Move the current week forward
    NextWeek,
    /// Show stored log messages, newest first
    Messages,
}

#[derive(Subcommand)]
enum LogCommand {
    /// Record the exercises of a performed block
    Block {
        block_id: String,

        /// UPPER, LOWER or FULL
        #[arg(long = "type")]
        session_type: SessionType,

        /// Performed exercise, e.g. bench_press=60x5, plyo_push_up=8 or plank=30s
        #[arg(long = "entry", required = true)]
        entries: Vec<String>,

        #[arg(long)]
        week: Option<CycleWeek>,

        /// Date of the session (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Record how the athlete felt after a session
    Session {
        #[arg(long = "type")]
        session_type: SessionType,

        #[arg(long)]
        fatigue: Fatigue,

        #[arg(long, default_value = "")]
        notes: String,

        #[arg(long)]
        week: Option<CycleWeek>,

        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings_file = SettingsFile::new(&args.data_dir);
    let settings = settings_file
        .read_settings()
        .context("failed to read settings")?;

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        settings.log_level()?
    };
    let log: Arc<dyn log::Repository> = match &settings.log_file {
        Some(file) => Arc::new(log::FileLog::new(args.data_dir.join(file))),
        None => Arc::new(log::MemoryLog::default()),
    };
    log::init(log.clone(), level).context("failed to initialize logging")?;
    if !settings_file.exists() {
        debug!("no settings in {}, using defaults", args.data_dir.display());
    }

    let storage = JsonStorage::new(&args.data_dir, settings.files());
    if args.no_anchors || !settings.anchors {
        debug!("anchoring disabled");
        let service = Service::new(storage, rugbyprep_domain::NoAnchors);
        run(args, settings, &settings_file, &service, log.as_ref())
    } else {
        let anchors = JsonAnchors::new(args.data_dir.join(&settings.anchors_file));
        let service = Service::new(storage, anchors);
        run(args, settings, &settings_file, &service, log.as_ref())
    }
}

fn run<A: AnchorRepository>(
    args: Args,
    mut settings: Settings,
    settings_file: &SettingsFile,
    service: &Service<JsonStorage, A>,
    log: &dyn log::Repository,
) -> Result<()> {
    let current_week = settings.current_week()?;

    match args.command {
        Command::Program {
            week,
            last_non_deload,
            priority_intents,
            fatigue,
        } => {
            let week = week.unwrap_or(current_week);
            let last_non_deload = match last_non_deload {
                Some(last) => Some(last),
                None => settings.last_non_deload_week()?,
            };
            let fatigue = fatigue.map_or_else(|| settings.fatigue(), Ok)?;
            let options = ComposeOptions {
                priority_intents,
                ..ComposeOptions::default()
            };
            let program = failed(
                "build program",
                service.week_program(week, last_non_deload, &options),
            )?;
            let suggestions = program
                .sessions
                .iter()
                .map(|session| service.session_suggestions(session, fatigue))
                .collect::<Result<Vec<_>, _>>();
            let suggestions = failed("suggest", suggestions)?;
            print!("{}", render::program(&program, &suggestions));
        }
        Command::Suggest {
            exercise,
            week,
            fatigue,
            rer,
        } => {
            let exercise_id = ExerciseID::new(&exercise)?;
            let fatigue = fatigue.map_or_else(|| settings.fatigue(), Ok)?;
            let rer = rer.map(Rer::new).transpose()?;
            let suggestion = failed(
                "suggest",
                service.suggestion(
                    &exercise_id,
                    week.unwrap_or(current_week),
                    fatigue,
                    rer,
                    None,
                ),
            )?;
            print!("{}", render::suggestion(&exercise_id, &suggestion));
        }
        Command::Progress { exercise } => {
            let exercise_id = ExerciseID::new(&exercise)?;
            let progress = failed("compute progress", service.exercise_progress(&exercise_id))?;
            print!("{}", render::progress(&progress));
        }
        Command::Recap { week } => {
            let week = week.unwrap_or(current_week);
            let program = failed(
                "build program",
                service.week_program(
                    week,
                    settings.last_non_deload_week()?,
                    &ComposeOptions::default(),
                ),
            )?;
            for session in &program.sessions {
                let recap = failed("recap session", service.session_recap(session, week))?;
                print!("{}", render::recap(session, &recap));
            }
        }
        Command::DeloadCheck { week } => {
            let recommendation = failed(
                "check deload",
                service.deload_recommendation(week.unwrap_or(current_week)),
            )?;
            print!("{}", render::deload(&recommendation));
        }
        Command::Log(LogCommand::Block {
            block_id,
            session_type,
            entries,
            week,
            date,
        }) => {
            let block_id = BlockID::new(&block_id)?;
            let blocks = failed("read catalog", service.get_blocks())?;
            let block = blocks
                .iter()
                .find(|b| b.id == block_id)
                .ok_or_else(|| anyhow!("unknown block {block_id}"))?;
            let entries = entries
                .iter()
                .map(|e| entry::parse_entry(e))
                .collect::<Result<Vec<_>, _>>()?;
            let log = failed(
                "log block",
                service.add_block_log(BlockLog {
                    id: LogID::nil(),
                    date: date.unwrap_or_else(today),
                    week: week.unwrap_or(current_week),
                    session_type,
                    block_id: block.id.clone(),
                    block_name: block.name.to_string(),
                    entries,
                }),
            )?;
            info!("logged {} entries of {}", log.entries.len(), log.block_id);
            println!("Logged {} ({} exercises)", log.block_name, log.entries.len());
        }
        Command::Log(LogCommand::Session {
            session_type,
            fatigue,
            notes,
            week,
            date,
        }) => {
            failed(
                "log session",
                service.add_session_log(SessionLog {
                    id: LogID::nil(),
                    date: date.unwrap_or_else(today),
                    week: week.unwrap_or(current_week),
                    session_type,
                    fatigue,
                    notes,
                }),
            )?;
            settings.fatigue = fatigue.to_string();
            settings_file
                .write_settings(&settings)
                .context("failed to write settings")?;
            println!("Logged {session_type} session ({fatigue})");
        }
        Command::NextWeek => {
            let recommendation = failed(
                "check deload",
                service.deload_recommendation(current_week),
            )?;
            let next = settings.advance_week()?;
            settings_file
                .write_settings(&settings)
                .context("failed to write settings")?;
            info!("advanced from {current_week} to {next}");
            println!("Week {next}");
            if recommendation.recommend {
                print!("{}", render::deload(&recommendation));
            }
        }
        Command::Messages => {
            let entries = log
                .read_entries()
                .map_err(|err| anyhow!("failed to read log messages: {err}"))?;
            for entry in entries {
                println!("{} {:<5} {}", entry.time, entry.level, entry.message);
            }
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Attach the failed action to a service error. Service errors may carry
/// errors that are not thread-safe, so they are converted into messages.
fn failed<T, E: Display>(action: &str, result: Result<T, E>) -> Result<T> {
    result.map_err(|err| anyhow!("failed to {action}: {err}"))
}
