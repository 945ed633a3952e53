mod calendar;
mod config_cmd;
mod exercise;
mod progress;
mod session;
mod stats;
mod template;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::time::Duration;

use workout_log::api::{ApiClient, SessionRemote};
use workout_log::config::Config;
use workout_log::models::ExerciseType;
use workout_log::services::{NoticeLevel, SessionStore};
use workout_log::storage::LocalCache;

pub use calendar::CalendarCommand;
pub use exercise::{AddExerciseCommand, PayloadArgs};
pub use progress::ProgressCommand;
pub use session::LogSessionCommand;
pub use stats::StatsCommand;

#[derive(Parser)]
#[command(name = "workout-log")]
#[command(about = "Log exercise sessions and track progress", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use cached sessions only (skip loading from the server)
    #[arg(long, global = true)]
    offline: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "WORKOUT_LOG_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage exercise sessions
    #[command(subcommand)]
    Session(SessionSubcommands),

    /// Edit the exercises of a session
    #[command(subcommand)]
    Exercise(ExerciseSubcommands),

    /// Manage exercise templates
    #[command(subcommand)]
    Template(TemplateSubcommands),

    /// Chart one exercise over time
    Progress(ProgressCommand),

    /// Show weekly or monthly statistics
    Stats(StatsCommand),

    /// Show sessions on a month calendar
    Calendar(CalendarCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum SessionSubcommands {
    /// List sessions, newest first
    List {
        /// List planned sessions instead
        #[arg(short, long)]
        planned: bool,

        /// Number of sessions to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show session details
    Show {
        /// Session ID
        id: String,
    },

    /// Log a new session
    Log(LogSessionCommand),

    /// Delete a session
    Delete {
        /// Session ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Mark a planned session as done today
    Complete {
        /// Session ID
        id: String,
    },

    /// Rate a completed session
    Rate {
        /// Session ID
        id: String,

        /// Rating from 1 to 5
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,

        /// How the session felt
        #[arg(short, long)]
        feedback: Option<String>,
    },
}

#[derive(Subcommand)]
enum ExerciseSubcommands {
    /// Add an exercise to a session
    Add(AddExerciseCommand),

    /// Remove an exercise from a session
    Remove {
        /// Session ID
        session_id: String,

        /// Exercise ID
        exercise_id: String,
    },

    /// Append a default set or sprint to an exercise
    AddEntry {
        /// Session ID
        session_id: String,

        /// Exercise ID
        exercise_id: String,
    },

    /// Remove one set or sprint from an exercise
    RemoveEntry {
        /// Session ID
        session_id: String,

        /// Exercise ID
        exercise_id: String,

        /// Set or sprint ID
        entry_id: String,
    },

    /// Change an exercise's type, keeping whatever data still applies
    Retype {
        /// Session ID
        session_id: String,

        /// Exercise ID
        exercise_id: String,

        /// New type: strength, cardio, flexibility or sprints
        exercise_type: ExerciseType,
    },

    /// Every logged occurrence of an exercise
    History {
        /// Exercise name (exact match)
        name: String,
    },

    /// List the server's exercise catalog
    Catalog,
}

#[derive(Subcommand)]
enum TemplateSubcommands {
    /// List saved templates
    List,

    /// Save an exercise from a session as a template
    Save {
        /// Session ID
        session_id: String,

        /// Exercise ID
        exercise_id: String,
    },

    /// Add a fresh copy of a template to a session
    Use {
        /// Template ID
        template_id: String,

        /// Session ID
        session_id: String,
    },

    /// Delete a template
    Delete {
        /// Template ID
        id: String,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Commands::Completions { shell } = self.command {
            generate_completions(shell);
            return Ok(());
        }

        let ctx = AppContext::new(self.config, self.offline)?;

        match self.command {
            Commands::Session(subcmd) => match subcmd {
                SessionSubcommands::List { planned, limit } => {
                    session::list_sessions(&ctx, planned, limit).await
                }
                SessionSubcommands::Show { id } => session::show_session(&ctx, &id).await,
                SessionSubcommands::Log(cmd) => cmd.execute(&ctx).await,
                SessionSubcommands::Delete { id, force } => {
                    session::delete_session(&ctx, &id, force).await
                }
                SessionSubcommands::Complete { id } => session::complete_session(&ctx, &id).await,
                SessionSubcommands::Rate {
                    id,
                    rating,
                    feedback,
                } => session::rate_session(&ctx, &id, rating, feedback).await,
            },
            Commands::Exercise(subcmd) => match subcmd {
                ExerciseSubcommands::Add(cmd) => cmd.execute(&ctx).await,
                ExerciseSubcommands::Remove {
                    session_id,
                    exercise_id,
                } => exercise::remove_exercise(&ctx, &session_id, &exercise_id).await,
                ExerciseSubcommands::AddEntry {
                    session_id,
                    exercise_id,
                } => exercise::add_entry(&ctx, &session_id, &exercise_id).await,
                ExerciseSubcommands::RemoveEntry {
                    session_id,
                    exercise_id,
                    entry_id,
                } => exercise::remove_entry(&ctx, &session_id, &exercise_id, &entry_id).await,
                ExerciseSubcommands::Retype {
                    session_id,
                    exercise_id,
                    exercise_type,
                } => exercise::retype(&ctx, &session_id, &exercise_id, exercise_type).await,
                ExerciseSubcommands::History { name } => exercise::history(&ctx, &name).await,
                ExerciseSubcommands::Catalog => exercise::catalog(&ctx).await,
            },
            Commands::Template(subcmd) => match subcmd {
                TemplateSubcommands::List => template::list_templates(&ctx).await,
                TemplateSubcommands::Save {
                    session_id,
                    exercise_id,
                } => template::save_template(&ctx, &session_id, &exercise_id).await,
                TemplateSubcommands::Use {
                    template_id,
                    session_id,
                } => template::use_template(&ctx, &template_id, &session_id).await,
                TemplateSubcommands::Delete { id } => template::delete_template(&ctx, &id).await,
            },
            Commands::Progress(cmd) => cmd.execute(&ctx).await,
            Commands::Stats(cmd) => cmd.execute(&ctx).await,
            Commands::Calendar(cmd) => cmd.execute(&ctx).await,
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(&ctx),
                ConfigSubcommands::Init { force } => config_cmd::init_config(&ctx, force),
            },
            Commands::Completions { .. } => Ok(()),
        }
    }
}

/// Settings shared by every command
pub struct AppContext {
    config: Config,
    config_path: PathBuf,
    offline: bool,
}

impl AppContext {
    pub fn new(config_path: Option<PathBuf>, offline: bool) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => Config::config_file()?,
        };
        let config = Config::load_from(&config_path)?;

        Ok(Self {
            config,
            config_path,
            offline,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Open the session store from the cache, then load from the server
    /// unless offline. A failed load falls back to the cached sessions.
    pub async fn open_store(&self) -> Result<SessionStore<ApiClient>> {
        let client = ApiClient::new(&self.config)?;

        let mut store = match LocalCache::init(&self.config) {
            Ok(cache) => SessionStore::with_cache(client, cache),
            Err(e) => {
                tracing::warn!("Local cache unavailable: {:#}", e);
                SessionStore::new(client)
            }
        };

        if self.offline {
            tracing::info!("Offline mode, using cached sessions");
            return Ok(store);
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Loading sessions...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = store.refresh().await;
        spinner.finish_and_clear();

        if result.is_err() {
            print_notices(&mut store);
            println!("{}", "Showing cached sessions".yellow());
            println!();
        }

        Ok(store)
    }
}

/// Print and clear the store's queued notices
pub fn print_notices<R: SessionRemote>(store: &mut SessionStore<R>) {
    for notice in store.drain_notices() {
        match notice.level {
            NoticeLevel::Success => println!("{} {}", "✓".green(), notice.message),
            NoticeLevel::Error => {
                eprintln!("{} {}", format!("{}:", notice.title).red().bold(), notice.message)
            }
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
