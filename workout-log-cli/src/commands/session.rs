use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;
use dialoguer::Confirm;

use workout_log::models::{ExerciseSession, NewSession};
use workout_log::services::period::today;

use super::{print_notices, AppContext, PayloadArgs};
use crate::ui;

#[derive(Args)]
pub struct LogSessionCommand {
    /// Session name
    #[arg(short, long)]
    name: String,

    /// Session date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Plan the session instead of logging it as done
    #[arg(long)]
    planned: bool,

    /// Free-form notes
    #[arg(long)]
    notes: Option<String>,

    /// Name of an exercise to log, described by the payload flags
    #[arg(short, long)]
    exercise: Option<String>,

    /// Add a fresh copy of a saved template (repeatable)
    #[arg(long = "template")]
    templates: Vec<String>,

    #[command(flatten)]
    payload: PayloadArgs,
}

impl LogSessionCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let mut store = ctx.open_store().await?;

        let date = self.date.unwrap_or_else(today);
        let mut draft = ExerciseSession::draft(self.name, date, self.planned);
        draft.notes = self.notes;

        if let Some(name) = self.exercise {
            draft.add_exercise(self.payload.build(name)?);
        }
        for template_id in &self.templates {
            draft.add_exercise(store.materialize_template(template_id)?);
        }

        if !draft.can_save() {
            println!(
                "{}",
                "A session needs a name and at least one exercise".yellow()
            );
            println!("Add one with --exercise or --template");
            return Ok(());
        }

        let result = store.create_session(NewSession::from(draft)).await;
        print_notices(&mut store);
        let created = result?;

        println!();
        ui::print_session(&created);

        Ok(())
    }
}

pub async fn list_sessions(ctx: &AppContext, planned: bool, limit: usize) -> Result<()> {
    let store = ctx.open_store().await?;

    let mut sessions = if planned {
        store.planned_sessions()
    } else {
        store.completed_sessions()
    };

    // Upcoming plans read soonest first, history newest first
    if planned {
        sessions.sort_by(|a, b| a.date.cmp(&b.date));
    } else {
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
    }

    let title = if planned {
        "Planned Sessions"
    } else {
        "Recent Sessions"
    };
    println!("{}", title.bold());
    println!();

    if sessions.is_empty() {
        println!("No sessions yet");
        return Ok(());
    }

    for session in sessions.iter().take(limit) {
        println!("{}", ui::session_line(session));
    }

    if sessions.len() > limit {
        println!();
        println!("... and {} more (use --limit)", sessions.len() - limit);
    }

    Ok(())
}

pub async fn show_session(ctx: &AppContext, id: &str) -> Result<()> {
    let store = ctx.open_store().await?;
    let session = store
        .session(id)
        .with_context(|| format!("Session not found: {}", id))?;

    ui::print_session(session);

    Ok(())
}

pub async fn delete_session(ctx: &AppContext, id: &str, force: bool) -> Result<()> {
    let mut store = ctx.open_store().await?;
    let name = store
        .session(id)
        .with_context(|| format!("Session not found: {}", id))?
        .name
        .clone();

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete session '{}'?", name))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    let result = store.delete_session(id).await;
    print_notices(&mut store);
    result?;

    Ok(())
}

pub async fn complete_session(ctx: &AppContext, id: &str) -> Result<()> {
    let mut store = ctx.open_store().await?;

    let result = store.complete_planned(id, today()).await;
    print_notices(&mut store);
    let session = result?;

    println!("{} moved to {}", session.name.bold(), session.date);

    Ok(())
}

pub async fn rate_session(
    ctx: &AppContext,
    id: &str,
    rating: u8,
    feedback: Option<String>,
) -> Result<()> {
    let mut store = ctx.open_store().await?;

    let result = store.rate_session(id, rating, feedback).await;
    print_notices(&mut store);
    let session = result?;

    println!(
        "{} rated {}",
        session.name.bold(),
        ui::rating_stars(session.rating).yellow()
    );

    Ok(())
}
