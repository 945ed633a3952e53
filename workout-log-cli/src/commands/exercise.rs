use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use workout_log::api::ApiClient;
use workout_log::models::{Exercise, ExercisePayload, ExerciseType};
use workout_log::services::metrics::exercise_history;
use workout_log::services::{change_type, default_payload, SessionStore};

use super::{print_notices, AppContext};
use crate::ui;

/// Quantities for a new exercise; anything unset takes the type's default
#[derive(Args, Debug, Clone)]
pub struct PayloadArgs {
    /// Exercise type: strength, cardio, flexibility or sprints
    #[arg(long = "type", default_value = "strength")]
    exercise_type: ExerciseType,

    /// Reps per set, or repetitions of a sprint
    #[arg(long)]
    reps: Option<u32>,

    /// Weight per rep in kg
    #[arg(long)]
    weight: Option<f64>,

    /// Number of sets
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    sets: Option<u32>,

    /// Seconds of cardio or flexibility work, or seconds per sprint
    #[arg(long)]
    duration: Option<u32>,

    /// Meters per sprint
    #[arg(long)]
    distance: Option<f64>,
}

impl PayloadArgs {
    pub fn build(&self, name: impl Into<String>) -> Result<Exercise> {
        if self.exercise_type == ExerciseType::Sprints && self.reps == Some(0) {
            bail!("A sprint needs at least one repetition");
        }
        if self.weight.is_some_and(|weight| weight < 0.0) {
            bail!("Weight cannot be negative");
        }

        let mut payload = default_payload(self.exercise_type);

        match &mut payload {
            ExercisePayload::Strength { sets } => {
                for set in sets.iter_mut() {
                    set.reps = self.reps.unwrap_or(set.reps);
                    set.weight = self.weight.unwrap_or(set.weight);
                    set.set_count = self.sets.unwrap_or(set.set_count);
                }
            }
            ExercisePayload::Cardio { duration } | ExercisePayload::Flexibility { duration } => {
                *duration = self.duration.unwrap_or(*duration);
            }
            ExercisePayload::Sprints { sprints } => {
                for sprint in sprints.iter_mut() {
                    sprint.distance = self.distance.unwrap_or(sprint.distance);
                    sprint.duration = self.duration.unwrap_or(sprint.duration);
                    sprint.rep_count = self.reps.unwrap_or(sprint.rep_count);
                }
            }
        }

        Ok(Exercise::new(name, payload))
    }
}

#[derive(Args)]
pub struct AddExerciseCommand {
    /// Session ID
    session_id: String,

    /// Exercise name
    name: String,

    /// Free-form notes
    #[arg(long)]
    notes: Option<String>,

    #[command(flatten)]
    payload: PayloadArgs,
}

impl AddExerciseCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let mut exercise = self.payload.build(self.name)?;
        exercise.notes = self.notes;

        let mut store = ctx.open_store().await?;

        let result = store.add_exercise(&self.session_id, exercise).await;
        print_notices(&mut store);
        let session = result?;

        println!();
        ui::print_session(&session);

        Ok(())
    }
}

fn find_exercise(
    store: &SessionStore<ApiClient>,
    session_id: &str,
    exercise_id: &str,
) -> Result<Exercise> {
    store
        .session(session_id)
        .with_context(|| format!("Session not found: {}", session_id))?
        .exercise(exercise_id)
        .cloned()
        .with_context(|| format!("Exercise not found: {}", exercise_id))
}

async fn save_edit(
    store: &mut SessionStore<ApiClient>,
    session_id: &str,
    exercise: Exercise,
) -> Result<()> {
    let result = store.replace_exercise(session_id, exercise).await;
    print_notices(store);
    let session = result?;

    println!();
    ui::print_session(&session);

    Ok(())
}

pub async fn remove_exercise(ctx: &AppContext, session_id: &str, exercise_id: &str) -> Result<()> {
    let mut store = ctx.open_store().await?;

    let result = store.remove_exercise(session_id, exercise_id).await;
    print_notices(&mut store);
    result?;

    Ok(())
}

pub async fn add_entry(ctx: &AppContext, session_id: &str, exercise_id: &str) -> Result<()> {
    let mut store = ctx.open_store().await?;
    let mut exercise = find_exercise(&store, session_id, exercise_id)?;

    let added = match exercise.exercise_type() {
        ExerciseType::Strength => exercise.add_set(),
        ExerciseType::Sprints => exercise.add_sprint(),
        other => bail!("{} exercises have no sets or sprints", other),
    };
    if !added {
        bail!("Could not add an entry to {}", exercise.name);
    }

    save_edit(&mut store, session_id, exercise).await
}

pub async fn remove_entry(
    ctx: &AppContext,
    session_id: &str,
    exercise_id: &str,
    entry_id: &str,
) -> Result<()> {
    let mut store = ctx.open_store().await?;
    let mut exercise = find_exercise(&store, session_id, exercise_id)?;

    if !exercise.remove_entry(entry_id) {
        bail!("No set or sprint {} in {}", entry_id, exercise.name);
    }

    save_edit(&mut store, session_id, exercise).await
}

pub async fn retype(
    ctx: &AppContext,
    session_id: &str,
    exercise_id: &str,
    exercise_type: ExerciseType,
) -> Result<()> {
    let mut store = ctx.open_store().await?;
    let exercise = find_exercise(&store, session_id, exercise_id)?;

    if exercise.exercise_type() == exercise_type {
        println!("{} is already {}", exercise.name, exercise_type);
        return Ok(());
    }

    save_edit(&mut store, session_id, change_type(exercise, exercise_type)).await
}

pub async fn history(ctx: &AppContext, name: &str) -> Result<()> {
    let store = ctx.open_store().await?;
    let entries = exercise_history(store.sessions(), name);

    println!("{}", format!("History: {}", name).bold());
    println!();

    if entries.is_empty() {
        println!("{} has not been logged yet", name);
        return Ok(());
    }

    for entry in entries {
        println!(
            "{}  {:<24} {}",
            entry.date,
            entry.session_name,
            ui::payload_summary(&entry.exercise.payload)
        );
    }

    Ok(())
}

pub async fn catalog(ctx: &AppContext) -> Result<()> {
    let mut store = ctx.open_store().await?;

    let result = store.exercise_catalog().await;
    print_notices(&mut store);
    let exercises = result?;

    println!("{}", "Exercise Catalog".bold());
    println!();

    if exercises.is_empty() {
        println!("The catalog is empty");
    }
    for exercise in &exercises {
        println!("  {}", ui::exercise_line(exercise));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use workout_log::services::normalizer::{DEFAULT_CARDIO_DURATION, DEFAULT_FLEXIBILITY_DURATION};

    fn args(exercise_type: ExerciseType) -> PayloadArgs {
        PayloadArgs {
            exercise_type,
            reps: None,
            weight: None,
            sets: None,
            duration: None,
            distance: None,
        }
    }

    #[test]
    fn test_build_uses_type_defaults() {
        let cardio = args(ExerciseType::Cardio).build("Run").unwrap();
        assert_eq!(
            cardio.payload,
            ExercisePayload::Cardio { duration: DEFAULT_CARDIO_DURATION }
        );

        let stretch = args(ExerciseType::Flexibility).build("Stretch").unwrap();
        assert_eq!(
            stretch.payload,
            ExercisePayload::Flexibility { duration: DEFAULT_FLEXIBILITY_DURATION }
        );
    }

    #[test]
    fn test_build_overrides_strength_fields() {
        let bench = PayloadArgs {
            weight: Some(60.0),
            sets: Some(5),
            ..args(ExerciseType::Strength)
        }
        .build("Bench Press")
        .unwrap();

        match bench.payload {
            ExercisePayload::Strength { sets } => {
                assert_eq!(sets.len(), 1);
                assert_eq!(sets[0].reps, 10);
                assert_eq!(sets[0].weight, 60.0);
                assert_eq!(sets[0].set_count, 5);
            }
            other => panic!("expected strength payload, got {:?}", other),
        }
    }

    #[test]
    fn test_build_sprint_reps_map_to_rep_count() {
        let sprints = PayloadArgs {
            reps: Some(8),
            distance: Some(60.0),
            ..args(ExerciseType::Sprints)
        }
        .build("Flying 60s")
        .unwrap();

        match sprints.payload {
            ExercisePayload::Sprints { sprints } => {
                assert_eq!(sprints[0].rep_count, 8);
                assert_eq!(sprints[0].distance, 60.0);
                assert_eq!(sprints[0].duration, 15);
            }
            other => panic!("expected sprint payload, got {:?}", other),
        }
    }

    #[test]
    fn test_build_rejects_sprints_without_reps() {
        let zero = PayloadArgs {
            reps: Some(0),
            ..args(ExerciseType::Sprints)
        };
        assert!(zero.build("Flying 60s").is_err());

        // zero reps is a valid strength set
        let strength = PayloadArgs {
            reps: Some(0),
            ..args(ExerciseType::Strength)
        };
        assert!(strength.build("Plank hold").is_ok());
    }

    #[test]
    fn test_build_rejects_negative_weight() {
        let bench = PayloadArgs {
            weight: Some(-5.0),
            ..args(ExerciseType::Strength)
        };
        assert!(bench.build("Bench Press").is_err());
    }
}
