//! Per-exercise time series across sessions.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

use crate::models::{Exercise, ExercisePayload, ExerciseSession, ExerciseType, Sprint, StrengthSet};

/// Metrics of one chart point, shaped by the series' exercise type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointMetrics {
    Strength { weight: f64, volume: f64 },
    Duration { duration: u64 },
    Sprints { distance: f64, duration: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub metrics: PointMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub exercise_name: String,
    /// Type of the first chronological occurrence; `None` when the name never appears
    pub exercise_type: Option<ExerciseType>,
    pub points: Vec<SeriesPoint>,
}

/// One logged instance of an exercise with its session context
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry<'a> {
    pub date: NaiveDate,
    pub session_name: &'a str,
    pub exercise: &'a Exercise,
}

/// Heaviest set weight and total volume (`setCount × reps × weight`)
pub fn strength_metrics(sets: &[StrengthSet]) -> (f64, f64) {
    let weight = sets.iter().map(|set| set.weight).fold(0.0, f64::max);
    let volume = sets
        .iter()
        .map(|set| f64::from(set.set_count) * f64::from(set.reps) * set.weight)
        .sum();
    (weight, volume)
}

/// Total distance and duration, each weighted by rep count
pub fn sprint_totals(sprints: &[Sprint]) -> (f64, u64) {
    sprints.iter().fold((0.0, 0), |(distance, duration), sprint| {
        (
            distance + sprint.distance * f64::from(sprint.rep_count),
            duration + u64::from(sprint.duration) * u64::from(sprint.rep_count),
        )
    })
}

/// Compute metrics for `exercise` using the formulas of `series_type`.
///
/// A payload of another type yields zeros rather than an error; names reused
/// across types are not validated anywhere.
pub fn point_metrics(series_type: ExerciseType, exercise: &Exercise) -> PointMetrics {
    match series_type {
        ExerciseType::Strength => {
            let (weight, volume) = match &exercise.payload {
                ExercisePayload::Strength { sets } => strength_metrics(sets),
                _ => (0.0, 0.0),
            };
            PointMetrics::Strength { weight, volume }
        }
        ExerciseType::Cardio | ExerciseType::Flexibility => {
            let duration = match &exercise.payload {
                ExercisePayload::Cardio { duration } | ExercisePayload::Flexibility { duration } => {
                    u64::from(*duration)
                }
                _ => 0,
            };
            PointMetrics::Duration { duration }
        }
        ExerciseType::Sprints => {
            let (distance, duration) = match &exercise.payload {
                ExercisePayload::Sprints { sprints } => sprint_totals(sprints),
                _ => (0.0, 0),
            };
            PointMetrics::Sprints { distance, duration }
        }
    }
}

fn find_named<'a>(session: &'a ExerciseSession, name: &str) -> Option<&'a Exercise> {
    session.exercises().iter().find(|exercise| exercise.name == name)
}

/// Sessions containing `name`, oldest first; ties keep input order
fn chronological<'a>(
    sessions: impl IntoIterator<Item = &'a ExerciseSession>,
    name: &str,
) -> Vec<(&'a ExerciseSession, &'a Exercise)> {
    let mut matches: Vec<_> = sessions
        .into_iter()
        .filter_map(|session| find_named(session, name).map(|exercise| (session, exercise)))
        .collect();
    matches.sort_by_key(|(session, _)| session.date);
    matches
}

/// Build the chart series for one exercise name over completed sessions.
///
/// Names match exactly. Planned sessions are skipped. Each matching session
/// contributes one point from its first exercise with that name, and every
/// point uses the type of the earliest occurrence.
pub fn build_time_series(sessions: &[ExerciseSession], exercise_name: &str) -> TimeSeries {
    let matches = chronological(
        sessions.iter().filter(|session| !session.planned),
        exercise_name,
    );

    let exercise_type = matches.first().map(|(_, exercise)| exercise.exercise_type());

    let points = match exercise_type {
        Some(series_type) => matches
            .iter()
            .map(|(session, exercise)| SeriesPoint {
                date: session.date,
                metrics: point_metrics(series_type, exercise),
            })
            .collect(),
        None => Vec::new(),
    };

    tracing::debug!(
        "Built series for {:?} with {} points",
        exercise_name,
        points.len()
    );

    TimeSeries {
        exercise_name: exercise_name.to_string(),
        exercise_type,
        points,
    }
}

/// Distinct exercise names in first-seen order
pub fn unique_exercise_names(sessions: &[ExerciseSession]) -> Vec<String> {
    let mut seen = HashSet::new();
    sessions
        .iter()
        .flat_map(|session| session.exercises())
        .filter(|exercise| seen.insert(exercise.name.as_str()))
        .map(|exercise| exercise.name.clone())
        .collect()
}

/// Every session that logged `exercise_name`, oldest first
pub fn exercise_history<'a>(
    sessions: &'a [ExerciseSession],
    exercise_name: &str,
) -> Vec<HistoryEntry<'a>> {
    chronological(sessions, exercise_name)
        .into_iter()
        .map(|(session, exercise)| HistoryEntry {
            date: session.date,
            session_name: &session.name,
            exercise,
        })
        .collect()
}
