mod common;

use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use workout_log::models::{ExerciseSession, ExerciseType};
use workout_log::services::metrics::{build_time_series, exercise_history, unique_exercise_names};
use workout_log::services::PointMetrics;

#[test]
fn test_bench_press_progression() {
    // Logged newest first to check ordering
    let sessions = vec![
        session(date(2024, 1, 8), "Push B", vec![strength("Bench Press", 10, 55.0, 3)]),
        session(date(2024, 1, 1), "Push A", vec![strength("Bench Press", 10, 50.0, 3)]),
    ];

    let series = build_time_series(&sessions, "Bench Press");

    assert_eq!(series.exercise_type, Some(ExerciseType::Strength));
    assert_eq!(series.points.len(), 2);
    assert_eq!(series.points[0].date, date(2024, 1, 1));
    assert_eq!(
        series.points[0].metrics,
        PointMetrics::Strength { weight: 50.0, volume: 1500.0 }
    );
    assert_eq!(series.points[1].date, date(2024, 1, 8));
    assert_eq!(
        series.points[1].metrics,
        PointMetrics::Strength { weight: 55.0, volume: 1650.0 }
    );
}

#[test]
fn test_legacy_records_compute_same_volume() {
    let legacy: ExerciseSession = serde_json::from_value(json!({
        "id": "old",
        "date": "2023-12-20",
        "name": "Legacy push",
        "exercises": [
            { "id": "e1", "name": "Bench Press", "type": "strength", "setCount": 3, "reps": 10, "weight": 45 }
        ]
    }))
    .unwrap();
    let sessions = vec![legacy];

    let series = build_time_series(&sessions, "Bench Press");
    assert_eq!(
        series.points[0].metrics,
        PointMetrics::Strength { weight: 45.0, volume: 1350.0 }
    );
}

#[test]
fn test_sessions_without_the_name_contribute_nothing() {
    let sessions = vec![
        session(date(2024, 1, 1), "Push", vec![strength("Bench Press", 10, 50.0, 3)]),
        session(date(2024, 1, 2), "Run", vec![cardio("Jog", 1800)]),
        session(date(2024, 1, 3), "Push", vec![strength("bench press", 10, 50.0, 3)]),
    ];

    let series = build_time_series(&sessions, "Bench Press");
    assert_eq!(series.points.len(), 1);

    let missing = build_time_series(&sessions, "Deadlift");
    assert_eq!(missing.exercise_type, None);
    assert!(missing.points.is_empty());
}

#[test]
fn test_planned_sessions_are_not_charted() {
    let sessions = vec![
        session(date(2024, 1, 1), "Done", vec![cardio("Row", 1200)]),
        planned(session(date(2024, 1, 5), "Next", vec![cardio("Row", 2400)])),
    ];

    let series = build_time_series(&sessions, "Row");
    assert_eq!(series.points.len(), 1);
    assert_eq!(series.points[0].metrics, PointMetrics::Duration { duration: 1200 });
}

#[test]
fn test_type_pinned_to_first_chronological_occurrence() {
    // The later-dated cardio entry appears first in the list
    let sessions = vec![
        session(date(2024, 2, 1), "Changed", vec![cardio("Circuit", 900)]),
        session(date(2024, 1, 1), "Original", vec![strength("Circuit", 12, 20.0, 2)]),
    ];

    let series = build_time_series(&sessions, "Circuit");

    assert_eq!(series.exercise_type, Some(ExerciseType::Strength));
    assert_eq!(
        series.points[1].metrics,
        PointMetrics::Strength { weight: 0.0, volume: 0.0 }
    );
}

#[test]
fn test_sprint_series() {
    let sessions = vec![session(
        date(2024, 3, 1),
        "Track",
        vec![sprints("Flying 100s", 100.0, 12, 6)],
    )];

    let series = build_time_series(&sessions, "Flying 100s");
    assert_eq!(
        series.points[0].metrics,
        PointMetrics::Sprints { distance: 600.0, duration: 72 }
    );
}

#[test]
fn test_same_day_points_keep_input_order() {
    let sessions = vec![
        session(date(2024, 1, 1), "Morning", vec![cardio("Bike", 600)]),
        session(date(2024, 1, 1), "Evening", vec![cardio("Bike", 1200)]),
    ];

    let series = build_time_series(&sessions, "Bike");
    let durations: Vec<_> = series.points.iter().map(|p| p.metrics.clone()).collect();
    assert_eq!(
        durations,
        vec![
            PointMetrics::Duration { duration: 600 },
            PointMetrics::Duration { duration: 1200 },
        ]
    );
}

#[test]
fn test_unique_names_and_history() {
    let sessions = vec![
        session(date(2024, 1, 9), "B", vec![strength("Squat", 5, 100.0, 5), cardio("Bike", 600)]),
        session(date(2024, 1, 2), "A", vec![strength("Squat", 5, 95.0, 5)]),
    ];

    assert_eq!(unique_exercise_names(&sessions), vec!["Squat", "Bike"]);

    let history = exercise_history(&sessions, "Squat");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].session_name, "A");
    assert_eq!(history[1].date, date(2024, 1, 9));
}
