// Plain-text rendering of sessions and exercises

use colored::Colorize;
use workout_log::models::{Exercise, ExercisePayload, ExerciseSession};
use workout_log::services::format_duration;

/// One-line description of an exercise's quantities
pub fn payload_summary(payload: &ExercisePayload) -> String {
    match payload {
        ExercisePayload::Strength { sets } if sets.is_empty() => "no sets".to_string(),
        ExercisePayload::Strength { sets } => sets
            .iter()
            .map(|set| format!("{}x{} @ {}kg", set.set_count, set.reps, set.weight))
            .collect::<Vec<_>>()
            .join(", "),
        ExercisePayload::Cardio { duration } | ExercisePayload::Flexibility { duration } => {
            format_duration(u64::from(*duration))
        }
        ExercisePayload::Sprints { sprints } if sprints.is_empty() => "no sprints".to_string(),
        ExercisePayload::Sprints { sprints } => sprints
            .iter()
            .map(|sprint| {
                format!(
                    "{}x{}m in {}s",
                    sprint.rep_count, sprint.distance, sprint.duration
                )
            })
            .collect::<Vec<_>>()
            .join(", "),
    }
}

pub fn rating_stars(rating: Option<u8>) -> String {
    match rating.filter(|r| *r > 0) {
        Some(r) => "★".repeat(usize::from(r)),
        None => "-".to_string(),
    }
}

/// Summary row used by session listings
pub fn session_line(session: &ExerciseSession) -> String {
    format!(
        "{}  {:<24} {:>9}  {} exercises  {}  {}",
        session.date,
        session.name,
        format_duration(session.duration()),
        session.exercises().len(),
        rating_stars(session.rating).yellow(),
        session.id.dimmed()
    )
}

pub fn exercise_line(exercise: &Exercise) -> String {
    format!(
        "{} {} {}  {}",
        exercise.name.bold(),
        format!("({})", exercise.exercise_type()).cyan(),
        payload_summary(&exercise.payload),
        exercise.id.dimmed()
    )
}

pub fn print_session(session: &ExerciseSession) {
    let status = if session.planned { "planned" } else { "completed" };

    println!("{}", session.name.bold());
    println!("────────────────────────────────");
    println!("ID:        {}", session.id);
    println!("Date:      {}", session.date);
    println!("Status:    {}", status);
    println!("Duration:  {}", format_duration(session.duration()));
    if !session.planned {
        println!("Rating:    {}", rating_stars(session.rating).yellow());
    }
    if let Some(feedback) = &session.feedback {
        println!("Feedback:  {}", feedback);
    }
    if let Some(notes) = &session.notes {
        println!("Notes:     {}", notes);
    }

    println!();
    if session.exercises().is_empty() {
        println!("No exercises");
    }
    for exercise in session.exercises() {
        println!("  {}", exercise_line(exercise));
        if let ExercisePayload::Strength { sets } = &exercise.payload {
            for set in sets {
                println!("      set {}", set.id.dimmed());
            }
        }
        if let ExercisePayload::Sprints { sprints } = &exercise.payload {
            for sprint in sprints {
                println!("      sprint {}", sprint.id.dimmed());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workout_log::models::{Sprint, StrengthSet};

    #[test]
    fn test_payload_summary() {
        let strength = ExercisePayload::Strength {
            sets: vec![StrengthSet::new(10, 50.0, 3)],
        };
        assert_eq!(payload_summary(&strength), "3x10 @ 50kg");

        let sprints = ExercisePayload::Sprints {
            sprints: vec![Sprint::new(100.0, 15, 5)],
        };
        assert_eq!(payload_summary(&sprints), "5x100m in 15s");

        assert_eq!(
            payload_summary(&ExercisePayload::Cardio { duration: 1830 }),
            "30m 30s"
        );
        assert_eq!(
            payload_summary(&ExercisePayload::Strength { sets: vec![] }),
            "no sets"
        );
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(rating_stars(Some(3)), "★★★");
        assert_eq!(rating_stars(Some(0)), "-");
        assert_eq!(rating_stars(None), "-");
    }
}
