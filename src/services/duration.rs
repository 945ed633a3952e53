use crate::models::{Exercise, ExercisePayload};

/// Estimated seconds per strength set
pub const SECONDS_PER_SET: u64 = 60;

/// Seconds contributed by a single exercise
pub fn exercise_duration(exercise: &Exercise) -> u64 {
    match &exercise.payload {
        ExercisePayload::Strength { sets } => sets
            .iter()
            .map(|set| u64::from(set.set_count) * SECONDS_PER_SET)
            .fold(0, u64::saturating_add),
        ExercisePayload::Sprints { sprints } => sprints
            .iter()
            .map(|sprint| u64::from(sprint.duration) * u64::from(sprint.rep_count))
            .fold(0, u64::saturating_add),
        ExercisePayload::Cardio { duration } | ExercisePayload::Flexibility { duration } => {
            u64::from(*duration)
        }
    }
}

/// Total session duration in seconds, derived from its exercises
pub fn compute_session_duration(exercises: &[Exercise]) -> u64 {
    exercises
        .iter()
        .map(exercise_duration)
        .fold(0, u64::saturating_add)
}

/// Render seconds as `"{minutes}m {seconds}s"`
pub fn format_duration(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}
