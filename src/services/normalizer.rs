//! Reconciles the two schema generations of exercise records.
//!
//! Records arrive either with structured sub-entries (`sets`, `sprints`) or
//! with the legacy flat scalars (`setCount`/`reps`/`weight` for strength,
//! `reps`/`distance`/`duration` for sprints). A non-empty structured list
//! always wins; otherwise a present legacy trio becomes a single entry;
//! otherwise the exercise carries zero quantity. Nothing here fails: stored
//! history must always load.

use crate::models::exercise::new_id;
use crate::models::{
    Exercise, ExercisePayload, ExerciseRecord, ExerciseTemplate, ExerciseType, SetsField, Sprint,
    StrengthSet,
};

/// Seconds seeded for a fresh cardio exercise
pub const DEFAULT_CARDIO_DURATION: u32 = 1800;
/// Seconds seeded for a fresh flexibility exercise
pub const DEFAULT_FLEXIBILITY_DURATION: u32 = 900;

/// Convert a wire record into the canonical exercise
pub fn normalize(record: ExerciseRecord) -> Exercise {
    let payload = payload_from_record(&record);
    Exercise {
        id: record.id.unwrap_or_else(new_id),
        name: record.name,
        payload,
        notes: record.notes,
    }
}

/// Resolve the authoritative payload of a record for its declared type
pub fn payload_from_record(record: &ExerciseRecord) -> ExercisePayload {
    match record.exercise_type {
        ExerciseType::Strength => ExercisePayload::Strength {
            sets: strength_sets(record),
        },
        ExerciseType::Cardio => ExercisePayload::Cardio {
            duration: record.duration.unwrap_or(0),
        },
        ExerciseType::Flexibility => ExercisePayload::Flexibility {
            duration: record.duration.unwrap_or(0),
        },
        ExerciseType::Sprints => ExercisePayload::Sprints {
            sprints: sprint_entries(record),
        },
    }
}

fn strength_sets(record: &ExerciseRecord) -> Vec<StrengthSet> {
    if let Some(SetsField::Entries(sets)) = &record.sets {
        if !sets.is_empty() {
            return sets.clone();
        }
    }

    let legacy_count = record.set_count.or(match record.sets {
        Some(SetsField::Count(count)) => Some(count),
        _ => None,
    });

    match legacy_count {
        Some(set_count) if set_count > 0 => vec![StrengthSet::new(
            record.reps.unwrap_or(0),
            record.weight.unwrap_or(0.0),
            set_count,
        )],
        _ => Vec::new(),
    }
}

fn sprint_entries(record: &ExerciseRecord) -> Vec<Sprint> {
    if let Some(sprints) = &record.sprints {
        if !sprints.is_empty() {
            return sprints.clone();
        }
    }

    match record.reps {
        Some(reps) if reps > 0 && (record.distance.is_some() || record.duration.is_some()) => {
            vec![Sprint::new(
                record.distance.unwrap_or(0.0),
                record.duration.unwrap_or(0),
                reps,
            )]
        }
        _ => Vec::new(),
    }
}

/// Payload seeded for a freshly chosen exercise type
pub fn default_payload(exercise_type: ExerciseType) -> ExercisePayload {
    match exercise_type {
        ExerciseType::Strength => ExercisePayload::Strength {
            sets: vec![StrengthSet::new(10, 0.0, 3)],
        },
        ExerciseType::Cardio => ExercisePayload::Cardio {
            duration: DEFAULT_CARDIO_DURATION,
        },
        ExerciseType::Flexibility => ExercisePayload::Flexibility {
            duration: DEFAULT_FLEXIBILITY_DURATION,
        },
        ExerciseType::Sprints => ExercisePayload::Sprints {
            sprints: vec![Sprint::new(100.0, 15, 5)],
        },
    }
}

/// Switch an exercise to another type.
///
/// Payload belonging to the old type is dropped. Data already valid for the
/// target is kept: a non-empty list when the type is unchanged, and a
/// non-zero duration when moving between cardio and flexibility. Everything
/// else gets the defaults of [`default_payload`].
pub fn change_type(exercise: Exercise, new_type: ExerciseType) -> Exercise {
    let payload = match (exercise.payload, new_type) {
        (ExercisePayload::Strength { sets }, ExerciseType::Strength) if !sets.is_empty() => {
            ExercisePayload::Strength { sets }
        }
        (ExercisePayload::Sprints { sprints }, ExerciseType::Sprints) if !sprints.is_empty() => {
            ExercisePayload::Sprints { sprints }
        }
        (
            ExercisePayload::Cardio { duration } | ExercisePayload::Flexibility { duration },
            ExerciseType::Cardio,
        ) if duration > 0 => ExercisePayload::Cardio { duration },
        (
            ExercisePayload::Cardio { duration } | ExercisePayload::Flexibility { duration },
            ExerciseType::Flexibility,
        ) if duration > 0 => ExercisePayload::Flexibility { duration },
        (_, target) => default_payload(target),
    };

    Exercise { payload, ..exercise }
}

impl From<ExerciseRecord> for Exercise {
    fn from(record: ExerciseRecord) -> Self {
        normalize(record)
    }
}

impl From<ExerciseRecord> for ExerciseTemplate {
    fn from(record: ExerciseRecord) -> Self {
        let exercise = normalize(record);
        Self {
            id: exercise.id,
            name: exercise.name,
            payload: exercise.payload,
            notes: exercise.notes,
        }
    }
}
